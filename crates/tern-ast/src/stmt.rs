//! Resolved statements.
//!
//! Update statements keep both their syntactic form and the list of simpler
//! statements the front end resolved them into (`resolved`). `Assign` and
//! `Call` only ever appear inside such resolved lists.

use serde::{Deserialize, Serialize};
use tern_common::SourceLoc;

use crate::expr::{BoundVar, Expr};
use crate::ty::Type;
use crate::DeclId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stmt {
    pub kind: StmtKind,
    #[serde(default)]
    pub loc: Option<SourceLoc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalVar {
    /// `_` for a discarded binding.
    pub name: String,
    pub ty: Type,
    #[serde(default)]
    pub is_ghost: bool,
}

impl LocalVar {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            is_ghost: false,
        }
    }

    pub fn ghost(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            is_ghost: true,
        }
    }

    pub fn is_discarded(&self) -> bool {
        self.name == "_"
    }
}

/// Right-hand side of an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AssignRhs {
    Expr {
        expr: Expr,
    },
    /// `*`
    Havoc,
    /// `new T[n]`, optionally with an initializer function or element list.
    NewArray {
        elem: Type,
        dims: Vec<Expr>,
        #[serde(default)]
        init: Option<Expr>,
        #[serde(default)]
        elements: Option<Vec<Expr>>,
    },
    /// `new C(args)` or `new C.Init(args)`.
    NewObject {
        class: Type,
        #[serde(default)]
        ctor: Option<DeclId>,
        #[serde(default)]
        args: Vec<Expr>,
    },
}

impl AssignRhs {
    pub fn expr(expr: Expr) -> Self {
        AssignRhs::Expr { expr }
    }
}

/// `lhs1, lhs2 := rhs1, rhs2` or a method call statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStmt {
    pub lhss: Vec<Expr>,
    pub rhss: Vec<AssignRhs>,
    #[serde(default)]
    pub resolved: Vec<Stmt>,
}

/// `lhs :- rhs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignOrReturnStmt {
    #[serde(default)]
    pub lhss: Vec<Expr>,
    pub rhs: Box<Expr>,
    #[serde(default)]
    pub resolved: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCaseStmt {
    pub ctor: DeclId,
    #[serde(default)]
    pub args: Vec<BoundVar>,
    #[serde(default)]
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProofKind {
    Assert,
    Assume,
    Calc,
    Reveal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StmtKind {
    Block {
        body: Vec<Stmt>,
    },
    VarDecl {
        locals: Vec<LocalVar>,
        /// An `Update` or `AssignOrReturn` statement initializing `locals`.
        #[serde(default)]
        update: Option<Box<Stmt>>,
    },
    /// `var (a, b) := e;`
    VarDeclPattern {
        pattern: Vec<LocalVar>,
        rhs: Expr,
    },
    Update(UpdateStmt),
    AssignOrReturn(AssignOrReturnStmt),
    /// `x :| P`
    AssignSuchThat {
        lhss: Vec<Expr>,
        constraint: Expr,
    },
    /// Resolved single assignment.
    Assign {
        lhs: Expr,
        rhs: AssignRhs,
    },
    /// Resolved method call.
    Call {
        #[serde(default)]
        lhss: Vec<Expr>,
        #[serde(default)]
        receiver: Option<Box<Expr>>,
        method: DeclId,
        #[serde(default)]
        type_args: Vec<Type>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    If {
        /// Absent for the nondeterministic `if *`.
        #[serde(default)]
        guard: Option<Expr>,
        then: Vec<Stmt>,
        #[serde(default)]
        els: Option<Box<Stmt>>,
    },
    While {
        #[serde(default)]
        guard: Option<Expr>,
        #[serde(default)]
        body: Option<Vec<Stmt>>,
    },
    For {
        var: BoundVar,
        start: Expr,
        /// Absent for `to *`.
        #[serde(default)]
        end: Option<Expr>,
        up: bool,
        #[serde(default)]
        body: Option<Vec<Stmt>>,
    },
    Break {
        #[serde(default)]
        label: Option<String>,
        #[serde(default = "one")]
        count: u32,
    },
    Return {
        #[serde(default)]
        values: Vec<Expr>,
    },
    Match {
        source: Expr,
        cases: Vec<MatchCaseStmt>,
    },
    Print {
        args: Vec<Expr>,
    },
    Expect {
        cond: Expr,
        #[serde(default)]
        message: Option<Expr>,
    },
    Proof {
        proof: ProofKind,
    },
}

fn one() -> u32 {
    1
}

impl Stmt {
    pub fn new(kind: StmtKind) -> Self {
        Self { kind, loc: None }
    }

    pub fn with_loc(mut self, loc: SourceLoc) -> Self {
        self.loc = Some(loc);
        self
    }

    /// Resolved `lhs := rhs`.
    pub fn assign(lhs: Expr, rhs: Expr) -> Self {
        Stmt::new(StmtKind::Assign {
            lhs,
            rhs: AssignRhs::expr(rhs),
        })
    }

    /// `lhs := rhs` together with its single-statement resolution.
    pub fn update(lhs: Expr, rhs: Expr) -> Self {
        let resolved = vec![Stmt::assign(lhs.clone(), rhs.clone())];
        Stmt::new(StmtKind::Update(UpdateStmt {
            lhss: vec![lhs],
            rhss: vec![AssignRhs::expr(rhs)],
            resolved,
        }))
    }

    /// `var name: ty := rhs;`
    pub fn var(name: impl Into<String>, ty: Type, rhs: Expr) -> Self {
        let name = name.into();
        let lhs = Expr::ident(name.clone(), ty.clone());
        Stmt::new(StmtKind::VarDecl {
            locals: vec![LocalVar::new(name, ty)],
            update: Some(Box::new(Stmt::update(lhs, rhs))),
        })
    }

    pub fn print(args: Vec<Expr>) -> Self {
        Stmt::new(StmtKind::Print { args })
    }
}
