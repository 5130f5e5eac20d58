//! Resolved expressions.

use serde::{Deserialize, Serialize};
use tern_common::SourceLoc;

use crate::ty::Type;
use crate::DeclId;

/// An expression together with its resolved type.
///
/// `ty` is optional only because the input is produced by an external front
/// end; the lowering reports a missing type wherever it needs one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expr {
    pub kind: ExprKind,
    #[serde(default)]
    pub ty: Option<Type>,
    #[serde(default)]
    pub loc: Option<SourceLoc>,
}

/// A variable bound by a let, lambda, quantifier, comprehension or case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundVar {
    pub name: String,
    pub ty: Type,
    #[serde(default)]
    pub is_ghost: bool,
}

impl BoundVar {
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Self {
            name: name.into(),
            ty,
            is_ghost: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Literal {
    Bool(bool),
    Char(char),
    String(String),
    /// Decimal digits with an optional leading `-`.
    Int(String),
    /// Decimal digits, a `.`, decimal digits, optional leading `-`.
    Real(String),
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    /// `!e`, boolean negation or bit-vector complement.
    Not,
    /// `-e`
    Neg,
    /// `|e|`
    Cardinality,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Implies,
    Iff,
    In,
    NotIn,
    Disjoint,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            BinaryOp::Implies => "==>",
            BinaryOp::Iff => "<==>",
            BinaryOp::In => "in",
            BinaryOp::NotIn => "!in",
            BinaryOp::Disjoint => "!!",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::LeftShift => "<<",
            BinaryOp::RightShift => ">>",
        }
    }
}

/// Quantifier flavour. Unknown kinds deserialize to `Other` so the lowering
/// can report them instead of failing inside the JSON reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantifierKind {
    Forall,
    Exists,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetBinding {
    pub var: BoundVar,
    pub rhs: Expr,
}

/// One case of a resolved (flattened) match: a constructor and the
/// variables bound to its fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchCaseExpr {
    pub ctor: DeclId,
    #[serde(default)]
    pub args: Vec<BoundVar>,
    pub body: Expr,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExprKind {
    Literal {
        value: Literal,
    },
    /// A local variable or parameter.
    Ident {
        name: String,
    },
    This,
    /// `receiver.member`, or a static member when `receiver` is absent.
    MemberSelect {
        #[serde(default)]
        receiver: Option<Box<Expr>>,
        member: DeclId,
    },
    FunctionCall {
        #[serde(default)]
        receiver: Option<Box<Expr>>,
        function: DeclId,
        #[serde(default)]
        type_args: Vec<Type>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    /// Application of a function-typed value.
    Apply {
        callee: Box<Expr>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    DatatypeValue {
        ctor: DeclId,
        #[serde(default)]
        type_args: Vec<Type>,
        #[serde(default)]
        args: Vec<Expr>,
    },
    SeqDisplay {
        #[serde(default)]
        elements: Vec<Expr>,
    },
    SetDisplay {
        #[serde(default)]
        elements: Vec<Expr>,
        #[serde(default = "finite")]
        finite: bool,
    },
    MultisetDisplay {
        #[serde(default)]
        elements: Vec<Expr>,
    },
    MapDisplay {
        #[serde(default)]
        entries: Vec<(Expr, Expr)>,
        #[serde(default = "finite")]
        finite: bool,
    },
    /// `e[i]` when `select_one`, otherwise `e[lo..hi]` with either bound
    /// optional.
    SeqSelect {
        seq: Box<Expr>,
        select_one: bool,
        #[serde(default)]
        lo: Option<Box<Expr>>,
        #[serde(default)]
        hi: Option<Box<Expr>>,
    },
    /// `a[i, j, ...]` on a multi-dimensional array.
    MultiSelect {
        array: Box<Expr>,
        indices: Vec<Expr>,
    },
    /// `e[i := v]`
    SeqUpdate {
        seq: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conversion {
        expr: Box<Expr>,
        to: Type,
    },
    Let {
        binds: Vec<LetBinding>,
        body: Box<Expr>,
    },
    /// `var v :- rhs; body` as an expression. `resolved` holds the front
    /// end's desugaring.
    LetOrFail {
        #[serde(default)]
        lhs: Option<BoundVar>,
        rhs: Box<Expr>,
        body: Box<Expr>,
        #[serde(default)]
        resolved: Option<Box<Expr>>,
    },
    Ite {
        cond: Box<Expr>,
        then: Box<Expr>,
        els: Box<Expr>,
    },
    Match {
        source: Box<Expr>,
        cases: Vec<MatchCaseExpr>,
    },
    Lambda {
        params: Vec<BoundVar>,
        body: Box<Expr>,
    },
    Quantifier {
        quantifier: QuantifierKind,
        /// Explicit type quantification, `forall<T> ...`.
        #[serde(default)]
        type_args: Vec<String>,
        vars: Vec<BoundVar>,
        #[serde(default)]
        range: Option<Box<Expr>>,
        term: Box<Expr>,
    },
    SetComprehension {
        #[serde(default = "finite")]
        finite: bool,
        vars: Vec<BoundVar>,
        range: Box<Expr>,
        /// Absent for `set x | P`, where the term is the bound variable.
        #[serde(default)]
        term: Option<Box<Expr>>,
    },
    MapComprehension {
        #[serde(default = "finite")]
        finite: bool,
        vars: Vec<BoundVar>,
        range: Box<Expr>,
        /// Present for the two-expression form `map x | P :: k := v`.
        #[serde(default)]
        key: Option<Box<Expr>>,
        value: Box<Expr>,
    },
}

fn finite() -> bool {
    true
}

impl Expr {
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            ty: None,
            loc: None,
        }
    }

    pub fn typed(kind: ExprKind, ty: Type) -> Self {
        Self {
            kind,
            ty: Some(ty),
            loc: None,
        }
    }

    pub fn with_loc(mut self, loc: SourceLoc) -> Self {
        self.loc = Some(loc);
        self
    }

    pub fn bool(b: bool) -> Self {
        Self::typed(
            ExprKind::Literal {
                value: Literal::Bool(b),
            },
            Type::Bool,
        )
    }

    pub fn int(value: i64) -> Self {
        Self::typed(
            ExprKind::Literal {
                value: Literal::Int(value.to_string()),
            },
            Type::Int,
        )
    }

    pub fn char(c: char) -> Self {
        Self::typed(
            ExprKind::Literal {
                value: Literal::Char(c),
            },
            Type::Char,
        )
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::typed(
            ExprKind::Literal {
                value: Literal::String(s.into()),
            },
            Type::string(),
        )
    }

    pub fn ident(name: impl Into<String>, ty: Type) -> Self {
        Self::typed(ExprKind::Ident { name: name.into() }, ty)
    }

    pub fn unary(op: UnaryOp, operand: Expr, ty: Type) -> Self {
        Self::typed(
            ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
            ty,
        )
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr, ty: Type) -> Self {
        Self::typed(
            ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
            ty,
        )
    }

    /// `seq[index]`
    pub fn index(seq: Expr, index: Expr, ty: Type) -> Self {
        Self::typed(
            ExprKind::SeqSelect {
                seq: Box::new(seq),
                select_one: true,
                lo: Some(Box::new(index)),
                hi: None,
            },
            ty,
        )
    }

    /// `seq[lo..hi]`
    pub fn slice(seq: Expr, lo: Option<Expr>, hi: Option<Expr>, ty: Type) -> Self {
        Self::typed(
            ExprKind::SeqSelect {
                seq: Box::new(seq),
                select_one: false,
                lo: lo.map(Box::new),
                hi: hi.map(Box::new),
            },
            ty,
        )
    }

    pub fn ite(cond: Expr, then: Expr, els: Expr, ty: Type) -> Self {
        Self::typed(
            ExprKind::Ite {
                cond: Box::new(cond),
                then: Box::new(then),
                els: Box::new(els),
            },
            ty,
        )
    }

    pub fn let_in(var: BoundVar, rhs: Expr, body: Expr) -> Self {
        let ty = body.ty.clone();
        Self {
            kind: ExprKind::Let {
                binds: vec![LetBinding { var, rhs }],
                body: Box::new(body),
            },
            ty,
            loc: None,
        }
    }

    pub fn call(function: DeclId, args: Vec<Expr>, ty: Type) -> Self {
        Self::typed(
            ExprKind::FunctionCall {
                receiver: None,
                function,
                type_args: Vec::new(),
                args,
            },
            ty,
        )
    }

    pub fn member(receiver: Option<Expr>, member: DeclId, ty: Type) -> Self {
        Self::typed(
            ExprKind::MemberSelect {
                receiver: receiver.map(Box::new),
                member,
            },
            ty,
        )
    }
}
