//! IL declarations.

use serde::{Deserialize, Serialize};
use tern_common::SourcePos;

use crate::expr::{Expr, Param};
use crate::path::Path;
use crate::ty::Type;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decl {
    pub name: String,
    pub path: Path,
    pub pos: SourcePos,
    pub kind: DeclKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ctor {
    pub name: String,
    pub path: Path,
    pub pos: SourcePos,
    pub fields: Vec<Param>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineKind {
    Function,
    Predicate,
    Method,
    Lemma,
    Constructor,
}

/// What a routine returns.
///
/// At most one output is computational; ghost outputs are listed separately
/// so a downstream erasure step can drop them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Output {
    Unit {
        #[serde(default)]
        ghost: Vec<Param>,
    },
    Value {
        /// Present for named outputs, which the body assigns to.
        #[serde(default)]
        name: Option<String>,
        ty: Type,
        #[serde(default)]
        ghost: Vec<Param>,
    },
}

impl Output {
    pub fn ty(&self) -> Option<&Type> {
        match self {
            Output::Unit { .. } => None,
            Output::Value { ty, .. } => Some(ty),
        }
    }

    pub fn ghost(&self) -> &[Param] {
        match self {
            Output::Unit { ghost } | Output::Value { ghost, .. } => ghost,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DeclKind {
    Module {
        decls: Vec<Decl>,
    },
    Datatype {
        type_params: Vec<String>,
        ctors: Vec<Ctor>,
        members: Vec<Decl>,
        #[serde(default)]
        is_codatatype: bool,
    },
    Class {
        is_trait: bool,
        type_params: Vec<String>,
        parents: Vec<Type>,
        members: Vec<Decl>,
    },
    Routine {
        #[serde(rename = "routine_kind")]
        kind: RoutineKind,
        type_params: Vec<String>,
        params: Vec<Param>,
        output: Output,
        #[serde(default)]
        body: Option<Expr>,
        is_ghost: bool,
        is_static: bool,
    },
    Field {
        ty: Type,
        #[serde(default)]
        init: Option<Expr>,
        is_ghost: bool,
        is_mutable: bool,
        is_static: bool,
    },
    /// Type synonym, subset type or newtype.
    TypeDef {
        type_params: Vec<String>,
        base: Type,
        /// Bound variable of the refinement predicate.
        #[serde(default)]
        var: Option<String>,
        #[serde(default)]
        constraint: Option<Expr>,
        is_newtype: bool,
    },
    Export {
        provides: Vec<String>,
        reveals: Vec<String>,
    },
}

impl Decl {
    /// Nested declarations of modules, datatypes and classes.
    pub fn children(&self) -> &[Decl] {
        match &self.kind {
            DeclKind::Module { decls } => decls,
            DeclKind::Datatype { members, .. } | DeclKind::Class { members, .. } => members,
            _ => &[],
        }
    }

    /// Visit this declaration and everything nested in it, depth first.
    pub fn walk<'a>(&'a self, f: &mut impl FnMut(&'a Decl)) {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }
}
