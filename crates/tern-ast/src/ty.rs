//! Resolved types.

use serde::{Deserialize, Serialize};

use crate::DeclId;

/// A type after name and type resolution.
///
/// User-defined types reference their declaration directly. Tuples, arrows,
/// arrays and `object` arrive as `UserDefined` references into the `_System`
/// module; telling them apart is the lowering's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Bool,
    Char,
    Int,
    Real,
    BitVector { width: u32 },
    Set { elem: Box<Type> },
    ISet { elem: Box<Type> },
    Multiset { elem: Box<Type> },
    Seq { elem: Box<Type> },
    Map { key: Box<Type>, value: Box<Type> },
    IMap { key: Box<Type>, value: Box<Type> },
    /// A type parameter in scope, by name.
    TypeParam { name: String },
    UserDefined {
        decl: DeclId,
        #[serde(default)]
        args: Vec<Type>,
    },
}

impl Type {
    pub fn set(elem: Type) -> Self {
        Type::Set {
            elem: Box::new(elem),
        }
    }

    pub fn iset(elem: Type) -> Self {
        Type::ISet {
            elem: Box::new(elem),
        }
    }

    pub fn multiset(elem: Type) -> Self {
        Type::Multiset {
            elem: Box::new(elem),
        }
    }

    pub fn seq(elem: Type) -> Self {
        Type::Seq {
            elem: Box::new(elem),
        }
    }

    /// `seq<char>`, the resolved form of `string`.
    pub fn string() -> Self {
        Type::seq(Type::Char)
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn imap(key: Type, value: Type) -> Self {
        Type::IMap {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn param(name: impl Into<String>) -> Self {
        Type::TypeParam { name: name.into() }
    }

    pub fn user(decl: DeclId, args: Vec<Type>) -> Self {
        Type::UserDefined { decl, args }
    }
}
