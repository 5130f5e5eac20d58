//! IL types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::Path;

/// Arrow flavour. Partial functions may have preconditions and read the
/// heap; total ones may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    Partial,
    Total,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Bool,
    Char,
    Int,
    Real,
    BitVector {
        width: u32,
    },
    /// Character sequences.
    String,
    /// Non-negative integers.
    Nat,
    Set {
        elem: Box<Type>,
    },
    Multiset {
        elem: Box<Type>,
    },
    Seq {
        elem: Box<Type>,
    },
    Map {
        key: Box<Type>,
        value: Box<Type>,
    },
    Tuple {
        elems: Vec<Type>,
    },
    Function {
        #[serde(rename = "arrow")]
        kind: FunctionKind,
        params: Vec<Type>,
        ret: Box<Type>,
    },
    Array {
        elem: Box<Type>,
        dims: u32,
    },
    /// The root of all reference types.
    Object,
    /// A user-defined type by path.
    Named {
        path: Path,
        #[serde(default)]
        args: Vec<Type>,
    },
    /// A type parameter in scope.
    Var {
        name: String,
    },
}

impl Type {
    pub fn set(elem: Type) -> Self {
        Type::Set {
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

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn named(path: Path, args: Vec<Type>) -> Self {
        Type::Named { path, args }
    }

    pub fn var(name: impl Into<String>) -> Self {
        Type::Var { name: name.into() }
    }
}

fn comma_list(f: &mut fmt::Formatter<'_>, tys: &[Type]) -> fmt::Result {
    for (i, ty) in tys.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{ty}")?;
    }
    Ok(())
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Char => write!(f, "char"),
            Type::Int => write!(f, "int"),
            Type::Real => write!(f, "real"),
            Type::BitVector { width } => write!(f, "bv{width}"),
            Type::String => write!(f, "string"),
            Type::Nat => write!(f, "nat"),
            Type::Set { elem } => write!(f, "set<{elem}>"),
            Type::Multiset { elem } => write!(f, "multiset<{elem}>"),
            Type::Seq { elem } => write!(f, "seq<{elem}>"),
            Type::Map { key, value } => write!(f, "map<{key}, {value}>"),
            Type::Tuple { elems } => {
                write!(f, "(")?;
                comma_list(f, elems)?;
                write!(f, ")")
            }
            Type::Function { kind, params, ret } => {
                write!(f, "(")?;
                comma_list(f, params)?;
                let arrow = match kind {
                    FunctionKind::Partial => "-->",
                    FunctionKind::Total => "->",
                };
                write!(f, ") {arrow} {ret}")
            }
            Type::Array { elem, dims } => {
                if *dims == 1 {
                    write!(f, "array<{elem}>")
                } else {
                    write!(f, "array{dims}<{elem}>")
                }
            }
            Type::Object => write!(f, "object"),
            Type::Named { path, args } => {
                write!(f, "{path}")?;
                if !args.is_empty() {
                    write!(f, "<")?;
                    comma_list(f, args)?;
                    write!(f, ">")?;
                }
                Ok(())
            }
            Type::Var { name } => write!(f, "{name}"),
        }
    }
}
