//! Type lowering and shape classification.
//!
//! [`Lowerer::lower_type`] maps a resolved type to an IL type, routing
//! `_System` references through the built-in recognizer first.
//!
//! [`Lowerer::shape`] answers the question the expression lowering keeps
//! asking: what kind of value is this, once synonyms and subset types are
//! seen through? Overloaded operators and indexing are resolved from it.

use tern_ast::decl::TypeParam;
use tern_ast::{DeclId, DeclKind, Type, Variance};
use tern_il::Type as IlType;

use crate::builtins::{recognize, Builtin};
use crate::error::{LowerError, LowerResult};
use crate::lower::Lowerer;

/// What a value is, for the purpose of choosing a monomorphic IL operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Shape {
    Bool,
    Char,
    Int,
    Real,
    BitVector,
    Seq,
    String,
    Set,
    ISet,
    Multiset,
    Map,
    IMap,
    Array(u32),
    Tuple(usize),
    Function,
    Object,
    Datatype,
    Class,
    Param,
}

impl Shape {
    pub(crate) fn is_numeric(self) -> bool {
        matches!(
            self,
            Shape::Int | Shape::Real | Shape::BitVector | Shape::Char
        )
    }
}

/// Replace type parameters named in `params` by the matching `args`.
fn substitute(ty: &Type, params: &[TypeParam], args: &[Type]) -> Type {
    let sub = |t: &Type| Box::new(substitute(t, params, args));
    match ty {
        Type::TypeParam { name } => params
            .iter()
            .position(|p| &p.name == name)
            .and_then(|i| args.get(i).cloned())
            .unwrap_or_else(|| ty.clone()),
        Type::Set { elem } => Type::Set { elem: sub(elem) },
        Type::ISet { elem } => Type::ISet { elem: sub(elem) },
        Type::Multiset { elem } => Type::Multiset { elem: sub(elem) },
        Type::Seq { elem } => Type::Seq { elem: sub(elem) },
        Type::Map { key, value } => Type::Map {
            key: sub(key),
            value: sub(value),
        },
        Type::IMap { key, value } => Type::IMap {
            key: sub(key),
            value: sub(value),
        },
        Type::UserDefined { decl, args: inner } => Type::UserDefined {
            decl: *decl,
            args: inner
                .iter()
                .map(|a| substitute(a, params, args))
                .collect(),
        },
        Type::Bool | Type::Char | Type::Int | Type::Real | Type::BitVector { .. } => ty.clone(),
    }
}

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_type(&self, ty: &Type) -> LowerResult<IlType> {
        match ty {
            Type::Bool => Ok(IlType::Bool),
            Type::Char => Ok(IlType::Char),
            Type::Int => Ok(IlType::Int),
            Type::Real => Ok(IlType::Real),
            Type::BitVector { width } => Ok(IlType::BitVector { width: *width }),
            Type::Set { elem } => Ok(IlType::set(self.lower_type(elem)?)),
            Type::Multiset { elem } => Ok(IlType::multiset(self.lower_type(elem)?)),
            Type::Seq { elem } => {
                if self.shape(elem)? == Shape::Char {
                    Ok(IlType::String)
                } else {
                    Ok(IlType::seq(self.lower_type(elem)?))
                }
            }
            Type::Map { key, value } => {
                Ok(IlType::map(self.lower_type(key)?, self.lower_type(value)?))
            }
            Type::ISet { .. } => Err(LowerError::unsupported("infinite set type `iset`")),
            Type::IMap { .. } => Err(LowerError::unsupported("infinite map type `imap`")),
            Type::TypeParam { name } => Ok(IlType::var(name.clone())),
            Type::UserDefined { decl, args } => {
                if self.is_system_type(*decl)? {
                    self.lower_builtin_type(*decl, args)
                } else {
                    let args = args
                        .iter()
                        .map(|a| self.lower_type(a))
                        .collect::<LowerResult<Vec<_>>>()?;
                    Ok(IlType::named(self.path_of(*decl)?, args))
                }
            }
        }
    }

    fn lower_builtin_type(&self, decl: DeclId, args: &[Type]) -> LowerResult<IlType> {
        let name = &self.decl(decl)?.name;
        let arity_mismatch = |expected: usize| {
            LowerError::invariant(format!(
                "`{name}` applied to {} type arguments, expected {expected}",
                args.len()
            ))
        };
        let lowered = args
            .iter()
            .map(|a| self.lower_type(a))
            .collect::<LowerResult<Vec<_>>>()?;
        match recognize(name) {
            Builtin::Tuple(n) => {
                if lowered.len() != n {
                    return Err(arity_mismatch(n));
                }
                Ok(IlType::Tuple { elems: lowered })
            }
            Builtin::Function(kind, n) => {
                if lowered.len() != n + 1 {
                    return Err(arity_mismatch(n + 1));
                }
                let mut params = lowered;
                let ret = params.pop().unwrap_or(IlType::Tuple { elems: Vec::new() });
                Ok(IlType::Function {
                    kind,
                    params,
                    ret: Box::new(ret),
                })
            }
            Builtin::Array(dims) => {
                let mut lowered = lowered;
                if lowered.len() != 1 {
                    return Err(arity_mismatch(1));
                }
                let elem = lowered.remove(0);
                Ok(IlType::Array {
                    elem: Box::new(elem),
                    dims,
                })
            }
            Builtin::Object => Ok(IlType::Object),
            Builtin::Nat => Ok(IlType::Nat),
            Builtin::String => Ok(IlType::String),
            Builtin::Unrecognized => Err(LowerError::unsupported(format!(
                "built-in type `{name}`"
            ))),
        }
    }

    /// Follow type synonyms and subset types (and the `_System` names
    /// `string` and `nat`) until reaching a structural type, a type
    /// parameter, or a datatype, class, newtype or other built-in.
    pub(crate) fn expand(&self, ty: &Type) -> LowerResult<Type> {
        let mut current = ty.clone();
        for _ in 0..=self.program.decls.len() {
            let Type::UserDefined { decl, args } = &current else {
                return Ok(current);
            };
            let d = self.decl(*decl)?;
            let next = if self.is_system_type(*decl)? {
                match recognize(&d.name) {
                    Builtin::String => Type::string(),
                    Builtin::Nat => Type::Int,
                    _ => return Ok(current),
                }
            } else {
                match &d.kind {
                    DeclKind::TypeSynonym(s) => substitute(&s.rhs, &s.type_params, args),
                    DeclKind::SubsetType(s) => substitute(&s.var.ty, &s.type_params, args),
                    _ => return Ok(current),
                }
            };
            current = next;
        }
        Err(LowerError::invariant("cyclic type synonym"))
    }

    pub(crate) fn shape(&self, ty: &Type) -> LowerResult<Shape> {
        let expanded = self.expand(ty)?;
        Ok(match &expanded {
            Type::Bool => Shape::Bool,
            Type::Char => Shape::Char,
            Type::Int => Shape::Int,
            Type::Real => Shape::Real,
            Type::BitVector { .. } => Shape::BitVector,
            Type::Seq { elem } => {
                if self.shape(elem)? == Shape::Char {
                    Shape::String
                } else {
                    Shape::Seq
                }
            }
            Type::Set { .. } => Shape::Set,
            Type::ISet { .. } => Shape::ISet,
            Type::Multiset { .. } => Shape::Multiset,
            Type::Map { .. } => Shape::Map,
            Type::IMap { .. } => Shape::IMap,
            Type::TypeParam { .. } => Shape::Param,
            Type::UserDefined { decl, .. } => {
                let d = self.decl(*decl)?;
                if self.is_system_type(*decl)? {
                    match recognize(&d.name) {
                        Builtin::Tuple(n) => Shape::Tuple(n),
                        Builtin::Function(..) => Shape::Function,
                        Builtin::Array(dims) => Shape::Array(dims),
                        Builtin::Object => Shape::Object,
                        Builtin::Nat => Shape::Int,
                        Builtin::String => Shape::String,
                        Builtin::Unrecognized => {
                            return Err(LowerError::unsupported(format!(
                                "built-in type `{}`",
                                d.name
                            )))
                        }
                    }
                } else {
                    match &d.kind {
                        DeclKind::Datatype(_) => Shape::Datatype,
                        // Arithmetic on a newtype is arithmetic on its base.
                        DeclKind::Newtype(n) => self.shape(&n.var.ty)?,
                        _ => Shape::Class,
                    }
                }
            }
        })
    }

    /// Names of the type parameters, rejecting any variance annotation.
    pub(crate) fn lower_type_params(&self, params: &[TypeParam]) -> LowerResult<Vec<String>> {
        params
            .iter()
            .map(|p| {
                if p.variance == Variance::NonVariantStrict {
                    Ok(p.name.clone())
                } else {
                    Err(LowerError::unsupported(format!(
                        "variance annotation `{}{}` on a type parameter",
                        p.variance.prefix(),
                        p.name
                    )))
                }
            })
            .collect()
    }
}
