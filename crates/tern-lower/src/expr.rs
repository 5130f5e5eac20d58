//! Expression lowering.
//!
//! Many source node kinds are overloaded over collections: `|e|`, `in`,
//! `+`, `<`, `e[i]`, `e[lo..hi]` and `e[i := v]` all mean different things
//! for sequences, strings, sets, multisets, maps and arrays. Each is
//! resolved here from the shape of the operand's resolved type, so the IL
//! only ever carries monomorphic operators.

use tern_ast::expr::{BinaryOp, LetBinding, Literal, MatchCaseExpr, QuantifierKind, UnaryOp};
use tern_ast::{BoundVar, DeclId, DeclKind, Expr, ExprKind};
use tern_il::{
    BinOp, CasePattern, Expr as IlExpr, Literal as IlLiteral, MatchArm, Param, QuantKind,
    UnOp,
};

use crate::builtins::{recognize_member, BuiltinMember};
use crate::error::{LowerError, LowerResult};
use crate::lower::Lowerer;
use crate::stmt::{bind_simultaneously, Binding};
use crate::types::Shape;

fn boxed(e: IlExpr) -> Box<IlExpr> {
    Box::new(e)
}

fn is_int_literal(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_real_literal(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    match body.split_once('.') {
        Some((whole, frac)) => is_int_literal(whole) && is_int_literal(frac) && !frac.starts_with('-'),
        None => false,
    }
}

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_expr(&self, expr: &Expr) -> LowerResult<IlExpr> {
        self.lower_expr_kind(expr)
            .map_err(|e| e.within(|| self.program.render_expr(expr), expr.loc))
    }

    pub(crate) fn lower_exprs(&self, exprs: &[Expr]) -> LowerResult<Vec<IlExpr>> {
        exprs.iter().map(|e| self.lower_expr(e)).collect()
    }

    fn lower_opt(&self, expr: &Option<Box<Expr>>) -> LowerResult<Option<Box<IlExpr>>> {
        expr.as_deref()
            .map(|e| self.lower_expr(e).map(boxed))
            .transpose()
    }

    pub(crate) fn lower_bound_var(&self, var: &BoundVar) -> LowerResult<Param> {
        Ok(Param {
            name: var.name.clone(),
            ty: self.lower_type(&var.ty)?,
            ghost: var.is_ghost,
        })
    }

    fn lower_bound_vars(&self, vars: &[BoundVar]) -> LowerResult<Vec<Param>> {
        vars.iter().map(|v| self.lower_bound_var(v)).collect()
    }

    /// Shape of an operand's resolved type.
    pub(crate) fn shape_of(&self, expr: &Expr) -> LowerResult<Shape> {
        self.shape(self.type_of(&expr.ty, "operand")?)
    }

    fn lower_expr_kind(&self, expr: &Expr) -> LowerResult<IlExpr> {
        match &expr.kind {
            ExprKind::Literal { value } => self.lower_literal(value, expr),
            ExprKind::Ident { name } => Ok(IlExpr::var(name.clone())),
            ExprKind::This => Ok(IlExpr::This),
            ExprKind::MemberSelect { receiver, member } => {
                self.lower_member_select(receiver.as_deref(), *member)
            }
            ExprKind::FunctionCall {
                receiver,
                function,
                type_args,
                args,
            } => Ok(IlExpr::Call {
                callee: self.path_of(*function)?,
                receiver: self.lower_opt(receiver)?,
                type_args: self.lower_types(type_args)?,
                args: self.lower_exprs(args)?,
            }),
            ExprKind::Apply { callee, args } => Ok(IlExpr::Apply {
                callee: boxed(self.lower_expr(callee)?),
                args: self.lower_exprs(args)?,
            }),
            ExprKind::DatatypeValue {
                ctor,
                type_args,
                args,
            } => self.lower_datatype_value(*ctor, type_args, args),
            ExprKind::SeqDisplay { elements } => {
                let ty = self.type_of(&expr.ty, "sequence display")?;
                match self.shape(ty)? {
                    Shape::String if elements.is_empty() => Ok(IlExpr::string("")),
                    Shape::String => Ok(IlExpr::StringDisplay {
                        elems: self.lower_exprs(elements)?,
                    }),
                    Shape::Seq => Ok(IlExpr::SeqDisplay {
                        elems: self.lower_exprs(elements)?,
                    }),
                    other => Err(LowerError::invariant(format!(
                        "sequence display of non-sequence type ({other:?})"
                    ))),
                }
            }
            ExprKind::SetDisplay { elements, finite } => {
                if !finite {
                    return Err(LowerError::unsupported("infinite set display `iset{...}`"));
                }
                Ok(IlExpr::SetDisplay {
                    elems: self.lower_exprs(elements)?,
                })
            }
            ExprKind::MultisetDisplay { elements } => Ok(IlExpr::MultisetDisplay {
                elems: self.lower_exprs(elements)?,
            }),
            ExprKind::MapDisplay { entries, finite } => {
                if !finite {
                    return Err(LowerError::unsupported("infinite map display `imap[...]`"));
                }
                let entries = entries
                    .iter()
                    .map(|(k, v)| Ok((self.lower_expr(k)?, self.lower_expr(v)?)))
                    .collect::<LowerResult<Vec<_>>>()?;
                Ok(IlExpr::MapDisplay { entries })
            }
            ExprKind::SeqSelect {
                seq,
                select_one,
                lo,
                hi,
            } => {
                if *select_one {
                    let index = lo.as_deref().ok_or_else(|| {
                        LowerError::invariant("element selection without an index")
                    })?;
                    self.lower_index(seq, index)
                } else {
                    self.lower_slice(seq, lo, hi)
                }
            }
            ExprKind::MultiSelect { array, indices } => match self.shape_of(array)? {
                Shape::Array(dims) if dims as usize == indices.len() => Ok(IlExpr::ArrayIndex {
                    array: boxed(self.lower_expr(array)?),
                    indices: self.lower_exprs(indices)?,
                }),
                other => Err(LowerError::invariant(format!(
                    "{}-index selection on {other:?}",
                    indices.len()
                ))),
            },
            ExprKind::SeqUpdate { seq, index, value } => self.lower_update(seq, index, value),
            ExprKind::Unary { op, operand } => self.lower_unary(*op, operand),
            ExprKind::Binary { op, lhs, rhs } => self.lower_binary(*op, lhs, rhs),
            ExprKind::Conversion { expr: inner, to } => Ok(IlExpr::Convert {
                expr: boxed(self.lower_expr(inner)?),
                from: self.lower_type(self.type_of(&inner.ty, "converted expression")?)?,
                to: self.lower_type(to)?,
            }),
            ExprKind::Let { binds, body } => self.lower_let(binds, body),
            ExprKind::LetOrFail {
                lhs,
                rhs,
                body,
                resolved,
            } => self.lower_let_or_fail(lhs.as_ref(), rhs, body, resolved.as_deref()),
            ExprKind::Ite { cond, then, els } => Ok(IlExpr::If {
                cond: boxed(self.lower_expr(cond)?),
                then_body: boxed(self.lower_expr(then)?),
                else_body: Some(boxed(self.lower_expr(els)?)),
            }),
            ExprKind::Match { source, cases } => {
                let arms = cases
                    .iter()
                    .map(|c| self.lower_case_expr(c))
                    .collect::<LowerResult<Vec<_>>>()?;
                Ok(IlExpr::Match {
                    scrutinee: boxed(self.lower_expr(source)?),
                    arms,
                })
            }
            ExprKind::Lambda { params, body } => Ok(IlExpr::Lambda {
                params: self.lower_bound_vars(params)?,
                body: boxed(self.lower_expr(body)?),
            }),
            ExprKind::Quantifier {
                quantifier,
                type_args,
                vars,
                range,
                term,
            } => {
                if !type_args.is_empty() {
                    return Err(LowerError::unsupported(
                        "quantifier with explicit type quantification",
                    ));
                }
                let quantifier = match quantifier {
                    QuantifierKind::Forall => QuantKind::Forall,
                    QuantifierKind::Exists => QuantKind::Exists,
                    QuantifierKind::Other => {
                        return Err(LowerError::invariant("quantifier of unrecognized kind"))
                    }
                };
                Ok(IlExpr::Quantifier {
                    quantifier,
                    vars: self.lower_bound_vars(vars)?,
                    range: self.lower_opt(range)?,
                    term: boxed(self.lower_expr(term)?),
                })
            }
            ExprKind::SetComprehension {
                finite,
                vars,
                range,
                term,
            } => {
                if !finite {
                    return Err(LowerError::unsupported("infinite set comprehension `iset`"));
                }
                let term = match term {
                    Some(t) => self.lower_expr(t)?,
                    None => match vars.as_slice() {
                        [v] => IlExpr::var(v.name.clone()),
                        _ => {
                            return Err(LowerError::invariant(
                                "set comprehension without a term must bind one variable",
                            ))
                        }
                    },
                };
                Ok(IlExpr::SetComprehension {
                    vars: self.lower_bound_vars(vars)?,
                    range: boxed(self.lower_expr(range)?),
                    term: boxed(term),
                })
            }
            ExprKind::MapComprehension {
                finite,
                vars,
                range,
                key,
                value,
            } => {
                if !finite {
                    return Err(LowerError::unsupported("infinite map comprehension `imap`"));
                }
                if key.is_some() {
                    return Err(LowerError::unsupported(
                        "map comprehension with a key expression",
                    ));
                }
                let [var] = vars.as_slice() else {
                    return Err(LowerError::unsupported(
                        "map comprehension over several variables",
                    ));
                };
                Ok(IlExpr::MapComprehension {
                    var: self.lower_bound_var(var)?,
                    range: boxed(self.lower_expr(range)?),
                    value: boxed(self.lower_expr(value)?),
                })
            }
        }
    }

    pub(crate) fn lower_types(&self, tys: &[tern_ast::Type]) -> LowerResult<Vec<tern_il::Type>> {
        tys.iter().map(|t| self.lower_type(t)).collect()
    }

    fn lower_literal(&self, value: &Literal, expr: &Expr) -> LowerResult<IlExpr> {
        let lit = match value {
            Literal::Bool(b) => IlLiteral::Bool { value: *b },
            Literal::Char(c) => IlLiteral::Char { value: *c },
            Literal::String(s) => IlLiteral::String { value: s.clone() },
            Literal::Int(v) => {
                if !is_int_literal(v) {
                    return Err(LowerError::invariant(format!("malformed integer literal `{v}`")));
                }
                IlLiteral::Int {
                    value: v.clone(),
                    ty: self.lower_type(self.type_of(&expr.ty, "integer literal")?)?,
                }
            }
            Literal::Real(v) => {
                if !is_real_literal(v) {
                    return Err(LowerError::invariant(format!("malformed real literal `{v}`")));
                }
                IlLiteral::Real {
                    value: v.clone(),
                    ty: self.lower_type(self.type_of(&expr.ty, "real literal")?)?,
                }
            }
            Literal::Null => IlLiteral::Null {
                ty: self.lower_type(self.type_of(&expr.ty, "null literal")?)?,
            },
        };
        Ok(IlExpr::Literal { value: lit })
    }

    fn lower_member_select(&self, receiver: Option<&Expr>, member: DeclId) -> LowerResult<IlExpr> {
        let decl = self.decl(member)?;
        if let Some(owner) = self.system_owner(member)? {
            let receiver = receiver.ok_or_else(|| {
                LowerError::invariant(format!("built-in member `{}` without a receiver", decl.name))
            })?;
            let receiver = boxed(self.lower_expr(receiver)?);
            return match recognize_member(owner, &decl.name) {
                BuiltinMember::TupleField(index) => Ok(IlExpr::TupleSelect {
                    tuple: receiver,
                    index,
                }),
                BuiltinMember::MapKeys => Ok(IlExpr::UnOp {
                    op: UnOp::MapKeys,
                    operand: receiver,
                }),
                BuiltinMember::MapValues => Ok(IlExpr::UnOp {
                    op: UnOp::MapValues,
                    operand: receiver,
                }),
                BuiltinMember::MapItems => Ok(IlExpr::UnOp {
                    op: UnOp::MapItems,
                    operand: receiver,
                }),
                BuiltinMember::ArrayLength(dim) => Ok(IlExpr::UnOp {
                    op: UnOp::ArrayLength { dim },
                    operand: receiver,
                }),
                BuiltinMember::TupleCtor(_) | BuiltinMember::Unrecognized => Err(
                    LowerError::unsupported(format!("built-in member `{owner}.{}`", decl.name)),
                ),
            };
        }
        let path = self.path_of(member)?;
        match (&decl.kind, receiver) {
            (DeclKind::Field(_) | DeclKind::Const(_), Some(r)) => Ok(IlExpr::FieldAccess {
                receiver: boxed(self.lower_expr(r)?),
                field: path,
            }),
            (DeclKind::Field(_) | DeclKind::Const(_), None) => Ok(IlExpr::Global { path }),
            (DeclKind::Destructor(_), Some(r)) => Ok(IlExpr::Destruct {
                value: boxed(self.lower_expr(r)?),
                field: path,
            }),
            (DeclKind::Function(_) | DeclKind::Method(_), None) => Ok(IlExpr::Global { path }),
            (DeclKind::Function(f), Some(_)) if f.is_static => Ok(IlExpr::Global { path }),
            (DeclKind::Function(_) | DeclKind::Method(_), Some(_)) => Err(
                LowerError::unsupported("instance routine used as a first-class value"),
            ),
            (kind, _) => Err(LowerError::invariant(format!(
                "member selection of {} `{}`",
                kind.describe(),
                decl.name
            ))),
        }
    }

    fn lower_datatype_value(
        &self,
        ctor: DeclId,
        type_args: &[tern_ast::Type],
        args: &[Expr],
    ) -> LowerResult<IlExpr> {
        if let Some(owner) = self.system_owner(ctor)? {
            let name = &self.decl(ctor)?.name;
            return match recognize_member(owner, name) {
                BuiltinMember::TupleCtor(n) if n == args.len() => Ok(IlExpr::Tuple {
                    elems: self.lower_exprs(args)?,
                }),
                BuiltinMember::TupleCtor(n) => Err(LowerError::invariant(format!(
                    "{n}-tuple built from {} components",
                    args.len()
                ))),
                _ => Err(LowerError::unsupported(format!(
                    "built-in constructor `{owner}.{name}`"
                ))),
            };
        }
        Ok(IlExpr::Construct {
            ctor: self.path_of(ctor)?,
            type_args: self.lower_types(type_args)?,
            args: self.lower_exprs(args)?,
        })
    }

    fn lower_index(&self, collection: &Expr, index: &Expr) -> LowerResult<IlExpr> {
        let c = boxed(self.lower_expr(collection)?);
        let i = boxed(self.lower_expr(index)?);
        match self.shape_of(collection)? {
            Shape::Seq => Ok(IlExpr::SeqIndex { seq: c, index: i }),
            Shape::String => Ok(IlExpr::StringIndex {
                string: c,
                index: i,
            }),
            Shape::Array(1) => Ok(IlExpr::ArrayIndex {
                array: c,
                indices: vec![*i],
            }),
            Shape::Map => Ok(IlExpr::MapLookup { map: c, key: i }),
            Shape::Multiset => Ok(IlExpr::MultisetCount {
                multiset: c,
                elem: i,
            }),
            other => Err(LowerError::invariant(format!("indexing into {other:?}"))),
        }
    }

    fn lower_slice(
        &self,
        collection: &Expr,
        lo: &Option<Box<Expr>>,
        hi: &Option<Box<Expr>>,
    ) -> LowerResult<IlExpr> {
        let c = boxed(self.lower_expr(collection)?);
        let lo = self.lower_opt(lo)?;
        let hi = self.lower_opt(hi)?;
        match self.shape_of(collection)? {
            Shape::Seq => Ok(IlExpr::SeqSlice { seq: c, lo, hi }),
            Shape::String => Ok(IlExpr::StringSlice { string: c, lo, hi }),
            Shape::Array(1) => Ok(IlExpr::ArraySlice { array: c, lo, hi }),
            other => Err(LowerError::invariant(format!("range selection on {other:?}"))),
        }
    }

    fn lower_update(&self, collection: &Expr, index: &Expr, value: &Expr) -> LowerResult<IlExpr> {
        let c = boxed(self.lower_expr(collection)?);
        let i = boxed(self.lower_expr(index)?);
        let v = boxed(self.lower_expr(value)?);
        match self.shape_of(collection)? {
            Shape::Seq => Ok(IlExpr::SeqUpdate {
                seq: c,
                index: i,
                value: v,
            }),
            Shape::String => Ok(IlExpr::StringUpdate {
                string: c,
                index: i,
                value: v,
            }),
            Shape::Map => Ok(IlExpr::MapUpdate {
                map: c,
                key: i,
                value: v,
            }),
            Shape::Multiset => Ok(IlExpr::MultisetUpdate {
                multiset: c,
                elem: i,
                count: v,
            }),
            other => Err(LowerError::invariant(format!("update of {other:?}"))),
        }
    }

    fn lower_unary(&self, op: UnaryOp, operand: &Expr) -> LowerResult<IlExpr> {
        let shape = self.shape_of(operand)?;
        let op = match op {
            UnaryOp::Not if shape == Shape::BitVector => UnOp::BitNot,
            UnaryOp::Not => UnOp::Not,
            UnaryOp::Neg => UnOp::Neg,
            UnaryOp::Cardinality => match shape {
                Shape::Seq => UnOp::SeqLength,
                Shape::String => UnOp::StringLength,
                Shape::Set => UnOp::SetCardinality,
                Shape::Multiset => UnOp::MultisetCardinality,
                Shape::Map => UnOp::MapCardinality,
                other => {
                    return Err(LowerError::invariant(format!("cardinality of {other:?}")))
                }
            },
        };
        Ok(IlExpr::un(op, self.lower_expr(operand)?))
    }

    fn lower_binary(&self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> LowerResult<IlExpr> {
        let l = self.lower_expr(lhs)?;
        let r = self.lower_expr(rhs)?;
        match op {
            BinaryOp::In => Ok(IlExpr::bin(self.membership(rhs)?, l, r)),
            BinaryOp::NotIn => Ok(IlExpr::un(
                UnOp::Not,
                IlExpr::bin(self.membership(rhs)?, l, r),
            )),
            _ => Ok(IlExpr::bin(self.binary_op(op, lhs)?, l, r)),
        }
    }

    fn membership(&self, collection: &Expr) -> LowerResult<BinOp> {
        match self.shape_of(collection)? {
            Shape::Seq => Ok(BinOp::SeqContains),
            Shape::String => Ok(BinOp::StringContains),
            Shape::Set => Ok(BinOp::SetContains),
            Shape::Multiset => Ok(BinOp::MultisetContains),
            Shape::Map => Ok(BinOp::MapContainsKey),
            Shape::ISet | Shape::IMap => Err(LowerError::unsupported(
                "membership in an infinite collection",
            )),
            other => Err(LowerError::invariant(format!("membership test on {other:?}"))),
        }
    }

    /// The monomorphic operator for `op`, chosen from the left operand.
    fn binary_op(&self, op: BinaryOp, lhs: &Expr) -> LowerResult<BinOp> {
        use Shape as S;

        let shape = self.shape_of(lhs)?;
        let mismatch = || {
            LowerError::invariant(format!("operator `{}` applied to {shape:?}", op.symbol()))
        };
        let op = match op {
            BinaryOp::Eq => BinOp::Eq,
            BinaryOp::Neq => BinOp::Neq,
            BinaryOp::And => BinOp::And,
            BinaryOp::Or => BinOp::Or,
            BinaryOp::Implies => BinOp::Implies,
            BinaryOp::Iff => BinOp::Iff,
            BinaryOp::Div => BinOp::Div,
            BinaryOp::Mod => BinOp::Mod,
            BinaryOp::Add => match shape {
                S::Seq => BinOp::SeqConcat,
                S::String => BinOp::StringConcat,
                S::Set => BinOp::SetUnion,
                S::Multiset => BinOp::MultisetUnion,
                S::Map => BinOp::MapMerge,
                s if s.is_numeric() || s == S::Param => BinOp::Add,
                _ => return Err(mismatch()),
            },
            BinaryOp::Sub => match shape {
                S::Set => BinOp::SetDifference,
                S::Multiset => BinOp::MultisetDifference,
                S::Map => BinOp::MapSubtract,
                s if s.is_numeric() || s == S::Param => BinOp::Sub,
                _ => return Err(mismatch()),
            },
            BinaryOp::Mul => match shape {
                S::Set => BinOp::SetIntersection,
                S::Multiset => BinOp::MultisetIntersection,
                s if s.is_numeric() || s == S::Param => BinOp::Mul,
                _ => return Err(mismatch()),
            },
            BinaryOp::Lt => match shape {
                S::Seq => BinOp::SeqProperPrefix,
                S::String => BinOp::StringProperPrefix,
                S::Set => BinOp::SetProperSubset,
                S::Multiset => BinOp::MultisetProperSubset,
                s if s.is_numeric() || s == S::Param => BinOp::Lt,
                _ => return Err(mismatch()),
            },
            BinaryOp::Le => match shape {
                S::Seq => BinOp::SeqPrefix,
                S::String => BinOp::StringPrefix,
                S::Set => BinOp::SetSubset,
                S::Multiset => BinOp::MultisetSubset,
                s if s.is_numeric() || s == S::Param => BinOp::Le,
                _ => return Err(mismatch()),
            },
            BinaryOp::Gt => match shape {
                S::Set => BinOp::SetProperSuperset,
                S::Multiset => BinOp::MultisetProperSuperset,
                s if s.is_numeric() || s == S::Param => BinOp::Gt,
                _ => return Err(mismatch()),
            },
            BinaryOp::Ge => match shape {
                S::Set => BinOp::SetSuperset,
                S::Multiset => BinOp::MultisetSuperset,
                s if s.is_numeric() || s == S::Param => BinOp::Ge,
                _ => return Err(mismatch()),
            },
            BinaryOp::Disjoint => match shape {
                S::Set => BinOp::SetDisjoint,
                S::Multiset => BinOp::MultisetDisjoint,
                _ => return Err(mismatch()),
            },
            BinaryOp::BitAnd | BinaryOp::BitOr | BinaryOp::BitXor
                if shape != S::BitVector =>
            {
                return Err(mismatch())
            }
            BinaryOp::BitAnd => BinOp::BitAnd,
            BinaryOp::BitOr => BinOp::BitOr,
            BinaryOp::BitXor => BinOp::BitXor,
            BinaryOp::LeftShift | BinaryOp::RightShift if shape != S::BitVector => {
                return Err(mismatch())
            }
            BinaryOp::LeftShift => BinOp::LeftShift,
            BinaryOp::RightShift => BinOp::RightShift,
            BinaryOp::In | BinaryOp::NotIn => return Err(mismatch()),
        };
        Ok(op)
    }

    fn lower_let(&self, binds: &[LetBinding], body: &Expr) -> LowerResult<IlExpr> {
        let bindings = binds
            .iter()
            .map(|bind| {
                Ok(Binding {
                    name: Some(bind.var.name.clone()),
                    ty: self.lower_type(&bind.var.ty)?,
                    value: self.lower_expr(&bind.rhs)?,
                    ghost: bind.var.is_ghost,
                })
            })
            .collect::<LowerResult<Vec<_>>>()?;
        Ok(bind_simultaneously(bindings, self.lower_expr(body)?))
    }

    fn lower_case_expr(&self, case: &MatchCaseExpr) -> LowerResult<MatchArm> {
        Ok(MatchArm {
            pattern: self.case_pattern(case.ctor, &case.args)?,
            body: self.lower_expr(&case.body)?,
        })
    }

    /// Pattern for a match case: a tuple pattern for the built-in tuple
    /// constructor, a constructor pattern otherwise.
    pub(crate) fn case_pattern(&self, ctor: DeclId, args: &[BoundVar]) -> LowerResult<CasePattern> {
        let binds = self.lower_bound_vars(args)?;
        if let Some(owner) = self.system_owner(ctor)? {
            let name = &self.decl(ctor)?.name;
            return match recognize_member(owner, name) {
                BuiltinMember::TupleCtor(n) if n == binds.len() => Ok(CasePattern::Tuple { binds }),
                _ => Err(LowerError::unsupported(format!(
                    "pattern on built-in constructor `{owner}.{name}`"
                ))),
            };
        }
        Ok(CasePattern::Ctor {
            ctor: self.path_of(ctor)?,
            binds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_validation() {
        assert!(is_int_literal("0"));
        assert!(is_int_literal("-12345678901234567890"));
        assert!(!is_int_literal("1e3"));
        assert!(!is_int_literal("-"));
        assert!(is_real_literal("3.25"));
        assert!(is_real_literal("-0.5"));
        assert!(!is_real_literal("3."));
        assert!(!is_real_literal("1.-2"));
    }
}
