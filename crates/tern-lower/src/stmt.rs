//! Statement lowering.
//!
//! The IL has no statements, so a statement list becomes a block
//! expression. Declarations scope over the rest of their block: `var x := e;
//! rest` lowers to `let x = e in rest`, and likewise for `:-` statements.

use tern_ast::stmt::{AssignRhs, LocalVar, MatchCaseStmt, UpdateStmt};
use tern_ast::{DeclId, Expr, ExprKind, Formal, Stmt, StmtKind};
use tern_il::{AssignTarget, Expr as IlExpr, LetMode, MatchArm, Param, Type as IlType};

use crate::error::{LowerError, LowerResult};
use crate::lower::Lowerer;
use crate::recover::{recover_assign_or_return, single_resolved, OrFailStmt, OrFailValue};
use crate::types::Shape;

fn boxed(e: IlExpr) -> Box<IlExpr> {
    Box::new(e)
}

/// Evaluate `first` for its effect, then `rest`.
fn then(first: IlExpr, rest: IlExpr) -> IlExpr {
    match rest {
        IlExpr::Unit => first,
        IlExpr::Block { mut exprs } => {
            exprs.insert(0, first);
            IlExpr::Block { exprs }
        }
        rest => IlExpr::Block {
            exprs: vec![first, rest],
        },
    }
}

/// One name introduced by a `var` or `let` with an initial value.
pub(crate) struct Binding {
    /// `None` for `_`, whose value is evaluated and dropped.
    pub(crate) name: Option<String>,
    pub(crate) ty: IlType,
    pub(crate) value: IlExpr,
    pub(crate) ghost: bool,
}

/// Temporaries holding right-hand sides. `#` never occurs in a source name.
fn temp_name(index: usize) -> String {
    format!("_#rhs{index}")
}

fn plain_let(name: String, ty: IlType, value: IlExpr, ghost: bool, body: IlExpr) -> IlExpr {
    IlExpr::Let {
        name,
        ty,
        value: Some(boxed(value)),
        body: boxed(body),
        mode: LetMode::Plain,
        ghost,
    }
}

/// Bind `bindings` around `body` simultaneously: every value is evaluated,
/// left to right, before any of the new names is in scope.
///
/// A lone binding is a plain `let`. Several go through temporaries so that
/// `var x, y := 1, x;` reads the `x` from before the declaration.
pub(crate) fn bind_simultaneously(mut bindings: Vec<Binding>, body: IlExpr) -> IlExpr {
    if bindings.len() == 1 {
        let b = bindings.remove(0);
        return match b.name {
            Some(name) => plain_let(name, b.ty, b.value, b.ghost, body),
            None => then(b.value, body),
        };
    }

    let mut out = body;
    for (i, b) in bindings.iter().enumerate().rev() {
        if let Some(name) = &b.name {
            out = plain_let(name.clone(), b.ty.clone(), IlExpr::var(temp_name(i)), b.ghost, out);
        }
    }
    for (i, b) in bindings.into_iter().enumerate().rev() {
        out = match b.name {
            Some(_) => plain_let(temp_name(i), b.ty, b.value, b.ghost, out),
            None => then(b.value, out),
        };
    }
    out
}

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_block(&self, stmts: &[Stmt]) -> LowerResult<IlExpr> {
        let mut out = Vec::new();
        for (i, stmt) in stmts.iter().enumerate() {
            if matches!(
                stmt.kind,
                StmtKind::VarDecl { .. } | StmtKind::AssignOrReturn(_)
            ) {
                out.push(self.lower_scoped(stmt, &stmts[i + 1..])?);
                return Ok(IlExpr::block(out));
            }
            let lowered = self.lower_stmt(stmt)?;
            if !lowered.is_unit() {
                out.push(lowered);
            }
        }
        Ok(IlExpr::block(out))
    }

    fn lower_scoped(&self, stmt: &Stmt, rest: &[Stmt]) -> LowerResult<IlExpr> {
        let lowered = match &stmt.kind {
            StmtKind::VarDecl { locals, update } => {
                self.lower_var_decl(locals, update.as_deref(), rest)
            }
            StmtKind::AssignOrReturn(s) => recover_assign_or_return(s)
                .and_then(|parts| self.lower_or_fail(parts, None, rest)),
            _ => return self.lower_stmt(stmt),
        };
        lowered.map_err(|e| e.within(|| self.program.render_stmt(stmt), stmt.loc))
    }

    pub(crate) fn lower_stmt(&self, stmt: &Stmt) -> LowerResult<IlExpr> {
        self.lower_stmt_kind(stmt)
            .map_err(|e| e.within(|| self.program.render_stmt(stmt), stmt.loc))
    }

    fn lower_stmt_kind(&self, stmt: &Stmt) -> LowerResult<IlExpr> {
        match &stmt.kind {
            StmtKind::Block { body } => self.lower_block(body),
            StmtKind::VarDecl { .. } | StmtKind::AssignOrReturn(_) => {
                self.lower_scoped(stmt, &[])
            }
            StmtKind::VarDeclPattern { .. } => Err(LowerError::unsupported(
                "destructuring variable declaration",
            )),
            StmtKind::Update(u) => self.lower_update_stmt(u),
            StmtKind::AssignSuchThat { .. } => {
                Err(LowerError::unsupported("assign-such-that statement `:|`"))
            }
            StmtKind::Assign { lhs, rhs } => Ok(IlExpr::Assign {
                target: self.lower_target(lhs)?,
                value: boxed(self.lower_rhs(rhs)?),
            }),
            StmtKind::Call { lhss, method, .. } => {
                let call = self.lower_call(stmt)?;
                match self.call_result(lhss, *method)? {
                    Some(target) => Ok(IlExpr::Assign {
                        target: self.lower_target(target)?,
                        value: boxed(call),
                    }),
                    None => Ok(call),
                }
            }
            StmtKind::If { guard, then, els } => {
                let guard = guard
                    .as_ref()
                    .ok_or_else(|| LowerError::unsupported("nondeterministic `if *`"))?;
                Ok(IlExpr::If {
                    cond: boxed(self.lower_expr(guard)?),
                    then_body: boxed(self.lower_block(then)?),
                    else_body: els
                        .as_deref()
                        .map(|e| self.lower_stmt(e).map(boxed))
                        .transpose()?,
                })
            }
            StmtKind::While { guard, body } => {
                let guard = guard
                    .as_ref()
                    .ok_or_else(|| LowerError::unsupported("nondeterministic `while *`"))?;
                let body = body
                    .as_ref()
                    .ok_or_else(|| LowerError::unsupported("loop without a body"))?;
                Ok(IlExpr::While {
                    cond: boxed(self.lower_expr(guard)?),
                    body: boxed(self.lower_block(body)?),
                })
            }
            StmtKind::For {
                var,
                start,
                end,
                up,
                body,
            } => {
                let body = body
                    .as_ref()
                    .ok_or_else(|| LowerError::unsupported("loop without a body"))?;
                Ok(IlExpr::ForRange {
                    var: self.lower_bound_var(var)?,
                    start: boxed(self.lower_expr(start)?),
                    end: end.as_ref().map(|e| self.lower_expr(e).map(boxed)).transpose()?,
                    up: *up,
                    body: boxed(self.lower_block(body)?),
                })
            }
            StmtKind::Break { label, count } => {
                if label.is_some() {
                    return Err(LowerError::unsupported("labeled `break`"));
                }
                if *count != 1 {
                    return Err(LowerError::unsupported("multi-level `break`"));
                }
                Ok(IlExpr::Break)
            }
            StmtKind::Return { values } => self.lower_return(values),
            StmtKind::Match { source, cases } => {
                let arms = cases
                    .iter()
                    .map(|c| self.lower_case_stmt(c))
                    .collect::<LowerResult<Vec<_>>>()?;
                Ok(IlExpr::Match {
                    scrutinee: boxed(self.lower_expr(source)?),
                    arms,
                })
            }
            StmtKind::Print { args } => Ok(IlExpr::Print {
                args: self.lower_exprs(args)?,
            }),
            StmtKind::Expect { cond, message } => Ok(IlExpr::Expect {
                cond: boxed(self.lower_expr(cond)?),
                message: message
                    .as_ref()
                    .map(|m| self.lower_expr(m).map(boxed))
                    .transpose()?,
            }),
            // Proof statements carry no data flow.
            StmtKind::Proof { .. } => Ok(IlExpr::Unit),
        }
    }

    /// The call expression of a resolved call statement, ignoring its
    /// left-hand sides.
    fn lower_call(&self, stmt: &Stmt) -> LowerResult<IlExpr> {
        let StmtKind::Call {
            receiver,
            method,
            type_args,
            args,
            ..
        } = &stmt.kind
        else {
            return Err(LowerError::invariant("expected a resolved call"));
        };
        Ok(IlExpr::Call {
            callee: self.path_of(*method)?,
            receiver: receiver
                .as_deref()
                .map(|r| self.lower_expr(r).map(boxed))
                .transpose()?,
            type_args: self.lower_types(type_args)?,
            args: self.lower_exprs(args)?,
        })
    }

    fn lower_update_stmt(&self, update: &UpdateStmt) -> LowerResult<IlExpr> {
        let single = single_resolved(update)?;
        match &single.kind {
            StmtKind::Assign { .. } | StmtKind::Call { .. } => self.lower_stmt(single),
            other => Err(LowerError::invariant(format!(
                "update statement resolved into {}",
                stmt_kind_name(other)
            ))),
        }
    }

    /// The left-hand side receiving the one non-ghost result of a call, if
    /// any. Ghost results are dropped.
    fn call_result<'s>(&self, lhss: &'s [Expr], method: DeclId) -> LowerResult<Option<&'s Expr>> {
        if lhss.is_empty() {
            return Ok(None);
        }
        let outs = self.routine_outs(method)?;
        if outs.len() != lhss.len() {
            return Err(LowerError::invariant(format!(
                "call binds {} results of a routine with {} outputs",
                lhss.len(),
                outs.len()
            )));
        }
        let mut computational = lhss.iter().zip(outs).filter(|(_, out)| !out.is_ghost);
        let first = computational.next();
        if computational.next().is_some() {
            return Err(LowerError::unsupported(
                "call binding more than one non-ghost result",
            ));
        }
        Ok(first
            .map(|(lhs, _)| lhs)
            .filter(|lhs| !matches!(&lhs.kind, ExprKind::Ident { name } if name == "_")))
    }

    pub(crate) fn lower_target(&self, lhs: &Expr) -> LowerResult<AssignTarget> {
        match &lhs.kind {
            ExprKind::Ident { name } => Ok(AssignTarget::Var { name: name.clone() }),
            ExprKind::MemberSelect { receiver, member } => Ok(AssignTarget::Field {
                receiver: receiver
                    .as_deref()
                    .map(|r| self.lower_expr(r).map(boxed))
                    .transpose()?,
                field: self.path_of(*member)?,
            }),
            ExprKind::SeqSelect {
                seq,
                select_one: true,
                lo: Some(index),
                ..
            } if self.shape_of(seq)? == Shape::Array(1) => Ok(AssignTarget::Index {
                array: boxed(self.lower_expr(seq)?),
                index: boxed(self.lower_expr(index)?),
            }),
            ExprKind::MultiSelect { .. } => Err(LowerError::unsupported(
                "multi-dimensional array element as assignment target",
            )),
            _ => Err(LowerError::unsupported(format!(
                "assignment target `{}`",
                self.program.render_expr(lhs)
            ))),
        }
    }

    fn lower_rhs(&self, rhs: &AssignRhs) -> LowerResult<IlExpr> {
        match rhs {
            AssignRhs::Expr { expr } => self.lower_expr(expr),
            AssignRhs::Havoc => Err(LowerError::unsupported("havoc right-hand side `*`")),
            AssignRhs::NewArray {
                elem,
                dims,
                init,
                elements,
            } => {
                let [size] = dims.as_slice() else {
                    return Err(LowerError::unsupported("multi-dimensional array allocation"));
                };
                let elem = self.lower_type(elem)?;
                if let Some(elements) = elements {
                    return Ok(IlExpr::ArrayDisplay {
                        elem,
                        elems: self.lower_exprs(elements)?,
                    });
                }
                Ok(IlExpr::NewArray {
                    elem,
                    size: boxed(self.lower_expr(size)?),
                    init: init.as_ref().map(|i| self.lower_expr(i).map(boxed)).transpose()?,
                })
            }
            AssignRhs::NewObject { class, ctor, args } => Ok(IlExpr::New {
                class: self.lower_type(class)?,
                ctor: ctor.map(|c| self.path_of(c)).transpose()?,
                args: self.lower_exprs(args)?,
            }),
        }
    }

    fn lower_var_decl(
        &self,
        locals: &[LocalVar],
        update: Option<&Stmt>,
        rest: &[Stmt],
    ) -> LowerResult<IlExpr> {
        let Some(update) = update else {
            let mut out = self.lower_block(rest)?;
            for local in locals.iter().rev() {
                out = self.bind(local, None, out, LetMode::Plain)?;
            }
            return Ok(out);
        };
        match &update.kind {
            StmtKind::Update(u) => self.lower_var_init(locals, u, rest),
            StmtKind::AssignOrReturn(s) => {
                let [local] = locals else {
                    return Err(LowerError::unsupported(
                        "`:-` declaring several variables",
                    ));
                };
                let parts = recover_assign_or_return(s)?;
                self.lower_or_fail(parts, Some(local), rest)
            }
            other => Err(LowerError::invariant(format!(
                "variable declaration initialized by {}",
                stmt_kind_name(other)
            ))),
        }
    }

    fn lower_var_init(
        &self,
        locals: &[LocalVar],
        update: &UpdateStmt,
        rest: &[Stmt],
    ) -> LowerResult<IlExpr> {
        if let [Stmt {
            kind: StmtKind::Call { lhss, method, .. },
            ..
        }] = update.resolved.as_slice()
        {
            return self.lower_var_call(locals, &update.resolved[0], lhss, *method, rest);
        }
        if update.rhss.len() != locals.len() {
            return Err(LowerError::invariant(format!(
                "{} variables initialized by {} right-hand sides",
                locals.len(),
                update.rhss.len()
            )));
        }
        if update.resolved.len() != locals.len() {
            return Err(LowerError::invariant(format!(
                "{} variables initialized by {} resolved assignments",
                locals.len(),
                update.resolved.len()
            )));
        }
        let mut bindings = Vec::with_capacity(locals.len());
        for (local, resolved) in locals.iter().zip(&update.resolved) {
            let StmtKind::Assign { rhs, .. } = &resolved.kind else {
                return Err(LowerError::invariant(format!(
                    "variable initializer resolved into {}",
                    stmt_kind_name(&resolved.kind)
                )));
            };
            bindings.push(Binding {
                name: (!local.is_discarded()).then(|| local.name.clone()),
                ty: self.lower_type(&local.ty)?,
                value: self.lower_rhs(rhs)?,
                ghost: local.is_ghost,
            });
        }
        Ok(bind_simultaneously(bindings, self.lower_block(rest)?))
    }

    /// `var a, ghost g := M(...);` binds the non-ghost result to its local
    /// and declares the ghost locals uninitialized.
    fn lower_var_call(
        &self,
        locals: &[LocalVar],
        call: &Stmt,
        lhss: &[Expr],
        method: DeclId,
        rest: &[Stmt],
    ) -> LowerResult<IlExpr> {
        let bound = self.call_result(lhss, method)?;
        let receiving = bound.and_then(|lhs| match &lhs.kind {
            ExprKind::Ident { name } => locals.iter().position(|l| &l.name == name),
            _ => None,
        });
        if bound.is_some() && receiving.is_none() {
            return Err(LowerError::invariant(
                "call result in a declaration is not bound to a declared variable",
            ));
        }
        let value = self.lower_call(call)?;

        let mut out = self.lower_block(rest)?;
        for (i, local) in locals.iter().enumerate().rev() {
            if local.is_discarded() {
                continue;
            }
            let init = (Some(i) == receiving).then(|| value.clone());
            out = self.bind(local, init, out, LetMode::Plain)?;
        }
        if receiving.is_none() {
            out = then(value, out);
        }
        Ok(out)
    }

    fn lower_or_fail(
        &self,
        parts: OrFailStmt<'_>,
        declared: Option<&LocalVar>,
        rest: &[Stmt],
    ) -> LowerResult<IlExpr> {
        let value = match parts.value {
            OrFailValue::Expr(e) => self.lower_expr(e)?,
            OrFailValue::Call(call) => self.lower_call(call)?,
        };
        let rest = self.lower_block(rest)?;
        match (declared, parts.target) {
            (Some(local), _) => self.bind(local, Some(value), rest, LetMode::OrFail),
            (None, Some(target)) => {
                let assign = IlExpr::Assign {
                    target: self.lower_target(target)?,
                    value: boxed(IlExpr::var(parts.tmp.name.clone())),
                };
                self.bind(parts.tmp, Some(value), then(assign, rest), LetMode::OrFail)
            }
            (None, None) => self.bind(parts.tmp, Some(value), rest, LetMode::OrFail),
        }
    }

    fn bind(
        &self,
        local: &LocalVar,
        value: Option<IlExpr>,
        body: IlExpr,
        mode: LetMode,
    ) -> LowerResult<IlExpr> {
        Ok(IlExpr::Let {
            name: local.name.clone(),
            ty: self.lower_type(&local.ty)?,
            value: value.map(boxed),
            body: boxed(body),
            mode,
            ghost: local.is_ghost,
        })
    }

    fn lower_return(&self, values: &[Expr]) -> LowerResult<IlExpr> {
        if values.is_empty() {
            return Ok(IlExpr::Return { value: None });
        }
        let outs: &[Formal] = self
            .outs
            .ok_or_else(|| LowerError::invariant("`return` outside a routine body"))?;
        if outs.len() != values.len() {
            return Err(LowerError::invariant(format!(
                "`return` with {} values from a routine with {} outputs",
                values.len(),
                outs.len()
            )));
        }
        let mut computational = values.iter().zip(outs).filter(|(_, out)| !out.is_ghost);
        let value = computational.next().map(|(v, _)| v);
        if computational.next().is_some() {
            return Err(LowerError::unsupported("returning more than one non-ghost value"));
        }
        Ok(IlExpr::Return {
            value: value.map(|v| self.lower_expr(v).map(boxed)).transpose()?,
        })
    }

    fn lower_case_stmt(&self, case: &MatchCaseStmt) -> LowerResult<MatchArm> {
        Ok(MatchArm {
            pattern: self.case_pattern(case.ctor, &case.args)?,
            body: self.lower_block(&case.body)?,
        })
    }

    pub(crate) fn lower_formals(&self, formals: &[Formal]) -> LowerResult<Vec<Param>> {
        formals
            .iter()
            .map(|f| {
                Ok(Param {
                    name: f.name.clone(),
                    ty: self.lower_type(&f.ty)?,
                    ghost: f.is_ghost,
                })
            })
            .collect()
    }
}

fn stmt_kind_name(kind: &StmtKind) -> &'static str {
    match kind {
        StmtKind::Block { .. } => "a block",
        StmtKind::VarDecl { .. } => "a variable declaration",
        StmtKind::VarDeclPattern { .. } => "a pattern declaration",
        StmtKind::Update(_) => "an update",
        StmtKind::AssignOrReturn(_) => "a `:-` statement",
        StmtKind::AssignSuchThat { .. } => "a `:|` statement",
        StmtKind::Assign { .. } => "an assignment",
        StmtKind::Call { .. } => "a call",
        StmtKind::If { .. } => "an `if`",
        StmtKind::While { .. } => "a `while`",
        StmtKind::For { .. } => "a `for`",
        StmtKind::Break { .. } => "a `break`",
        StmtKind::Return { .. } => "a `return`",
        StmtKind::Match { .. } => "a `match`",
        StmtKind::Print { .. } => "a `print`",
        StmtKind::Expect { .. } => "an `expect`",
        StmtKind::Proof { .. } => "a proof statement",
    }
}
