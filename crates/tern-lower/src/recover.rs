//! Recovery of source constructs from the front end's resolved forms.
//!
//! The resolver replaces update statements and `:-` binds with lists of
//! simpler statements (or, for `:-` expressions, a let/if chain). The
//! lowering reads the original meaning back out of those forms. Each
//! recognizer matches one exact shape; anything else means the tree came
//! from a resolver this lowering was not built against.

use tern_ast::stmt::{AssignOrReturnStmt, AssignRhs, LocalVar, UpdateStmt};
use tern_ast::{BoundVar, Expr, ExprKind, Stmt, StmtKind};
use tern_il::{Expr as IlExpr, LetMode};
use tracing::trace;

use crate::error::{LowerError, LowerResult};
use crate::lower::Lowerer;

/// What the temporary of a `:-` statement is initialized with.
#[derive(Debug, Clone, Copy)]
pub(crate) enum OrFailValue<'t> {
    Expr(&'t Expr),
    /// A resolved method call statement assigning the temporary.
    Call(&'t Stmt),
}

/// A `:-` statement read back from its four-statement resolution:
///
/// ```text
/// var tmp;
/// tmp := <rhs>;
/// if tmp.IsFailure() { return tmp.PropagateFailure(); }
/// <lhs> := tmp.Extract();
/// ```
///
/// The last statement is absent when the statement has no left-hand side.
#[derive(Debug, Clone, Copy)]
pub(crate) struct OrFailStmt<'t> {
    pub tmp: &'t LocalVar,
    pub value: OrFailValue<'t>,
    pub target: Option<&'t Expr>,
}

fn is_ident(expr: &Expr, name: &str) -> bool {
    matches!(&expr.kind, ExprKind::Ident { name: n } if n == name)
}

/// `tmp.Extract()`, or `tmp` when the type has no `Extract` member.
fn extracts_from(expr: &Expr, tmp: &str) -> bool {
    match &expr.kind {
        ExprKind::FunctionCall {
            receiver: Some(r), ..
        } => is_ident(r, tmp),
        _ => is_ident(expr, tmp),
    }
}

/// The single statement an update resolved into.
pub(crate) fn single_resolved(update: &UpdateStmt) -> LowerResult<&Stmt> {
    match update.resolved.as_slice() {
        [] => Err(LowerError::invariant("update statement has no resolved form")),
        [single] => Ok(single),
        many => Err(LowerError::unsupported(format!(
            "update statement resolved into {} statements",
            many.len()
        ))),
    }
}

pub(crate) fn recover_assign_or_return(s: &AssignOrReturnStmt) -> LowerResult<OrFailStmt<'_>> {
    if s.lhss.len() > 1 {
        return Err(LowerError::unsupported("`:-` with several left-hand sides"));
    }
    let target = s.lhss.first();
    let expected = if target.is_some() { 4 } else { 3 };
    let shape_error = |what: &str| {
        LowerError::invariant(format!("`:-` statement did not resolve as expected: {what}"))
    };
    if s.resolved.len() != expected {
        return Err(shape_error(&format!(
            "{} statements instead of {expected}",
            s.resolved.len()
        )));
    }

    let tmp = match &s.resolved[0].kind {
        StmtKind::VarDecl {
            locals,
            update: None,
        } if locals.len() == 1 => &locals[0],
        _ => return Err(shape_error("first statement is not a temporary declaration")),
    };

    let StmtKind::Update(init) = &s.resolved[1].kind else {
        return Err(shape_error("second statement is not an update"));
    };
    let value = match init.resolved.as_slice() {
        [Stmt {
            kind:
                StmtKind::Assign {
                    lhs,
                    rhs: AssignRhs::Expr { expr },
                },
            ..
        }] if is_ident(lhs, &tmp.name) => OrFailValue::Expr(expr),
        [call @ Stmt {
            kind: StmtKind::Call { lhss, .. },
            ..
        }] if matches!(lhss.as_slice(), [l] if is_ident(l, &tmp.name)) => OrFailValue::Call(call),
        _ => return Err(shape_error("temporary is not initialized by a single assignment")),
    };

    if !matches!(s.resolved[2].kind, StmtKind::If { .. }) {
        return Err(shape_error("third statement is not the failure check"));
    }
    if let Some(target) = target {
        let StmtKind::Update(extract) = &s.resolved[3].kind else {
            return Err(shape_error("fourth statement is not the extraction"));
        };
        match extract.resolved.as_slice() {
            [Stmt {
                kind:
                    StmtKind::Assign {
                        lhs,
                        rhs: AssignRhs::Expr { expr },
                    },
                ..
            }] if lhs.kind == target.kind && extracts_from(expr, &tmp.name) => {}
            _ => {
                return Err(shape_error(
                    "fourth statement does not assign the target from the temporary",
                ))
            }
        }
    }

    trace!(tmp = %tmp.name, "recovered `:-` statement");
    Ok(OrFailStmt { tmp, value, target })
}

/// Read the temporary out of the resolved form of a `:-` expression:
///
/// ```text
/// var tmp := <rhs>; if tmp.IsFailure() then <fail> else var v := tmp.Extract(); <body>
/// ```
///
/// The inner let is present exactly when the expression binds a variable.
pub(crate) fn recover_let_or_fail<'t>(
    lhs: Option<&BoundVar>,
    resolved: &'t Expr,
) -> LowerResult<&'t BoundVar> {
    let unrecognized = || LowerError::unsupported("unrecognized desugaring of a `:-` expression");
    let ExprKind::Let { binds, body } = &resolved.kind else {
        return Err(unrecognized());
    };
    let [tmp] = binds.as_slice() else {
        return Err(unrecognized());
    };
    let ExprKind::Ite { els, .. } = &body.kind else {
        return Err(unrecognized());
    };
    if let Some(var) = lhs {
        match &els.kind {
            ExprKind::Let { binds, .. } if matches!(binds.as_slice(), [b] if b.var.name == var.name) => {}
            _ => return Err(unrecognized()),
        }
    }
    trace!(tmp = %tmp.var.name, "recovered `:-` expression");
    Ok(&tmp.var)
}

impl<'a> Lowerer<'a> {
    pub(crate) fn lower_let_or_fail(
        &self,
        lhs: Option<&BoundVar>,
        rhs: &Expr,
        body: &Expr,
        resolved: Option<&Expr>,
    ) -> LowerResult<IlExpr> {
        let resolved = resolved
            .ok_or_else(|| LowerError::invariant("`:-` expression has no resolved form"))?;
        let tmp = recover_let_or_fail(lhs, resolved)?;
        let var = lhs.unwrap_or(tmp);
        Ok(IlExpr::Let {
            name: var.name.clone(),
            ty: self.lower_type(&var.ty)?,
            value: Some(Box::new(self.lower_expr(rhs)?)),
            body: Box::new(self.lower_expr(body)?),
            mode: LetMode::OrFail,
            ghost: var.is_ghost,
        })
    }
}
