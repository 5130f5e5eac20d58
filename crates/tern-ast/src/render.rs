//! Compact source-like rendering of resolved nodes, for error messages.
//!
//! Declarations are printed by name; nested expressions are printed in full,
//! statements only by their head.

use std::fmt::Write;

use crate::expr::{Expr, ExprKind, Literal, QuantifierKind, UnaryOp};
use crate::stmt::{AssignRhs, Stmt, StmtKind};
use crate::ty::Type;
use crate::{DeclId, ResolvedProgram};

impl ResolvedProgram {
    fn decl_name(&self, id: DeclId) -> &str {
        self.get(id).map(|d| d.name.as_str()).unwrap_or("<unknown>")
    }

    pub fn render_type(&self, ty: &Type) -> String {
        match ty {
            Type::Bool => "bool".into(),
            Type::Char => "char".into(),
            Type::Int => "int".into(),
            Type::Real => "real".into(),
            Type::BitVector { width } => format!("bv{width}"),
            Type::Set { elem } => format!("set<{}>", self.render_type(elem)),
            Type::ISet { elem } => format!("iset<{}>", self.render_type(elem)),
            Type::Multiset { elem } => format!("multiset<{}>", self.render_type(elem)),
            Type::Seq { elem } => format!("seq<{}>", self.render_type(elem)),
            Type::Map { key, value } => {
                format!("map<{}, {}>", self.render_type(key), self.render_type(value))
            }
            Type::IMap { key, value } => {
                format!("imap<{}, {}>", self.render_type(key), self.render_type(value))
            }
            Type::TypeParam { name } => name.clone(),
            Type::UserDefined { decl, args } => {
                let mut out = self.decl_name(*decl).to_string();
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(|a| self.render_type(a)).collect();
                    let _ = write!(out, "<{}>", args.join(", "));
                }
                out
            }
        }
    }

    pub fn render_expr(&self, expr: &Expr) -> String {
        match &expr.kind {
            ExprKind::Literal { value } => match value {
                Literal::Bool(b) => b.to_string(),
                Literal::Char(c) => format!("{c:?}"),
                Literal::String(s) => format!("{s:?}"),
                Literal::Int(v) | Literal::Real(v) => v.clone(),
                Literal::Null => "null".into(),
            },
            ExprKind::Ident { name } => name.clone(),
            ExprKind::This => "this".into(),
            ExprKind::MemberSelect { receiver, member } => match receiver {
                Some(r) => format!("{}.{}", self.render_expr(r), self.decl_name(*member)),
                None => self.decl_name(*member).to_string(),
            },
            ExprKind::FunctionCall {
                receiver,
                function,
                args,
                ..
            } => {
                let callee = match receiver {
                    Some(r) => format!("{}.{}", self.render_expr(r), self.decl_name(*function)),
                    None => self.decl_name(*function).to_string(),
                };
                format!("{callee}({})", self.render_list(args))
            }
            ExprKind::Apply { callee, args } => {
                format!("{}({})", self.render_expr(callee), self.render_list(args))
            }
            ExprKind::DatatypeValue { ctor, args, .. } => {
                if args.is_empty() {
                    self.decl_name(*ctor).to_string()
                } else {
                    format!("{}({})", self.decl_name(*ctor), self.render_list(args))
                }
            }
            ExprKind::SeqDisplay { elements } => format!("[{}]", self.render_list(elements)),
            ExprKind::SetDisplay { elements, finite } => {
                let kw = if *finite { "" } else { "iset" };
                format!("{kw}{{{}}}", self.render_list(elements))
            }
            ExprKind::MultisetDisplay { elements } => {
                format!("multiset{{{}}}", self.render_list(elements))
            }
            ExprKind::MapDisplay { entries, finite } => {
                let kw = if *finite { "map" } else { "imap" };
                let entries: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{} := {}", self.render_expr(k), self.render_expr(v)))
                    .collect();
                format!("{kw}[{}]", entries.join(", "))
            }
            ExprKind::SeqSelect {
                seq,
                select_one,
                lo,
                hi,
            } => {
                let opt = |e: &Option<Box<Expr>>| {
                    e.as_ref().map(|e| self.render_expr(e)).unwrap_or_default()
                };
                if *select_one {
                    format!("{}[{}]", self.render_expr(seq), opt(lo))
                } else {
                    format!("{}[{}..{}]", self.render_expr(seq), opt(lo), opt(hi))
                }
            }
            ExprKind::MultiSelect { array, indices } => {
                format!("{}[{}]", self.render_expr(array), self.render_list(indices))
            }
            ExprKind::SeqUpdate { seq, index, value } => format!(
                "{}[{} := {}]",
                self.render_expr(seq),
                self.render_expr(index),
                self.render_expr(value)
            ),
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Not => format!("!{}", self.render_expr(operand)),
                UnaryOp::Neg => format!("-{}", self.render_expr(operand)),
                UnaryOp::Cardinality => format!("|{}|", self.render_expr(operand)),
            },
            ExprKind::Binary { op, lhs, rhs } => format!(
                "{} {} {}",
                self.render_expr(lhs),
                op.symbol(),
                self.render_expr(rhs)
            ),
            ExprKind::Conversion { expr, to } => {
                format!("{} as {}", self.render_expr(expr), self.render_type(to))
            }
            ExprKind::Let { binds, body } => {
                let binds: Vec<String> = binds
                    .iter()
                    .map(|b| format!("{} := {}", b.var.name, self.render_expr(&b.rhs)))
                    .collect();
                format!("var {}; {}", binds.join(", "), self.render_expr(body))
            }
            ExprKind::LetOrFail { lhs, rhs, body, .. } => match lhs {
                Some(v) => format!(
                    "var {} :- {}; {}",
                    v.name,
                    self.render_expr(rhs),
                    self.render_expr(body)
                ),
                None => format!(":- {}; {}", self.render_expr(rhs), self.render_expr(body)),
            },
            ExprKind::Ite { cond, then, els } => format!(
                "if {} then {} else {}",
                self.render_expr(cond),
                self.render_expr(then),
                self.render_expr(els)
            ),
            ExprKind::Match { source, .. } => format!("match {} {{ ... }}", self.render_expr(source)),
            ExprKind::Lambda { params, body } => {
                let params: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
                format!("({}) => {}", params.join(", "), self.render_expr(body))
            }
            ExprKind::Quantifier {
                quantifier,
                type_args,
                vars,
                range,
                term,
            } => {
                let kw = match quantifier {
                    QuantifierKind::Forall => "forall",
                    QuantifierKind::Exists => "exists",
                    QuantifierKind::Other => "<quantifier>",
                };
                let targs = if type_args.is_empty() {
                    String::new()
                } else {
                    format!("<{}>", type_args.join(", "))
                };
                let vars: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
                let range = range
                    .as_ref()
                    .map(|r| format!(" | {}", self.render_expr(r)))
                    .unwrap_or_default();
                format!("{kw}{targs} {}{range} :: {}", vars.join(", "), self.render_expr(term))
            }
            ExprKind::SetComprehension {
                finite,
                vars,
                range,
                term,
            } => {
                let kw = if *finite { "set" } else { "iset" };
                let vars: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
                let term = term
                    .as_ref()
                    .map(|t| format!(" :: {}", self.render_expr(t)))
                    .unwrap_or_default();
                format!("{kw} {} | {}{term}", vars.join(", "), self.render_expr(range))
            }
            ExprKind::MapComprehension {
                finite,
                vars,
                range,
                key,
                value,
            } => {
                let kw = if *finite { "map" } else { "imap" };
                let vars: Vec<&str> = vars.iter().map(|v| v.name.as_str()).collect();
                let key = key
                    .as_ref()
                    .map(|k| format!("{} := ", self.render_expr(k)))
                    .unwrap_or_default();
                format!(
                    "{kw} {} | {} :: {key}{}",
                    vars.join(", "),
                    self.render_expr(range),
                    self.render_expr(value)
                )
            }
        }
    }

    fn render_list(&self, exprs: &[Expr]) -> String {
        let parts: Vec<String> = exprs.iter().map(|e| self.render_expr(e)).collect();
        parts.join(", ")
    }

    fn render_rhs(&self, rhs: &AssignRhs) -> String {
        match rhs {
            AssignRhs::Expr { expr } => self.render_expr(expr),
            AssignRhs::Havoc => "*".into(),
            AssignRhs::NewArray { elem, dims, .. } => {
                format!("new {}[{}]", self.render_type(elem), self.render_list(dims))
            }
            AssignRhs::NewObject { class, args, .. } => {
                format!("new {}({})", self.render_type(class), self.render_list(args))
            }
        }
    }

    /// Render the head of a statement (bodies are elided).
    pub fn render_stmt(&self, stmt: &Stmt) -> String {
        match &stmt.kind {
            StmtKind::Block { .. } => "{ ... }".into(),
            StmtKind::VarDecl { locals, update } => {
                let names: Vec<&str> = locals.iter().map(|l| l.name.as_str()).collect();
                let names = names.join(", ");
                match update.as_deref().map(|u| &u.kind) {
                    Some(StmtKind::Update(u)) => {
                        let rhss: Vec<String> = u.rhss.iter().map(|r| self.render_rhs(r)).collect();
                        format!("var {names} := {};", rhss.join(", "))
                    }
                    Some(StmtKind::AssignOrReturn(s)) => {
                        format!("var {names} :- {};", self.render_expr(&s.rhs))
                    }
                    _ => format!("var {names};"),
                }
            }
            StmtKind::VarDeclPattern { pattern, rhs } => {
                let names: Vec<&str> = pattern.iter().map(|l| l.name.as_str()).collect();
                format!("var ({}) := {};", names.join(", "), self.render_expr(rhs))
            }
            StmtKind::Update(u) => {
                let rhss: Vec<String> = u.rhss.iter().map(|r| self.render_rhs(r)).collect();
                if u.lhss.is_empty() {
                    format!("{};", rhss.join(", "))
                } else {
                    format!("{} := {};", self.render_list(&u.lhss), rhss.join(", "))
                }
            }
            StmtKind::AssignOrReturn(s) => {
                format!("{} :- {};", self.render_list(&s.lhss), self.render_expr(&s.rhs))
            }
            StmtKind::AssignSuchThat { lhss, constraint } => {
                format!("{} :| {};", self.render_list(lhss), self.render_expr(constraint))
            }
            StmtKind::Assign { lhs, rhs } => {
                format!("{} := {};", self.render_expr(lhs), self.render_rhs(rhs))
            }
            StmtKind::Call {
                lhss, method, args, ..
            } => {
                let call = format!("{}({})", self.decl_name(*method), self.render_list(args));
                if lhss.is_empty() {
                    format!("{call};")
                } else {
                    format!("{} := {call};", self.render_list(lhss))
                }
            }
            StmtKind::If { guard, .. } => match guard {
                Some(g) => format!("if {} {{ ... }}", self.render_expr(g)),
                None => "if * { ... }".into(),
            },
            StmtKind::While { guard, .. } => match guard {
                Some(g) => format!("while {} {{ ... }}", self.render_expr(g)),
                None => "while * { ... }".into(),
            },
            StmtKind::For { var, up, .. } => {
                let dir = if *up { "to" } else { "downto" };
                format!("for {} := ... {dir} ... {{ ... }}", var.name)
            }
            StmtKind::Break { label, count } => match label {
                Some(l) => format!("break {l};"),
                None => "break;".repeat(*count as usize),
            },
            StmtKind::Return { values } => {
                if values.is_empty() {
                    "return;".into()
                } else {
                    format!("return {};", self.render_list(values))
                }
            }
            StmtKind::Match { source, .. } => format!("match {} {{ ... }}", self.render_expr(source)),
            StmtKind::Print { args } => format!("print {};", self.render_list(args)),
            StmtKind::Expect { cond, .. } => format!("expect {};", self.render_expr(cond)),
            StmtKind::Proof { proof } => format!("{proof:?}").to_lowercase(),
        }
    }
}
