//! The Tern intermediate language.
//!
//! A lowered program is a name plus an ordered list of declarations. Every
//! declaration is addressed by a dotted [`Path`]; nothing in the IL points
//! back into the resolved tree except the [`SourcePos`] kept for
//! diagnostics. Values are built once by the lowering and never mutated.

pub mod decl;
pub mod expr;
pub mod path;
pub mod ty;

use serde::{Deserialize, Serialize};

pub use decl::{Ctor, Decl, DeclKind, Output, RoutineKind};
pub use expr::{
    AssignTarget, BinOp, CasePattern, Expr, LetMode, Literal, MatchArm, Param, QuantKind, UnOp,
};
pub use path::Path;
pub use tern_common::SourcePos;
pub use ty::{FunctionKind, Type};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub name: String,
    pub decls: Vec<Decl>,
}

impl Program {
    /// Every declaration in the program, depth first in declaration order.
    pub fn all_decls(&self) -> Vec<&Decl> {
        let mut out = Vec::new();
        for decl in &self.decls {
            decl.walk(&mut |d| out.push(d));
        }
        out
    }

    /// Find a declaration by its dotted path.
    pub fn find(&self, path: &str) -> Option<&Decl> {
        self.all_decls()
            .into_iter()
            .find(|d| d.path.to_string() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos() -> SourcePos {
        SourcePos {
            file: "main.src".into(),
            offset: 0,
            line: 1,
            col: 1,
        }
    }

    fn field(path: Path) -> Decl {
        Decl {
            name: path.name().to_string(),
            path,
            pos: pos(),
            kind: DeclKind::Field {
                ty: Type::Int,
                init: None,
                is_ghost: false,
                is_mutable: true,
                is_static: false,
            },
        }
    }

    #[test]
    fn find_walks_nested_declarations() {
        let m = Path::single("M");
        let program = Program {
            name: "p".into(),
            decls: vec![Decl {
                name: "M".into(),
                path: m.clone(),
                pos: pos(),
                kind: DeclKind::Module {
                    decls: vec![field(m.child("x")), field(m.child("y"))],
                },
            }],
        };
        assert_eq!(program.all_decls().len(), 3);
        assert!(program.find("M.y").is_some());
        assert!(program.find("y").is_none());
    }

    #[test]
    fn routine_json_round_trip() {
        let arrow = Type::Function {
            kind: FunctionKind::Partial,
            params: vec![Type::Int],
            ret: Box::new(Type::Bool),
        };
        let decl = Decl {
            name: "apply".into(),
            path: Path::single("apply"),
            pos: pos(),
            kind: DeclKind::Routine {
                kind: RoutineKind::Method,
                type_params: Vec::new(),
                params: vec![Param::new("f", arrow)],
                output: Output::Unit { ghost: Vec::new() },
                body: Some(Expr::Unit),
                is_ghost: false,
                is_static: true,
            },
        };

        let json = serde_json::to_string(&decl).unwrap();
        assert!(json.contains(r#""kind":"routine""#), "{json}");
        assert!(json.contains(r#""routine_kind":"method""#), "{json}");
        assert!(json.contains(r#""arrow":"partial""#), "{json}");
        let back: Decl = serde_json::from_str(&json).unwrap();
        assert_eq!(decl, back);
    }
}
