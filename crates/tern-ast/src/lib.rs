//! The resolved source tree handed to the lowering pass.
//!
//! An external front end parses and resolves the program, then hands over a
//! [`ResolvedProgram`]: source files with their include edges, and an arena of
//! declarations whose types, bindings and member references are all fixed.
//! The lowering reads this tree and never mutates it.

pub mod build;
pub mod decl;
pub mod expr;
pub mod render;
pub mod stmt;
pub mod ty;

use serde::{Deserialize, Serialize};
use tern_common::{FileId, SourceLoc};

pub use decl::{Decl, DeclId, DeclKind, Formal, TypeParam, Variance};
pub use expr::{BoundVar, Expr, ExprKind, Literal};
pub use stmt::{Stmt, StmtKind};
pub use ty::Type;

/// Name of the synthetic module holding the disguised built-in types.
pub const SYSTEM_MODULE: &str = "_System";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: String,
    #[serde(default)]
    pub includes: Vec<FileId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedProgram {
    pub name: String,
    pub files: Vec<SourceFile>,
    /// The unnamed outermost module.
    pub root: DeclId,
    pub decls: Vec<Decl>,
}

impl ResolvedProgram {
    pub fn get(&self, id: DeclId) -> Option<&Decl> {
        self.decls.get(id.0 as usize)
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0 as usize)
    }

    /// Full path of the file a location points into.
    pub fn file_path(&self, loc: SourceLoc) -> Option<&str> {
        self.file(loc.file).map(|f| f.path.as_str())
    }

    /// Iterate over every declaration with its id.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Decl)> {
        self.decls
            .iter()
            .enumerate()
            .map(|(i, d)| (DeclId(i as u32), d))
    }
}
