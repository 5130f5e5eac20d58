//! Lowering of resolved source trees to the Tern IL.
//!
//! The entry point is [`lower_program`]: a pure function from a
//! [`ResolvedProgram`] to an IL [`Program`]. The pass is all or nothing.
//! The first unsupported construct or malformed node aborts it with a
//! [`LowerError`], and no partial program is returned.
//!
//! Smaller entry points lower a single type or expression, or compute the
//! path of one declaration, against a whole program.

pub mod builtins;
mod decl;
pub mod diagnostics;
pub mod error;
mod expr;
mod lower;
mod path;
mod program;
mod recover;
mod stmt;
mod types;

use tern_ast::{DeclId, Expr, ResolvedProgram, Type};
use tern_il::{Path, Program};

use crate::lower::Lowerer;

pub use builtins::{recognize, recognize_member, Builtin, BuiltinMember};
pub use diagnostics::{render_diagnostic, DiagnosticOptions};
pub use error::{ErrorKind, LowerError, LowerResult};

/// Lower a whole program.
pub fn lower_program(program: &ResolvedProgram) -> Result<Program, LowerError> {
    Lowerer::new(program).lower_program()
}

/// Lower one resolved type in the context of `program`.
pub fn lower_type(program: &ResolvedProgram, ty: &Type) -> Result<tern_il::Type, LowerError> {
    Lowerer::new(program).lower_type(ty)
}

/// Lower one resolved expression in the context of `program`.
pub fn lower_expr(program: &ResolvedProgram, expr: &Expr) -> Result<tern_il::Expr, LowerError> {
    Lowerer::new(program).lower_expr(expr)
}

/// The dotted IL path of a declaration.
pub fn decl_path(program: &ResolvedProgram, id: DeclId) -> Result<Path, LowerError> {
    Lowerer::new(program).path_of(id)
}
