//! Shared lowering context.
//!
//! The lowering is split across several files that each add methods to
//! [`Lowerer`]: paths, types, expressions, statements (with resolution
//! recovery) and declarations. The context is a read-only view of the input
//! plus, inside a routine body, that routine's outputs.

use tern_ast::{Decl, DeclId, DeclKind, Formal, ResolvedProgram, Type, SYSTEM_MODULE};
use tern_common::{SourceLoc, SourcePos};

use crate::error::{LowerError, LowerResult};

#[derive(Clone, Copy)]
pub(crate) struct Lowerer<'a> {
    pub(crate) program: &'a ResolvedProgram,
    /// Outputs of the routine whose body is being lowered.
    pub(crate) outs: Option<&'a [Formal]>,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(program: &'a ResolvedProgram) -> Self {
        Self {
            program,
            outs: None,
        }
    }

    /// A copy of this context for lowering the body of a routine with the
    /// given outputs.
    pub(crate) fn in_routine(&self, outs: &'a [Formal]) -> Self {
        Self {
            program: self.program,
            outs: Some(outs),
        }
    }

    pub(crate) fn decl(&self, id: DeclId) -> LowerResult<&'a Decl> {
        self.program
            .get(id)
            .ok_or_else(|| LowerError::invariant(format!("reference to unknown declaration #{}", id.0)))
    }

    /// Whether `id` is a type declared directly in the `_System` module.
    pub(crate) fn is_system_type(&self, id: DeclId) -> LowerResult<bool> {
        let decl = self.decl(id)?;
        match decl.parent {
            Some(parent) => {
                let parent = self.decl(parent)?;
                Ok(parent.name == SYSTEM_MODULE && matches!(parent.kind, DeclKind::Module(_)))
            }
            None => Ok(false),
        }
    }

    /// For a member of a `_System` type, the owning type's name.
    pub(crate) fn system_owner(&self, member: DeclId) -> LowerResult<Option<&'a str>> {
        let decl = self.decl(member)?;
        match decl.parent {
            Some(owner) if self.is_system_type(owner)? => Ok(Some(self.decl(owner)?.name.as_str())),
            _ => Ok(None),
        }
    }

    pub(crate) fn pos(&self, loc: SourceLoc) -> LowerResult<SourcePos> {
        let path = self.program.file_path(loc).ok_or_else(|| {
            LowerError::invariant(format!("location in unknown file #{}", loc.file.0))
        })?;
        Ok(SourcePos::from_loc(path, loc))
    }

    /// The resolved type of an expression, which must be present.
    pub(crate) fn type_of<'e>(&self, ty: &'e Option<Type>, what: &str) -> LowerResult<&'e Type> {
        ty.as_ref()
            .ok_or_else(|| LowerError::invariant(format!("{what} has no resolved type")))
    }

    /// Outputs of a callable declaration, in order.
    pub(crate) fn routine_outs(&self, id: DeclId) -> LowerResult<&'a [Formal]> {
        let decl = self.decl(id)?;
        match &decl.kind {
            DeclKind::Method(m) => Ok(&m.outs),
            DeclKind::Function(f) => Ok(std::slice::from_ref(&f.result)),
            other => Err(LowerError::invariant(format!(
                "call to {} `{}`",
                other.describe(),
                decl.name
            ))),
        }
    }
}
