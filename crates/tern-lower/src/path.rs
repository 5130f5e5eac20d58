//! Canonical dotted paths of declarations.
//!
//! A path is the names of the enclosing modules, classes and datatypes,
//! outermost first, followed by the declaration's own name. The unnamed root
//! module and default classes contribute nothing: a top-level function in
//! module `M` is `M.f`, one in the root module is just `f`.

use tern_ast::{DeclId, DeclKind};
use tern_il::Path;

use crate::error::{LowerError, LowerResult};
use crate::lower::Lowerer;

impl<'a> Lowerer<'a> {
    pub(crate) fn path_of(&self, id: DeclId) -> LowerResult<Path> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        let mut steps = 0usize;
        while let Some(cur) = current {
            steps += 1;
            if steps > self.program.decls.len() + 1 {
                return Err(LowerError::invariant(format!(
                    "declaration #{} has a cyclic parent chain",
                    id.0
                )));
            }
            let decl = self.decl(cur)?;
            let skipped = decl.parent.is_none()
                || matches!(&decl.kind, DeclKind::Class(c) if c.is_default);
            if !skipped {
                segments.push(decl.name.clone());
            }
            current = decl.parent;
        }
        segments.reverse();
        Ok(Path::new(segments))
    }
}

#[cfg(test)]
mod tests {
    use tern_ast::build::ProgramBuilder;
    use tern_ast::decl::{ConstDecl, DatatypeDecl};
    use tern_ast::{DeclKind, Type};

    use super::*;

    fn constant() -> DeclKind {
        DeclKind::Const(ConstDecl {
            ty: Type::Int,
            rhs: None,
            is_ghost: false,
            is_static: true,
        })
    }

    #[test]
    fn nested_modules() {
        let mut b = ProgramBuilder::new("p");
        let a = b.module(b.root(), "A");
        let bm = b.module(a, "B");
        let c = b.add(bm, "C", constant());
        let program = b.finish();
        let lowerer = Lowerer::new(&program);
        assert_eq!(lowerer.path_of(c).unwrap().to_string(), "A.B.C");
    }

    #[test]
    fn root_and_default_class_are_skipped() {
        let mut b = ProgramBuilder::new("p");
        let root = b.root();
        let class = b.default_class(root);
        let f = b.add(class, "f", constant());
        let m = b.module(root, "M");
        let mclass = b.default_class(m);
        let g = b.add(mclass, "g", constant());
        let program = b.finish();
        let lowerer = Lowerer::new(&program);
        assert_eq!(lowerer.path_of(f).unwrap().to_string(), "f");
        assert_eq!(lowerer.path_of(g).unwrap().to_string(), "M.g");
    }

    #[test]
    fn constructors_sit_under_their_datatype() {
        let mut b = ProgramBuilder::new("p");
        let m = b.module(b.root(), "M");
        let dt = b.add(m, "Tree", DeclKind::Datatype(DatatypeDecl::default()));
        let leaf = b.ctor(dt, "Leaf", vec![]);
        let program = b.finish();
        let lowerer = Lowerer::new(&program);
        assert_eq!(lowerer.path_of(leaf).unwrap().to_string(), "M.Tree.Leaf");
    }

    #[test]
    fn cyclic_parents_are_an_invariant_error() {
        let mut b = ProgramBuilder::new("p");
        let a = b.module(b.root(), "A");
        let c = b.module(a, "C");
        b.get_mut(a).parent = Some(c);
        let program = b.finish();
        let lowerer = Lowerer::new(&program);
        let err = lowerer.path_of(c).unwrap_err();
        assert!(matches!(err, LowerError::Invariant { .. }));
    }
}
