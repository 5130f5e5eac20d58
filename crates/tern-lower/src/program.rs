//! Program driver: orders the top-level units by file and lowers them.

use rustc_hash::{FxHashMap, FxHashSet};
use tern_ast::{DeclId, DeclKind, ResolvedProgram};
use tern_common::file_graph::{topological_sort, FileGraph};
use tern_common::FileId;
use tern_il::{Decl as IlDecl, DeclKind as IlDeclKind, Program};
use tracing::info;

use crate::error::{LowerError, LowerResult};
use crate::lower::Lowerer;

/// Files in include order: every file comes after the files it includes.
pub(crate) fn file_order(program: &ResolvedProgram) -> LowerResult<Vec<FileId>> {
    let mut graph = FileGraph::new();
    for file in &program.files {
        graph.add_file(file.path.clone());
    }
    for (i, file) in program.files.iter().enumerate() {
        for &target in &file.includes {
            if program.file(target).is_none() {
                return Err(LowerError::invariant(format!(
                    "`{}` includes unknown file #{}",
                    file.path, target.0
                )));
            }
            graph.add_include(FileId(i as u32), target);
        }
    }
    topological_sort(&graph)
        .map_err(|cycle| LowerError::invariant(format!("include cycle: {cycle}")))
}

impl<'a> Lowerer<'a> {
    /// Root-module members, with the root default class replaced by its
    /// members.
    fn top_level_units(&self) -> LowerResult<Vec<DeclId>> {
        let root = self.decl(self.program.root)?;
        let DeclKind::Module(module) = &root.kind else {
            return Err(LowerError::invariant(format!(
                "root declaration is a {}",
                root.kind.describe()
            )));
        };
        let mut units = Vec::with_capacity(module.members.len());
        for &id in &module.members {
            match &self.decl(id)?.kind {
                DeclKind::Class(c) if c.is_default => units.extend(c.members.iter().copied()),
                _ => units.push(id),
            }
        }
        Ok(units)
    }

    pub(crate) fn lower_program(&self) -> LowerResult<Program> {
        let order = file_order(self.program)?;
        let rank: FxHashMap<FileId, usize> =
            order.iter().enumerate().map(|(i, &f)| (f, i)).collect();

        let mut units = Vec::new();
        for id in self.top_level_units()? {
            let file = self.decl(id)?.loc.file;
            let r = rank.get(&file).copied().ok_or_else(|| {
                LowerError::invariant(format!("declaration in unknown file #{}", file.0))
            })?;
            units.push((r, id));
        }
        // Stable: source order is kept within a file.
        units.sort_by_key(|&(r, _)| r);

        let mut decls = Vec::new();
        for (_, id) in units {
            decls.extend(self.lower_decl(id)?);
        }
        check_unique_paths(&decls)?;

        let files: Vec<&str> = order
            .iter()
            .filter_map(|&f| self.program.file(f))
            .map(|f| f.path.as_str())
            .collect();
        info!(
            program = %self.program.name,
            decls = decls.len(),
            files = ?files,
            "lowered program"
        );
        Ok(Program {
            name: self.program.name.clone(),
            decls,
        })
    }
}

/// Reject two declarations (or constructors) sharing a path.
fn check_unique_paths(decls: &[IlDecl]) -> LowerResult<()> {
    let mut seen = FxHashSet::default();
    let mut duplicate = None;
    for decl in decls {
        decl.walk(&mut |d| {
            if duplicate.is_some() {
                return;
            }
            if !seen.insert(d.path.to_string()) {
                duplicate = Some(d.path.to_string());
            }
            if let IlDeclKind::Datatype { ctors, .. } = &d.kind {
                for ctor in ctors {
                    if !seen.insert(ctor.path.to_string()) {
                        duplicate = Some(ctor.path.to_string());
                    }
                }
            }
        });
    }
    match duplicate {
        Some(path) => Err(LowerError::invariant(format!(
            "two declarations share the path `{path}`"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_ast::build::ProgramBuilder;

    #[test]
    fn included_files_come_first() {
        let mut b = ProgramBuilder::new("p");
        let lib = b.file("lib.src", &[]);
        let main = FileId(0);
        b.include(main, lib);
        let program = b.finish();
        let order = file_order(&program).unwrap();
        assert_eq!(order, vec![lib, main]);
    }

    #[test]
    fn include_cycle_is_an_invariant_error() {
        let mut b = ProgramBuilder::new("p");
        let lib = b.file("lib.src", &[FileId(0)]);
        b.include(FileId(0), lib);
        let program = b.finish();
        let err = file_order(&program).unwrap_err();
        assert_eq!(err.code(), "L0002");
        assert!(err.to_string().contains("include cycle"));
    }
}
