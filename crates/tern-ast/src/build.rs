//! Programmatic construction of resolved trees.
//!
//! The front end normally hands over a finished tree as JSON. Tests and tools
//! that need a tree without a front end build one here: the builder keeps the
//! arena, parent links and member lists consistent, and hands out
//! deterministic source locations.

use rustc_hash::FxHashMap;
use tern_common::{FileId, SourceLoc};

use crate::decl::{
    ClassDecl, CtorDecl, Decl, DeclId, DeclKind, DestructorDecl, FieldDecl, Formal, ModuleDecl,
    SubsetTypeDecl, TypeParam, TypeSynonymDecl,
};
use crate::expr::{BinaryOp, BoundVar, Expr};
use crate::ty::Type;
use crate::{ResolvedProgram, SourceFile, SYSTEM_MODULE};

/// Name the front end gives a module's default class.
pub const DEFAULT_CLASS: &str = "_default";

/// Width of one synthetic source line, used to derive byte offsets.
const LINE_WIDTH: u32 = 40;

pub struct ProgramBuilder {
    name: String,
    files: Vec<SourceFile>,
    decls: Vec<Decl>,
    current: FileId,
    /// Next line number per file.
    lines: Vec<u32>,
    system: Option<DeclId>,
    system_types: FxHashMap<String, DeclId>,
}

impl ProgramBuilder {
    /// Start a program with an unnamed root module and one file, `main.src`.
    pub fn new(name: impl Into<String>) -> Self {
        let mut builder = Self {
            name: name.into(),
            files: Vec::new(),
            decls: Vec::new(),
            current: FileId(0),
            lines: Vec::new(),
            system: None,
            system_types: FxHashMap::default(),
        };
        builder.file("main.src", &[]);
        let loc = builder.loc();
        builder.decls.push(Decl {
            name: String::new(),
            loc,
            parent: None,
            kind: DeclKind::Module(ModuleDecl::default()),
        });
        builder
    }

    /// Add a source file and make it current: declarations added afterwards
    /// are located in it.
    pub fn file(&mut self, path: impl Into<String>, includes: &[FileId]) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(SourceFile {
            path: path.into(),
            includes: includes.to_vec(),
        });
        self.lines.push(1);
        self.current = id;
        id
    }

    pub fn set_file(&mut self, file: FileId) {
        self.current = file;
    }

    /// Add an include edge after both files exist.
    pub fn include(&mut self, from: FileId, to: FileId) {
        if let Some(file) = self.files.get_mut(from.0 as usize) {
            file.includes.push(to);
        }
    }

    pub fn root(&self) -> DeclId {
        DeclId(0)
    }

    /// Next location in the current file. Each call advances one line.
    pub fn loc(&mut self) -> SourceLoc {
        let idx = self.current.0 as usize;
        let line = self.lines[idx];
        self.lines[idx] += 1;
        SourceLoc::new(self.current, (line - 1) * LINE_WIDTH, line, 1)
    }

    pub fn module(&mut self, parent: DeclId, name: &str) -> DeclId {
        self.add(parent, name, DeclKind::Module(ModuleDecl::default()))
    }

    /// The default class of `module`, created on first use.
    pub fn default_class(&mut self, module: DeclId) -> DeclId {
        let existing = self.members(module).iter().copied().find(|&id| {
            matches!(&self.decls[id.0 as usize].kind, DeclKind::Class(c) if c.is_default)
        });
        if let Some(id) = existing {
            return id;
        }
        self.add(
            module,
            DEFAULT_CLASS,
            DeclKind::Class(ClassDecl {
                is_default: true,
                ..ClassDecl::default()
            }),
        )
    }

    /// Add a declaration under `parent` and register it in the parent's
    /// member (or constructor) list.
    pub fn add(&mut self, parent: DeclId, name: &str, kind: DeclKind) -> DeclId {
        let loc = self.loc();
        self.add_at(parent, name, kind, loc)
    }

    fn add_at(&mut self, parent: DeclId, name: &str, kind: DeclKind, loc: SourceLoc) -> DeclId {
        let id = DeclId(self.decls.len() as u32);
        let is_ctor = matches!(kind, DeclKind::Constructor(_));
        self.decls.push(Decl {
            name: name.to_string(),
            loc,
            parent: Some(parent),
            kind,
        });
        match &mut self.decls[parent.0 as usize].kind {
            DeclKind::Module(m) => m.members.push(id),
            DeclKind::Class(c) => c.members.push(id),
            DeclKind::Datatype(d) if is_ctor => d.ctors.push(id),
            DeclKind::Datatype(d) => d.members.push(id),
            _ => {}
        }
        id
    }

    pub fn ctor(&mut self, datatype: DeclId, name: &str, formals: Vec<Formal>) -> DeclId {
        self.add(datatype, name, DeclKind::Constructor(CtorDecl { formals }))
    }

    pub fn destructor(&mut self, datatype: DeclId, name: &str, ty: Type) -> DeclId {
        self.add(datatype, name, DeclKind::Destructor(DestructorDecl { ty }))
    }

    fn members(&self, id: DeclId) -> &[DeclId] {
        match &self.decls[id.0 as usize].kind {
            DeclKind::Module(m) => &m.members,
            DeclKind::Class(c) => &c.members,
            DeclKind::Datatype(d) => &d.members,
            _ => &[],
        }
    }

    fn system_module(&mut self) -> DeclId {
        if let Some(id) = self.system {
            return id;
        }
        // The system module is reachable only through type references, never
        // through the root's member list.
        let id = DeclId(self.decls.len() as u32);
        let loc = SourceLoc::new(FileId(0), 0, 0, 0);
        self.decls.push(Decl {
            name: SYSTEM_MODULE.to_string(),
            loc,
            parent: Some(self.root()),
            kind: DeclKind::Module(ModuleDecl::default()),
        });
        self.system = Some(id);
        id
    }

    /// A type declared in the `_System` module, created on first use.
    ///
    /// `string` becomes a synonym for `seq<char>`, `nat` a subset of `int`,
    /// `_tuple#N` a datatype with constructor `_#MakeN` and destructors
    /// `0..N`. Every other name becomes an empty class.
    pub fn system_type(&mut self, name: &str) -> DeclId {
        if let Some(&id) = self.system_types.get(name) {
            return id;
        }
        let module = self.system_module();
        let loc = SourceLoc::new(FileId(0), 0, 0, 0);
        let id = if name == "string" {
            let kind = DeclKind::TypeSynonym(TypeSynonymDecl {
                type_params: Vec::new(),
                rhs: Type::string(),
            });
            self.add_at(module, name, kind, loc)
        } else if name == "nat" {
            let x = Expr::ident("x", Type::Int);
            let constraint = Expr::binary(BinaryOp::Ge, x, Expr::int(0), Type::Bool);
            let kind = DeclKind::SubsetType(SubsetTypeDecl {
                type_params: Vec::new(),
                var: BoundVar::new("x", Type::Int),
                constraint,
            });
            self.add_at(module, name, kind, loc)
        } else if let Some(arity) = name
            .strip_prefix("_tuple#")
            .and_then(|n| n.parse::<usize>().ok())
        {
            self.tuple_decl(module, name, arity, loc)
        } else {
            self.add_at(module, name, DeclKind::Class(ClassDecl::default()), loc)
        };
        self.system_types.insert(name.to_string(), id);
        id
    }

    fn tuple_decl(&mut self, module: DeclId, name: &str, arity: usize, loc: SourceLoc) -> DeclId {
        let type_params: Vec<TypeParam> =
            (0..arity).map(|i| TypeParam::new(format!("T{i}"))).collect();
        let kind = DeclKind::Datatype(crate::decl::DatatypeDecl {
            type_params,
            ..Default::default()
        });
        let id = self.add_at(module, name, kind, loc);
        let formals = (0..arity)
            .map(|i| Formal::new(i.to_string(), Type::param(format!("T{i}"))))
            .collect();
        self.add_at(
            id,
            &format!("_#Make{arity}"),
            DeclKind::Constructor(CtorDecl { formals }),
            loc,
        );
        for i in 0..arity {
            let kind = DeclKind::Destructor(DestructorDecl {
                ty: Type::param(format!("T{i}")),
            });
            self.add_at(id, &i.to_string(), kind, loc);
        }
        id
    }

    /// A member of a `_System` type, e.g. `("map", "Keys")` or
    /// `("_tuple#2", "1")`.
    pub fn system_member(&mut self, owner: &str, member: &str) -> DeclId {
        let owner = self.system_type(owner);
        let existing = self
            .members(owner)
            .iter()
            .copied()
            .find(|&id| self.decls[id.0 as usize].name == member);
        if let Some(id) = existing {
            return id;
        }
        let loc = SourceLoc::new(FileId(0), 0, 0, 0);
        let kind = DeclKind::Field(FieldDecl {
            ty: Type::param("T"),
            is_ghost: false,
        });
        self.add_at(owner, member, kind, loc)
    }

    /// The resolved form of a tuple type.
    pub fn tuple_type(&mut self, elems: Vec<Type>) -> Type {
        let decl = self.system_type(&format!("_tuple#{}", elems.len()));
        Type::user(decl, elems)
    }

    /// The constructor of the `arity`-tuple.
    pub fn tuple_ctor(&mut self, arity: usize) -> DeclId {
        let decl = self.system_type(&format!("_tuple#{arity}"));
        match &self.decls[decl.0 as usize].kind {
            DeclKind::Datatype(d) => d.ctors[0],
            _ => decl,
        }
    }

    pub fn get(&self, id: DeclId) -> &Decl {
        &self.decls[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: DeclId) -> &mut Decl {
        &mut self.decls[id.0 as usize]
    }

    pub fn finish(self) -> ResolvedProgram {
        ResolvedProgram {
            name: self.name,
            files: self.files,
            root: DeclId(0),
            decls: self.decls,
        }
    }
}
