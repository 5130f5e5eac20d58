//! Whole-program lowering: paths, file order, determinism and uniqueness.

use tern_ast::build::ProgramBuilder;
use tern_ast::decl::{ConstDecl, DatatypeDecl, FunctionDecl, FunctionKind};
use tern_ast::{DeclKind, Expr, Formal, ResolvedProgram, Type};
use tern_common::FileId;
use tern_lower::{decl_path, lower_program, lower_type, ErrorKind};

// ── Helpers ────────────────────────────────────────────────────────────

fn constant(value: i64) -> DeclKind {
    DeclKind::Const(ConstDecl {
        ty: Type::Int,
        rhs: Some(Expr::int(value)),
        is_ghost: false,
        is_static: true,
    })
}

fn paths(program: &tern_il::Program) -> Vec<String> {
    program
        .all_decls()
        .iter()
        .map(|d| d.path.to_string())
        .collect()
}

/// A program with modules, a datatype and default-class members.
fn sample() -> ResolvedProgram {
    let mut b = ProgramBuilder::new("sample");
    let root = b.root();
    let class = b.default_class(root);
    b.add(class, "Zero", constant(0));
    let a = b.module(root, "A");
    let ab = b.module(a, "B");
    b.add(ab, "C", constant(3));
    let shape = b.add(
        a,
        "Shape",
        DeclKind::Datatype(DatatypeDecl::default()),
    );
    b.ctor(shape, "Circle", vec![Formal::new("r", Type::Real)]);
    b.ctor(shape, "Square", vec![Formal::new("side", Type::Real)]);
    let a_class = b.default_class(a);
    b.add(
        a_class,
        "Area",
        DeclKind::Function(FunctionDecl {
            kind: FunctionKind::Function,
            is_ghost: false,
            is_static: false,
            type_params: Vec::new(),
            formals: vec![Formal::new("s", Type::user(shape, vec![]))],
            result: Formal::new("", Type::Real),
            body: None,
        }),
    );
    b.finish()
}

// ── Paths ──────────────────────────────────────────────────────────────

#[test]
fn paths_skip_root_and_default_classes() {
    let program = lower_program(&sample()).unwrap();
    assert_eq!(
        paths(&program),
        vec!["Zero", "A", "A.B", "A.B.C", "A.Shape", "A.Area"]
    );
}

#[test]
fn user_types_lower_to_their_path() {
    let tree = sample();
    let shape = tree
        .iter()
        .find(|(_, d)| d.name == "Shape")
        .map(|(id, _)| id)
        .unwrap();
    assert_eq!(decl_path(&tree, shape).unwrap().to_string(), "A.Shape");
    assert_eq!(
        lower_type(&tree, &Type::seq(Type::user(shape, vec![])))
            .unwrap()
            .to_string(),
        "seq<A.Shape>"
    );
}

#[test]
fn unknown_declaration_is_an_invariant_error() {
    let tree = sample();
    let err = decl_path(&tree, tern_ast::DeclId(999)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invariant);
}

#[test]
fn positions_keep_only_the_file_name() {
    let mut b = ProgramBuilder::new("p");
    b.file("/home/dev/project/src/lib.src", &[]);
    b.add(b.root(), "K", constant(1));
    let program = lower_program(&b.finish()).unwrap();
    let pos = &program.find("K").unwrap().pos;
    assert_eq!(pos.file, "lib.src");
    assert_eq!(pos.line, 1);
}

// ── Determinism ────────────────────────────────────────────────────────

#[test]
fn lowering_is_deterministic() {
    let tree = sample();
    let first = serde_json::to_string(&lower_program(&tree).unwrap()).unwrap();
    let second = serde_json::to_string(&lower_program(&tree).unwrap()).unwrap();
    assert_eq!(first, second);

    // A tree that went through JSON lowers to the same IL.
    let reread: ResolvedProgram =
        serde_json::from_str(&serde_json::to_string(&tree).unwrap()).unwrap();
    let third = serde_json::to_string(&lower_program(&reread).unwrap()).unwrap();
    assert_eq!(first, third);
}

// ── File order ─────────────────────────────────────────────────────────

#[test]
fn included_files_are_emitted_first() {
    let mut b = ProgramBuilder::new("p");
    let main = FileId(0);
    b.add(b.root(), "FromMain", constant(1));
    let lib = b.file("lib.src", &[]);
    b.add(b.root(), "FromLib", constant(2));
    b.set_file(main);
    b.add(b.root(), "AlsoMain", constant(3));
    b.include(main, lib);

    let program = lower_program(&b.finish()).unwrap();
    assert_eq!(paths(&program), vec!["FromLib", "FromMain", "AlsoMain"]);
}

#[test]
fn include_cycle_aborts() {
    let mut b = ProgramBuilder::new("p");
    let lib = b.file("lib.src", &[FileId(0)]);
    b.include(FileId(0), lib);
    let err = lower_program(&b.finish()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invariant);
    assert!(err.to_string().contains("include cycle"), "{err}");
}

// ── Uniqueness ─────────────────────────────────────────────────────────

#[test]
fn duplicate_paths_are_rejected() {
    let mut b = ProgramBuilder::new("p");
    let class = b.default_class(b.root());
    b.add(class, "X", constant(1));
    b.add(b.root(), "X", constant(2));
    let err = lower_program(&b.finish()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Invariant);
    assert!(err.to_string().contains("`X`"), "{err}");
}

#[test]
fn constructor_clashing_with_member_is_rejected() {
    let mut b = ProgramBuilder::new("p");
    let t = b.add(b.root(), "T", DeclKind::Datatype(DatatypeDecl::default()));
    b.ctor(t, "Make", vec![]);
    b.add(t, "Make", constant(0));
    let err = lower_program(&b.finish()).unwrap_err();
    assert!(err.to_string().contains("T.Make"), "{err}");
}
