//! End-to-end tests for the ternc binary.
//!
//! Each test writes a resolved tree as JSON into a temporary directory and
//! runs `ternc lower` or `ternc check` on it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tern_ast::build::ProgramBuilder;
use tern_ast::decl::{ConstDecl, FunctionDecl, FunctionKind, IteratorDecl, MethodDecl, MethodKind};
use tern_ast::{DeclKind, Expr, Formal, ResolvedProgram, Type};

/// Locate the ternc binary built by cargo.
fn ternc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_ternc"))
}

fn ternc(args: &[&str]) -> Output {
    Command::new(ternc_bin())
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run ternc")
}

fn constant(value: i64) -> DeclKind {
    DeclKind::Const(ConstDecl {
        ty: Type::Int,
        rhs: Some(Expr::int(value)),
        is_ghost: false,
        is_static: true,
    })
}

fn good_tree() -> ResolvedProgram {
    let mut b = ProgramBuilder::new("demo");
    let m = b.module(b.root(), "M");
    b.add(m, "K", constant(7));
    b.finish()
}

/// A function and a method in the default class of module `M`.
fn routine_tree() -> ResolvedProgram {
    let mut b = ProgramBuilder::new("demo");
    let m = b.module(b.root(), "M");
    let class = b.default_class(m);
    b.add(
        class,
        "Id",
        DeclKind::Function(FunctionDecl {
            kind: FunctionKind::Function,
            is_ghost: false,
            is_static: false,
            type_params: Vec::new(),
            formals: vec![Formal::new("x", Type::Int)],
            result: Formal::new("", Type::Int),
            body: Some(Expr::ident("x", Type::Int)),
        }),
    );
    b.add(
        class,
        "Run",
        DeclKind::Method(MethodDecl {
            kind: MethodKind::Method,
            is_ghost: false,
            is_static: false,
            type_params: Vec::new(),
            ins: Vec::new(),
            outs: Vec::new(),
            body: Some(Vec::new()),
        }),
    );
    b.finish()
}

/// `Gen` sits on line 2 of main.src.
fn bad_tree() -> ResolvedProgram {
    let mut b = ProgramBuilder::new("demo");
    b.add(b.root(), "Gen", DeclKind::Iterator(IteratorDecl::default()));
    b.finish()
}

fn write_tree(dir: &Path, tree: &ResolvedProgram) -> PathBuf {
    let path = dir.join("tree.json");
    std::fs::write(&path, serde_json::to_string(tree).unwrap()).unwrap();
    path
}

// ── lower ──────────────────────────────────────────────────────────────

#[test]
fn lower_writes_il_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &good_tree());

    let output = ternc(&["lower", input.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let il: serde_json::Value = serde_json::from_str(&stdout).expect("stdout is not JSON");
    assert_eq!(il["name"], "demo");
    assert_eq!(il["decls"][0]["path"], "M");
    assert_eq!(il["decls"][0]["kind"]["decls"][0]["path"], "M.K");
    assert!(stdout.trim_end().contains('\n'), "default output is pretty");
}

#[test]
fn lower_reads_routines_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &routine_tree());

    let output = ternc(&["lower", input.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let il: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let members = &il["decls"][0]["kind"]["decls"];
    assert_eq!(members[0]["path"], "M.Id");
    assert_eq!(members[0]["kind"]["kind"], "routine");
    assert_eq!(members[0]["kind"]["routine_kind"], "function");
    assert_eq!(members[1]["path"], "M.Run");
    assert_eq!(members[1]["kind"]["routine_kind"], "method");

    let back: tern_il::Program = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(back.all_decls().len(), 3);
}

#[test]
fn lower_compact_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &good_tree());
    let out = dir.path().join("out.json");

    let output = ternc(&[
        "lower",
        input.to_str().unwrap(),
        "--compact",
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(text.trim_end().lines().count(), 1, "compact output: {text}");
    let il: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(il["name"], "demo");
}

#[test]
fn config_beside_input_renames_program() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &good_tree());
    std::fs::write(
        dir.path().join("tern.toml"),
        "[lower]\nprogram_name = \"Renamed\"\n\n[output]\npretty = false\n",
    )
    .unwrap();

    let output = ternc(&["lower", input.to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim_end().lines().count(), 1);
    let il: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(il["name"], "Renamed");
}

#[test]
fn explicit_config_overrides_discovery() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &good_tree());
    std::fs::write(dir.path().join("tern.toml"), "[lower]\nprogram_name = \"Beside\"\n").unwrap();
    let other = dir.path().join("other.toml");
    std::fs::write(&other, "[lower]\nprogram_name = \"Explicit\"\n").unwrap();

    let output = ternc(&[
        "lower",
        input.to_str().unwrap(),
        "--config",
        other.to_str().unwrap(),
    ]);
    assert!(output.status.success());
    let il: serde_json::Value =
        serde_json::from_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(il["name"], "Explicit");
}

#[test]
fn bad_config_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &good_tree());
    std::fs::write(dir.path().join("tern.toml"), "[output]\npretty = \"yes\"\n").unwrap();

    let output = ternc(&["lower", input.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to parse config"), "stderr: {stderr}");
}

// ── failures ───────────────────────────────────────────────────────────

#[test]
fn missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let output = ternc(&["check", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr: {stderr}");
}

#[test]
fn malformed_tree_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tree.json");
    std::fs::write(&input, "{\"name\": 3}").unwrap();
    let output = ternc(&["check", input.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is not a resolved tree"), "stderr: {stderr}");
}

#[test]
fn lowering_error_without_source_is_one_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &bad_tree());
    let out = dir.path().join("out.json");

    let output = ternc(&[
        "lower",
        input.to_str().unwrap(),
        "--output",
        out.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!out.exists(), "no IL is written for a failed lowering");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("main.src:2:1: error[L0001]: unsupported: iterators"),
        "stderr: {stderr}"
    );
}

#[test]
fn lowering_error_with_source_draws_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &bad_tree());
    let source = format!("{:<39}\n{:<39}\n", "// root", "iterator Gen() yields (x: int)");
    std::fs::write(dir.path().join("main.src"), source).unwrap();

    let output = ternc(&["check", input.to_str().unwrap(), "--no-color"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("L0001"), "stderr: {stderr}");
    assert!(stderr.contains("iterator Gen() yields"), "stderr: {stderr}");
    assert!(!stderr.contains("\x1b["), "stderr has ANSI codes: {stderr}");
}

#[test]
fn json_diagnostics() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &bad_tree());

    let output = ternc(&["check", "--json", input.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut stream =
        serde_json::Deserializer::from_str(&stderr).into_iter::<serde_json::Value>();
    let json = stream
        .next()
        .expect("no JSON object in stderr")
        .expect("first JSON object is not valid");
    assert_eq!(json["code"], "L0001");
    assert_eq!(json["file"], "main.src");
    assert_eq!(json["line"], 2);
    assert_eq!(json["node"], "iterator `Gen`");
}

#[test]
fn json_driver_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let output = ternc(&["check", "--json", missing.to_str().unwrap()]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let json: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert_eq!(json["code"], "C0001");
    assert_eq!(json["severity"], "error");
}

// ── check ──────────────────────────────────────────────────────────────

#[test]
fn check_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_tree(dir.path(), &good_tree());
    let output = ternc(&["check", input.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Checked:"), "stderr: {stderr}");
}
