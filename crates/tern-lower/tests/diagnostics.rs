//! Rendering of lowering failures in the one-line, ariadne and JSON forms.

use tern_ast::build::ProgramBuilder;
use tern_ast::decl::{IteratorDecl, OpaqueTypeDecl, TypeParam};
use tern_ast::{DeclKind, ResolvedProgram, Variance};
use tern_lower::{lower_program, render_diagnostic, DiagnosticOptions, LowerError};

// ── Helpers ────────────────────────────────────────────────────────────

/// A program whose second line declares an iterator.
fn iterator_program(path: &str) -> ResolvedProgram {
    let mut b = ProgramBuilder::new("p");
    if path != "main.src" {
        b.file(path, &[]);
    }
    b.add(b.root(), "Gen", DeclKind::Iterator(IteratorDecl::default()));
    b.finish()
}

fn failure(program: &ResolvedProgram) -> LowerError {
    lower_program(program).unwrap_err()
}

/// Source text laid out on the builder's 40-byte lines.
fn source(lines: &[&str]) -> String {
    lines.iter().map(|l| format!("{l:<39}\n")).collect()
}

// ── One-line form ──────────────────────────────────────────────────────

#[test]
fn one_line_without_source() {
    let program = iterator_program("main.src");
    let err = failure(&program);
    let out = render_diagnostic(&err, &program, None, &DiagnosticOptions::colorless());
    insta::assert_snapshot!(out, @r"
    main.src:2:1: error[L0001]: unsupported: iterators
      in: iterator `Gen`
    ");
}

#[test]
fn one_line_uses_file_basename() {
    let program = iterator_program("/work/tree/src/gen.src");
    let err = failure(&program);
    let out = render_diagnostic(&err, &program, None, &DiagnosticOptions::colorless());
    assert!(out.starts_with("gen.src:1:1: error[L0001]"), "{out}");
}

#[test]
fn error_without_location() {
    let program = ProgramBuilder::new("p").finish();
    let err = LowerError::invariant("update statement has no resolved form");
    let out = render_diagnostic(&err, &program, None, &DiagnosticOptions::colorless());
    insta::assert_snapshot!(
        out,
        @"error[L0002]: malformed resolved tree: update statement has no resolved form"
    );
}

// ── Ariadne form ───────────────────────────────────────────────────────

#[test]
fn report_labels_the_offending_line() {
    let program = iterator_program("main.src");
    let err = failure(&program);
    let text = source(&["module Root {", "iterator Gen() yields (x: int)"]);
    let out = render_diagnostic(
        &err,
        &program,
        Some(&text),
        &DiagnosticOptions::colorless(),
    );
    assert!(out.contains("L0001"), "{out}");
    assert!(out.contains("unsupported: iterators"), "{out}");
    assert!(out.contains("main.src"), "{out}");
    assert!(out.contains("iterator Gen() yields (x: int)"), "{out}");
    assert!(out.contains("while lowering iterator `Gen`"), "{out}");
    assert!(!out.contains("\u{1b}["), "colorless output has escapes: {out}");
}

#[test]
fn stale_source_with_multibyte_text_still_renders() {
    let program = iterator_program("main.src");
    let err = failure(&program);
    // Byte 40 falls in the middle of an `é`.
    let text = format!("x{}\niterator Gen()\n", "é".repeat(25));
    assert!(!text.is_char_boundary(40));
    let out = render_diagnostic(
        &err,
        &program,
        Some(&text),
        &DiagnosticOptions::colorless(),
    );
    assert!(out.contains("L0001"), "{out}");
    assert!(out.contains("unsupported: iterators"), "{out}");
}

#[test]
fn report_for_variance_error_names_the_annotation() {
    let mut b = ProgramBuilder::new("p");
    b.add(
        b.root(),
        "Cell",
        DeclKind::OpaqueType(OpaqueTypeDecl {
            type_params: vec![TypeParam::with_variance("T", Variance::Contravariant)],
        }),
    );
    let program = b.finish();
    let err = failure(&program);
    let text = source(&["", "type Cell<-T>"]);
    let out = render_diagnostic(
        &err,
        &program,
        Some(&text),
        &DiagnosticOptions::colorless(),
    );
    assert!(out.contains("`-T`"), "{out}");
    assert!(out.contains("opaque type `Cell`"), "{out}");
}

#[test]
fn invariant_report_carries_help() {
    let mut b = ProgramBuilder::new("p");
    b.add(
        b.root(),
        "Loose",
        DeclKind::Constructor(tern_ast::decl::CtorDecl::default()),
    );
    let program = b.finish();
    let err = failure(&program);
    let text = source(&["", "Loose"]);
    let out = render_diagnostic(
        &err,
        &program,
        Some(&text),
        &DiagnosticOptions::colorless(),
    );
    assert!(out.contains("L0002"), "{out}");
    assert!(out.contains("front end"), "{out}");
}

// ── JSON form ──────────────────────────────────────────────────────────

#[test]
fn json_object_fields() {
    let program = iterator_program("main.src");
    let err = failure(&program);
    let out = render_diagnostic(&err, &program, None, &DiagnosticOptions::json_mode());
    assert!(!out.contains('\n'), "JSON output should be one line: {out}");

    let parsed: serde_json::Value = serde_json::from_str(&out)
        .unwrap_or_else(|e| panic!("invalid JSON output: {e}\n{out}"));
    assert_eq!(parsed["code"], "L0001");
    assert_eq!(parsed["severity"], "error");
    assert_eq!(parsed["message"], "unsupported: iterators");
    assert_eq!(parsed["file"], "main.src");
    assert_eq!(parsed["line"], 2);
    assert_eq!(parsed["col"], 1);
    assert_eq!(parsed["node"], "iterator `Gen`");
}

#[test]
fn json_without_location_has_nulls() {
    let program = ProgramBuilder::new("p").finish();
    let err = LowerError::unsupported("iterators");
    let out = render_diagnostic(&err, &program, None, &DiagnosticOptions::json_mode());
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert!(parsed["file"].is_null());
    assert!(parsed["node"].is_null());
}
