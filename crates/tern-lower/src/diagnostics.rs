//! Rendering of lowering failures.
//!
//! With the source text at hand the error is drawn by ariadne, labelling the
//! line the offending node starts on. Without it (the tree came in as JSON
//! and the source is elsewhere) a one-line `file:line:col` form is used.
//! JSON mode emits a single object per error for tooling.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use tern_ast::ResolvedProgram;
use tern_common::{basename, SourceLoc};

use crate::error::{ErrorKind, LowerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticOptions {
    pub color: bool,
    pub json: bool,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            color: true,
            json: false,
        }
    }
}

impl DiagnosticOptions {
    /// Plain text without escape codes, for snapshots and pipes.
    pub fn colorless() -> Self {
        Self {
            color: false,
            json: false,
        }
    }

    pub fn json_mode() -> Self {
        Self {
            color: false,
            json: true,
        }
    }
}

/// Where an error points, resolved against the program's file table.
struct Located {
    file: String,
    loc: SourceLoc,
}

fn locate(err: &LowerError, program: &ResolvedProgram) -> Option<Located> {
    let loc = err.loc()?;
    let path = program.file_path(loc)?;
    Some(Located {
        file: basename(path).to_string(),
        loc,
    })
}

/// Byte range from the node's offset to the end of its line, never empty.
///
/// The text on disk may not be the text the tree was built from, so an
/// offset inside a multi-byte character is moved back to its start.
fn line_span(source: &str, offset: u32) -> Range<usize> {
    let len = source.len();
    let mut start = (offset as usize).min(len);
    while !source.is_char_boundary(start) {
        start -= 1;
    }
    let end = source[start..]
        .find('\n')
        .map(|i| start + i)
        .unwrap_or(len);
    if start == end {
        start..(end + 1).min(len)
    } else {
        start..end
    }
}

/// Render one lowering error.
///
/// `source` is the text of the file the error points into, when the caller
/// has it.
pub fn render_diagnostic(
    err: &LowerError,
    program: &ResolvedProgram,
    source: Option<&str>,
    opts: &DiagnosticOptions,
) -> String {
    let located = locate(err, program);
    if opts.json {
        return render_json(err, located.as_ref());
    }
    match (located, source) {
        (Some(located), Some(source)) => render_report(err, &located, source, opts)
            .unwrap_or_else(|| render_line(err, Some(&located))),
        (located, _) => render_line(err, located.as_ref()),
    }
}

fn render_json(err: &LowerError, located: Option<&Located>) -> String {
    let value = serde_json::json!({
        "code": err.code(),
        "severity": "error",
        "message": err.to_string(),
        "file": located.map(|l| l.file.as_str()),
        "line": located.map(|l| l.loc.line),
        "col": located.map(|l| l.loc.col),
        "node": err.node(),
    });
    value.to_string()
}

/// `file:line:col: error[CODE]: message`, followed by the node when known.
fn render_line(err: &LowerError, located: Option<&Located>) -> String {
    let mut out = match located {
        Some(l) => format!("{}:{}:{}: ", l.file, l.loc.line, l.loc.col),
        None => String::new(),
    };
    out.push_str(&format!("error[{}]: {}", err.code(), err));
    if let Some(node) = err.node() {
        out.push_str(&format!("\n  in: {node}"));
    }
    out
}

fn render_report(
    err: &LowerError,
    located: &Located,
    source: &str,
    opts: &DiagnosticOptions,
) -> Option<String> {
    let config = Config::default()
        .with_color(opts.color)
        .with_index_type(IndexType::Byte);
    let span = (located.file.clone(), line_span(source, located.loc.offset));
    let label = match err.node() {
        Some(node) => format!("while lowering {node}"),
        None => "here".to_string(),
    };

    let mut builder = Report::build(ReportKind::Error, span.clone())
        .with_code(err.code())
        .with_message(err.to_string())
        .with_config(config)
        .with_label(Label::new(span).with_message(label).with_color(Color::Red));
    match err.kind() {
        ErrorKind::Unsupported => {
            builder.set_note("this construct has no representation in the IL");
        }
        ErrorKind::Invariant => {
            builder.set_help(
                "the resolved tree does not match the front end this lowering was built against",
            );
        }
    }

    let mut buf = Vec::new();
    builder
        .finish()
        .write((located.file.clone(), Source::from(source)), &mut buf)
        .ok()?;
    String::from_utf8(buf).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_span_stops_at_newline() {
        let src = "method M() {\n  var x := 3;\n}\n";
        assert_eq!(line_span(src, 13), 13..26);
        assert_eq!(&src[line_span(src, 13)], "  var x := 3;");
    }

    #[test]
    fn line_span_is_never_empty() {
        assert_eq!(line_span("a\n\nb", 2), 2..3);
        assert_eq!(line_span("abc", 10), 3..3);
    }

    #[test]
    fn line_span_snaps_to_char_boundary() {
        let src = "é iterator\nnext";
        assert_eq!(line_span(src, 1), 0..11);
        assert_eq!(&src[line_span(src, 1)], "é iterator");
    }
}
