use std::fmt;

use serde::{Deserialize, Serialize};

/// Index of a source file within a resolved program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u32);

/// Location of a node in the resolved input tree.
///
/// `offset` is a byte offset into the file; `line` and `col` are 1-based and
/// are supplied by the front end alongside the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLoc {
    pub file: FileId,
    pub offset: u32,
    pub line: u32,
    pub col: u32,
}

impl SourceLoc {
    pub fn new(file: FileId, offset: u32, line: u32, col: u32) -> Self {
        Self {
            file,
            offset,
            line,
            col,
        }
    }
}

/// Position metadata carried by lowered declarations.
///
/// Only the base name of the file is kept, so rendered diagnostics and
/// serialized IL do not depend on where the sources were checked out.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePos {
    pub file: String,
    pub offset: u32,
    pub line: u32,
    pub col: u32,
}

impl SourcePos {
    /// Build a position from a full file path and an input location.
    pub fn from_loc(path: &str, loc: SourceLoc) -> Self {
        Self {
            file: basename(path).to_string(),
            offset: loc.offset,
            line: loc.line,
            col: loc.col,
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.col)
    }
}

/// Strip every directory component from `path`, accepting both `/` and `\`.
pub fn basename(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basename_strips_unix_dirs() {
        assert_eq!(basename("/home/ci/work/src/lib.src"), "lib.src");
    }

    #[test]
    fn basename_strips_windows_dirs() {
        assert_eq!(basename(r"C:\work\src\lib.src"), "lib.src");
    }

    #[test]
    fn basename_of_bare_name() {
        assert_eq!(basename("main.src"), "main.src");
        assert_eq!(basename(""), "");
    }

    #[test]
    fn source_pos_discards_directories() {
        let loc = SourceLoc::new(FileId(0), 42, 3, 7);
        let a = SourcePos::from_loc("/tmp/a/main.src", loc);
        let b = SourcePos::from_loc("/var/other/main.src", loc);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "main.src:3:7");
    }
}
