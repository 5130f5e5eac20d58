use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Dotted name of a declaration: its enclosing modules, then its own name.
///
/// Serialized as the dotted string, e.g. `"A.B.C"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<String>);

impl Path {
    pub fn new(segments: Vec<String>) -> Self {
        Path(segments)
    }

    /// A path of a single segment.
    pub fn single(name: impl Into<String>) -> Self {
        Path(vec![name.into()])
    }

    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(name.into());
        Path(segments)
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The last segment, i.e. the declaration's own name.
    pub fn name(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(Path(Vec::new()));
        }
        Ok(Path(s.split('.').map(str::to_string).collect()))
    }
}
