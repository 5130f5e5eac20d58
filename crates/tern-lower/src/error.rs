//! The single fatal error channel of the lowering.
//!
//! Every lowering function returns [`LowerResult`]. The first error aborts
//! the whole program: there is no per-declaration recovery and no partial
//! IL.

use tern_common::SourceLoc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    /// The tree uses a language feature the IL does not model.
    #[error("unsupported: {feature}")]
    Unsupported {
        feature: String,
        /// Rendering of the innermost offending node.
        node: Option<String>,
        loc: Option<SourceLoc>,
    },
    /// The tree breaks a shape the resolver is expected to guarantee.
    #[error("malformed resolved tree: {message}")]
    Invariant {
        message: String,
        node: Option<String>,
        loc: Option<SourceLoc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unsupported,
    Invariant,
}

pub type LowerResult<T> = Result<T, LowerError>;

impl LowerError {
    pub fn unsupported(feature: impl Into<String>) -> Self {
        LowerError::Unsupported {
            feature: feature.into(),
            node: None,
            loc: None,
        }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        LowerError::Invariant {
            message: message.into(),
            node: None,
            loc: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LowerError::Unsupported { .. } => ErrorKind::Unsupported,
            LowerError::Invariant { .. } => ErrorKind::Invariant,
        }
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Unsupported => "L0001",
            ErrorKind::Invariant => "L0002",
        }
    }

    pub fn node(&self) -> Option<&str> {
        match self {
            LowerError::Unsupported { node, .. } | LowerError::Invariant { node, .. } => {
                node.as_deref()
            }
        }
    }

    pub fn loc(&self) -> Option<SourceLoc> {
        match self {
            LowerError::Unsupported { loc, .. } | LowerError::Invariant { loc, .. } => *loc,
        }
    }

    /// Attach the node being lowered when the error does not carry one yet,
    /// so the innermost node wins.
    pub(crate) fn within(self, node: impl FnOnce() -> String, at: Option<SourceLoc>) -> Self {
        match self {
            LowerError::Unsupported {
                feature,
                node: old,
                loc,
            } => {
                let loc = loc.or(at);
                let node = old.or_else(|| Some(node()));
                LowerError::Unsupported { feature, node, loc }
            }
            LowerError::Invariant {
                message,
                node: old,
                loc,
            } => {
                let loc = loc.or(at);
                let node = old.or_else(|| Some(node()));
                LowerError::Invariant { message, node, loc }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tern_common::FileId;

    #[test]
    fn innermost_context_wins() {
        let inner = SourceLoc::new(FileId(0), 10, 2, 3);
        let outer = SourceLoc::new(FileId(0), 0, 1, 1);
        let err = LowerError::unsupported("iterators")
            .within(|| "iterator Gen".into(), Some(inner))
            .within(|| "module M".into(), Some(outer));
        assert_eq!(err.node(), Some("iterator Gen"));
        assert_eq!(err.loc(), Some(inner));
        assert_eq!(err.code(), "L0001");
        assert_eq!(err.to_string(), "unsupported: iterators");
    }

    #[test]
    fn invariant_kind_and_code() {
        let err = LowerError::invariant("update statement has no resolved form");
        assert_eq!(err.kind(), ErrorKind::Invariant);
        assert_eq!(err.code(), "L0002");
        assert_eq!(err.node(), None);
    }
}
