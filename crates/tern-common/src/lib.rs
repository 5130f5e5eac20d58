//! Shared types for the Tern lowering pipeline.

pub mod file_graph;
pub mod span;

pub use file_graph::{topological_sort, FileGraph, IncludeCycle};
pub use span::{basename, FileId, SourceLoc, SourcePos};
