//! Include graph over the source files of a program.
//!
//! The program driver flattens declarations file by file; files must come
//! after everything they include. [`topological_sort`] produces that order
//! deterministically.

use std::collections::VecDeque;
use std::fmt;

use crate::span::FileId;

/// A single file node in the include graph.
#[derive(Debug)]
pub struct FileNode {
    /// Path as given by the front end.
    pub path: String,
    /// Files this file includes.
    pub includes: Vec<FileId>,
}

/// Error returned when the include graph has a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeCycle {
    /// File paths forming the cycle, first and last entries equal.
    pub cycle_path: Vec<String>,
}

impl fmt::Display for IncludeCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cycle_path.join(" -> "))
    }
}

/// Directed graph of files and their include edges.
#[derive(Debug, Default)]
pub struct FileGraph {
    pub files: Vec<FileNode>,
}

impl FileGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file and return its id. Ids are assigned sequentially from 0.
    pub fn add_file(&mut self, path: String) -> FileId {
        let id = FileId(self.files.len() as u32);
        self.files.push(FileNode {
            path,
            includes: Vec::new(),
        });
        id
    }

    /// Record that `from` includes `to`. Duplicate edges are ignored; a
    /// self-include is kept so that it is reported as a cycle.
    pub fn add_include(&mut self, from: FileId, to: FileId) {
        let includes = &mut self.files[from.0 as usize].includes;
        if !includes.contains(&to) {
            includes.push(to);
        }
    }

    pub fn get(&self, id: FileId) -> &FileNode {
        &self.files[id.0 as usize]
    }
}

/// Order files so that every file follows the files it includes.
///
/// Kahn's algorithm with tie-breaking on the file path, so the result only
/// depends on the graph and never on insertion order.
pub fn topological_sort(graph: &FileGraph) -> Result<Vec<FileId>, IncludeCycle> {
    let n = graph.files.len();
    let mut pending: Vec<u32> = graph
        .files
        .iter()
        .map(|f| f.includes.len() as u32)
        .collect();

    let by_path = |a: &FileId, b: &FileId| graph.get(*a).path.cmp(&graph.get(*b).path);

    let mut ready: Vec<FileId> = (0..n)
        .filter(|&i| pending[i] == 0)
        .map(|i| FileId(i as u32))
        .collect();
    ready.sort_by(by_path);

    let mut queue = VecDeque::from(ready);
    let mut order = Vec::with_capacity(n);

    while let Some(id) = queue.pop_front() {
        order.push(id);
        let mut unblocked = Vec::new();
        for (i, file) in graph.files.iter().enumerate() {
            if pending[i] > 0 && file.includes.contains(&id) {
                pending[i] -= 1;
                if pending[i] == 0 {
                    unblocked.push(FileId(i as u32));
                }
            }
        }
        unblocked.sort_by(by_path);
        queue.extend(unblocked);
    }

    if order.len() == n {
        Ok(order)
    } else {
        Err(IncludeCycle {
            cycle_path: extract_cycle_path(graph, &pending),
        })
    }
}

/// Walk include edges among the files left unprocessed until one repeats.
fn extract_cycle_path(graph: &FileGraph, pending: &[u32]) -> Vec<String> {
    let Some(start) = (0..graph.files.len()).find(|&i| pending[i] > 0) else {
        return Vec::new();
    };

    let mut path: Vec<String> = Vec::new();
    let mut visited = vec![false; graph.files.len()];
    let mut current = start;

    loop {
        if visited[current] {
            let repeated = &graph.files[current].path;
            let begin = path.iter().position(|p| p == repeated).unwrap_or(0);
            let mut cycle = path[begin..].to_vec();
            cycle.push(repeated.clone());
            return cycle;
        }
        visited[current] = true;
        path.push(graph.files[current].path.clone());

        match graph.files[current]
            .includes
            .iter()
            .find(|inc| pending[inc.0 as usize] > 0)
        {
            Some(next) => current = next.0 as usize,
            None => return path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(graph: &FileGraph, order: &[FileId]) -> Vec<String> {
        order.iter().map(|id| graph.get(*id).path.clone()).collect()
    }

    #[test]
    fn ids_are_sequential() {
        let mut graph = FileGraph::new();
        assert_eq!(graph.add_file("a.src".into()), FileId(0));
        assert_eq!(graph.add_file("b.src".into()), FileId(1));
        assert_eq!(graph.get(FileId(1)).path, "b.src");
    }

    #[test]
    fn duplicate_includes_are_ignored() {
        let mut graph = FileGraph::new();
        let a = graph.add_file("a.src".into());
        let b = graph.add_file("b.src".into());
        graph.add_include(a, b);
        graph.add_include(a, b);
        assert_eq!(graph.get(a).includes, vec![b]);
    }

    #[test]
    fn included_files_come_first() {
        // main includes util, util includes base.
        let mut graph = FileGraph::new();
        let main = graph.add_file("main.src".into());
        let util = graph.add_file("util.src".into());
        let base = graph.add_file("base.src".into());
        graph.add_include(main, util);
        graph.add_include(util, base);

        let order = topological_sort(&graph).unwrap();
        assert_eq!(names(&graph, &order), vec!["base.src", "util.src", "main.src"]);
    }

    #[test]
    fn independent_files_sort_by_path() {
        let mut graph = FileGraph::new();
        graph.add_file("c.src".into());
        graph.add_file("a.src".into());
        graph.add_file("b.src".into());

        let order = topological_sort(&graph).unwrap();
        assert_eq!(names(&graph, &order), vec!["a.src", "b.src", "c.src"]);
    }

    #[test]
    fn diamond_includes() {
        let mut graph = FileGraph::new();
        let a = graph.add_file("a.src".into());
        let b = graph.add_file("b.src".into());
        let c = graph.add_file("c.src".into());
        let d = graph.add_file("d.src".into());
        graph.add_include(a, b);
        graph.add_include(a, c);
        graph.add_include(b, d);
        graph.add_include(c, d);

        let order = topological_sort(&graph).unwrap();
        assert_eq!(names(&graph, &order), vec!["d.src", "b.src", "c.src", "a.src"]);
    }

    #[test]
    fn cycle_is_reported() {
        let mut graph = FileGraph::new();
        let a = graph.add_file("a.src".into());
        let b = graph.add_file("b.src".into());
        let c = graph.add_file("c.src".into());
        graph.add_include(a, b);
        graph.add_include(b, c);
        graph.add_include(c, a);

        let err = topological_sort(&graph).unwrap_err();
        assert_eq!(err.cycle_path.first(), err.cycle_path.last());
        for name in ["a.src", "b.src", "c.src"] {
            assert!(err.cycle_path.iter().any(|p| p == name));
        }
        assert_eq!(err.to_string(), "a.src -> b.src -> c.src -> a.src");
    }

    #[test]
    fn self_include_is_a_cycle() {
        let mut graph = FileGraph::new();
        let a = graph.add_file("a.src".into());
        graph.add_include(a, a);
        let err = topological_sort(&graph).unwrap_err();
        assert_eq!(err.cycle_path, vec!["a.src".to_string(), "a.src".to_string()]);
    }
}
