//! Path resolution over the tree.
//!
//! Paths are `/`-separated strings (a `\` is accepted as a separator too).
//! A leading `.` or a leading `/` both mean "start at the root". Both
//! resolution algorithms are backed by one recursive walker that only
//! differs in how it treats a segment it cannot match:
//!
//! - [`Traversal::Strict`] fails, so every segment must exist;
//! - [`Traversal::BestEffort`] stops and hands back the furthest node it
//!   reached along with the segments still missing.

use snafu::ensure;
use tracing::trace;

use crate::tree::Tree;
use crate::tree::error::{PathNotFoundSnafu, TreeError, UnableToFollowSnafu};
use crate::tree::node::{Node, NodeId, SEPARATOR};

const CURRENT_ROOT: &str = ".";

/// A path split into the segments still to be matched against children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathSegments {
    segments: Vec<String>,
}

impl PathSegments {
    /// Normalizes separators, drops the trailing separator and consumes a
    /// leading root marker (`.` or an empty segment from a leading `/`).
    pub fn parse(path: &str) -> Self {
        let normalized = path.replace('\\', "/");
        let trimmed = normalized
            .strip_suffix(SEPARATOR)
            .unwrap_or(normalized.as_str());

        let mut parts = trimmed.split(SEPARATOR).peekable();
        if parts
            .peek()
            .is_some_and(|first| first.is_empty() || *first == CURRENT_ROOT)
        {
            parts.next();
        }

        PathSegments {
            segments: parts
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl From<&str> for PathSegments {
    fn from(path: &str) -> Self {
        PathSegments::parse(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Strict,
    BestEffort,
}

/// Outcome of [`Tree::explore_path`]: the deepest existing node and the
/// part of the path below it that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exploration {
    pub node: NodeId,
    pub remaining: Vec<String>,
}

impl Tree {
    /// Resolves `path` from the root, failing if any segment is missing.
    pub fn follow_path(&self, path: &str) -> Result<NodeId, TreeError> {
        let segments = PathSegments::parse(path);
        self.follow_path_from(self.root(), segments.as_slice())
    }

    /// Resolves already split segments starting at `start`.
    pub fn follow_path_from(&self, start: NodeId, segments: &[String]) -> Result<NodeId, TreeError> {
        let (node, remaining) = self.walk(start, segments, Traversal::Strict)?;
        debug_assert!(remaining.is_empty());
        Ok(node)
    }

    /// Resolves as much of `path` as exists.
    pub fn explore_path(&self, path: &str) -> Result<Exploration, TreeError> {
        let segments = PathSegments::parse(path);
        let (node, remaining) = self.walk(self.root(), segments.as_slice(), Traversal::BestEffort)?;
        Ok(Exploration {
            node,
            remaining: remaining.to_vec(),
        })
    }

    /// Consumes one segment per call. In best-effort mode the returned
    /// slice is the unmatched tail; in strict mode it is always empty.
    pub fn walk<'p>(
        &self,
        current: NodeId,
        segments: &'p [String],
        mode: Traversal,
    ) -> Result<(NodeId, &'p [String]), TreeError> {
        let Some((step, rest)) = segments.split_first() else {
            return Ok((current, segments));
        };

        let folder = match self.node(current)? {
            Node::File(_) => return UnableToFollowSnafu { segment: step }.fail(),
            Node::Folder(folder) => folder,
        };

        if !folder.has_children() {
            return match mode {
                Traversal::BestEffort => Ok((current, segments)),
                // An empty root simply does not contain the segment
                Traversal::Strict if self.is_root(current) => {
                    PathNotFoundSnafu { segment: step }.fail()
                }
                Traversal::Strict => UnableToFollowSnafu { segment: step }.fail(),
            };
        }

        for &child in &folder.children {
            let name = self.node(child)?.clean_name();
            trace!("Comparing child '{}' with step '{}'", name, step);
            if name == step {
                return self.walk(child, rest, mode);
            }
        }

        ensure!(
            mode == Traversal::BestEffort,
            PathNotFoundSnafu { segment: step }
        );
        Ok((current, segments))
    }
}
