//! In-memory folder/file tree with path-based lookup and mutation.
//!
//! A [`Tree`] owns every node in an arena. Folders keep an ordered list of
//! children and every node keeps a non-owning link back to its folder.
//! Paths are plain `/`-separated strings resolved from the root.

mod arena;
mod error;
mod folder;
mod node;
mod operations;
mod path;
mod print;

pub use arena::Tree;
pub use error::TreeError;
pub use node::{File, Folder, Node, NodeId, SEPARATOR, validate_name};
pub use path::{Exploration, PathSegments, Traversal};
pub use print::{PrintError, structured_print, write_structure};
