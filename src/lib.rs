//! vtree: an in-memory folder/file tree driven by `/`-separated paths,
//! with an interactive shell on top.

pub mod config;
pub mod repl;
pub mod tree;
