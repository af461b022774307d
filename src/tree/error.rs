use snafu::Snafu;

use crate::tree::NodeId;

/// Every expected failure the tree can report. None of them is fatal: the
/// caller decides whether to print, retry or ignore.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum TreeError {
    #[snafu(display("the node's name '{}' is invalid", name))]
    InvalidName { name: String },
    #[snafu(display("cannot handle folder '{}' as a file", name))]
    FolderAsFile { name: String },
    #[snafu(display("cannot handle file '{}' as a folder", name))]
    FileAsFolder { name: String },
    #[snafu(display("folder '{}' has no children", folder))]
    NoChildren { folder: String },
    #[snafu(display("folder '{}' has no children of type Folder", folder))]
    NoFolderChildren { folder: String },
    #[snafu(display("folder '{}' has no children of type File", folder))]
    NoFileChildren { folder: String },
    #[snafu(display("file '{}' needs a parent", name))]
    DanglingFile { name: String },
    #[snafu(display("child '{}' does not exist", name))]
    ChildNotFound { name: String },
    #[snafu(display("expected a file node at '{}', found a folder node", path))]
    ExpectedFileFoundFolder { path: String },
    #[snafu(display("expected a folder node at '{}', found a file node", path))]
    ExpectedFolderFoundFile { path: String },
    #[snafu(display("unable to follow path at '{}'", segment))]
    UnableToFollow { segment: String },
    #[snafu(display("path not found at '{}'", segment))]
    PathNotFound { segment: String },
    #[snafu(display("a child named '{}' already exists", name))]
    DuplicatedName { name: String },
    #[snafu(display("cannot remove '{}': folder has children", path))]
    CannotRemoveParent { path: String },
    #[snafu(display("cannot remove the root folder"))]
    CannotRemoveRoot,
    #[snafu(display("node {} is no longer part of the tree", id))]
    StaleNode { id: NodeId },
}

impl TreeError {
    /// Stable numeric code, shown next to the message by the REPL.
    pub fn code(&self) -> i32 {
        match self {
            TreeError::InvalidName { .. } => 1,
            TreeError::FolderAsFile { .. } => 2,
            TreeError::FileAsFolder { .. } => 3,
            TreeError::NoChildren { .. } => 4,
            TreeError::NoFolderChildren { .. } => 5,
            TreeError::NoFileChildren { .. } => 6,
            TreeError::DanglingFile { .. } => 7,
            TreeError::ChildNotFound { .. } => 8,
            TreeError::ExpectedFileFoundFolder { .. } => 9,
            TreeError::ExpectedFolderFoundFile { .. } => 10,
            TreeError::UnableToFollow { .. } => 11,
            TreeError::PathNotFound { .. } => 12,
            TreeError::DuplicatedName { .. } => 13,
            TreeError::CannotRemoveParent { .. } => 14,
            TreeError::CannotRemoveRoot => 15,
            TreeError::StaleNode { .. } => 16,
        }
    }

    /// True for the "nothing matched" family, which callers listing or
    /// searching may treat as an empty result.
    pub fn is_empty_result(&self) -> bool {
        matches!(
            self,
            TreeError::NoChildren { .. }
                | TreeError::NoFolderChildren { .. }
                | TreeError::NoFileChildren { .. }
                | TreeError::ChildNotFound { .. }
        )
    }
}
