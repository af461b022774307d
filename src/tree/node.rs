use std::fmt;

use derive_more::{Display, IsVariant};
use snafu::ensure;

use crate::tree::error::{
    DanglingFileSnafu, FileAsFolderSnafu, FolderAsFileSnafu, InvalidNameSnafu, TreeError,
};

pub const SEPARATOR: char = '/';
const ALT_SEPARATOR: char = '\\';
const ROOT_NAME: &str = ".";

/// Handle to a node living in a [`Tree`](crate::tree::Tree) arena.
///
/// A handle never owns the node it points to. Parents reference their
/// children and children reference their parent through these. The
/// generation tells a handle to a freed slot apart from the node that
/// reuses it.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("#{index}.{generation}")]
pub struct NodeId {
    index: usize,
    generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        NodeId { index, generation }
    }

    pub(crate) fn index(self) -> usize {
        self.index
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

/// A node of the tree: either a folder holding children or an empty file.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum Node {
    Folder(Folder),
    File(File),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    name: String,
    parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    name: String,
    parent: NodeId,
}

/// Rejects names that could not be addressed by a path segment.
pub fn validate_name(name: &str) -> Result<(), TreeError> {
    // Names starting with '.' are fine, hidden folders use them
    ensure!(
        !name.is_empty()
            && !name.contains(SEPARATOR)
            && !name.contains(ALT_SEPARATOR)
            && name != "."
            && name != "..",
        InvalidNameSnafu { name }
    );
    Ok(())
}

impl Folder {
    /// Builds an empty folder. The children vector always exists.
    pub fn new(name: impl Into<String>, parent: Option<NodeId>) -> Result<Self, TreeError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Folder {
            name,
            parent,
            children: Vec::new(),
        })
    }

    /// The distinguished root: named `.`, without a parent.
    pub(crate) fn root() -> Self {
        Folder {
            name: ROOT_NAME.to_string(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

impl File {
    pub fn new(name: impl Into<String>, parent: Option<NodeId>) -> Result<Self, TreeError> {
        let name = name.into();
        let parent = parent.ok_or_else(|| DanglingFileSnafu { name: &name }.build())?;
        validate_name(&name)?;
        Ok(File { name, parent })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }
}

impl Node {
    /// The stored name, without any separator. Used for every comparison.
    pub fn clean_name(&self) -> &str {
        match self {
            Node::Folder(folder) => folder.name(),
            Node::File(file) => file.name(),
        }
    }

    /// The name as shown to users: folders carry a trailing separator and
    /// the root shows as `./`.
    pub fn display_name(&self) -> String {
        self.to_string()
    }

    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Folder(folder) => folder.parent(),
            Node::File(file) => Some(file.parent()),
        }
    }

    pub fn as_file(&self) -> Result<&File, TreeError> {
        match self {
            Node::File(file) => Ok(file),
            Node::Folder(folder) => FolderAsFileSnafu {
                name: folder.name(),
            }
            .fail(),
        }
    }

    pub fn as_folder(&self) -> Result<&Folder, TreeError> {
        match self {
            Node::Folder(folder) => Ok(folder),
            Node::File(file) => FileAsFolderSnafu { name: file.name() }.fail(),
        }
    }

    pub(crate) fn as_folder_mut(&mut self) -> Result<&mut Folder, TreeError> {
        match self {
            Node::Folder(folder) => Ok(folder),
            Node::File(file) => FileAsFolderSnafu { name: file.name() }.fail(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Folder(folder) => write!(f, "{}{}", folder.name(), SEPARATOR),
            Node::File(file) => f.write_str(file.name()),
        }
    }
}
