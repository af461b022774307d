//! Folder-level primitives: single-level inserts, removals and lookups.
//! Path handling lives in [`crate::tree::path`].

use snafu::{OptionExt, ensure};
use tracing::debug;

use crate::tree::Tree;
use crate::tree::error::{
    ChildNotFoundSnafu, DuplicatedNameSnafu, NoChildrenSnafu, NoFileChildrenSnafu,
    NoFolderChildrenSnafu, TreeError,
};
use crate::tree::node::{File, Folder, Node, NodeId};

impl Tree {
    pub(crate) fn folder(&self, id: NodeId) -> Result<&Folder, TreeError> {
        self.node(id)?.as_folder()
    }

    /// Handle of the direct child of `folder` whose clean name is `name`.
    fn find_child(&self, folder: &Folder, name: &str) -> Result<Option<NodeId>, TreeError> {
        for &child in &folder.children {
            if self.node(child)?.clean_name() == name {
                return Ok(Some(child));
            }
        }
        Ok(None)
    }

    fn insert_child(
        &mut self,
        folder: NodeId,
        name: &str,
        build: impl FnOnce(NodeId) -> Result<Node, TreeError>,
    ) -> Result<NodeId, TreeError> {
        let existing = self.find_child(self.folder(folder)?, name)?;
        ensure!(existing.is_none(), DuplicatedNameSnafu { name });

        let child = build(folder)?;
        let id = self.alloc(child);
        self.node_mut(folder)?.as_folder_mut()?.children.push(id);
        debug!("Inserted '{}' as {} under {}", name, id, folder);
        Ok(id)
    }

    /// Appends a new empty folder named `name` to `folder`.
    pub fn insert_folder(&mut self, folder: NodeId, name: &str) -> Result<NodeId, TreeError> {
        self.insert_child(folder, name, |parent| {
            Folder::new(name, Some(parent)).map(Node::Folder)
        })
    }

    /// Appends a new file named `name` to `folder`.
    pub fn insert_file(&mut self, folder: NodeId, name: &str) -> Result<NodeId, TreeError> {
        self.insert_child(folder, name, |parent| {
            File::new(name, Some(parent)).map(Node::File)
        })
    }

    /// Detaches the child called `name` and drops it together with its
    /// descendants. The remaining children keep their order.
    pub fn remove_child(&mut self, folder: NodeId, name: &str) -> Result<(), TreeError> {
        let child = self
            .find_child(self.folder(folder)?, name)?
            .context(ChildNotFoundSnafu { name })?;

        self.node_mut(folder)?
            .as_folder_mut()?
            .children
            .retain(|&id| id != child);
        self.release(child);
        debug!("Removed '{}' ({}) from {}", name, child, folder);
        Ok(())
    }

    pub fn has_children(&self, folder: NodeId) -> Result<bool, TreeError> {
        Ok(self.folder(folder)?.has_children())
    }

    /// Copy of the child handles, in insertion order.
    pub fn children(&self, folder: NodeId) -> Result<Vec<NodeId>, TreeError> {
        Ok(self.folder(folder)?.children.clone())
    }

    fn children_where(
        &self,
        folder: NodeId,
        keep: impl Fn(&Node) -> bool,
    ) -> Result<Vec<NodeId>, TreeError> {
        let mut picked = Vec::new();
        for &child in &self.folder(folder)?.children {
            if keep(self.node(child)?) {
                picked.push(child);
            }
        }
        Ok(picked)
    }

    /// Child folders only. An empty result is reported as
    /// [`TreeError::NoFolderChildren`].
    pub fn folder_children(&self, folder: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let folders = self.children_where(folder, Node::is_folder)?;
        ensure!(
            !folders.is_empty(),
            NoFolderChildrenSnafu {
                folder: self.node(folder)?.display_name()
            }
        );
        Ok(folders)
    }

    /// Child files only. An empty result is reported as
    /// [`TreeError::NoFileChildren`].
    pub fn file_children(&self, folder: NodeId) -> Result<Vec<NodeId>, TreeError> {
        let files = self.children_where(folder, Node::is_file)?;
        ensure!(
            !files.is_empty(),
            NoFileChildrenSnafu {
                folder: self.node(folder)?.display_name()
            }
        );
        Ok(files)
    }

    /// Looks for `name` among the direct children of `folder`.
    pub fn search_child(&self, folder: NodeId, name: &str) -> Result<NodeId, TreeError> {
        let current = self.folder(folder)?;
        ensure!(
            current.has_children(),
            NoChildrenSnafu {
                folder: self.node(folder)?.display_name()
            }
        );
        self.find_child(current, name)?
            .context(ChildNotFoundSnafu { name })
    }

    /// Every descendant of `folder` named `name`, in pre-order: each child
    /// is checked before the subtree below it, left to right.
    pub fn depth_first_search(&self, folder: NodeId, name: &str) -> Result<Vec<NodeId>, TreeError> {
        let mut found = Vec::new();
        self.collect_matches(folder, name, &mut found)?;
        Ok(found)
    }

    fn collect_matches(
        &self,
        folder: NodeId,
        name: &str,
        found: &mut Vec<NodeId>,
    ) -> Result<(), TreeError> {
        for &child in &self.folder(folder)?.children {
            let node = self.node(child)?;
            if node.clean_name() == name {
                found.push(child);
            }
            if node.is_folder() {
                self.collect_matches(child, name, found)?;
            }
        }
        Ok(())
    }
}
