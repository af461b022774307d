use snafu::ensure;
use tracing::{debug, info};

use crate::tree::Tree;
use crate::tree::error::{
    CannotRemoveParentSnafu, CannotRemoveRootSnafu, ExpectedFileFoundFolderSnafu,
    ExpectedFolderFoundFileSnafu, TreeError,
};
use crate::tree::node::NodeId;

impl Tree {
    /// Passes `target` through when it is a folder; `path` is only context
    /// for the error.
    fn ensure_folder(&self, path: &str, target: NodeId) -> Result<NodeId, TreeError> {
        ensure!(
            self.node(target)?.is_folder(),
            ExpectedFolderFoundFileSnafu { path }
        );
        Ok(target)
    }

    /// Creates an empty file named `name` inside the folder at `path`.
    pub fn create_file(&mut self, path: &str, name: &str) -> Result<NodeId, TreeError> {
        let target = self.follow_path(path)?;
        let folder = self.ensure_folder(path, target)?;
        let created = self.insert_file(folder, name)?;
        info!("Created file '{}' at '{}'", name, path);
        Ok(created)
    }

    /// Creates a folder named `name` inside the folder at `path`.
    ///
    /// Without `recursive` every segment of `path` must already exist. With
    /// it, the missing segments are created first, left to right. Segments
    /// created before a failure are kept.
    pub fn create_folder(
        &mut self,
        path: &str,
        name: &str,
        recursive: bool,
    ) -> Result<NodeId, TreeError> {
        let parent = if recursive {
            let exploration = self.explore_path(path)?;
            let mut current = self.ensure_folder(path, exploration.node)?;
            for segment in &exploration.remaining {
                debug!("Creating missing segment '{}'", segment);
                current = self.insert_folder(current, segment)?;
            }
            current
        } else {
            let target = self.follow_path(path)?;
            self.ensure_folder(path, target)?
        };

        let created = self.insert_folder(parent, name)?;
        info!("Created folder '{}' at '{}'", name, path);
        Ok(created)
    }

    /// Removes the file at `path`.
    pub fn remove_file(&mut self, path: &str) -> Result<(), TreeError> {
        let target = self.follow_path(path)?;
        ensure!(
            self.node(target)?.is_file(),
            ExpectedFileFoundFolderSnafu { path }
        );
        let file = self.node(target)?.as_file()?;
        let (parent, name) = (file.parent(), file.name().to_string());

        self.remove_child(parent, &name)?;
        info!("Removed file '{}'", path);
        Ok(())
    }

    /// Removes the folder at `path`. A folder with children is only removed
    /// when `recursive` is set, and the root is never removed.
    pub fn remove_folder(&mut self, path: &str, recursive: bool) -> Result<(), TreeError> {
        let target = self.follow_path(path)?;
        let folder = self.node(target)?.as_folder()?;

        ensure!(!self.is_root(target), CannotRemoveRootSnafu);
        ensure!(
            recursive || !folder.has_children(),
            CannotRemoveParentSnafu { path }
        );

        let name = folder.name().to_string();
        let Some(parent) = folder.parent() else {
            return CannotRemoveRootSnafu.fail();
        };
        self.remove_child(parent, &name)?;
        info!("Removed folder '{}'", path);
        Ok(())
    }

    /// Every node in the tree whose clean name is `name`, depth first.
    pub fn search_all(&self, name: &str) -> Result<Vec<NodeId>, TreeError> {
        self.depth_first_search(self.root(), name)
    }

    /// Rebuilds the path of `node` from the root, e.g. `./docs/readme.txt`.
    pub fn evaluate_node_path(&self, node: NodeId) -> Result<String, TreeError> {
        let mut names = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let node = self.node(id)?;
            names.push(node.display_name());
            current = node.parent();
        }
        names.reverse();
        Ok(names.concat())
    }
}
