use snafu::OptionExt;
use tracing::trace;

use crate::tree::error::{StaleNodeSnafu, TreeError};
use crate::tree::node::{Folder, Node, NodeId};

/// An in-memory namespace of folders and files rooted at a single folder.
///
/// Nodes live in an arena and refer to each other through [`NodeId`]s:
/// a folder owns the slots of its children, and the parent link of a
/// child is only a lookup back. Freed slots are reused, but each reuse
/// bumps the slot generation, so an old handle fails with
/// [`TreeError::StaleNode`] instead of silently pointing at a newer node.
#[derive(Debug, Clone)]
pub struct Tree {
    slots: Vec<Slot>,
    free: Vec<usize>,
    live: usize,
    root: NodeId,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

impl Tree {
    /// Creates an empty tree with the root folder already set.
    pub fn new() -> Self {
        Tree {
            slots: vec![Slot {
                generation: 0,
                node: Some(Node::Folder(Folder::root())),
            }],
            free: Vec::new(),
            live: 1,
            root: NodeId::new(0, 0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, TreeError> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
            .context(StaleNodeSnafu { id })
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, TreeError> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
            .context(StaleNodeSnafu { id })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_ok()
    }

    /// Parent of a node, `None` for the root.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        Ok(self.node(id)?.parent())
    }

    /// Number of nodes currently reachable, root included.
    pub fn len(&self) -> usize {
        self.live
    }

    /// True when nothing but the root is left.
    pub fn is_empty(&self) -> bool {
        self.live == 1
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        self.live += 1;
        if let Some(index) = self.free.pop()
            && let Some(slot) = self.slots.get_mut(index)
        {
            slot.node = Some(node);
            return NodeId::new(index, slot.generation);
        }

        let index = self.slots.len();
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId::new(index, 0)
    }

    /// Frees a node and every node below it.
    pub(crate) fn release(&mut self, id: NodeId) {
        let Some(slot) = self
            .slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation())
        else {
            return;
        };
        let Some(node) = slot.node.take() else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index());
        self.live -= 1;

        trace!("Released node {} ({})", id, node.clean_name());
        if let Node::Folder(folder) = node {
            for child in folder.children {
                self.release(child);
            }
        }
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::File;

    #[test]
    fn new_tree_has_only_root() {
        let tree = Tree::new();
        let root = tree.node(tree.root()).unwrap();

        assert!(root.is_folder());
        assert_eq!(root.display_name(), "./");
        assert_eq!(root.parent(), None);
        assert_eq!(tree.len(), 1);
        assert!(tree.is_empty());
    }

    #[test]
    fn unknown_handle_is_stale() {
        let tree = Tree::new();
        let result = tree.node(NodeId::new(42, 0));
        assert_eq!(
            result,
            Err(TreeError::StaleNode {
                id: NodeId::new(42, 0)
            })
        );
    }

    #[test]
    fn release_frees_whole_subtree() {
        let mut tree = Tree::new();
        let folder = tree.alloc(Node::Folder(Folder::new("a", Some(tree.root())).unwrap()));
        let file = tree.alloc(Node::File(File::new("f", Some(folder)).unwrap()));
        tree.node_mut(folder)
            .unwrap()
            .as_folder_mut()
            .unwrap()
            .children
            .push(file);

        tree.release(folder);

        assert!(!tree.contains(folder));
        assert!(!tree.contains(file));
        assert!(tree.contains(tree.root()));
    }

    #[test]
    fn reused_slot_rejects_old_handle() {
        let mut tree = Tree::new();
        let first = tree.alloc(Node::Folder(Folder::new("a", Some(tree.root())).unwrap()));
        tree.release(first);
        let second = tree.alloc(Node::Folder(Folder::new("b", Some(tree.root())).unwrap()));

        assert_eq!(first.index(), second.index());
        assert_ne!(first, second);
        assert_eq!(tree.node(first), Err(TreeError::StaleNode { id: first }));
        assert_eq!(tree.node(second).unwrap().clean_name(), "b");
    }

    #[test]
    fn releasing_a_stale_handle_keeps_the_new_node() {
        let mut tree = Tree::new();
        let first = tree.alloc(Node::Folder(Folder::new("a", Some(tree.root())).unwrap()));
        tree.release(first);
        let second = tree.alloc(Node::Folder(Folder::new("b", Some(tree.root())).unwrap()));

        tree.release(first);

        assert!(tree.contains(second));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn create_remove_churn_keeps_storage_bounded() {
        let mut tree = Tree::new();
        for _ in 0..10_000 {
            tree.create_folder("/", "tmp", false).unwrap();
            tree.remove_folder("tmp", false).unwrap();
        }

        assert_eq!(tree.len(), 1);
        assert!(tree.is_empty());
        assert_eq!(tree.slots.len(), 2);
    }
}
