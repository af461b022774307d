use std::io::{self, Write};

use snafu::Snafu;

use crate::tree::Tree;
use crate::tree::error::TreeError;
use crate::tree::node::{Node, NodeId};

#[derive(Debug, Snafu)]
pub enum PrintError {
    #[snafu(context(false), display("{}", source))]
    Lookup { source: TreeError },
    #[snafu(context(false), display("Failed to write the tree structure"))]
    Output { source: io::Error },
}

/// Writes `node` and, for folders, every descendant one level deeper,
/// in child order. Level `n` is indented by `2n + 1` spaces.
pub fn write_structure<W: Write + ?Sized>(
    tree: &Tree,
    node: NodeId,
    level: usize,
    out: &mut W,
) -> Result<(), PrintError> {
    let current = tree.node(node)?;

    writeln!(out, "{:indent$}{}", "", current, indent = 2 * level + 1)?;
    if let Node::Folder(folder) = current {
        for &child in &folder.children {
            write_structure(tree, child, level + 1, out)?;
        }
    }
    Ok(())
}

/// [`write_structure`] to stdout.
pub fn structured_print(tree: &Tree, node: NodeId, level: usize) -> Result<(), PrintError> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write_structure(tree, node, level, &mut lock)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tree: &Tree, node: NodeId, level: usize) -> String {
        let mut out = Vec::new();
        write_structure(tree, node, level, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn prints_nested_structure_in_child_order() {
        let mut tree = Tree::new();
        tree.create_folder(".", "test", false).unwrap();
        tree.create_file(".", "tf.txt").unwrap();
        tree.create_folder("test", "subfolder", false).unwrap();
        tree.create_folder("test", "chance", false).unwrap();

        let printed = render(&tree, tree.root(), 0);

        let expected = concat!(
            " ./\n",
            "   test/\n",
            "     subfolder/\n",
            "     chance/\n",
            "   tf.txt\n",
        );
        assert_eq!(printed, expected);
    }

    #[test]
    fn starting_level_shifts_everything() {
        let mut tree = Tree::new();
        let docs = tree.create_folder(".", "docs", false).unwrap();
        tree.create_file("docs", "a").unwrap();

        let printed = render(&tree, docs, 2);

        assert_eq!(printed, "     docs/\n       a\n");
    }

    #[test]
    fn file_prints_only_itself() {
        let mut tree = Tree::new();
        let file = tree.create_file(".", "alone").unwrap();
        assert_eq!(render(&tree, file, 0), " alone\n");
    }

    #[test]
    fn removed_node_is_reported() {
        let mut tree = Tree::new();
        let docs = tree.create_folder(".", "docs", false).unwrap();
        tree.remove_folder("docs", false).unwrap();

        let mut out = Vec::new();
        let result = write_structure(&tree, docs, 0, &mut out);

        assert!(matches!(
            result,
            Err(PrintError::Lookup {
                source: TreeError::StaleNode { .. }
            })
        ));
        assert!(out.is_empty());
    }
}
