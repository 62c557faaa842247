use alloc::vec::Vec;
use jidhr_protocol::Record;

/// A derivation tree over borrowed records. Children are owned; parents are
/// not referenced and are recovered by the flattener from walk context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<'a> {
    pub record: &'a Record,
    pub children: Vec<TreeNode<'a>>,
}

impl<'a> TreeNode<'a> {
    pub fn leaf(record: &'a Record) -> Self {
        Self { record, children: Vec::new() }
    }

    pub fn add_child(&mut self, child: TreeNode<'a>) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }

    /// Length of the longest apex-to-leaf path, counted in edges.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|child| 1 + child.depth())
            .max()
            .unwrap_or(0)
    }
}
