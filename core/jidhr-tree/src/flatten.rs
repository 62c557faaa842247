use alloc::vec::Vec;

use jidhr_protocol::{Record, TreeRow};

use crate::node::TreeNode;

/// Pre-order walk over a built tree, yielding one [`TreeRow`] per non-apex node.
///
/// The walk borrows the tree, so a second call to [`flatten`] starts over.
pub struct Flatten<'t, 'a> {
    stack: Vec<(&'t TreeNode<'a>, &'a Record)>,
}

/// Starts a depth-first walk below `root`. The apex itself yields no row.
pub fn flatten<'t, 'a>(root: &'t TreeNode<'a>) -> Flatten<'t, 'a> {
    let mut walk = Flatten { stack: Vec::with_capacity(root.children.len()) };
    walk.push_children(root);
    walk
}

/// Collects the full walk.
pub fn flatten_to_vec(root: &TreeNode<'_>) -> Vec<TreeRow> {
    flatten(root).collect()
}

impl<'t, 'a> Flatten<'t, 'a> {
    // Reversed so the leftmost child is popped first.
    fn push_children(&mut self, parent: &'t TreeNode<'a>) {
        self.stack
            .extend(parent.children.iter().rev().map(|child| (child, parent.record)));
    }
}

impl<'t, 'a> Iterator for Flatten<'t, 'a> {
    type Item = TreeRow;

    fn next(&mut self) -> Option<TreeRow> {
        let (node, parent) = self.stack.pop()?;
        self.push_children(node);
        Some(TreeRow::link(node.record, parent))
    }
}
