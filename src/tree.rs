//! Immutable binary tree with structural sharing
//!
//! The skew heap is built directly on this primitive. A tree is either empty
//! or a node holding a value and two subtrees. Nodes are `Arc`-shared and
//! never modified, so building a node from existing subtrees is O(1) and the
//! subtrees remain part of whatever trees already contained them.

use std::fmt;
use std::sync::Arc;

struct TreeNode<T> {
    value: T,
    left: BinaryTree<T>,
    right: BinaryTree<T>,
}

/// An immutable, persistent binary tree
///
/// # Example
///
/// ```rust
/// use persistent_heaps::tree::BinaryTree;
///
/// let left = BinaryTree::leaf(2);
/// let tree = BinaryTree::node(1, left.clone(), BinaryTree::new());
///
/// assert_eq!(tree.root(), Some(&1));
/// assert!(BinaryTree::ptr_eq(tree.left_child().unwrap(), &left));
/// assert!(tree.right_child().unwrap().is_empty());
/// ```
pub struct BinaryTree<T> {
    link: Option<Arc<TreeNode<T>>>,
}

impl<T> BinaryTree<T> {
    /// Creates an empty tree
    pub const fn new() -> Self {
        BinaryTree { link: None }
    }

    /// Creates a single-node tree
    pub fn leaf(value: T) -> Self {
        Self::node(value, BinaryTree::new(), BinaryTree::new())
    }

    /// Creates a tree from a root value and two existing subtrees
    pub fn node(value: T, left: BinaryTree<T>, right: BinaryTree<T>) -> Self {
        BinaryTree {
            link: Some(Arc::new(TreeNode { value, left, right })),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.link.is_none()
    }

    /// Value at the root, `None` for the empty tree
    pub fn root(&self) -> Option<&T> {
        self.link.as_ref().map(|node| &node.value)
    }

    pub fn left_child(&self) -> Option<&BinaryTree<T>> {
        self.link.as_ref().map(|node| &node.left)
    }

    pub fn right_child(&self) -> Option<&BinaryTree<T>> {
        self.link.as_ref().map(|node| &node.right)
    }

    /// Returns `(root, left, right)`, or `None` for the empty tree
    pub fn parts(&self) -> Option<(&T, &BinaryTree<T>, &BinaryTree<T>)> {
        self.link
            .as_ref()
            .map(|node| (&node.value, &node.left, &node.right))
    }

    /// Number of nodes, O(n)
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(tree) = stack.pop() {
            if let Some((_, left, right)) = tree.parts() {
                count += 1;
                stack.push(left);
                stack.push(right);
            }
        }
        count
    }

    /// Returns true if both trees are rooted at the same node (or are both empty)
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        match (&a.link, &b.link) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Clone for BinaryTree<T> {
    fn clone(&self) -> Self {
        BinaryTree {
            link: self.link.clone(),
        }
    }
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Skew heaps can degenerate into long left paths, so release unshared nodes
// with an explicit stack instead of recursion.
impl<T> Drop for BinaryTree<T> {
    fn drop(&mut self) {
        let mut stack: Vec<Arc<TreeNode<T>>> = self.link.take().into_iter().collect();
        while let Some(node) = stack.pop() {
            if let Some(mut node) = Arc::into_inner(node) {
                stack.extend(node.left.link.take());
                stack.extend(node.right.link.take());
            }
        }
    }
}

impl<T: PartialEq> PartialEq for BinaryTree<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut stack = vec![(self, other)];
        while let Some((a, b)) = stack.pop() {
            match (a.parts(), b.parts()) {
                (None, None) => {}
                (Some((va, la, ra)), Some((vb, lb, rb))) => {
                    if va != vb {
                        return false;
                    }
                    stack.push((la, lb));
                    stack.push((ra, rb));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T: Eq> Eq for BinaryTree<T> {}

impl<T: fmt::Debug> fmt::Debug for BinaryTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.parts() {
            None => f.write_str("Empty"),
            Some((value, left, right)) => f
                .debug_struct("Node")
                .field("value", value)
                .field("left", left)
                .field("right", right)
                .finish(),
        }
    }
}
