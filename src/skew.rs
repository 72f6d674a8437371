//! Persistent Skew Heap implementation
//!
//! A skew heap is a self-adjusting heap-ordered binary tree with:
//! - O(log n) amortized put, remove_max and meld
//! - O(1) peek_max
//!
//! Skew heaps keep no rank or balance information at all. The merge walks
//! down the right spines of both trees and swaps the children of every node
//! on the merge path; that swap alone gives the amortized bound.
//!
//! # Algorithm Overview
//!
//! `merge(t1, t2)`:
//! - if either tree is empty, the result is the other one
//! - otherwise let `large` be the tree with the greater root (`t2` on a tie)
//!   and `small` the other; merge `large.right` with `small` into `t3`
//! - the result is `large.root` with `t3` as its **left** child and the old
//!   `large.left` as its **right** child
//!
//! # Persistence
//!
//! Only the nodes on the merge path are rebuilt; every subtree hanging off
//! that path is shared with the inputs. Note that amortized bounds assume each
//! version is operated on once: repeatedly operating on the same expensive old
//! version can cost more.

use crate::drawing::TreeDrawing;
use crate::traits::{InvariantViolation, PersistentQueue, QueueError};
use crate::tree::BinaryTree;
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

type Tree<P> = BinaryTree<Arc<P>>;

/// Persistent Skew Heap
///
/// # Example
///
/// ```rust
/// use persistent_heaps::skew::SkewHeap;
/// use persistent_heaps::PersistentQueue;
///
/// let q: SkewHeap<i32> = [5, 3, 8, 1].into_iter().collect();
/// assert_eq!(q.peek_max(), Some(&8));
/// assert_eq!(q.clone().into_sorted_vec(), vec![8, 5, 3, 1]);
/// assert_eq!(q.len(), 4);
/// ```
pub struct SkewHeap<P> {
    tree: Tree<P>,
    len: usize,
}

impl<P> Clone for SkewHeap<P> {
    fn clone(&self) -> Self {
        SkewHeap {
            tree: self.tree.clone(),
            len: self.len,
        }
    }
}

impl<P: Ord> SkewHeap<P> {
    /// The underlying heap-ordered tree
    pub fn tree(&self) -> &BinaryTree<Arc<P>> {
        &self.tree
    }

    /// Merges two heap-ordered trees
    ///
    /// **Time Complexity**: O(log n) amortized
    ///
    /// Runs top-down along the merge path and records, for each step, the
    /// winning root and its old left child. The result is then assembled
    /// bottom-up, each recorded root taking the merged remainder as its left
    /// child and its old left child as its right child. This is the recursive
    /// definition unrolled, so long right spines cannot exhaust the stack.
    fn merge(t1: &Tree<P>, t2: &Tree<P>) -> Tree<P> {
        let mut path: SmallVec<[(&Arc<P>, &Tree<P>); 32]> = SmallVec::new();
        let (mut t1, mut t2) = (t1, t2);

        let bottom = loop {
            let (root1, left1, right1) = match t1.parts() {
                Some(parts) => parts,
                None => break t2.clone(),
            };
            let (root2, left2, right2) = match t2.parts() {
                Some(parts) => parts,
                None => break t1.clone(),
            };

            if **root1 > **root2 {
                path.push((root1, left1));
                t1 = right1;
            } else {
                path.push((root2, left2));
                t2 = t1;
                t1 = right2;
            }
        };

        path.into_iter().rev().fold(bottom, |merged, (root, left)| {
            BinaryTree::node(Arc::clone(root), merged, left.clone())
        })
    }

    pub(crate) fn put_shared(&self, priority: Arc<P>) -> Self {
        SkewHeap {
            tree: Self::merge(&self.tree, &BinaryTree::leaf(priority)),
            len: self.len + 1,
        }
    }

    pub(crate) fn shared_priorities(&self) -> Vec<Arc<P>> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = vec![&self.tree];
        while let Some(tree) = stack.pop() {
            if let Some((root, left, right)) = tree.parts() {
                out.push(Arc::clone(root));
                stack.push(right);
                stack.push(left);
            }
        }
        out
    }
}

fn is_leaf<P>(left: &Tree<P>, right: &Tree<P>) -> bool {
    left.is_empty() && right.is_empty()
}

// Records the subtrees top-down, then builds their drawings bottom-up, so a
// long left path does not recurse once per node.
fn draw_tree<P: fmt::Display>(tree: &Tree<P>) -> TreeDrawing {
    let mut preorder = Vec::new();
    let mut stack = vec![tree];
    while let Some(tree) = stack.pop() {
        preorder.push(tree);
        if let Some((_, left, right)) = tree.parts() {
            if !is_leaf(left, right) {
                stack.push(right);
                stack.push(left);
            }
        }
    }

    let mut built: Vec<TreeDrawing> = Vec::with_capacity(preorder.len());
    for tree in preorder.into_iter().rev() {
        let drawing = match tree.parts() {
            None => TreeDrawing::empty(),
            Some((root, left, right)) if is_leaf(left, right) => TreeDrawing::leaf(root.to_string()),
            Some((root, _, _)) => {
                // Left was finished after right, so it sits on top.
                let mut children = built.split_off(built.len() - 2);
                children.reverse();
                TreeDrawing::node(root.to_string(), children)
            }
        };
        built.push(drawing);
    }
    built.pop().unwrap_or(TreeDrawing::Empty)
}

impl<P: Ord> PersistentQueue<P> for SkewHeap<P> {
    fn new() -> Self {
        SkewHeap {
            tree: BinaryTree::new(),
            len: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    fn len(&self) -> usize {
        self.len
    }

    /// Merges the heap with a fresh single-node tree
    fn put(&self, priority: P) -> Self {
        self.put_shared(Arc::new(priority))
    }

    fn peek_max(&self) -> Option<&P> {
        self.tree.root().map(|root| &**root)
    }

    /// Discards the root and merges its two subtrees
    fn remove_max(&self) -> Result<Self, QueueError> {
        let (_, left, right) = self.tree.parts().ok_or(QueueError::EmptyQueue)?;
        Ok(SkewHeap {
            tree: Self::merge(left, right),
            len: self.len - 1,
        })
    }

    fn meld(&self, other: &Self) -> Self {
        SkewHeap {
            tree: Self::merge(&self.tree, &other.tree),
            len: self.len + other.len,
        }
    }

    /// The binary tree itself; a missing child of an inner node is drawn as
    /// an empty placeholder so left and right stay distinguishable
    fn drawing(&self) -> TreeDrawing
    where
        P: fmt::Display,
    {
        draw_tree(&self.tree)
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut counted = 0;
        let mut stack = vec![&self.tree];
        while let Some(tree) = stack.pop() {
            if let Some((root, left, right)) = tree.parts() {
                counted += 1;
                for child in [left, right] {
                    if let Some(child_root) = child.root() {
                        if child_root > root {
                            return Err(InvariantViolation::HeapOrder);
                        }
                    }
                    stack.push(child);
                }
            }
        }
        if counted != self.len {
            return Err(InvariantViolation::LengthMismatch {
                recorded: self.len,
                counted,
            });
        }
        Ok(())
    }
}

impl<P: Ord> Default for SkewHeap<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ord> FromIterator<P> for SkewHeap<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        iter.into_iter()
            .fold(SkewHeap::new(), |heap, priority| heap.put(priority))
    }
}

impl<P: fmt::Debug> fmt::Debug for SkewHeap<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkewHeap")
            .field("len", &self.len)
            .field("tree", &self.tree)
            .finish()
    }
}
