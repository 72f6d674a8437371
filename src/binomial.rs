//! Persistent Binomial Queue implementation
//!
//! A binomial queue is a forest of binomial trees with:
//! - O(log n) put and remove_max
//! - O(log n) meld
//! - O(log n) peek_max (scan of the forest roots)
//!
//! # Algorithm Overview
//!
//! **Binomial Tree Bᵣ** ([`BinomialHeap`] of rank r): recursively defined:
//! - B₀ is a single node
//! - Bᵣ₊₁ is formed by combining two Bᵣ trees: the root with the larger
//!   priority stays root and the other tree becomes its new first child
//! - Bᵣ has exactly 2ʳ nodes; its children have ranks r-1, r-2, ..., 0
//!
//! **Forest** ([`BinomialQueue`]): trees held in strictly decreasing rank
//! order, at most one per rank. The ranks present are the set bits of the
//! queue length, and melding two forests is binary addition: equal ranks are
//! combined and carried into the next rank.
//!
//! # Persistence
//!
//! Trees and forest cells are immutable and `Arc`-shared. Combining two trees
//! allocates one node and one list cell; every existing subtree is reused as
//! is. An operation therefore allocates O(log n) nodes, and every earlier
//! version of the queue stays valid.

use crate::drawing::TreeDrawing;
use crate::list::ConsList;
use crate::rank::{checked_increment, tree_size, Rank};
use crate::traits::{InvariantViolation, PersistentQueue, QueueError};
use smallvec::SmallVec;
use std::fmt;
use std::sync::Arc;

/// A forest of binomial trees in strictly decreasing rank order
type Forest<P> = ConsList<BinomialHeap<P>>;

/// Forest prefix buffered while excising one tree; forests hold at most
/// `usize::BITS` trees and usually far fewer.
type Prefix<P> = SmallVec<[BinomialHeap<P>; 16]>;

struct HeapNode<P> {
    /// Priority at the root; the maximum of the whole tree
    max: Arc<P>,
    /// Children in strictly decreasing rank order: rank-1, rank-2, ..., 0
    children: Forest<P>,
    rank: Rank,
}

/// A single immutable binomial tree
///
/// The priority is shared by `Arc` so that combining trees never needs to
/// copy a priority: the winning root's priority moves into the new node by
/// reference.
pub struct BinomialHeap<P> {
    node: Arc<HeapNode<P>>,
}

impl<P> Clone for BinomialHeap<P> {
    fn clone(&self) -> Self {
        BinomialHeap {
            node: Arc::clone(&self.node),
        }
    }
}

impl<P: Ord> BinomialHeap<P> {
    /// Creates a rank-0 tree holding a single priority
    pub fn singleton(priority: P) -> Self {
        Self::from_shared(Arc::new(priority))
    }

    fn from_shared(priority: Arc<P>) -> Self {
        BinomialHeap {
            node: Arc::new(HeapNode {
                max: priority,
                children: ConsList::new(),
                rank: 0,
            }),
        }
    }

    /// Combines two trees of equal rank r into one tree of rank r+1
    ///
    /// **Time Complexity**: O(1)
    ///
    /// The root with the greater priority becomes the new root (`h1` on a tie)
    /// and the other tree is prepended as its first child. That child has
    /// rank r, larger than every existing child, so the children stay in
    /// strictly decreasing rank order.
    ///
    /// # Panics
    ///
    /// Panics if the ranks differ.
    pub fn combine(h1: &Self, h2: &Self) -> Self {
        assert_eq!(
            h1.rank(),
            h2.rank(),
            "only binomial trees of equal rank can be combined"
        );
        let (root, child) = if h2.max() > h1.max() { (h2, h1) } else { (h1, h2) };
        BinomialHeap {
            node: Arc::new(HeapNode {
                max: Arc::clone(&root.node.max),
                children: root.node.children.cons(child.clone()),
                rank: checked_increment(root.rank()),
            }),
        }
    }
}

impl<P> BinomialHeap<P> {
    pub fn rank(&self) -> Rank {
        self.node.rank
    }

    /// The priority at the root, which is the maximum of the tree
    pub fn max(&self) -> &P {
        &self.node.max
    }

    /// Subtrees of the root in strictly decreasing rank order
    pub fn children(&self) -> &ConsList<BinomialHeap<P>> {
        &self.node.children
    }

    /// Number of priorities in the tree, always `2^rank`
    pub fn size(&self) -> usize {
        tree_size(self.rank())
    }

    /// Returns true if both handles refer to the same tree node
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.node, &b.node)
    }

    /// Verifies heap order and binomial shape, returning the node count
    ///
    /// Recursion depth is bounded by the rank.
    pub fn check(&self) -> Result<usize, InvariantViolation>
    where
        P: Ord,
    {
        let mut size = 1;
        let mut previous: Option<Rank> = None;
        for child in self.children() {
            if child.max() > self.max() {
                return Err(InvariantViolation::HeapOrder);
            }
            if let Some(prev) = previous {
                if child.rank() >= prev {
                    return Err(InvariantViolation::RankOrder {
                        previous: prev,
                        next: child.rank(),
                    });
                }
            }
            previous = Some(child.rank());
            size += child.check()?;
        }
        if size != self.size() {
            return Err(InvariantViolation::MalformedTree {
                rank: self.rank(),
                size,
            });
        }
        Ok(size)
    }

    pub fn drawing(&self) -> TreeDrawing
    where
        P: fmt::Display,
    {
        TreeDrawing::node(
            self.max().to_string(),
            self.children().iter().map(BinomialHeap::drawing).collect(),
        )
    }

    fn collect_shared(&self, out: &mut Vec<Arc<P>>) {
        out.push(Arc::clone(&self.node.max));
        for child in self.children() {
            child.collect_shared(out);
        }
    }
}

impl<P: fmt::Debug> fmt::Debug for BinomialHeap<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialHeap")
            .field("rank", &self.rank())
            .field("max", self.max())
            .field("children", self.children())
            .finish()
    }
}

/// Persistent Binomial Queue
///
/// # Example
///
/// ```rust
/// use persistent_heaps::binomial::BinomialQueue;
/// use persistent_heaps::PersistentQueue;
///
/// let q = BinomialQueue::new().put(5).put(3).put(8).put(1);
/// assert_eq!(q.ranks(), vec![2]);
///
/// let q2 = q.remove_max().unwrap();
/// assert_eq!(q2.peek_max(), Some(&5));
/// assert_eq!(q2.ranks(), vec![1, 0]);
///
/// // `q` is a separate version and still holds all four priorities.
/// assert_eq!(q.peek_max(), Some(&8));
/// assert_eq!(q.len(), 4);
/// ```
pub struct BinomialQueue<P> {
    heaps: Forest<P>,
    len: usize,
}

impl<P> Clone for BinomialQueue<P> {
    fn clone(&self) -> Self {
        BinomialQueue {
            heaps: self.heaps.clone(),
            len: self.len,
        }
    }
}

impl<P: Ord> BinomialQueue<P> {
    fn from_forest(heaps: Forest<P>, len: usize) -> Self {
        debug_assert!(
            Self::ranks_strictly_decreasing(&heaps),
            "forest ranks must be strictly decreasing"
        );
        BinomialQueue { heaps, len }
    }

    /// The trees of the forest, highest rank first
    pub fn heaps(&self) -> &ConsList<BinomialHeap<P>> {
        &self.heaps
    }

    /// Ranks present in the forest, highest first
    ///
    /// These are exactly the positions of the set bits of `len()`.
    pub fn ranks(&self) -> Vec<Rank> {
        self.heaps.iter().map(BinomialHeap::rank).collect()
    }

    /// Melds two forests, each in strictly decreasing rank order
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// **Algorithm**: binary addition over the two rank sequences, highest rank
    /// first, recursing on the rest before deciding about the head:
    /// 1. If either forest is empty, the result is the other one (shared)
    /// 2. Set aside the head of larger rank (`b`'s head on a tie) as `largest`
    ///    and meld everything else into `res`
    /// 3. Compare `largest` with the head of `res`:
    ///    - larger rank: prepend `largest`
    ///    - equal rank: combine the two (the carry) and prepend the result
    ///    - smaller rank: a carry out of the lower ranks overtook `largest`;
    ///      keep that head first and put `largest` right after it
    ///
    /// Recursion depth is bounded by the total number of trees, O(log n).
    fn merge(a: &Forest<P>, b: &Forest<P>) -> Forest<P> {
        let (a_head, a_tail) = match a.split_first() {
            Some(split) => split,
            None => return b.clone(),
        };
        let (b_head, b_tail) = match b.split_first() {
            Some(split) => split,
            None => return a.clone(),
        };

        let (largest, res) = if a_head.rank() > b_head.rank() {
            (a_head, Self::merge(a_tail, b))
        } else {
            (b_head, Self::merge(a, b_tail))
        };

        match res.split_first() {
            None => res.cons(largest.clone()),
            Some((r_head, r_tail)) => {
                if largest.rank() > r_head.rank() {
                    res.cons(largest.clone())
                } else if largest.rank() == r_head.rank() {
                    r_tail.cons(BinomialHeap::combine(largest, r_head))
                } else {
                    debug_assert_eq!(r_head.rank(), largest.rank() + 1);
                    r_tail.cons(largest.clone()).cons(r_head.clone())
                }
            }
        }
    }

    /// Position and tree of the first root holding the maximum priority
    fn find_max(&self) -> Option<(usize, &BinomialHeap<P>)> {
        let mut iter = self.heaps.iter().enumerate();
        let mut best = iter.next()?;
        for (i, heap) in iter {
            if heap.max() > best.1.max() {
                best = (i, heap);
            }
        }
        Some(best)
    }

    /// Returns the forest without the tree at `index`
    ///
    /// Removal is by position, not by value: equal trees elsewhere in the
    /// forest stay. Only the cells in front of `index` are rebuilt; the
    /// suffix after it is shared.
    fn without(&self, index: usize) -> Forest<P> {
        let mut prefix: Prefix<P> = SmallVec::new();
        let mut rest = &self.heaps;
        for _ in 0..index {
            match rest.split_first() {
                Some((head, tail)) => {
                    prefix.push(head.clone());
                    rest = tail;
                }
                None => break,
            }
        }
        let suffix = rest.tail().cloned().unwrap_or_default();
        prefix
            .into_iter()
            .rev()
            .fold(suffix, |list, heap| list.cons(heap))
    }

    fn ranks_strictly_decreasing(heaps: &Forest<P>) -> bool {
        heaps
            .iter()
            .zip(heaps.iter().skip(1))
            .all(|(a, b)| a.rank() > b.rank())
    }

    pub(crate) fn put_shared(&self, priority: Arc<P>) -> Self {
        let single = ConsList::new().cons(BinomialHeap::from_shared(priority));
        Self::from_forest(Self::merge(&self.heaps, &single), self.len + 1)
    }

    pub(crate) fn shared_priorities(&self) -> Vec<Arc<P>> {
        let mut out = Vec::with_capacity(self.len);
        for heap in &self.heaps {
            heap.collect_shared(&mut out);
        }
        out
    }
}

impl<P: Ord> PersistentQueue<P> for BinomialQueue<P> {
    fn new() -> Self {
        BinomialQueue {
            heaps: ConsList::new(),
            len: 0,
        }
    }

    fn is_empty(&self) -> bool {
        self.heaps.is_empty()
    }

    fn len(&self) -> usize {
        self.len
    }

    /// Wraps the priority in a rank-0 tree and melds it into the forest
    ///
    /// **Time Complexity**: O(log n) worst-case, like incrementing a binary
    /// counter.
    fn put(&self, priority: P) -> Self {
        self.put_shared(Arc::new(priority))
    }

    fn peek_max(&self) -> Option<&P> {
        self.find_max().map(|(_, heap)| heap.max())
    }

    /// Removes one occurrence of the maximum
    ///
    /// **Time Complexity**: O(log n)
    ///
    /// **Algorithm**:
    /// 1. Scan the roots left to right for the maximum (first one wins ties)
    /// 2. Excise exactly that tree from the forest by position
    /// 3. Meld its children, already in strictly decreasing rank order, with
    ///    the remaining forest
    fn remove_max(&self) -> Result<Self, QueueError> {
        let (index, max_heap) = self.find_max().ok_or(QueueError::EmptyQueue)?;
        let rest = self.without(index);
        let heaps = Self::merge(max_heap.children(), &rest);
        Ok(Self::from_forest(heaps, self.len - 1))
    }

    fn pop_max(&self) -> Result<(&P, Self), QueueError> {
        let (index, max_heap) = self.find_max().ok_or(QueueError::EmptyQueue)?;
        let rest = self.without(index);
        let heaps = Self::merge(max_heap.children(), &rest);
        Ok((max_heap.max(), Self::from_forest(heaps, self.len - 1)))
    }

    fn meld(&self, other: &Self) -> Self {
        Self::from_forest(Self::merge(&self.heaps, &other.heaps), self.len + other.len)
    }

    /// An unlabelled root whose children are the forest's trees in order
    fn drawing(&self) -> TreeDrawing
    where
        P: fmt::Display,
    {
        TreeDrawing::node("", self.heaps.iter().map(BinomialHeap::drawing).collect())
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let mut counted = 0;
        let mut previous: Option<Rank> = None;
        for heap in &self.heaps {
            if let Some(prev) = previous {
                if heap.rank() >= prev {
                    return Err(InvariantViolation::RankOrder {
                        previous: prev,
                        next: heap.rank(),
                    });
                }
            }
            previous = Some(heap.rank());
            counted += heap.check()?;
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

impl<P: Ord> Default for BinomialQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Ord> FromIterator<P> for BinomialQueue<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        iter.into_iter()
            .fold(BinomialQueue::new(), |queue, priority| queue.put(priority))
    }
}

impl<P: fmt::Debug> fmt::Debug for BinomialQueue<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinomialQueue")
            .field("len", &self.len)
            .field("heaps", &self.heaps)
            .finish()
    }
}
