//! Common traits for persistent priority queues
//!
//! Every queue in this crate is immutable. Operations that would mutate a
//! conventional heap instead return a new version, and the old version stays
//! valid and unchanged. Versions share every node the operation did not touch,
//! so producing a new version allocates O(log n) nodes rather than copying.
//!
//! Unlike `std::collections::BinaryHeap` the queues here store bare
//! priorities, ordered by `Ord`, and are max-queues.

use crate::drawing::TreeDrawing;
use crate::rank::Rank;
use std::fmt;
use std::marker::PhantomData;

/// Error type for queue operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// `remove_max` or `pop_max` was called on a queue with no elements
    EmptyQueue,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::EmptyQueue => write!(f, "cannot remove the maximum of an empty queue"),
        }
    }
}

impl std::error::Error for QueueError {}

/// A structural invariant found broken by `check_invariants`.
///
/// These never occur through the public API; they exist so tests and debug
/// builds can say *which* invariant failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A node holds a priority greater than its parent's.
    HeapOrder,
    /// Forest or child ranks are not strictly decreasing.
    RankOrder { previous: Rank, next: Rank },
    /// A binomial tree does not hold exactly `2^rank` nodes.
    MalformedTree { rank: Rank, size: usize },
    /// The recorded length disagrees with the number of reachable nodes.
    LengthMismatch { recorded: usize, counted: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::HeapOrder => {
                write!(f, "a child priority exceeds its parent's priority")
            }
            InvariantViolation::RankOrder { previous, next } => write!(
                f,
                "ranks not strictly decreasing: rank {} followed by rank {}",
                previous, next
            ),
            InvariantViolation::MalformedTree { rank, size } => write!(
                f,
                "binomial tree of rank {} holds {} nodes instead of {}",
                rank,
                size,
                crate::rank::tree_size(*rank)
            ),
            InvariantViolation::LengthMismatch { recorded, counted } => write!(
                f,
                "length mismatch: recorded {} but counted {} nodes",
                recorded, counted
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Contract shared by the persistent priority queues
///
/// # Example
///
/// ```rust
/// use persistent_heaps::PersistentQueue;
/// use persistent_heaps::skew::SkewHeap;
///
/// let empty = SkewHeap::new();
/// let q = empty.put(5).put(3).put(8);
///
/// assert_eq!(q.peek_max(), Some(&8));
/// let (max, rest) = q.pop_max().unwrap();
/// assert_eq!(*max, 8);
/// assert_eq!(rest.peek_max(), Some(&5));
///
/// // Older versions are untouched.
/// assert!(empty.is_empty());
/// assert_eq!(q.len(), 3);
/// ```
pub trait PersistentQueue<P: Ord>: Clone + Sized {
    /// Creates a new empty queue
    fn new() -> Self;

    /// Returns true if the queue holds no elements
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the queue
    fn len(&self) -> usize;

    /// Returns a queue holding every element of `self` plus `priority`
    ///
    /// Never fails.
    fn put(&self, priority: P) -> Self;

    /// Returns a maximum priority without removing it
    fn peek_max(&self) -> Option<&P>;

    /// Returns a queue holding every element of `self` except one occurrence
    /// of the maximum
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    fn remove_max(&self) -> Result<Self, QueueError>;

    /// Returns a maximum priority together with the queue left after removing it
    ///
    /// # Errors
    /// Returns [`QueueError::EmptyQueue`] if the queue is empty.
    fn pop_max(&self) -> Result<(&P, Self), QueueError> {
        let max = self.peek_max().ok_or(QueueError::EmptyQueue)?;
        Ok((max, self.remove_max()?))
    }

    /// Returns a queue holding the elements of both `self` and `other`
    fn meld(&self, other: &Self) -> Self;

    /// Returns the shape of the queue as a drawable tree
    fn drawing(&self) -> TreeDrawing
    where
        P: fmt::Display;

    /// Walks the whole structure and verifies its invariants
    ///
    /// O(n); intended for tests and debugging.
    fn check_invariants(&self) -> Result<(), InvariantViolation>;

    /// Iterates over the priorities in non-increasing order
    ///
    /// The iterator owns a version of the queue and steps through successive
    /// `pop_max` results; `self` is left as it is.
    fn iter_desc(&self) -> Descending<P, Self>
    where
        P: Clone,
    {
        Descending {
            queue: self.clone(),
            _phantom: PhantomData,
        }
    }

    /// Collects the priorities in non-increasing order
    fn into_sorted_vec(self) -> Vec<P>
    where
        P: Clone,
    {
        self.iter_desc().collect()
    }
}

/// Iterator returned by [`PersistentQueue::iter_desc`]
pub struct Descending<P, Q> {
    queue: Q,
    _phantom: PhantomData<P>,
}

impl<P: Ord + Clone, Q: PersistentQueue<P>> Iterator for Descending<P, Q> {
    type Item = P;

    fn next(&mut self) -> Option<P> {
        let (max, rest) = self.queue.pop_max().ok()?;
        let max = max.clone();
        self.queue = rest;
        Some(max)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.queue.len();
        (len, Some(len))
    }
}

impl<P: Ord + Clone, Q: PersistentQueue<P>> ExactSizeIterator for Descending<P, Q> {}
