//! Closed sum type over the queue variants
//!
//! [`PriorityQueue`] lets callers pick a variant at runtime and hold either
//! one behind a single type. Exactly two variants exist, so it is an enum
//! rather than a trait object; every operation dispatches with a `match`.

use crate::binomial::BinomialQueue;
use crate::drawing::TreeDrawing;
use crate::skew::SkewHeap;
use crate::traits::{InvariantViolation, PersistentQueue, QueueError};
use std::fmt;
use std::sync::Arc;

/// Which structure backs a [`PriorityQueue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueueKind {
    #[default]
    Binomial,
    Skew,
}

impl fmt::Display for QueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueKind::Binomial => f.write_str("binomial queue"),
            QueueKind::Skew => f.write_str("skew heap"),
        }
    }
}

/// A persistent priority queue of either variant
///
/// # Example
///
/// ```rust
/// use persistent_heaps::{PersistentQueue, PriorityQueue, QueueKind};
///
/// for kind in [QueueKind::Binomial, QueueKind::Skew] {
///     let q = PriorityQueue::with_kind(kind).put(4).put(4).put(2);
///     assert_eq!(q.kind(), kind);
///     assert_eq!(q.into_sorted_vec(), vec![4, 4, 2]);
/// }
/// ```
pub enum PriorityQueue<P> {
    Binomial(BinomialQueue<P>),
    Skew(SkewHeap<P>),
}

impl<P> Clone for PriorityQueue<P> {
    fn clone(&self) -> Self {
        match self {
            PriorityQueue::Binomial(q) => PriorityQueue::Binomial(q.clone()),
            PriorityQueue::Skew(q) => PriorityQueue::Skew(q.clone()),
        }
    }
}

impl<P: Ord> PriorityQueue<P> {
    /// Creates an empty queue of the given variant
    pub fn with_kind(kind: QueueKind) -> Self {
        match kind {
            QueueKind::Binomial => PriorityQueue::Binomial(BinomialQueue::new()),
            QueueKind::Skew => PriorityQueue::Skew(SkewHeap::new()),
        }
    }

    pub fn kind(&self) -> QueueKind {
        match self {
            PriorityQueue::Binomial(_) => QueueKind::Binomial,
            PriorityQueue::Skew(_) => QueueKind::Skew,
        }
    }

    fn shared_priorities(&self) -> Vec<Arc<P>> {
        match self {
            PriorityQueue::Binomial(q) => q.shared_priorities(),
            PriorityQueue::Skew(q) => q.shared_priorities(),
        }
    }

    fn put_all(&self, priorities: Vec<Arc<P>>) -> Self {
        match self {
            PriorityQueue::Binomial(q) => PriorityQueue::Binomial(
                priorities
                    .into_iter()
                    .fold(q.clone(), |q, p| q.put_shared(p)),
            ),
            PriorityQueue::Skew(q) => PriorityQueue::Skew(
                priorities
                    .into_iter()
                    .fold(q.clone(), |q, p| q.put_shared(p)),
            ),
        }
    }
}

impl<P: Ord> PersistentQueue<P> for PriorityQueue<P> {
    /// Creates an empty queue of the default variant ([`QueueKind::Binomial`])
    fn new() -> Self {
        Self::with_kind(QueueKind::default())
    }

    fn is_empty(&self) -> bool {
        match self {
            PriorityQueue::Binomial(q) => q.is_empty(),
            PriorityQueue::Skew(q) => q.is_empty(),
        }
    }

    fn len(&self) -> usize {
        match self {
            PriorityQueue::Binomial(q) => q.len(),
            PriorityQueue::Skew(q) => q.len(),
        }
    }

    fn put(&self, priority: P) -> Self {
        match self {
            PriorityQueue::Binomial(q) => PriorityQueue::Binomial(q.put(priority)),
            PriorityQueue::Skew(q) => PriorityQueue::Skew(q.put(priority)),
        }
    }

    fn peek_max(&self) -> Option<&P> {
        match self {
            PriorityQueue::Binomial(q) => q.peek_max(),
            PriorityQueue::Skew(q) => q.peek_max(),
        }
    }

    fn remove_max(&self) -> Result<Self, QueueError> {
        match self {
            PriorityQueue::Binomial(q) => q.remove_max().map(PriorityQueue::Binomial),
            PriorityQueue::Skew(q) => q.remove_max().map(PriorityQueue::Skew),
        }
    }

    fn pop_max(&self) -> Result<(&P, Self), QueueError> {
        match self {
            PriorityQueue::Binomial(q) => q
                .pop_max()
                .map(|(max, rest)| (max, PriorityQueue::Binomial(rest))),
            PriorityQueue::Skew(q) => q
                .pop_max()
                .map(|(max, rest)| (max, PriorityQueue::Skew(rest))),
        }
    }

    /// Melds two queues
    ///
    /// Queues of the same variant use that variant's merge. For mixed
    /// variants the result keeps `self`'s variant and `other`'s priorities
    /// are put one by one; the priorities themselves are shared, not copied.
    fn meld(&self, other: &Self) -> Self {
        match (self, other) {
            (PriorityQueue::Binomial(a), PriorityQueue::Binomial(b)) => {
                PriorityQueue::Binomial(a.meld(b))
            }
            (PriorityQueue::Skew(a), PriorityQueue::Skew(b)) => PriorityQueue::Skew(a.meld(b)),
            _ => self.put_all(other.shared_priorities()),
        }
    }

    fn drawing(&self) -> TreeDrawing
    where
        P: fmt::Display,
    {
        match self {
            PriorityQueue::Binomial(q) => q.drawing(),
            PriorityQueue::Skew(q) => q.drawing(),
        }
    }

    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        match self {
            PriorityQueue::Binomial(q) => q.check_invariants(),
            PriorityQueue::Skew(q) => q.check_invariants(),
        }
    }
}

impl<P: Ord> Default for PriorityQueue<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> From<BinomialQueue<P>> for PriorityQueue<P> {
    fn from(q: BinomialQueue<P>) -> Self {
        PriorityQueue::Binomial(q)
    }
}

impl<P> From<SkewHeap<P>> for PriorityQueue<P> {
    fn from(q: SkewHeap<P>) -> Self {
        PriorityQueue::Skew(q)
    }
}

impl<P: Ord> FromIterator<P> for PriorityQueue<P> {
    /// Collects into the default variant
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        PriorityQueue::Binomial(iter.into_iter().collect())
    }
}

impl<P: fmt::Debug> fmt::Debug for PriorityQueue<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PriorityQueue::Binomial(q) => f.debug_tuple("Binomial").field(q).finish(),
            PriorityQueue::Skew(q) => f.debug_tuple("Skew").field(q).finish(),
        }
    }
}
