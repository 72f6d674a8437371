//! Rank type for binomial trees.
//!
//! A binomial tree of rank `r` has exactly `2^r` nodes, so the rank of any
//! tree that fits in memory is bounded by `usize::BITS`. A `u8` is plenty and
//! keeps every [`BinomialHeap`](crate::binomial::BinomialHeap) node small.
//!
//! The forest of a [`BinomialQueue`](crate::binomial::BinomialQueue) behaves
//! like the bits of a binary counter whose value is the queue length: rank `r`
//! is present iff bit `r` of the length is set.

/// Type alias for a binomial tree rank.
pub type Rank = u8;

/// Largest rank whose tree size still fits in a `usize`.
pub const MAX_RANK: Rank = (usize::BITS - 1) as Rank;

/// Increments a rank when two trees are combined.
///
/// # Panics
///
/// Panics if the result would exceed [`MAX_RANK`]. Reaching it would require
/// more than `2^63` elements, so hitting this means a broken invariant.
///
/// # Example
///
/// ```rust
/// use persistent_heaps::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    assert!(
        rank < MAX_RANK,
        "rank overflow: a rank-{} tree would not fit in memory",
        rank + 1
    );
    rank + 1
}

/// Number of nodes in a binomial tree of the given rank.
///
/// ```rust
/// use persistent_heaps::rank::tree_size;
///
/// assert_eq!(tree_size(0), 1);
/// assert_eq!(tree_size(4), 16);
/// ```
#[inline]
pub fn tree_size(rank: Rank) -> usize {
    1usize << rank
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_increment() {
        assert_eq!(checked_increment(0), 1);
        assert_eq!(checked_increment(31), 32);
        assert_eq!(checked_increment(MAX_RANK - 1), MAX_RANK);
    }

    #[test]
    #[should_panic(expected = "rank overflow")]
    fn test_checked_increment_overflow() {
        checked_increment(MAX_RANK);
    }

    #[test]
    fn test_tree_size_is_power_of_two() {
        for r in 0..=MAX_RANK {
            assert!(tree_size(r).is_power_of_two());
            assert_eq!(tree_size(r).trailing_zeros(), r as u32);
        }
    }
}
