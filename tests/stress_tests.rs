//! Stress tests that push the queues with large numbers of operations
//!
//! These tests perform large numbers of operations in various patterns to
//! catch edge cases and verify correctness under load, including degenerate
//! insertion orders and heavy branching between versions.

use persistent_heaps::binomial::BinomialQueue;
use persistent_heaps::skew::SkewHeap;
use persistent_heaps::PersistentQueue;

/// Test massive numbers of puts and removals
fn test_massive_operations<Q: PersistentQueue<i32>>() {
    let mut q = Q::new();
    for i in 0..10_000 {
        q = q.put(i);
    }
    assert_eq!(q.len(), 10_000);

    for i in (0..10_000).rev() {
        let (max, rest) = q.pop_max().unwrap();
        assert_eq!(*max, i);
        q = rest;
    }
    assert!(q.is_empty());
}

/// Test descending and constant insertion orders
fn test_degenerate_orders<Q: PersistentQueue<i32>>() {
    let descending = (0..5_000).rev().fold(Q::new(), |q, i| q.put(i));
    assert_eq!(descending.peek_max(), Some(&4_999));
    assert_eq!(descending.check_invariants(), Ok(()));

    let constant = (0..5_000).fold(Q::new(), |q, _| q.put(7));
    assert_eq!(constant.len(), 5_000);
    assert!(constant.iter_desc().all(|p| p == 7));
}

/// Test alternating put and remove
fn test_alternating_ops<Q: PersistentQueue<i32>>() {
    let mut q = Q::new();
    for i in 0..2_000 {
        q = q.put(i * 2).put(i * 2 + 1);
        let (max, rest) = q.pop_max().unwrap();
        assert_eq!(*max, i * 2 + 1);
        q = rest;
    }
    assert_eq!(q.len(), 2_000);
    assert_eq!(q.check_invariants(), Ok(()));
}

/// Test many versions branching off one shared base
fn test_branching_versions<Q: PersistentQueue<i32>>() {
    let base = (0..1_000).fold(Q::new(), |q, i| q.put(i));
    let branches: Vec<Q> = (0..100)
        .map(|b| {
            let mut q = base.put(10_000 + b);
            for _ in 0..(b % 10) {
                q = q.remove_max().unwrap();
            }
            q
        })
        .collect();

    for (b, q) in branches.iter().enumerate() {
        let removed = b % 10;
        assert_eq!(q.len(), 1_001 - removed);
        assert_eq!(q.check_invariants(), Ok(()));
        let expected_max = if removed == 0 {
            10_000 + b as i32
        } else {
            1_000 - removed as i32
        };
        assert_eq!(q.peek_max(), Some(&expected_max));
    }
    assert_eq!(base.len(), 1_000);
    assert_eq!(base.peek_max(), Some(&999));
}

/// Test melding many small queues together
fn test_meld_many<Q: PersistentQueue<i32>>() {
    let parts: Vec<Q> = (0..200)
        .map(|i| (0..(i % 13)).fold(Q::new(), |q, j| q.put(i * 100 + j)))
        .collect();
    let total: usize = parts.iter().map(|q| q.len()).sum();
    let melded = parts.iter().fold(Q::new(), |acc, q| acc.meld(q));

    assert_eq!(melded.len(), total);
    assert_eq!(melded.check_invariants(), Ok(()));
    let drained = melded.into_sorted_vec();
    assert!(drained.windows(2).all(|w| w[0] >= w[1]));
}

#[test]
fn test_binomial_massive_operations() {
    test_massive_operations::<BinomialQueue<i32>>();
}

#[test]
fn test_skew_massive_operations() {
    test_massive_operations::<SkewHeap<i32>>();
}

#[test]
fn test_binomial_degenerate_orders() {
    test_degenerate_orders::<BinomialQueue<i32>>();
}

#[test]
fn test_skew_degenerate_orders() {
    test_degenerate_orders::<SkewHeap<i32>>();
}

#[test]
fn test_binomial_alternating_ops() {
    test_alternating_ops::<BinomialQueue<i32>>();
}

#[test]
fn test_skew_alternating_ops() {
    test_alternating_ops::<SkewHeap<i32>>();
}

#[test]
fn test_binomial_branching_versions() {
    test_branching_versions::<BinomialQueue<i32>>();
}

#[test]
fn test_skew_branching_versions() {
    test_branching_versions::<SkewHeap<i32>>();
}

#[test]
fn test_binomial_meld_many() {
    test_meld_many::<BinomialQueue<i32>>();
}

#[test]
fn test_skew_meld_many() {
    test_meld_many::<SkewHeap<i32>>();
}
