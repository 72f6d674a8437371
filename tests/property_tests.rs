//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations and verify that the
//! queue invariants hold after every step, that every variant agrees with a
//! sorted-vector model, and that old versions never change.

use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use persistent_heaps::binomial::BinomialQueue;
use persistent_heaps::skew::SkewHeap;
use persistent_heaps::{PersistentQueue, PriorityQueue, QueueKind};

/// A single step of a generated workload
#[derive(Debug, Clone)]
enum Op {
    Put(i32),
    RemoveMax,
    /// Meld with a queue built from these priorities
    Meld(Vec<i32>),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-50i32..50).prop_map(Op::Put),
        2 => Just(Op::RemoveMax),
        1 => prop::collection::vec(-50i32..50, 0..8).prop_map(Op::Meld),
    ]
}

/// Test that popped priorities come out in non-increasing order
fn test_pop_order_invariant<Q: PersistentQueue<i32>>(values: Vec<i32>) -> Result<(), TestCaseError> {
    let q = values.iter().fold(Q::new(), |q, &v| q.put(v));
    let drained = q.into_sorted_vec();

    prop_assert_eq!(drained.len(), values.len());
    for pair in drained.windows(2) {
        prop_assert!(pair[0] >= pair[1], "{} popped before {}", pair[0], pair[1]);
    }
    if let Some(last) = drained.last() {
        prop_assert_eq!(Some(last), values.iter().min());
    }
    Ok(())
}

/// Test a random workload against a model, checking invariants every step
fn test_model_equivalence<Q: PersistentQueue<i32>>(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut q = Q::new();
    let mut model: Vec<i32> = Vec::new();

    for op in ops {
        match op {
            Op::Put(v) => {
                q = q.put(v);
                model.push(v);
            }
            Op::RemoveMax => {
                let result = q.remove_max();
                if model.is_empty() {
                    prop_assert!(result.is_err());
                } else {
                    let pos = model
                        .iter()
                        .enumerate()
                        .max_by_key(|&(_, &x)| x)
                        .map(|(pos, _)| pos)
                        .unwrap();
                    model.swap_remove(pos);
                    q = result.unwrap();
                }
            }
            Op::Meld(values) => {
                let other = values.iter().fold(Q::new(), |q, &v| q.put(v));
                q = q.meld(&other);
                model.extend(values);
            }
        }

        prop_assert_eq!(q.len(), model.len());
        prop_assert_eq!(q.is_empty(), model.is_empty());
        prop_assert_eq!(q.peek_max(), model.iter().max());
        prop_assert_eq!(q.check_invariants(), Ok(()));
    }

    let mut expected = model;
    expected.sort_unstable_by(|a, b| b.cmp(a));
    prop_assert_eq!(q.into_sorted_vec(), expected);
    Ok(())
}

/// Test that every version produced along a workload is left unchanged
fn test_versions_unchanged<Q: PersistentQueue<i32>>(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut versions: Vec<(Q, Vec<i32>)> = vec![(Q::new(), Vec::new())];

    for op in ops {
        let (q, contents) = versions.last().cloned().unwrap();
        let next = match op {
            Op::Put(v) => {
                let mut c = contents.clone();
                c.push(v);
                Some((q.put(v), c))
            }
            Op::RemoveMax => q.pop_max().ok().map(|(max, rest)| {
                let mut c = contents.clone();
                let pos = c.iter().position(|x| x == max).unwrap();
                c.remove(pos);
                (rest, c)
            }),
            Op::Meld(values) => {
                let other = values.iter().fold(Q::new(), |q, &v| q.put(v));
                let mut c = contents.clone();
                c.extend(values);
                Some((q.meld(&other), c))
            }
        };
        if let Some(version) = next {
            versions.push(version);
        }
    }

    for (q, contents) in versions {
        let mut expected = contents;
        expected.sort_unstable_by(|a, b| b.cmp(a));
        prop_assert_eq!(q.check_invariants(), Ok(()));
        prop_assert_eq!(q.into_sorted_vec(), expected);
    }
    Ok(())
}

/// Test that the binomial forest mirrors the binary representation of len
fn test_forest_matches_len(ops: Vec<Op>) -> Result<(), TestCaseError> {
    let mut q: BinomialQueue<i32> = BinomialQueue::new();
    for op in ops {
        q = match op {
            Op::Put(v) => q.put(v),
            Op::RemoveMax => q.remove_max().unwrap_or(q),
            Op::Meld(values) => q.meld(&values.into_iter().collect()),
        };
        let bits: usize = q.ranks().iter().map(|&r| 1usize << r).sum();
        prop_assert_eq!(bits, q.len());
        prop_assert_eq!(q.ranks().len(), q.len().count_ones() as usize);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn binomial_pop_order(values in prop::collection::vec(any::<i32>(), 0..100)) {
        test_pop_order_invariant::<BinomialQueue<i32>>(values)?;
    }

    #[test]
    fn skew_pop_order(values in prop::collection::vec(any::<i32>(), 0..100)) {
        test_pop_order_invariant::<SkewHeap<i32>>(values)?;
    }

    #[test]
    fn binomial_model_equivalence(ops in prop::collection::vec(op_strategy(), 0..120)) {
        test_model_equivalence::<BinomialQueue<i32>>(ops)?;
    }

    #[test]
    fn skew_model_equivalence(ops in prop::collection::vec(op_strategy(), 0..120)) {
        test_model_equivalence::<SkewHeap<i32>>(ops)?;
    }

    #[test]
    fn priority_queue_model_equivalence(ops in prop::collection::vec(op_strategy(), 0..120)) {
        test_model_equivalence::<PriorityQueue<i32>>(ops)?;
    }

    #[test]
    fn binomial_versions_unchanged(ops in prop::collection::vec(op_strategy(), 0..60)) {
        test_versions_unchanged::<BinomialQueue<i32>>(ops)?;
    }

    #[test]
    fn skew_versions_unchanged(ops in prop::collection::vec(op_strategy(), 0..60)) {
        test_versions_unchanged::<SkewHeap<i32>>(ops)?;
    }

    #[test]
    fn binomial_forest_matches_len(ops in prop::collection::vec(op_strategy(), 0..120)) {
        test_forest_matches_len(ops)?;
    }

    #[test]
    fn variants_agree(values in prop::collection::vec(-20i32..20, 0..80), removals in 0usize..80) {
        let mut binomial = PriorityQueue::with_kind(QueueKind::Binomial);
        let mut skew = PriorityQueue::with_kind(QueueKind::Skew);
        for &v in &values {
            binomial = binomial.put(v);
            skew = skew.put(v);
        }
        for _ in 0..removals.min(values.len()) {
            prop_assert_eq!(binomial.peek_max(), skew.peek_max());
            binomial = binomial.remove_max().unwrap();
            skew = skew.remove_max().unwrap();
        }
        prop_assert_eq!(binomial.len(), skew.len());
        prop_assert_eq!(binomial.into_sorted_vec(), skew.into_sorted_vec());
    }
}
