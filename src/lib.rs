//! Persistent Priority Queues for Rust
//!
//! This crate provides immutable max-priority queues in which every update
//! returns a new version and leaves the old one intact. Versions share all
//! structure an update did not touch, so an update allocates O(log n) nodes.
//!
//! # Features
//!
//! - **Binomial Queue**: forest of binomial trees; O(log n) put, remove_max and meld
//! - **Skew Heap**: self-adjusting binary tree; O(log n) amortized put, remove_max and meld
//! - **PriorityQueue**: enum over both variants, chosen at runtime by [`QueueKind`]
//!
//! Nodes are `Arc`-shared and never mutated, so any version can be read from
//! several threads at once without locking.
//!
//! # Example
//!
//! ```rust
//! use persistent_heaps::binomial::BinomialQueue;
//! use persistent_heaps::{PersistentQueue, QueueError};
//!
//! let q1 = BinomialQueue::new().put(5).put(3).put(8).put(1);
//! let q2 = q1.remove_max().unwrap();
//!
//! assert_eq!(q1.peek_max(), Some(&8));
//! assert_eq!(q2.peek_max(), Some(&5));
//! assert_eq!(q2.into_sorted_vec(), vec![5, 3, 1]);
//!
//! let empty: BinomialQueue<i32> = BinomialQueue::new();
//! assert_eq!(empty.remove_max().unwrap_err(), QueueError::EmptyQueue);
//! ```

pub mod binomial;
pub mod drawing;
pub mod list;
pub mod queue;
pub mod rank;
pub mod skew;
pub mod traits;
pub mod tree;

// Re-export the main types for convenience
pub use binomial::BinomialQueue;
pub use queue::{PriorityQueue, QueueKind};
pub use skew::SkewHeap;
pub use traits::{InvariantViolation, PersistentQueue, QueueError};
