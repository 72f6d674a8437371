//! Immutable singly linked list with structural sharing
//!
//! `ConsList` is the sequence primitive the binomial queue keeps its forest
//! (and each tree's children) in. Cells are reference counted with `Arc` and
//! never modified after construction, so prepending to a list shares the whole
//! tail with every other list that already points at it:
//!
//! - `cons`, `head`, `tail`, `split_first`: O(1)
//! - `clone`: O(1), a reference count bump
//!
//! Cells are `Arc` rather than `Rc` so that any version of a structure built
//! from them can be read from several threads at once.

use std::fmt;
use std::sync::Arc;

struct Cell<T> {
    value: T,
    next: ConsList<T>,
}

/// An immutable, persistent singly linked list
///
/// # Example
///
/// ```rust
/// use persistent_heaps::list::ConsList;
///
/// let tail = ConsList::new().cons(3).cons(2);
/// let list = tail.cons(1);
///
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
/// // `tail` is unchanged and shared by `list`.
/// assert_eq!(tail.len(), 2);
/// assert!(ConsList::ptr_eq(list.tail().unwrap(), &tail));
/// ```
pub struct ConsList<T> {
    link: Option<Arc<Cell<T>>>,
    len: usize,
}

impl<T> ConsList<T> {
    /// Creates an empty list
    pub const fn new() -> Self {
        ConsList { link: None, len: 0 }
    }

    /// Returns a new list with `value` in front of `self`
    pub fn cons(&self, value: T) -> Self {
        ConsList {
            len: self.len + 1,
            link: Some(Arc::new(Cell {
                value,
                next: self.clone(),
            })),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.link.is_none()
    }

    /// Number of elements, O(1)
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn head(&self) -> Option<&T> {
        self.link.as_ref().map(|cell| &cell.value)
    }

    pub fn tail(&self) -> Option<&ConsList<T>> {
        self.link.as_ref().map(|cell| &cell.next)
    }

    /// Returns the head and the tail together, or `None` for the empty list
    pub fn split_first(&self) -> Option<(&T, &ConsList<T>)> {
        self.link.as_ref().map(|cell| (&cell.value, &cell.next))
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter { next: self }
    }

    /// Returns true if both lists start at the same cell (or are both empty)
    ///
    /// Two lists for which this holds are the same list; lists that merely
    /// hold equal values are not.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        match (&a.link, &b.link) {
            (Some(x), Some(y)) => Arc::ptr_eq(x, y),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T> Clone for ConsList<T> {
    fn clone(&self) -> Self {
        ConsList {
            link: self.link.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for ConsList<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Unlink iteratively so that dropping a long, unshared list cannot overflow
// the stack. Stops at the first cell some other list still references.
impl<T> Drop for ConsList<T> {
    fn drop(&mut self) {
        let mut link = self.link.take();
        while let Some(cell) = link {
            match Arc::into_inner(cell) {
                Some(mut cell) => link = cell.next.link.take(),
                None => break,
            }
        }
    }
}

impl<T: PartialEq> PartialEq for ConsList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ConsList<T> {}

impl<T: fmt::Debug> fmt::Debug for ConsList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> FromIterator<T> for ConsList<T> {
    /// Builds a list holding the items in iteration order
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let items: Vec<T> = iter.into_iter().collect();
        items
            .into_iter()
            .rev()
            .fold(ConsList::new(), |list, value| list.cons(value))
    }
}

/// Borrowing iterator over a [`ConsList`]
pub struct Iter<'a, T> {
    next: &'a ConsList<T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let (value, rest) = self.next.split_first()?;
        self.next = rest;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.next.len, Some(self.next.len))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a ConsList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list() {
        let list: ConsList<i32> = ConsList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.head(), None);
        assert!(list.tail().is_none());
        assert!(list.split_first().is_none());
    }

    #[test]
    fn test_cons_shares_tail() {
        let base = ConsList::new().cons(2).cons(1);
        let a = base.cons(10);
        let b = base.cons(20);

        assert_eq!(a.head(), Some(&10));
        assert_eq!(b.head(), Some(&20));
        assert!(ConsList::ptr_eq(a.tail().unwrap(), &base));
        assert!(ConsList::ptr_eq(b.tail().unwrap(), &base));
        assert_eq!(base.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_structural_vs_identity_equality() {
        let a: ConsList<i32> = [1, 2, 3].into_iter().collect();
        let b: ConsList<i32> = [1, 2, 3].into_iter().collect();
        assert_eq!(a, b);
        assert!(!ConsList::ptr_eq(&a, &b));
        assert!(ConsList::ptr_eq(&a, &a.clone()));
    }

    #[test]
    fn test_drop_long_list() {
        let mut list = ConsList::new();
        for i in 0..200_000 {
            list = list.cons(i);
        }
        assert_eq!(list.len(), 200_000);
        drop(list);
    }

    #[test]
    fn test_drop_keeps_shared_suffix() {
        let shared: ConsList<i32> = (0..100).collect();
        let longer = shared.cons(-1);
        drop(longer);
        assert_eq!(shared.len(), 100);
        assert_eq!(shared.iter().sum::<i32>(), (0..100).sum());
    }

    #[test]
    fn test_concurrent_drop_of_last_handles() {
        use std::sync::Barrier;
        use std::thread;

        for _ in 0..16 {
            let list: ConsList<i32> = (0..100_000).collect();
            let other = list.clone();
            let barrier = Barrier::new(2);
            thread::scope(|scope| {
                for handle in [list, other] {
                    let barrier = &barrier;
                    scope.spawn(move || {
                        barrier.wait();
                        drop(handle);
                    });
                }
            });
        }
    }
}
