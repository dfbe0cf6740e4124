//! Persistent singly-linked list with structural sharing.
//!
//! Resolution explores many candidate paths, each accumulating its own
//! selection history. A growable vector would force either destructive
//! sharing or a full copy per branch; this list gives O(1) `extend` with
//! guaranteed non-interference: nodes are never mutated after creation,
//! so any number of branches (on any number of threads) can hold
//! overlapping tails without coordination.
//!
//! Traversal order is front-to-back, i.e. most recently added first.
//! Consumers that need chronological order must account for that
//! themselves; this type never reverses.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use serde::de::{Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};

/// An immutable list sharing its tail with every list it was built from.
///
/// `extend` prepends: the receiver becomes the unchanged remainder of the
/// new list. The empty list is a plain unit value, so `empty()` is free
/// and every empty list is identical.
pub struct PersistentList<T> {
    head: Option<Arc<Node<T>>>,
}

struct Node<T> {
    value: T,
    rest: Option<Arc<Node<T>>>,
}

impl<T> PersistentList<T> {
    /// The canonical empty list.
    pub fn empty() -> Self {
        PersistentList { head: None }
    }

    /// A single-element list, equivalent to `empty().extend(first)`.
    pub fn of(first: T) -> Self {
        PersistentList::empty().extend(first)
    }

    /// A new list with `value` at the front and `self` as the unchanged
    /// remainder. O(1); the receiver is not modified.
    #[must_use = "extend returns a new list and leaves the receiver unchanged"]
    pub fn extend(&self, value: T) -> Self {
        PersistentList {
            head: Some(Arc::new(Node {
                value,
                rest: self.head.clone(),
            })),
        }
    }

    /// Visit each element front-to-back (most recently added first).
    pub fn for_each(&self, mut f: impl FnMut(&T)) {
        for value in self.iter() {
            f(value);
        }
    }

    /// Iterate front-to-back (most recently added first).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Number of elements. O(n); lists here are short.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// True when this is the empty list.
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

/// Front-to-back iterator over a [`PersistentList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let node = self.next?;
        self.next = node.rest.as_deref();
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a PersistentList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

// Cloning shares the whole spine; no element is cloned.
impl<T> Clone for PersistentList<T> {
    fn clone(&self) -> Self {
        PersistentList {
            head: self.head.clone(),
        }
    }
}

impl<T> Default for PersistentList<T> {
    fn default() -> Self {
        PersistentList::empty()
    }
}

// Structural equality: same length, equal values in the same order,
// regardless of how either list was built. Walked iteratively so that
// depth is never a stack concern.
impl<T: PartialEq> PartialEq for PersistentList<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.iter();
        let mut b = other.iter();
        loop {
            match (a.next(), b.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) if x == y => continue,
                _ => return false,
            }
        }
    }
}

impl<T: Eq> Eq for PersistentList<T> {}

impl<T: Hash> Hash for PersistentList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for value in self.iter() {
            value.hash(state);
        }
        self.len().hash(state);
    }
}

impl<T: fmt::Debug> fmt::Debug for PersistentList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{:?} : ", value)?;
        }
        write!(f, "Nil")
    }
}

// Serialized as a plain sequence in traversal order; deserialization
// rebuilds by extending in reverse so traversal order round-trips.
impl<T: Serialize> Serialize for PersistentList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for PersistentList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ListVisitor<T>(std::marker::PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for ListVisitor<T> {
            type Value = PersistentList<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element()? {
                    values.push(value);
                }
                let mut list = PersistentList::empty();
                for value in values.into_iter().rev() {
                    list = list.extend(value);
                }
                Ok(list)
            }
        }

        deserializer.deserialize_seq(ListVisitor(std::marker::PhantomData))
    }
}

// Dropping a long spine one Arc at a time would recurse through Node's
// drop glue; unlink iteratively instead. Shared tails stop the walk at
// the first node with another owner.
impl<T> Drop for PersistentList<T> {
    fn drop(&mut self) {
        let mut next = self.head.take();
        while let Some(node) = next {
            match Arc::try_unwrap(node) {
                Ok(mut node) => next = node.rest.take(),
                Err(_) => break,
            }
        }
    }
}
