//! Unordered CHAMP sets: a map to `()` underneath.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::cursor::{Cursor, CursorSource, UnorderedCursor};
use crate::event::{self, ChangeEvent};
use crate::iter::{IntoIter, Iter, Keys};
use crate::node::Entry;
use crate::trie::{self, Trie};

/// Borrowing iterator over the elements of an unordered set.
pub type SetIter<'a, T> = Keys<Iter<'a, T, ()>>;

/// Owning iterator over the elements of an unordered set.
pub type SetIntoIter<T> = std::iter::Map<IntoIter<T, ()>, fn(Entry<T, ()>) -> T>;

/// Persistent hash set.
///
/// ```
/// use champ_collections::ChampSet;
///
/// let a: ChampSet<u32> = (0..3).collect();
/// let b = a.insert(7).remove(&0);
/// assert!(a.contains(&0));
/// assert!(b.contains(&7) && !b.contains(&0));
/// ```
pub struct ChampSet<T> {
    trie: Trie<T, ()>,
    len: usize,
}

impl<T> ChampSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            len: 0,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the underlying trie.
    #[must_use]
    pub const fn trie(&self) -> &Trie<T, ()> {
        &self.trie
    }

    /// Returns `true` if both sets share their root node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.trie.ptr_eq(&other.trie)
    }

    /// Returns an iterator over the elements, in no specified order.
    #[must_use]
    pub fn iter(&self) -> SetIter<'_, T> {
        Keys::new(self.trie.iter_sized(self.len))
    }

    /// Returns an O(1) mutable copy.
    #[must_use]
    pub fn to_mutable(&self) -> MutableChampSet<T> {
        MutableChampSet {
            trie: self.trie.clone(),
            len: self.len,
            mod_count: 0,
        }
    }
}

impl<T: Eq> ChampSet<T> {
    /// Returns `true` if the set contains `value`.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.contains_key(value)
    }

    /// Returns the stored element equal to `value`.
    #[must_use]
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.find(value).map(Entry::key)
    }
}

impl<T: Hash + Eq + Clone> ChampSet<T> {
    /// Returns a set that also contains `value`. Adding a present element
    /// returns a set sharing `self`'s root.
    #[must_use]
    pub fn insert(&self, value: T) -> Self {
        let mut next = self.clone();
        if next.trie.update(Entry::new(value, ()), event::keep_existing).changes_size() {
            next.len += 1;
        }
        next
    }

    /// Returns a set without `value`.
    #[must_use]
    pub fn remove<Q>(&self, value: &Q) -> Self
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut next = self.clone();
        if next.trie.remove(value).changes_size() {
            next.len -= 1;
        }
        next
    }

    /// Returns the union of both sets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut next = self.clone();
        let duplicates = next.trie.merge_all(&other.trie);
        next.len = self.len + other.len - duplicates;
        next
    }
}

impl<T> Clone for ChampSet<T> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
            len: self.len,
        }
    }
}

impl<T> Default for ChampSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ChampSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Eq> PartialEq for ChampSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && trie::same_entries(&self.trie, &other.trie, self.len)
    }
}

impl<T: Eq> Eq for ChampSet<T> {}

impl<T: Hash + Eq + Clone> FromIterator<T> for ChampSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        MutableChampSet::from_iter(iter).into_immutable()
    }
}

impl<'a, T> IntoIterator for &'a ChampSet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone> IntoIterator for ChampSet<T> {
    type Item = T;
    type IntoIter = SetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.trie
            .owned_iter(self.len)
            .map(Entry::into_key as fn(Entry<T, ()>) -> T)
    }
}

/// Hash set updated in place, with O(1) snapshots.
pub struct MutableChampSet<T> {
    trie: Trie<T, ()>,
    len: usize,
    mod_count: u64,
}

impl<T> MutableChampSet<T> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            len: 0,
            mod_count: 0,
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the underlying trie.
    #[must_use]
    pub const fn trie(&self) -> &Trie<T, ()> {
        &self.trie
    }

    /// Returns an iterator over the elements, in no specified order.
    #[must_use]
    pub fn iter(&self) -> SetIter<'_, T> {
        Keys::new(self.trie.iter_sized(self.len))
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        if self.len > 0 {
            self.trie = Trie::new();
            self.len = 0;
            self.mod_count += 1;
        }
    }

    /// Returns an O(1) persistent snapshot.
    #[must_use]
    pub fn to_immutable(&self) -> ChampSet<T> {
        ChampSet {
            trie: self.trie.clone(),
            len: self.len,
        }
    }

    /// Converts into a persistent set without copying.
    #[must_use]
    pub fn into_immutable(self) -> ChampSet<T> {
        ChampSet {
            trie: self.trie,
            len: self.len,
        }
    }
}

impl<T: Eq> MutableChampSet<T> {
    /// Returns `true` if the set contains `value`.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.contains_key(value)
    }
}

impl<T: Hash + Eq + Clone> MutableChampSet<T> {
    /// Adds `value`; returns `true` if it was not present.
    pub fn insert(&mut self, value: T) -> bool {
        let added = matches!(
            self.trie.update(Entry::new(value, ()), event::keep_existing),
            ChangeEvent::Inserted
        );
        if added {
            self.len += 1;
            self.mod_count += 1;
        }
        added
    }

    /// Removes `value`; returns `true` if it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.trie.remove(value).changes_size();
        if removed {
            self.len -= 1;
            self.mod_count += 1;
        }
        removed
    }

    /// Adds every element of `other`.
    pub fn union(&mut self, other: &ChampSet<T>) {
        let duplicates = self.trie.merge_all(&other.trie);
        let len = self.len + other.len - duplicates;
        if len != self.len {
            self.len = len;
            self.mod_count += 1;
        }
    }

    /// Returns a fail-fast cursor over a snapshot of the current elements.
    #[must_use]
    pub fn cursor(&self) -> UnorderedCursor<T, ()> {
        Cursor::new(self.trie.owned_iter(self.len), self.mod_count)
    }
}

impl<T: Hash + Eq + Clone> CursorSource for MutableChampSet<T> {
    type Key = T;

    fn modification_count(&self) -> u64 {
        self.mod_count
    }

    fn remove_for_cursor(&mut self, key: &T) -> bool {
        self.remove(key)
    }
}

impl<T> Default for MutableChampSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableChampSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Eq> PartialEq for MutableChampSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && trie::same_entries(&self.trie, &other.trie, self.len)
    }
}

impl<T: Eq> Eq for MutableChampSet<T> {}

impl<T: Hash + Eq + Clone> Extend<T> for MutableChampSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for MutableChampSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a MutableChampSet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
