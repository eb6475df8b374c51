//! Insertion-ordered CHAMP sets.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::config::SequenceConfig;
use crate::cursor::{Cursor, CursorSource, SequencedCursor};
use crate::event;
use crate::iter::Keys;
use crate::node::Entry;
use crate::sequenced::SequencedIter;
use crate::sequenced::core::{Position, SequencedCore};
use crate::trie::{self, Trie};

/// Iterator over the elements of a sequenced set, in order.
pub type SequencedSetIter<'a, T> = Keys<SequencedIter<&'a Entry<T, ()>>>;

/// Persistent hash set that remembers insertion order.
///
/// ```
/// use champ_collections::SequencedChampSet;
///
/// let set: SequencedChampSet<&str> = ["a", "b", "c"].into_iter().collect();
/// let set = set.remove_first().add_first("d");
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["d", "b", "c"]);
/// ```
pub struct SequencedChampSet<T> {
    core: SequencedCore<T, ()>,
}

impl<T> SequencedChampSet<T> {
    /// Creates an empty set with the default [`SequenceConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SequenceConfig::default())
    }

    /// Creates an empty set with the given tuning parameters.
    #[must_use]
    pub fn with_config(config: SequenceConfig) -> Self {
        Self {
            core: SequencedCore::new(config),
        }
    }

    /// Returns the tuning parameters.
    #[must_use]
    pub const fn config(&self) -> &SequenceConfig {
        &self.core.config
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.core.len
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.core.len == 0
    }

    /// Returns the underlying trie.
    #[must_use]
    pub const fn trie(&self) -> &Trie<T, ()> {
        &self.core.trie
    }

    /// Returns `true` if both sets share their root node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.core.trie.ptr_eq(&other.core.trie)
    }

    /// Iterates in insertion order.
    #[must_use]
    pub fn iter(&self) -> SequencedSetIter<'_, T> {
        Keys::new(self.core.iter(false))
    }

    /// Iterates in reverse insertion order.
    #[must_use]
    pub fn iter_rev(&self) -> SequencedSetIter<'_, T> {
        Keys::new(self.core.iter(true))
    }

    /// Returns the first element. O(n).
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.core.first_entry().map(Entry::key)
    }

    /// Returns the last element. O(n).
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.core.last_entry().map(Entry::key)
    }

    /// Returns an O(1) mutable copy.
    #[must_use]
    pub fn to_mutable(&self) -> MutableSequencedChampSet<T> {
        MutableSequencedChampSet {
            core: self.core.clone(),
            mod_count: 0,
        }
    }
}

impl<T: Eq> SequencedChampSet<T> {
    /// Returns `true` if the set contains `value`.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.trie.contains_key(value)
    }
}

impl<T: Hash + Eq + Clone> SequencedChampSet<T> {
    /// Returns a set that also contains `value`. A present element keeps
    /// its position and the result shares `self`'s root.
    #[must_use]
    pub fn insert(&self, value: T) -> Self {
        self.add(value, Position::Keep)
    }

    /// Returns a set with `value` added or moved to the front.
    #[must_use]
    pub fn add_first(&self, value: T) -> Self {
        self.add(value, Position::First)
    }

    /// Returns a set with `value` added or moved to the back.
    #[must_use]
    pub fn add_last(&self, value: T) -> Self {
        self.add(value, Position::Last)
    }

    fn add(&self, value: T, position: Position) -> Self {
        let mut next = self.clone();
        next.core.put(value, (), position, event::keep_existing);
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
        next.core.remove(value);
        next
    }

    /// Returns a set without its first element.
    #[must_use]
    pub fn remove_first(&self) -> Self {
        let mut next = self.clone();
        next.core.remove_first();
        next
    }

    /// Returns a set without its last element.
    #[must_use]
    pub fn remove_last(&self) -> Self {
        let mut next = self.clone();
        next.core.remove_last();
        next
    }

    /// Returns the union of both sets: `other`'s new elements are appended
    /// in `other`'s order.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut next = self.clone();
        for value in other {
            next.core.put(value.clone(), (), Position::Keep, event::keep_existing);
        }
        next
    }
}

impl<T> Clone for SequencedChampSet<T> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<T> Default for SequencedChampSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for SequencedChampSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Eq> PartialEq for SequencedChampSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.core.len == other.core.len && trie::same_entries(&self.core.trie, &other.core.trie, self.core.len)
    }
}

impl<T: Eq> Eq for SequencedChampSet<T> {}

impl<T: Hash + Eq + Clone> FromIterator<T> for SequencedChampSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        MutableSequencedChampSet::from_iter(iter).into_immutable()
    }
}

impl<'a, T> IntoIterator for &'a SequencedChampSet<T> {
    type Item = &'a T;
    type IntoIter = SequencedSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Insertion-ordered hash set updated in place.
///
/// ```
/// use champ_collections::MutableSequencedChampSet;
///
/// let mut set = MutableSequencedChampSet::new();
/// set.add_last("a");
/// set.add_last("b");
/// set.add_last("c");
/// assert_eq!(set.remove_first(), Some("a"));
/// set.add_first("d");
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), ["d", "b", "c"]);
/// ```
pub struct MutableSequencedChampSet<T> {
    core: SequencedCore<T, ()>,
    mod_count: u64,
}

impl<T> MutableSequencedChampSet<T> {
    /// Creates an empty set with the default [`SequenceConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SequenceConfig::default())
    }

    /// Creates an empty set with the given tuning parameters.
    #[must_use]
    pub fn with_config(config: SequenceConfig) -> Self {
        Self {
            core: SequencedCore::new(config),
            mod_count: 0,
        }
    }

    /// Returns the tuning parameters.
    #[must_use]
    pub const fn config(&self) -> &SequenceConfig {
        &self.core.config
    }

    /// Returns the number of elements.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.core.len
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.core.len == 0
    }

    /// Returns the underlying trie.
    #[must_use]
    pub const fn trie(&self) -> &Trie<T, ()> {
        &self.core.trie
    }

    /// Iterates in insertion order.
    #[must_use]
    pub fn iter(&self) -> SequencedSetIter<'_, T> {
        Keys::new(self.core.iter(false))
    }

    /// Iterates in reverse insertion order.
    #[must_use]
    pub fn iter_rev(&self) -> SequencedSetIter<'_, T> {
        Keys::new(self.core.iter(true))
    }

    /// Returns the first element. O(n).
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.core.first_entry().map(Entry::key)
    }

    /// Returns the last element. O(n).
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.core.last_entry().map(Entry::key)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        if self.core.len > 0 {
            self.core.clear();
            self.mod_count += 1;
        }
    }

    /// Returns an O(1) persistent snapshot.
    #[must_use]
    pub fn to_immutable(&self) -> SequencedChampSet<T> {
        SequencedChampSet {
            core: self.core.clone(),
        }
    }

    /// Converts into a persistent set without copying.
    #[must_use]
    pub fn into_immutable(self) -> SequencedChampSet<T> {
        SequencedChampSet { core: self.core }
    }
}

impl<T: Eq> MutableSequencedChampSet<T> {
    /// Returns `true` if the set contains `value`.
    #[must_use]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.trie.contains_key(value)
    }
}

impl<T: Hash + Eq + Clone> MutableSequencedChampSet<T> {
    /// Appends `value` unless present; a present element keeps its
    /// position. Returns `true` if it was added.
    pub fn insert(&mut self, value: T) -> bool {
        self.add(value, Position::Keep)
    }

    /// Adds `value` at the front, or moves it there. Returns `true` if the
    /// set or its order changed.
    pub fn add_first(&mut self, value: T) -> bool {
        self.add(value, Position::First)
    }

    /// Adds `value` at the back, or moves it there. Returns `true` if the
    /// set or its order changed.
    pub fn add_last(&mut self, value: T) -> bool {
        self.add(value, Position::Last)
    }

    fn add(&mut self, value: T, position: Position) -> bool {
        let placed = self.core.put(value, (), position, event::keep_existing);
        if placed.reordered {
            self.mod_count += 1;
        }
        placed.reordered
    }

    /// Removes `value`; returns `true` if it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.core.remove(value).changes_size();
        if removed {
            self.mod_count += 1;
        }
        removed
    }

    /// Removes and returns the first element.
    pub fn remove_first(&mut self) -> Option<T> {
        let old = self.core.remove_first()?;
        self.mod_count += 1;
        Some(old.into_key())
    }

    /// Removes and returns the last element.
    pub fn remove_last(&mut self) -> Option<T> {
        let old = self.core.remove_last()?;
        self.mod_count += 1;
        Some(old.into_key())
    }

    /// Appends the elements of `other` not yet present, in `other`'s order.
    pub fn union(&mut self, other: &SequencedChampSet<T>) {
        for value in other {
            self.insert(value.clone());
        }
    }

    /// Returns a fail-fast cursor over a snapshot, in insertion order.
    #[must_use]
    pub fn cursor(&self) -> SequencedCursor<T, ()> {
        Cursor::new(self.core.owned_iter(false), self.mod_count)
    }

    /// Returns a fail-fast cursor over a snapshot, in reverse order.
    #[must_use]
    pub fn cursor_rev(&self) -> SequencedCursor<T, ()> {
        Cursor::new(self.core.owned_iter(true), self.mod_count)
    }
}

impl<T: Hash + Eq + Clone> CursorSource for MutableSequencedChampSet<T> {
    type Key = T;

    fn modification_count(&self) -> u64 {
        self.mod_count
    }

    fn remove_for_cursor(&mut self, key: &T) -> bool {
        self.remove(key)
    }
}

impl<T> Default for MutableSequencedChampSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for MutableSequencedChampSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Eq> PartialEq for MutableSequencedChampSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.core.len == other.core.len && trie::same_entries(&self.core.trie, &other.core.trie, self.core.len)
    }
}

impl<T: Eq> Eq for MutableSequencedChampSet<T> {}

impl<T: Hash + Eq + Clone> Extend<T> for MutableSequencedChampSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq + Clone> FromIterator<T> for MutableSequencedChampSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<'a, T> IntoIterator for &'a MutableSequencedChampSet<T> {
    type Item = &'a T;
    type IntoIter = SequencedSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
