//! Insertion-ordered CHAMP maps.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops;

use crate::config::SequenceConfig;
use crate::cursor::{Cursor, CursorSource, SequencedCursor};
use crate::event::{self, ChangeEvent};
use crate::iter::{Keys, Pairs};
use crate::node::Entry;
use crate::sequenced::SequencedIter;
use crate::sequenced::core::{Position, SequencedCore};
use crate::trie::{self, Trie};

/// Iterator over `(&K, &V)` pairs of a sequenced map, in order.
pub type SequencedMapIter<'a, K, V> = Pairs<SequencedIter<&'a Entry<K, V>>>;

/// Persistent hash map that remembers insertion order.
///
/// Lookups cost the same as in [`ChampMap`](crate::ChampMap). Iteration
/// yields entries in order; [`put_first`](Self::put_first) and
/// [`put_last`](Self::put_last) move a key to either end.
///
/// Two sequenced maps are equal when they hold the same entries, whatever
/// their order.
///
/// ```
/// use champ_collections::SequencedChampMap;
///
/// let map = SequencedChampMap::new()
///     .insert("b", 2)
///     .insert("a", 1)
///     .put_first("c", 3);
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, ["c", "b", "a"]);
/// ```
pub struct SequencedChampMap<K, V> {
    core: SequencedCore<K, V>,
}

impl<K, V> SequencedChampMap<K, V> {
    /// Creates an empty map with the default [`SequenceConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SequenceConfig::default())
    }

    /// Creates an empty map with the given tuning parameters.
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

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.core.len
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.core.len == 0
    }

    /// Returns the underlying trie.
    #[must_use]
    pub const fn trie(&self) -> &Trie<K, V> {
        &self.core.trie
    }

    /// Returns `true` if both maps share their root node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.core.trie.ptr_eq(&other.core.trie)
    }

    /// Iterates in insertion order.
    #[must_use]
    pub fn iter(&self) -> SequencedMapIter<'_, K, V> {
        Pairs::new(self.core.iter(false))
    }

    /// Iterates in reverse insertion order.
    #[must_use]
    pub fn iter_rev(&self) -> SequencedMapIter<'_, K, V> {
        Pairs::new(self.core.iter(true))
    }

    /// Iterates over the keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Keys<SequencedIter<&Entry<K, V>>> {
        Keys::new(self.core.iter(false))
    }

    /// Returns the first entry. O(n).
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.core.first_entry().map(|entry| (entry.key(), entry.value()))
    }

    /// Returns the last entry. O(n).
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.core.last_entry().map(|entry| (entry.key(), entry.value()))
    }

    /// Returns an O(1) mutable copy.
    #[must_use]
    pub fn to_mutable(&self) -> MutableSequencedChampMap<K, V> {
        MutableSequencedChampMap {
            core: self.core.clone(),
            mod_count: 0,
        }
    }
}

impl<K: Eq, V> SequencedChampMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.trie.find(key).map(Entry::value)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.trie.contains_key(key)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> SequencedChampMap<K, V> {
    /// Returns a map with `key` bound to `value`. An existing key keeps its
    /// position; a new key goes last.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        self.put(key, value, Position::Keep)
    }

    /// Returns a map with `key` bound to `value` and moved to the front.
    #[must_use]
    pub fn put_first(&self, key: K, value: V) -> Self {
        self.put(key, value, Position::First)
    }

    /// Returns a map with `key` bound to `value` and moved to the back.
    #[must_use]
    pub fn put_last(&self, key: K, value: V) -> Self {
        self.put(key, value, Position::Last)
    }

    fn put(&self, key: K, value: V, position: Position) -> Self {
        let mut next = self.clone();
        next.core.put(key, value, position, event::replace_value);
        next
    }

    /// Returns a map without `key`.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut next = self.clone();
        next.core.remove(key);
        next
    }

    /// Returns a map without its first entry.
    #[must_use]
    pub fn remove_first(&self) -> Self {
        let mut next = self.clone();
        next.core.remove_first();
        next
    }

    /// Returns a map without its last entry.
    #[must_use]
    pub fn remove_last(&self) -> Self {
        let mut next = self.clone();
        next.core.remove_last();
        next
    }

    /// Returns the union of both maps. Entries of `other` are inserted in
    /// `other`'s order: new keys are appended, existing keys keep their
    /// position and take `other`'s value.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut next = self.clone();
        for (key, value) in other {
            next.core.put(key.clone(), value.clone(), Position::Keep, event::replace_value);
        }
        next
    }
}

impl<K, V> Clone for SequencedChampMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            core: self.core.clone(),
        }
    }
}

impl<K, V> Default for SequencedChampMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SequencedChampMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq, V: PartialEq> PartialEq for SequencedChampMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.core.len == other.core.len && trie::same_entries(&self.core.trie, &other.core.trie, self.core.len)
    }
}

impl<K: Eq, V: Eq> Eq for SequencedChampMap<K, V> {}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for SequencedChampMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MutableSequencedChampMap::from_iter(iter).into_immutable()
    }
}

impl<K, Q, V> ops::Index<&Q> for SequencedChampMap<K, V>
where
    K: Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found"),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a SequencedChampMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = SequencedMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Insertion-ordered hash map updated in place.
///
/// ```
/// use champ_collections::MutableSequencedChampMap;
///
/// let mut map = MutableSequencedChampMap::new();
/// map.insert("a", 1);
/// map.insert("b", 2);
/// map.put_first("b", 20);
/// assert_eq!(map.first(), Some((&"b", &20)));
/// assert_eq!(map.remove_last(), Some(("a", 1)));
/// ```
pub struct MutableSequencedChampMap<K, V> {
    core: SequencedCore<K, V>,
    mod_count: u64,
}

impl<K, V> MutableSequencedChampMap<K, V> {
    /// Creates an empty map with the default [`SequenceConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SequenceConfig::default())
    }

    /// Creates an empty map with the given tuning parameters.
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

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.core.len
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.core.len == 0
    }

    /// Returns the underlying trie.
    #[must_use]
    pub const fn trie(&self) -> &Trie<K, V> {
        &self.core.trie
    }

    /// Iterates in insertion order.
    #[must_use]
    pub fn iter(&self) -> SequencedMapIter<'_, K, V> {
        Pairs::new(self.core.iter(false))
    }

    /// Iterates in reverse insertion order.
    #[must_use]
    pub fn iter_rev(&self) -> SequencedMapIter<'_, K, V> {
        Pairs::new(self.core.iter(true))
    }

    /// Iterates over the keys in insertion order.
    #[must_use]
    pub fn keys(&self) -> Keys<SequencedIter<&Entry<K, V>>> {
        Keys::new(self.core.iter(false))
    }

    /// Returns the first entry. O(n).
    #[must_use]
    pub fn first(&self) -> Option<(&K, &V)> {
        self.core.first_entry().map(|entry| (entry.key(), entry.value()))
    }

    /// Returns the last entry. O(n).
    #[must_use]
    pub fn last(&self) -> Option<(&K, &V)> {
        self.core.last_entry().map(|entry| (entry.key(), entry.value()))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        if self.core.len > 0 {
            self.core.clear();
            self.mod_count += 1;
        }
    }

    /// Returns an O(1) persistent snapshot.
    #[must_use]
    pub fn to_immutable(&self) -> SequencedChampMap<K, V> {
        SequencedChampMap {
            core: self.core.clone(),
        }
    }

    /// Converts into a persistent map without copying.
    #[must_use]
    pub fn into_immutable(self) -> SequencedChampMap<K, V> {
        SequencedChampMap { core: self.core }
    }
}

impl<K: Eq, V> MutableSequencedChampMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.trie.find(key).map(Entry::value)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.trie.contains_key(key)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> MutableSequencedChampMap<K, V> {
    /// Inserts a key-value pair. An existing key keeps its position and
    /// gets the new value; a new key goes last.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value, Position::Keep)
    }

    /// Inserts or moves `key` to the front. Returns the previous value.
    pub fn put_first(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value, Position::First)
    }

    /// Inserts or moves `key` to the back. Returns the previous value.
    pub fn put_last(&mut self, key: K, value: V) -> Option<V> {
        self.put(key, value, Position::Last)
    }

    fn put(&mut self, key: K, value: V, position: Position) -> Option<V> {
        let placed = self.core.put(key, value, position, event::replace_value);
        if placed.reordered {
            self.mod_count += 1;
        }
        placed.event.into_old_entry().map(Entry::into_value)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let old = self.core.remove(key).into_old_entry()?;
        self.mod_count += 1;
        Some(old.into_value())
    }

    /// Removes and returns the first entry.
    pub fn remove_first(&mut self) -> Option<(K, V)> {
        let old = self.core.remove_first()?;
        self.mod_count += 1;
        Some(old.into_parts())
    }

    /// Removes and returns the last entry.
    pub fn remove_last(&mut self) -> Option<(K, V)> {
        let old = self.core.remove_last()?;
        self.mod_count += 1;
        Some(old.into_parts())
    }

    /// Inserts every entry of `other`, in `other`'s order, as
    /// [`insert`](Self::insert) would.
    pub fn union(&mut self, other: &SequencedChampMap<K, V>) {
        for (key, value) in other {
            self.insert(key.clone(), value.clone());
        }
    }

    /// Returns a fail-fast cursor over a snapshot, in insertion order.
    #[must_use]
    pub fn cursor(&self) -> SequencedCursor<K, V> {
        Cursor::new(self.core.owned_iter(false), self.mod_count)
    }

    /// Returns a fail-fast cursor over a snapshot, in reverse order.
    #[must_use]
    pub fn cursor_rev(&self) -> SequencedCursor<K, V> {
        Cursor::new(self.core.owned_iter(true), self.mod_count)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> CursorSource for MutableSequencedChampMap<K, V> {
    type Key = K;

    fn modification_count(&self) -> u64 {
        self.mod_count
    }

    fn remove_for_cursor(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }
}

impl<K, V> Default for MutableSequencedChampMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MutableSequencedChampMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq, V: PartialEq> PartialEq for MutableSequencedChampMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.core.len == other.core.len && trie::same_entries(&self.core.trie, &other.core.trie, self.core.len)
    }
}

impl<K: Eq, V: Eq> Eq for MutableSequencedChampMap<K, V> {}

impl<K: Hash + Eq + Clone, V: Clone> Extend<(K, V)> for MutableSequencedChampMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for MutableSequencedChampMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, Q, V> ops::Index<&Q> for MutableSequencedChampMap<K, V>
where
    K: Eq + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key not found"),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a MutableSequencedChampMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = SequencedMapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
