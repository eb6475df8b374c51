//! Unordered CHAMP maps: persistent [`ChampMap`] and in-place
//! [`MutableChampMap`].

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::ops;

use crate::cursor::{Cursor, CursorSource, UnorderedCursor};
use crate::event::{self, ChangeEvent};
use crate::iter::{IntoIter, Iter, Keys, Pairs};
use crate::node::Entry;
use crate::trie::{self, Trie};

/// Borrowing iterator over `(&K, &V)` pairs of an unordered map.
pub type MapIter<'a, K, V> = Pairs<Iter<'a, K, V>>;

/// Owning iterator over `(K, V)` pairs of an unordered map.
pub type MapIntoIter<K, V> = std::iter::Map<IntoIter<K, V>, fn(Entry<K, V>) -> (K, V)>;

/// Persistent hash map.
///
/// Every write returns a new map and leaves `self` untouched; both share
/// all nodes off the path to the change. Same key set, same tree shape,
/// whatever the insertion order.
///
/// ```
/// use champ_collections::ChampMap;
///
/// let a = ChampMap::new().insert("x", 1);
/// let b = a.insert("y", 2);
/// assert_eq!(a.len(), 1);
/// assert_eq!(b.get("y"), Some(&2));
/// ```
pub struct ChampMap<K, V> {
    trie: Trie<K, V>,
    len: usize,
}

// ---------------------------------------------------------------------------
// Construction & accessors: no trait bounds
// ---------------------------------------------------------------------------

impl<K, V> ChampMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            len: 0,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the underlying trie.
    #[must_use]
    pub const fn trie(&self) -> &Trie<K, V> {
        &self.trie
    }

    /// Returns `true` if both maps share their root node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.trie.ptr_eq(&other.trie)
    }

    /// Returns an iterator over `(&K, &V)` pairs, in no specified order.
    #[must_use]
    pub fn iter(&self) -> MapIter<'_, K, V> {
        Pairs::new(self.trie.iter_sized(self.len))
    }

    /// Returns an iterator over the keys, in no specified order.
    #[must_use]
    pub fn keys(&self) -> Keys<Iter<'_, K, V>> {
        Keys::new(self.trie.iter_sized(self.len))
    }

    /// Returns an O(1) mutable copy; later writes to either side are not
    /// visible to the other.
    #[must_use]
    pub fn to_mutable(&self) -> MutableChampMap<K, V> {
        MutableChampMap {
            trie: self.trie.clone(),
            len: self.len,
            mod_count: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Read operations: K: Eq
// ---------------------------------------------------------------------------

impl<K: Eq, V> ChampMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.find(key).map(Entry::value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.find(key).map(|entry| (entry.key(), entry.value()))
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.contains_key(key)
    }
}

// ---------------------------------------------------------------------------
// Write operations: K: Hash + Eq + Clone, V: Clone
// ---------------------------------------------------------------------------

impl<K: Hash + Eq + Clone, V: Clone> ChampMap<K, V> {
    /// Returns a map with `key` bound to `value`.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let mut next = self.clone();
        if next.trie.update(Entry::new(key, value), event::replace_value).changes_size() {
            next.len += 1;
        }
        next
    }

    /// Returns a map without `key`. Removing an absent key returns a map
    /// sharing `self`'s root.
    #[must_use]
    pub fn remove<Q>(&self, key: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut next = self.clone();
        if next.trie.remove(key).changes_size() {
            next.len -= 1;
        }
        next
    }

    /// Returns the union of both maps; on equal keys `other`'s value wins.
    ///
    /// Subtrees present on one side only are shared, not visited.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut next = self.clone();
        let duplicates = next.trie.merge_all(&other.trie);
        next.len = self.len + other.len - duplicates;
        next
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V> Clone for ChampMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
            len: self.len,
        }
    }
}

impl<K, V> Default for ChampMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ChampMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq, V: PartialEq> PartialEq for ChampMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && trie::same_entries(&self.trie, &other.trie, self.len)
    }
}

impl<K: Eq, V: Eq> Eq for ChampMap<K, V> {}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for ChampMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MutableChampMap::from_iter(iter).into_immutable()
    }
}

impl<K, Q, V> ops::Index<&Q> for ChampMap<K, V>
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

impl<'a, K, V> IntoIterator for &'a ChampMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone, V: Clone> IntoIterator for ChampMap<K, V> {
    type Item = (K, V);
    type IntoIter = MapIntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.trie
            .owned_iter(self.len)
            .map(Entry::into_parts as fn(Entry<K, V>) -> (K, V))
    }
}

/// Hash map updated in place.
///
/// Nodes not shared with a snapshot are edited without copying, so a run
/// of writes costs no more allocation than the tree actually grows by.
/// Snapshots ([`to_immutable`](Self::to_immutable)) are O(1) and frozen.
///
/// ```
/// use champ_collections::MutableChampMap;
///
/// let mut map = MutableChampMap::new();
/// assert_eq!(map.insert("x", 1), None);
/// let snapshot = map.to_immutable();
/// assert_eq!(map.insert("x", 2), Some(1));
/// assert_eq!(snapshot.get("x"), Some(&1));
/// ```
pub struct MutableChampMap<K, V> {
    trie: Trie<K, V>,
    len: usize,
    mod_count: u64,
}

impl<K, V> MutableChampMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            trie: Trie::new(),
            len: 0,
            mod_count: 0,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the underlying trie.
    #[must_use]
    pub const fn trie(&self) -> &Trie<K, V> {
        &self.trie
    }

    /// Returns an iterator over `(&K, &V)` pairs, in no specified order.
    #[must_use]
    pub fn iter(&self) -> MapIter<'_, K, V> {
        Pairs::new(self.trie.iter_sized(self.len))
    }

    /// Returns an iterator over the keys, in no specified order.
    #[must_use]
    pub fn keys(&self) -> Keys<Iter<'_, K, V>> {
        Keys::new(self.trie.iter_sized(self.len))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        if self.len > 0 {
            self.trie = Trie::new();
            self.len = 0;
            self.mod_count += 1;
        }
    }

    /// Returns an O(1) persistent snapshot of the current contents.
    #[must_use]
    pub fn to_immutable(&self) -> ChampMap<K, V> {
        ChampMap {
            trie: self.trie.clone(),
            len: self.len,
        }
    }

    /// Converts into a persistent map without copying.
    #[must_use]
    pub fn into_immutable(self) -> ChampMap<K, V> {
        ChampMap {
            trie: self.trie,
            len: self.len,
        }
    }
}

impl<K: Eq, V> MutableChampMap<K, V> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.find(key).map(Entry::value)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.trie.contains_key(key)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> MutableChampMap<K, V> {
    /// Inserts a key-value pair into the map.
    ///
    /// Returns `None` if the key was new, or `Some(old_value)` if an existing
    /// value was replaced.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.trie.update(Entry::new(key, value), event::replace_value) {
            ChangeEvent::Inserted => {
                self.len += 1;
                self.mod_count += 1;
                None
            }
            ChangeEvent::Replaced(old) => Some(old.into_value()),
            ChangeEvent::Unchanged | ChangeEvent::Removed(_) => None,
        }
    }

    /// Removes a key from the map. Returns the removed value, or `None` if
    /// the key was not present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let old = self.trie.remove(key).into_old_entry()?;
        self.len -= 1;
        self.mod_count += 1;
        Some(old.into_value())
    }

    /// Adds every entry of `other`; on equal keys `other`'s value wins.
    pub fn union(&mut self, other: &ChampMap<K, V>) {
        let duplicates = self.trie.merge_all(&other.trie);
        let len = self.len + other.len - duplicates;
        if len != self.len {
            self.len = len;
            self.mod_count += 1;
        }
    }

    /// Returns a fail-fast cursor over a snapshot of the current entries.
    #[must_use]
    pub fn cursor(&self) -> UnorderedCursor<K, V> {
        Cursor::new(self.trie.owned_iter(self.len), self.mod_count)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> CursorSource for MutableChampMap<K, V> {
    type Key = K;

    fn modification_count(&self) -> u64 {
        self.mod_count
    }

    fn remove_for_cursor(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }
}

impl<K, V> Default for MutableChampMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for MutableChampMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Eq, V: PartialEq> PartialEq for MutableChampMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && trie::same_entries(&self.trie, &other.trie, self.len)
    }
}

impl<K: Eq, V: Eq> Eq for MutableChampMap<K, V> {}

impl<K: Hash + Eq + Clone, V: Clone> Extend<(K, V)> for MutableChampMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Hash + Eq + Clone, V: Clone> FromIterator<(K, V)> for MutableChampMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, Q, V> ops::Index<&Q> for MutableChampMap<K, V>
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

impl<'a, K, V> IntoIterator for &'a MutableChampMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
