//! Root handle of a persistent CHAMP trie.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::config::SequenceConfig;
use crate::event::ChangeEvent;
use crate::hash;
use crate::iter::{IntoIter, Iter};
use crate::node::{Entry, Link, Node, ReferenceCounter};
use crate::ops;
use crate::sequenced::{SequenceCounter, SequencedIter};

/// A persistent hash trie: one root link, nothing else.
///
/// Cloning is O(1) and shares the whole tree. Writes go through
/// `&mut self`: nodes reachable only from this handle are edited in place,
/// shared nodes are copied along the path to the change. An older clone
/// never observes a later write.
///
/// The trie does not track its size; collections built on top of it count
/// entries from the [`ChangeEvent`]s that writes return.
pub struct Trie<K, V> {
    root: Link<K, V>,
}

impl<K, V> Trie<K, V> {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: ReferenceCounter::new(Node::empty()),
        }
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &Node<K, V> {
        &self.root
    }

    /// Returns `true` if the trie holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.data_map() == 0 && self.root.node_map() == 0 && self.root.entries().is_empty()
    }

    /// Returns `true` if both handles point to the same root node.
    ///
    /// A write that changes nothing keeps the root link, so this is also
    /// the cheap "did anything happen" check.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.root, &other.root)
    }

    /// Returns `true` if no other handle shares the root node.
    #[must_use]
    pub fn is_exclusive(&self) -> bool {
        ReferenceCounter::strong_count(&self.root) == 1
    }

    /// Iterates over the entries in no specified order.
    ///
    /// Counts the entries up front; collections that know their size use
    /// [`iter_sized`](Self::iter_sized).
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.root, self.root.count_entries())
    }

    /// Iterates over the entries of a trie known to hold `len` of them.
    #[must_use]
    pub fn iter_sized(&self, len: usize) -> Iter<'_, K, V> {
        Iter::new(&self.root, len)
    }

    /// Iterates over clones of the entries, independently of `self`.
    #[must_use]
    pub fn owned_iter(&self, len: usize) -> IntoIter<K, V> {
        IntoIter::new(ReferenceCounter::clone(&self.root), len)
    }

    /// Iterates over the `len` entries in sequence-number order.
    #[must_use]
    pub fn sequenced_iter(
        &self,
        len: usize,
        counter: SequenceCounter,
        config: &SequenceConfig,
        reverse: bool,
    ) -> SequencedIter<&Entry<K, V>> {
        SequencedIter::new(self.iter_sized(len), len, counter, config, reverse)
    }
}

impl<K, V> Trie<K, V>
where
    K: Clone,
    V: Clone,
{
    /// Owned counterpart of [`sequenced_iter`](Self::sequenced_iter).
    #[must_use]
    pub fn owned_sequenced_iter(
        &self,
        len: usize,
        counter: SequenceCounter,
        config: &SequenceConfig,
        reverse: bool,
    ) -> SequencedIter<Entry<K, V>> {
        SequencedIter::new(self.owned_iter(len), len, counter, config, reverse)
    }

    /// Renumbers every entry to its rank in sequence-number order, so the
    /// numbers become `0..len` without changing their relative order.
    pub fn renumber(&mut self) {
        ops::renumber::renumber(&mut self.root);
    }
}

impl<K: Eq, V> Trie<K, V> {
    /// Looks up `key`, hashing it with the crate hasher.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_hashed(key, hash::hash_one(key))
    }

    /// Looks up `key` under an explicit hash.
    #[must_use]
    pub fn find_hashed<Q>(&self, key: &Q, hash: u32) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        ops::get::find(&self.root, key, hash, 0)
    }

    /// Returns `true` if `key` is stored.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(key).is_some()
    }
}

impl<K, V> Trie<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    /// Inserts `entry`, or lets `resolve` decide what happens when its key
    /// is already stored (see [`event`](crate::event) for the stock
    /// resolve functions).
    ///
    /// [`ChangeEvent::Unchanged`] guarantees the root link is unchanged.
    pub fn update<F>(&mut self, entry: Entry<K, V>, resolve: F) -> ChangeEvent<K, V>
    where
        F: Fn(&Entry<K, V>, Entry<K, V>) -> Option<Entry<K, V>>,
    {
        ops::update::update(&mut self.root, entry, 0, &resolve)
    }

    /// Removes `key`, hashing it with the crate hasher.
    pub fn remove<Q>(&mut self, key: &Q) -> ChangeEvent<K, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_hashed(key, hash::hash_one(key))
    }

    /// Removes `key` under an explicit hash.
    pub fn remove_hashed<Q>(&mut self, key: &Q, hash: u32) -> ChangeEvent<K, V>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        ops::remove::remove(&mut self.root, key, hash, 0)
    }

    /// Adds every entry of `other` to `self`; on equal keys the entry from
    /// `other` wins. Subtrees only one side has are shared, not copied.
    ///
    /// Returns how many keys both tries held, so the merged size is
    /// `len(self) + len(other) - duplicates`.
    pub fn merge_all(&mut self, other: &Self) -> usize {
        ops::union::merge_all(&mut self.root, &other.root, 0)
    }
}

/// Returns `true` if two tries holding `len` entries each store the same
/// key-value pairs. Order and sequence numbers are ignored.
pub(crate) fn same_entries<K: Eq, V: PartialEq>(a: &Trie<K, V>, b: &Trie<K, V>, len: usize) -> bool {
    a.ptr_eq(b)
        || a.iter_sized(len).all(|entry| {
            b.find_hashed(&entry.key, entry.hash)
                .is_some_and(|other| other.value == entry.value)
        })
}

impl<K, V> Clone for Trie<K, V> {
    fn clone(&self) -> Self {
        Self {
            root: ReferenceCounter::clone(&self.root),
        }
    }
}

impl<K, V> Default for Trie<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Trie<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie").field("root", &*self.root).finish()
    }
}
