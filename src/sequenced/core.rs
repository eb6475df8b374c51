//! State and operations shared by the sequenced map and set.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::hash::Hash;

use crate::config::SequenceConfig;
use crate::event::{self, ChangeEvent};
use crate::hash;
use crate::node::Entry;
use crate::sequenced::{SequenceCounter, SequencedIter};
use crate::trie::Trie;

/// Where a write puts its key in iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// An existing key stays where it is; a new key is appended.
    Keep,
    /// The key becomes the first one.
    First,
    /// The key becomes the last one.
    Last,
}

/// Outcome of [`SequencedCore::put`].
pub struct Placed<K, V> {
    pub event: ChangeEvent<K, V>,
    /// The key set or the iteration order changed.
    pub reordered: bool,
}

pub struct SequencedCore<K, V> {
    pub trie: Trie<K, V>,
    pub len: usize,
    pub counter: SequenceCounter,
    pub config: SequenceConfig,
}

impl<K, V> Clone for SequencedCore<K, V> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
            len: self.len,
            counter: self.counter,
            config: self.config,
        }
    }
}

impl<K, V> SequencedCore<K, V> {
    pub fn new(config: SequenceConfig) -> Self {
        Self {
            trie: Trie::new(),
            len: 0,
            counter: SequenceCounter::new(),
            config,
        }
    }

    pub fn iter(&self, reverse: bool) -> SequencedIter<&Entry<K, V>> {
        self.trie.sequenced_iter(self.len, self.counter, &self.config, reverse)
    }

    pub fn first_entry(&self) -> Option<&Entry<K, V>> {
        self.extreme(Ordering::Less, self.counter.first())
    }

    pub fn last_entry(&self) -> Option<&Entry<K, V>> {
        self.extreme(Ordering::Greater, self.counter.last() - 1)
    }

    /// Scans for the entry whose number compares `wanted` against every
    /// other; an entry numbered `bound` cannot be beaten and ends the scan.
    fn extreme(&self, wanted: Ordering, bound: i32) -> Option<&Entry<K, V>> {
        let mut best: Option<&Entry<K, V>> = None;
        for entry in self.trie.iter_sized(self.len) {
            if entry.seq == bound {
                return Some(entry);
            }
            if best.is_none_or(|current| entry.seq.cmp(&current.seq) == wanted) {
                best = Some(entry);
            }
        }
        best
    }

    pub fn clear(&mut self) {
        self.trie = Trie::new();
        self.len = 0;
        self.counter.reset(0);
    }
}

impl<K, V> SequencedCore<K, V>
where
    K: Eq + Clone,
    V: Clone,
{
    pub fn owned_iter(&self, reverse: bool) -> SequencedIter<Entry<K, V>> {
        self.trie.owned_sequenced_iter(self.len, self.counter, &self.config, reverse)
    }

    /// Stores `key -> value` at `position`.
    ///
    /// When the key is already stored where `position` wants it (always
    /// for [`Position::Keep`]), `in_place` decides as in
    /// [`Trie::update`] and no sequence number is spent. Otherwise the
    /// key moves and takes the new value.
    pub fn put<F>(&mut self, key: K, value: V, position: Position, in_place: F) -> Placed<K, V>
    where
        K: Hash,
        F: Fn(&Entry<K, V>, Entry<K, V>) -> Option<Entry<K, V>>,
    {
        let hash = hash::hash_one(&key);
        let entry = Entry::with_hash(hash, key, value);
        let current = self.trie.find_hashed(&entry.key, hash).map(|existing| existing.seq);

        if let Some(seq) = current {
            let stays = match position {
                Position::Keep => true,
                Position::First => self.is_first(seq),
                Position::Last => self.is_last(seq),
            };
            if stays {
                let event = self.trie.update(entry.with_sequence(seq), in_place);
                return Placed { event, reordered: false };
            }
        }

        self.make_room(position);
        let seq = match position {
            Position::First => self.counter.next_first(),
            Position::Keep | Position::Last => self.counter.next_last(),
        };
        let event = self.trie.update(entry.with_sequence(seq), event::replace_entry);
        match position {
            Position::First => self.counter.advance_first(),
            Position::Keep | Position::Last => self.counter.advance_last(),
        }
        match &event {
            ChangeEvent::Inserted => self.len += 1,
            ChangeEvent::Replaced(old) => {
                self.counter.release(old.seq);
                self.compact_if_sparse();
            }
            ChangeEvent::Unchanged | ChangeEvent::Removed(_) => {}
        }

        Placed { event, reordered: true }
    }

    /// Returns `true` if `seq` is the lowest live number, tightening the
    /// lower bound to the actual minimum.
    fn is_first(&mut self, seq: i32) -> bool {
        if seq == self.counter.first() {
            return true;
        }
        let Some(lowest) = self.first_entry().map(|entry| entry.seq) else {
            return false;
        };
        self.counter.narrow_first(lowest);
        seq == lowest
    }

    /// Returns `true` if `seq` is the highest live number, tightening the
    /// upper bound to just past the actual maximum.
    fn is_last(&mut self, seq: i32) -> bool {
        if seq == self.counter.last() - 1 {
            return true;
        }
        let Some(highest) = self.last_entry().map(|entry| entry.seq) else {
            return false;
        };
        self.counter.narrow_last(highest);
        seq == highest
    }

    pub fn remove<Q>(&mut self, key: &Q) -> ChangeEvent<K, V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let event = self.trie.remove(key);
        self.after_remove(&event);
        event
    }

    pub fn remove_first(&mut self) -> Option<Entry<K, V>> {
        let (key, hash) = self.first_entry().map(|entry| (entry.key.clone(), entry.hash))?;
        self.remove_exact(&key, hash)
    }

    pub fn remove_last(&mut self) -> Option<Entry<K, V>> {
        let (key, hash) = self.last_entry().map(|entry| (entry.key.clone(), entry.hash))?;
        self.remove_exact(&key, hash)
    }

    fn remove_exact(&mut self, key: &K, hash: u32) -> Option<Entry<K, V>> {
        let event = self.trie.remove_hashed(key, hash);
        self.after_remove(&event);
        event.into_old_entry()
    }

    fn after_remove(&mut self, event: &ChangeEvent<K, V>) {
        if let ChangeEvent::Removed(old) = event {
            self.len -= 1;
            self.counter.release(old.seq);
            self.compact_if_sparse();
        }
    }

    /// Renumbers before the counter on the `position` side leaves the
    /// configured range.
    fn make_room(&mut self, position: Position) {
        let exhausted = match position {
            Position::First => self.counter.first_exhausted(&self.config),
            Position::Keep | Position::Last => self.counter.last_exhausted(&self.config),
        };
        if exhausted {
            self.renumber();
        }
    }

    fn compact_if_sparse(&mut self) {
        if self.len == 0 {
            self.counter.reset(0);
        } else if self.counter.is_too_sparse(self.len, &self.config) {
            self.renumber();
        }
    }

    /// Compacts the sequence numbers to `0..len`.
    pub fn renumber(&mut self) {
        tracing::debug!(
            size = self.len,
            first = self.counter.first(),
            last = self.counter.last(),
            "renumbering sequence numbers"
        );
        self.trie.renumber();
        self.counter.reset(self.len);
    }
}
