//! Fail-fast cursors over mutable collections.
//!
//! A cursor iterates over a snapshot of the collection taken when it was
//! created (an O(1) clone of the root), so it never borrows the collection.
//! Instead, every step is handed the collection and compares its
//! modification count against the one the cursor expects. A mismatch means
//! something other than the cursor changed the key set or the order, and
//! the step fails with [`ChampError::ConcurrentModification`].
//!
//! ```
//! use champ_collections::{ChampError, MutableChampSet};
//!
//! let mut set: MutableChampSet<u32> = (0..4).collect();
//! let mut cursor = set.cursor();
//! while let Some(entry) = cursor.next(&set).unwrap() {
//!     if entry.key() % 2 == 0 {
//!         cursor.remove(&mut set).unwrap();
//!     }
//! }
//! assert_eq!(set.len(), 2);
//!
//! let mut cursor = set.cursor();
//! set.insert(10);
//! assert!(matches!(cursor.next(&set), Err(ChampError::ConcurrentModification { .. })));
//! ```

use std::marker::PhantomData;

use crate::error::{ChampError, Result};
use crate::iter::IntoIter;
use crate::node::Entry;
use crate::sequenced::SequencedIter;

/// A collection a [`Cursor`] can synchronize with.
pub trait CursorSource {
    /// Key type the cursor removes by.
    type Key;

    /// Number of structural modifications so far.
    fn modification_count(&self) -> u64;

    /// Removes `key`; returns `true` if it was present.
    fn remove_for_cursor(&mut self, key: &Self::Key) -> bool;
}

/// Fail-fast iterator detached from its collection.
pub struct Cursor<K, V, I> {
    inner: I,
    expected: u64,
    current: Option<K>,
    _entry: PhantomData<V>,
}

/// Cursor over an unordered map or set.
pub type UnorderedCursor<K, V> = Cursor<K, V, IntoIter<K, V>>;

/// Cursor over a sequenced map or set, in iteration order.
pub type SequencedCursor<K, V> = Cursor<K, V, SequencedIter<Entry<K, V>>>;

impl<K, V, I> Cursor<K, V, I>
where
    K: Clone,
    I: Iterator<Item = Entry<K, V>>,
{
    pub(crate) const fn new(inner: I, expected: u64) -> Self {
        Self {
            inner,
            expected,
            current: None,
            _entry: PhantomData,
        }
    }

    /// Advances the cursor.
    ///
    /// # Errors
    ///
    /// [`ChampError::ConcurrentModification`] if `source` was modified
    /// other than through this cursor since the cursor was created.
    pub fn next<S>(&mut self, source: &S) -> Result<Option<Entry<K, V>>>
    where
        S: CursorSource<Key = K>,
    {
        self.check(source)?;
        let entry = self.inner.next();
        self.current = entry.as_ref().map(|entry| entry.key.clone());
        Ok(entry)
    }

    /// Removes the entry last returned by [`next`](Self::next) from
    /// `source`. The cursor stays valid.
    ///
    /// # Errors
    ///
    /// [`ChampError::CursorState`] if there is no such entry (no `next`
    /// yet, or it was already removed) or `source` does not hold it, and
    /// [`ChampError::ConcurrentModification`] as for `next`.
    pub fn remove<S>(&mut self, source: &mut S) -> Result<()>
    where
        S: CursorSource<Key = K>,
    {
        self.check(source)?;
        let key = self.current.take().ok_or(ChampError::CursorState)?;
        if !source.remove_for_cursor(&key) {
            return Err(ChampError::CursorState);
        }
        self.expected = source.modification_count();
        Ok(())
    }

    /// Number of entries not yet returned.
    #[must_use]
    pub fn remaining(&self) -> usize
    where
        I: ExactSizeIterator,
    {
        self.inner.len()
    }

    fn check<S: CursorSource<Key = K>>(&self, source: &S) -> Result<()> {
        let actual = source.modification_count();
        if actual == self.expected {
            Ok(())
        } else {
            tracing::debug!(expected = self.expected, actual, "concurrent modification detected");
            Err(ChampError::ConcurrentModification {
                expected: self.expected,
                actual,
            })
        }
    }
}
