//! Insertion order on top of an unordered trie.
//!
//! Every entry of a sequenced collection carries a sequence number. Appends
//! take the next number above every live one, prepends the next one below,
//! so sorting by sequence number yields insertion order. Removing entries
//! leaves gaps; once the numbers become too sparse, or a counter nears the
//! end of the `i32` range, the collection renumbers every entry to
//! `0..size`.
//!
//! Iteration picks one of two strategies per iterator:
//! - [`BucketSequencedIter`] scatters entries into a vector indexed by
//!   `seq - first` when the numbers are dense;
//! - [`HeapSequencedIter`] pops entries from a binary heap otherwise.

mod bucket;
pub(crate) mod core;
mod heap;

pub use bucket::BucketSequencedIter;
pub use heap::HeapSequencedIter;

use crate::config::SequenceConfig;
use crate::node::Entry;

/// Anything ordered by a sequence number.
pub trait Sequenced {
    /// Returns the sequence number.
    fn sequence(&self) -> i32;
}

impl<K, V> Sequenced for Entry<K, V> {
    fn sequence(&self) -> i32 {
        self.seq
    }
}

impl<T: Sequenced + ?Sized> Sequenced for &T {
    fn sequence(&self) -> i32 {
        (**self).sequence()
    }
}

/// Bounds of the live sequence numbers: every one lies in `[first, last)`.
///
/// The bounds are not necessarily tight; removals can leave gaps at both
/// ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceCounter {
    first: i32,
    last: i32,
}

impl SequenceCounter {
    /// Counter of an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { first: 0, last: 0 }
    }

    /// Lowest bound (inclusive).
    #[must_use]
    pub const fn first(&self) -> i32 {
        self.first
    }

    /// Upper bound (exclusive).
    #[must_use]
    pub const fn last(&self) -> i32 {
        self.last
    }

    /// Width of `[first, last)`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn span(&self) -> u64 {
        (self.last as i64 - self.first as i64) as u64
    }

    /// Returns `true` if bucket iteration is cheap for `len` entries.
    #[must_use]
    pub const fn prefers_buckets(&self, len: usize, config: &SequenceConfig) -> bool {
        len > 0 && self.span() <= config.bucket_factor as u64 * len as u64
    }

    /// Returns `true` if the numbers are sparse enough to renumber.
    #[must_use]
    pub const fn is_too_sparse(&self, len: usize, config: &SequenceConfig) -> bool {
        self.span() > config.renumber_factor as u64 * len as u64 + config.renumber_slack as u64
    }

    /// Returns `true` if no number can be appended without leaving the
    /// configured range.
    pub(crate) const fn last_exhausted(&self, config: &SequenceConfig) -> bool {
        self.last >= config.effective_counter_limit()
    }

    /// Returns `true` if no number can be prepended without leaving the
    /// configured range.
    pub(crate) const fn first_exhausted(&self, config: &SequenceConfig) -> bool {
        self.first <= -config.effective_counter_limit()
    }

    /// Sequence number the next append will take.
    pub(crate) const fn next_last(&self) -> i32 {
        self.last
    }

    /// Sequence number the next prepend will take.
    pub(crate) const fn next_first(&self) -> i32 {
        self.first - 1
    }

    pub(crate) fn advance_last(&mut self) {
        assert!(self.last < i32::MAX, "sequence numbers exhausted");
        self.last += 1;
    }

    pub(crate) fn advance_first(&mut self) {
        assert!(self.first > i32::MIN, "sequence numbers exhausted");
        self.first -= 1;
    }

    /// Narrows the bounds after the entry numbered `seq` was removed.
    pub(crate) const fn release(&mut self, seq: i32) {
        if seq == self.first {
            self.first = seq + 1;
        }
        if seq == self.last - 1 {
            self.last = seq;
        }
        if self.first > self.last {
            self.first = self.last;
        }
    }

    /// Raises the lower bound to `lowest`, the smallest live number.
    pub(crate) const fn narrow_first(&mut self, lowest: i32) {
        if lowest > self.first {
            self.first = lowest;
        }
    }

    /// Lowers the upper bound to just past `highest`, the largest live
    /// number.
    pub(crate) const fn narrow_last(&mut self, highest: i32) {
        if highest < self.last {
            self.last = highest + 1;
        }
    }

    /// Bounds after renumbering `len` entries to `0..len`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub(crate) const fn reset(&mut self, len: usize) {
        self.first = 0;
        self.last = len as i32;
    }
}

/// Insertion-order iterator, bucket- or heap-based.
pub enum SequencedIter<T> {
    /// Dense numbers: linear walk over a slot vector.
    Bucket(BucketSequencedIter<T>),
    /// Sparse numbers: binary heap.
    Heap(HeapSequencedIter<T>),
}

impl<T: Sequenced> SequencedIter<T> {
    /// Orders `items` (exactly `len` of them, all numbered inside
    /// `counter`) by sequence number, descending if `reverse`.
    #[must_use]
    pub fn new<I>(items: I, len: usize, counter: SequenceCounter, config: &SequenceConfig, reverse: bool) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        if counter.prefers_buckets(len, config) {
            tracing::trace!(len, span = counter.span(), reverse, "bucket sequenced iteration");
            Self::Bucket(BucketSequencedIter::new(items, len, counter, reverse))
        } else {
            tracing::trace!(len, span = counter.span(), reverse, "heap sequenced iteration");
            Self::Heap(HeapSequencedIter::new(items, reverse))
        }
    }
}

impl<T> Iterator for SequencedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        match self {
            Self::Bucket(iter) => iter.next(),
            Self::Heap(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Bucket(iter) => iter.size_hint(),
            Self::Heap(iter) => iter.size_hint(),
        }
    }
}

impl<T> ExactSizeIterator for SequencedIter<T> {}
