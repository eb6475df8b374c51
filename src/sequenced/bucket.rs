use std::iter::Flatten;
use std::vec;

use super::{SequenceCounter, Sequenced};

/// Insertion-order iterator for dense sequence numbers.
///
/// Setup scatters every entry into a vector of `last - first` slots at
/// `seq - first`; iteration walks the slots, skipping gaps.
pub struct BucketSequencedIter<T> {
    slots: Flatten<vec::IntoIter<Option<T>>>,
    reverse: bool,
    remaining: usize,
}

impl<T: Sequenced> BucketSequencedIter<T> {
    /// Builds the slot vector from `len` items numbered inside `counter`.
    ///
    /// # Panics
    ///
    /// Panics if an item's sequence number lies outside `counter`.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn new<I: IntoIterator<Item = T>>(items: I, len: usize, counter: SequenceCounter, reverse: bool) -> Self {
        let mut slots: Vec<Option<T>> = std::iter::repeat_with(|| None).take(counter.span() as usize).collect();
        for item in items {
            let offset = i64::from(item.sequence()) - i64::from(counter.first());
            slots[offset as usize] = Some(item);
        }
        Self {
            slots: slots.into_iter().flatten(),
            reverse,
            remaining: len,
        }
    }
}

impl<T> Iterator for BucketSequencedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = if self.reverse {
            self.slots.next_back()
        } else {
            self.slots.next()
        };
        if item.is_some() {
            self.remaining -= 1;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for BucketSequencedIter<T> {}
