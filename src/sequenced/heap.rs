use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::Sequenced;

/// Insertion-order iterator for sparse sequence numbers.
///
/// O(n) heapify, O(log n) per `next`, independent of how far apart the
/// numbers are.
pub struct HeapSequencedIter<T> {
    heap: BinaryHeap<Ranked<T>>,
}

/// Heap slot ordered by `rank` alone. The heap pops the largest rank, so
/// forward iteration ranks by the negated sequence number.
struct Ranked<T> {
    rank: i64,
    item: T,
}

impl<T> PartialEq for Ranked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl<T> Eq for Ranked<T> {}

impl<T> PartialOrd for Ranked<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Ranked<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl<T: Sequenced> HeapSequencedIter<T> {
    /// Heapifies `items`; `reverse` yields the highest number first.
    #[must_use]
    pub fn new<I: IntoIterator<Item = T>>(items: I, reverse: bool) -> Self {
        let ranked: Vec<Ranked<T>> = items
            .into_iter()
            .map(|item| {
                let seq = i64::from(item.sequence());
                Ranked {
                    rank: if reverse { seq } else { -seq },
                    item,
                }
            })
            .collect();
        Self {
            heap: BinaryHeap::from(ranked),
        }
    }
}

impl<T> Iterator for HeapSequencedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.pop().map(|ranked| ranked.item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T> ExactSizeIterator for HeapSequencedIter<T> {}
