//! Renumbering: compacts sequence numbers to `0..size`, preserving order.

use crate::node::{Link, Node, ReferenceCounter};

/// Replaces every sequence number in the subtree with its rank among all
/// sequence numbers of the subtree.
///
/// The tree shape is untouched; every node is reached through `make_mut`,
/// so owned nodes are edited in place and shared ones are copied.
pub fn renumber<K: Clone, V: Clone>(slot: &mut Link<K, V>) {
    let mut sequences = Vec::with_capacity(slot.count_entries());
    collect_sequences(slot, &mut sequences);
    sequences.sort_unstable();
    assign_ranks(slot, &sequences);
}

fn collect_sequences<K, V>(node: &Node<K, V>, out: &mut Vec<i32>) {
    out.extend(node.entries().iter().map(|entry| entry.seq));
    if let Node::Bitmap(inner) = node {
        for child in &inner.nodes {
            collect_sequences(child, out);
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn assign_ranks<K: Clone, V: Clone>(slot: &mut Link<K, V>, sorted: &[i32]) {
    let rank = |seq: i32| sorted.partition_point(|&s| s < seq) as i32;
    match ReferenceCounter::make_mut(slot) {
        Node::Bitmap(inner) => {
            for entry in &mut inner.entries {
                entry.seq = rank(entry.seq);
            }
            for child in &mut inner.nodes {
                assign_ranks(child, sorted);
            }
        }
        Node::Collision(collision) => {
            for entry in &mut collision.entries {
                entry.seq = rank(entry.seq);
            }
        }
    }
}
