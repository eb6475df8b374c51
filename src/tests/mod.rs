#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::too_many_lines
)]

mod basic;
mod canonical;
mod cursor;
mod properties;
mod stress;
mod union;

use std::collections::HashSet;
use std::hash::Hash;

use crate::Trie;
use crate::node::{self, HASH_BITS, Node, SizeClass};

/// Walks the whole trie and panics on any structural violation.
/// Returns the number of entries.
pub fn check_invariants<K: Hash + Eq, V>(trie: &Trie<K, V>) -> usize {
    check_node(trie.root(), 0, 0, true)
}

fn check_node<K: Hash + Eq, V>(node: &Node<K, V>, shift: u32, path: u32, is_root: bool) -> usize {
    if let Some(hash) = node.collision_hash() {
        assert!(shift >= HASH_BITS, "collision node at shift {shift}");
        assert!(node.payload_arity() >= 2, "collision node with {} entries", node.payload_arity());
        let mut keys = HashSet::new();
        for entry in node.entries() {
            assert_eq!(entry.hash(), hash, "collision entry with a foreign hash");
            assert!(keys.insert(entry.key()), "duplicate key in collision node");
        }
        return node.payload_arity();
    }

    assert!(shift < HASH_BITS, "bitmap node at shift {shift}");
    let (data_map, node_map) = (node.data_map(), node.node_map());
    assert_eq!(data_map & node_map, 0, "bitmaps overlap");
    assert_eq!(node.payload_arity(), data_map.count_ones() as usize);
    assert_eq!(node.node_arity(), node_map.count_ones() as usize);
    if !is_root {
        assert_ne!(node.size_class(), SizeClass::Empty, "empty sub-node");
        assert_ne!(node.size_class(), SizeClass::One, "single-entry sub-node");
    }

    let prefix_mask = if shift == 0 { 0 } else { (1_u32 << shift) - 1 };
    let bits = |map: u32| (0..32).filter(move |frag| map & node::mask(*frag) != 0);

    for (entry, frag) in node.entries().iter().zip(bits(data_map)) {
        assert_eq!(node::fragment(entry.hash(), shift), frag, "entry at the wrong position");
        assert_eq!(entry.hash() & prefix_mask, path, "entry under the wrong prefix");
    }

    let mut count = node.payload_arity();
    for (i, frag) in bits(node_map).enumerate() {
        count += check_node(node.child(i), shift + node::BITS_PER_LEVEL, path | (frag << shift), false);
    }
    count
}

/// Depth of the deepest node (root = 1).
pub fn depth<K, V>(node: &Node<K, V>) -> usize {
    1 + (0..node.node_arity()).map(|i| depth(node.child(i))).max().unwrap_or(0)
}
