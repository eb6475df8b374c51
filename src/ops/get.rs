//! Lookup: traverses the trie to find a key.

use std::borrow::Borrow;

use crate::node::{self, Entry, Node};

/// Searches for `key` in the subtree rooted at `node`.
///
/// Returns a reference to the stored entry if found. Pure descent, no
/// allocation.
pub fn find<'a, K, V, Q>(mut node: &'a Node<K, V>, key: &Q, hash: u32, mut shift: u32) -> Option<&'a Entry<K, V>>
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    loop {
        match node {
            Node::Bitmap(inner) => {
                let bit = node::mask(node::fragment(hash, shift));

                if inner.data_map & bit != 0 {
                    // Position has an inline entry.
                    let entry = &inner.entries[node::index(inner.data_map, bit)];
                    return (entry.hash == hash && entry.key.borrow() == key).then_some(entry);
                } else if inner.node_map & bit != 0 {
                    // Child subtree, descend.
                    node = &*inner.nodes[node::index(inner.node_map, bit)];
                    shift += node::BITS_PER_LEVEL;
                } else {
                    return None;
                }
            }
            Node::Collision(collision) => {
                if collision.hash != hash {
                    return None;
                }
                return collision.entries.iter().find(|entry| entry.key.borrow() == key);
            }
        }
    }
}
