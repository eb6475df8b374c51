//! Removal: delete with canonical collapsing.
//!
//! After every removal no node below the root holds a single entry: a
//! sub-node left with one entry is inlined into its parent, or replaces the
//! parent outright when it was the parent's only content.

use std::borrow::Borrow;

use crate::event::ChangeEvent;
use crate::node::{self, BitmapNode, Link, Node, ReferenceCounter, SizeClass};
use crate::ops::{bitmap_mut, collision_mut, is_owned};

/// Removes `key` from the subtree held by `slot`.
pub fn remove<K, V, Q>(slot: &mut Link<K, V>, key: &Q, hash: u32, shift: u32) -> ChangeEvent<K, V>
where
    K: Borrow<Q> + Clone,
    V: Clone,
    Q: Eq + ?Sized,
{
    let owned = is_owned(slot);
    match &**slot {
        Node::Bitmap(inner) => {
            assert!(shift < node::HASH_BITS, "bitmap node below the last hash level");
            let bit = node::mask(node::fragment(hash, shift));

            if inner.data_map & bit != 0 {
                let pos = node::index(inner.data_map, bit);
                let existing = &inner.entries[pos];
                if existing.hash != hash || existing.key.borrow() != key {
                    return ChangeEvent::Unchanged;
                }

                let inner = bitmap_mut(slot);
                let removed = inner.entries.remove(pos);
                inner.data_map ^= bit;
                if shift > 0 && inner.entries.len() == 1 && inner.nodes.is_empty() {
                    // Re-key the survivor to its root position; the parent
                    // inlines it or escalates this node.
                    inner.data_map = node::mask(node::fragment(inner.entries[0].hash, 0));
                }
                ChangeEvent::Removed(removed)
            } else if inner.node_map & bit != 0 {
                let child_pos = node::index(inner.node_map, bit);
                let event = if owned {
                    let child = &mut bitmap_mut(slot).nodes[child_pos];
                    remove(child, key, hash, shift + node::BITS_PER_LEVEL)
                } else {
                    let mut child = ReferenceCounter::clone(&inner.nodes[child_pos]);
                    let event = remove(&mut child, key, hash, shift + node::BITS_PER_LEVEL);
                    if event.is_modified() {
                        bitmap_mut(slot).nodes[child_pos] = child;
                    }
                    event
                };

                if event.is_modified() {
                    collapse_child(slot, bit, child_pos);
                }
                event
            } else {
                ChangeEvent::Unchanged
            }
        }
        Node::Collision(collision) => {
            if collision.hash != hash {
                return ChangeEvent::Unchanged;
            }
            let Some(pos) = collision.entries.iter().position(|e| e.key.borrow() == key) else {
                return ChangeEvent::Unchanged;
            };

            let collision = collision_mut(slot);
            let removed = collision.entries.remove(pos);
            match collision.entries.len() {
                0 => unreachable!("collision node held a single entry"),
                1 => {
                    // Degenerates into a plain entry for the parent to inline.
                    let remaining = collision.entries.remove(0);
                    *slot = Link::new(Node::Bitmap(BitmapNode::singleton(remaining)));
                }
                _ => {}
            }
            ChangeEvent::Removed(removed)
        }
    }
}

/// Restores canonical form after the child at `child_pos` (bit `bit`) lost
/// an entry. `slot` is already owned at this point.
fn collapse_child<K: Clone, V: Clone>(slot: &mut Link<K, V>, bit: u32, child_pos: usize) {
    let inner = bitmap_mut(slot);
    match inner.nodes[child_pos].size_class() {
        SizeClass::More => {}
        SizeClass::Empty => unreachable!("sub-node emptied by a single removal"),
        SizeClass::One if inner.entries.is_empty() && inner.nodes.len() == 1 => {
            // Only content of this node → escalate the singleton upward.
            let child = inner.nodes.remove(child_pos);
            *slot = child;
        }
        SizeClass::One => {
            let child = inner.nodes.remove(child_pos);
            let entry = node::take_single_entry(child);
            inner.node_map ^= bit;
            inner.data_map |= bit;
            let pos = node::index(inner.data_map, bit);
            inner.entries.insert(pos, entry);
        }
    }
}
