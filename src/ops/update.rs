//! Update: insert or replace, in place on owned nodes and by
//! path copy on shared ones.

use std::mem;

use crate::event::ChangeEvent;
use crate::node::{self, BitmapNode, CollisionNode, Entry, Link, Node, ReferenceCounter};
use crate::ops::{bitmap_mut, collision_mut, is_owned};

/// Inserts `entry` into the subtree held by `slot`.
///
/// When the key is already present, `resolve(existing, entry)` decides:
/// `None` leaves the subtree untouched (no copy, same link), `Some(e)`
/// stores `e` and reports the previous entry.
pub fn update<K, V, F>(slot: &mut Link<K, V>, entry: Entry<K, V>, shift: u32, resolve: &F) -> ChangeEvent<K, V>
where
    K: Eq + Clone,
    V: Clone,
    F: Fn(&Entry<K, V>, Entry<K, V>) -> Option<Entry<K, V>>,
{
    let owned = is_owned(slot);
    match &**slot {
        Node::Bitmap(inner) => {
            assert!(shift < node::HASH_BITS, "bitmap node below the last hash level");
            let bit = node::mask(node::fragment(entry.hash, shift));

            if inner.data_map & bit != 0 {
                let pos = node::index(inner.data_map, bit);
                let existing = &inner.entries[pos];

                if existing.hash == entry.hash && existing.key == entry.key {
                    let Some(replacement) = resolve(existing, entry) else {
                        return ChangeEvent::Unchanged;
                    };
                    let inner = bitmap_mut(slot);
                    return ChangeEvent::Replaced(mem::replace(&mut inner.entries[pos], replacement));
                }

                // Different key at same position → push both into a subtree.
                let inner = bitmap_mut(slot);
                let existing = inner.entries.remove(pos);
                let subtree = merge_two_entries(existing, entry, shift + node::BITS_PER_LEVEL);
                inner.data_map ^= bit;
                inner.node_map |= bit;
                let child_pos = node::index(inner.node_map, bit);
                inner.nodes.insert(child_pos, subtree);
                ChangeEvent::Inserted
            } else if inner.node_map & bit != 0 {
                let child_pos = node::index(inner.node_map, bit);
                if owned {
                    let child = &mut bitmap_mut(slot).nodes[child_pos];
                    return update(child, entry, shift + node::BITS_PER_LEVEL, resolve);
                }

                // Shared: only copy this node if the child actually changed.
                let mut child = ReferenceCounter::clone(&inner.nodes[child_pos]);
                let event = update(&mut child, entry, shift + node::BITS_PER_LEVEL, resolve);
                if event.is_modified() {
                    bitmap_mut(slot).nodes[child_pos] = child;
                }
                event
            } else {
                let inner = bitmap_mut(slot);
                inner.data_map |= bit;
                let pos = node::index(inner.data_map, bit);
                inner.entries.insert(pos, entry);
                ChangeEvent::Inserted
            }
        }
        Node::Collision(collision) => {
            assert_eq!(collision.hash, entry.hash, "entry routed to a collision node of another hash");

            if let Some(pos) = collision.entries.iter().position(|e| e.key == entry.key) {
                let Some(replacement) = resolve(&collision.entries[pos], entry) else {
                    return ChangeEvent::Unchanged;
                };
                let collision = collision_mut(slot);
                return ChangeEvent::Replaced(mem::replace(&mut collision.entries[pos], replacement));
            }

            collision_mut(slot).entries.push(entry);
            ChangeEvent::Inserted
        }
    }
}

/// Creates a subtree from two distinct entries whose fragments agree on
/// every level above `shift`.
///
/// Descends until the fragments differ (lower fragment first), or creates
/// a collision node once the hash is exhausted.
pub fn merge_two_entries<K, V>(first: Entry<K, V>, second: Entry<K, V>, shift: u32) -> Link<K, V> {
    if shift >= node::HASH_BITS {
        return Link::new(Node::Collision(CollisionNode {
            hash: first.hash,
            entries: vec![first, second],
        }));
    }

    let f1 = node::fragment(first.hash, shift);
    let f2 = node::fragment(second.hash, shift);

    if f1 == f2 {
        let child = merge_two_entries(first, second, shift + node::BITS_PER_LEVEL);
        Link::new(Node::Bitmap(BitmapNode {
            data_map: 0,
            node_map: node::mask(f1),
            entries: Vec::new(),
            nodes: vec![child],
        }))
    } else {
        let entries = if f1 < f2 { vec![first, second] } else { vec![second, first] };
        Link::new(Node::Bitmap(BitmapNode {
            data_map: node::mask(f1) | node::mask(f2),
            node_map: 0,
            entries,
            nodes: Vec::new(),
        }))
    }
}
