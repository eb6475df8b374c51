//! Bulk union: merges two tries position by position.
//!
//! Both tries use the same hash function, so at any shift an entry of one
//! trie can only meet entries of the other that sit at the same bit
//! position. Positions present on one side only are shared with that side
//! without being visited.

use std::mem;

use crate::event::{self, ChangeEvent};
use crate::node::{self, BitmapNode, Entry, Link, Node, ReferenceCounter};
use crate::ops::update::{merge_two_entries, update};

/// Merges `other` into the subtree held by `this`. On equal keys the entry
/// from `other` wins.
///
/// Returns the number of keys of `other` that were already present.
pub fn merge_all<K, V>(this: &mut Link<K, V>, other: &Link<K, V>, shift: u32) -> usize
where
    K: Eq + Clone,
    V: Clone,
{
    if ReferenceCounter::ptr_eq(this, other) {
        return other.count_entries();
    }

    match (&**this, &**other) {
        (_, Node::Bitmap(b)) if b.data_map | b.node_map == 0 => 0,
        (Node::Bitmap(a), _) if a.data_map | a.node_map == 0 => {
            *this = ReferenceCounter::clone(other);
            0
        }
        (Node::Bitmap(_), Node::Bitmap(b)) => {
            let taken = mem::replace(this, Link::new(Node::empty()));
            let a = match ReferenceCounter::try_unwrap(taken) {
                Ok(Node::Bitmap(a)) => a,
                Ok(Node::Collision(_)) => unreachable!(),
                Err(shared) => match &*shared {
                    Node::Bitmap(a) => a.clone(),
                    Node::Collision(_) => unreachable!(),
                },
            };
            let (merged, duplicates) = merge_bitmaps(a, b, shift);
            *this = Link::new(Node::Bitmap(merged));
            duplicates
        }
        (Node::Collision(_), Node::Collision(b)) => {
            let mut duplicates = 0;
            for entry in &b.entries {
                let outcome = update(this, entry.clone(), shift, &event::replace_value);
                if !matches!(outcome, ChangeEvent::Inserted) {
                    duplicates += 1;
                }
            }
            duplicates
        }
        _ => unreachable!("bitmap and collision nodes at the same shift"),
    }
}

/// One side's content at a bit position.
enum Slot<'a, K, V> {
    Empty,
    Data(&'a Entry<K, V>),
    Node(&'a Link<K, V>),
}

fn merge_bitmaps<K, V>(a: BitmapNode<K, V>, b: &BitmapNode<K, V>, shift: u32) -> (BitmapNode<K, V>, usize)
where
    K: Eq + Clone,
    V: Clone,
{
    let next_shift = shift + node::BITS_PER_LEVEL;
    let mut merged = BitmapNode::empty();
    let mut duplicates = 0;

    let (a_data_map, a_node_map) = (a.data_map, a.node_map);
    let mut a_entries = a.entries.into_iter();
    let mut a_nodes = a.nodes.into_iter();
    let (mut b_entry_pos, mut b_node_pos) = (0, 0);

    let mut remaining = a_data_map | a_node_map | b.data_map | b.node_map;
    while remaining != 0 {
        let bit = remaining & remaining.wrapping_neg();
        remaining ^= bit;

        let theirs = if b.data_map & bit != 0 {
            b_entry_pos += 1;
            Slot::Data(&b.entries[b_entry_pos - 1])
        } else if b.node_map & bit != 0 {
            b_node_pos += 1;
            Slot::Node(&b.nodes[b_node_pos - 1])
        } else {
            Slot::Empty
        };

        if a_data_map & bit != 0 {
            let Some(ours) = a_entries.next() else { unreachable!() };
            match theirs {
                Slot::Empty => push_entry(&mut merged, bit, ours),
                Slot::Data(entry) if entry.hash == ours.hash && entry.key == ours.key => {
                    duplicates += 1;
                    push_entry(&mut merged, bit, entry.clone());
                }
                Slot::Data(entry) => {
                    let subtree = merge_two_entries(ours, entry.clone(), next_shift);
                    push_node(&mut merged, bit, subtree);
                }
                Slot::Node(link) => {
                    // `other` wins: keep their entry if the key is there.
                    let mut subtree = ReferenceCounter::clone(link);
                    let outcome = update(&mut subtree, ours, next_shift, &event::keep_existing);
                    if !matches!(outcome, ChangeEvent::Inserted) {
                        duplicates += 1;
                    }
                    push_node(&mut merged, bit, subtree);
                }
            }
        } else if a_node_map & bit != 0 {
            let Some(mut ours) = a_nodes.next() else { unreachable!() };
            match theirs {
                Slot::Empty => {}
                Slot::Data(entry) => {
                    let outcome = update(&mut ours, entry.clone(), next_shift, &event::replace_value);
                    if !matches!(outcome, ChangeEvent::Inserted) {
                        duplicates += 1;
                    }
                }
                Slot::Node(link) => duplicates += merge_all(&mut ours, link, next_shift),
            }
            push_node(&mut merged, bit, ours);
        } else {
            match theirs {
                Slot::Empty => unreachable!(),
                Slot::Data(entry) => push_entry(&mut merged, bit, entry.clone()),
                Slot::Node(link) => push_node(&mut merged, bit, ReferenceCounter::clone(link)),
            }
        }
    }

    (merged, duplicates)
}

// Bits are visited in ascending order, so pushing keeps both vectors sorted.

fn push_entry<K, V>(node: &mut BitmapNode<K, V>, bit: u32, entry: Entry<K, V>) {
    node.data_map |= bit;
    node.entries.push(entry);
}

fn push_node<K, V>(node: &mut BitmapNode<K, V>, bit: u32, child: Link<K, V>) {
    node.node_map |= bit;
    node.nodes.push(child);
}
