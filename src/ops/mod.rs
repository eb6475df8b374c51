//! Recursive trie algorithms.
//!
//! Every write takes the slot holding a node (`&mut Link`). A node whose
//! link is unique is edited in place; a shared node is copied with
//! `make_mut` at the moment a change is known to happen, and the copy is
//! written back into the slot. Children of a copy stay shared until a later
//! write reaches them.

pub mod get;
pub mod remove;
pub mod renumber;
pub mod union;
pub mod update;

use crate::node::{BitmapNode, CollisionNode, Link, ReferenceCounter};

/// Returns `true` if nothing else holds this node.
fn is_owned<K, V>(slot: &mut Link<K, V>) -> bool {
    ReferenceCounter::get_mut(slot).is_some()
}

/// Owned bitmap node behind `slot`, copying it first if it is shared.
fn bitmap_mut<K: Clone, V: Clone>(slot: &mut Link<K, V>) -> &mut BitmapNode<K, V> {
    ReferenceCounter::make_mut(slot).as_bitmap_mut()
}

/// Owned collision node behind `slot`, copying it first if it is shared.
fn collision_mut<K: Clone, V: Clone>(slot: &mut Link<K, V>) -> &mut CollisionNode<K, V> {
    ReferenceCounter::make_mut(slot).as_collision_mut()
}
