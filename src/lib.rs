//! Persistent hash collections based on CHAMP.
//!
//! CHAMP (Compressed Hash-Array Mapped Prefix-tree) is a refined HAMT that
//! guarantees **canonical form**: the same set of keys always produces the
//! same trie structure, regardless of insertion order.
//!
//! One engine ([`Trie`]) backs eight collections:
//!
//! | | persistent | in place |
//! |---|---|---|
//! | map | [`ChampMap`] | [`MutableChampMap`] |
//! | set | [`ChampSet`] | [`MutableChampSet`] |
//! | ordered map | [`SequencedChampMap`] | [`MutableSequencedChampMap`] |
//! | ordered set | [`SequencedChampSet`] | [`MutableSequencedChampSet`] |
//!
//! # Key properties
//!
//! - **Structural sharing**: snapshots are O(1) and never change; writes
//!   copy only the path to the change
//! - **In-place writes**: nodes no snapshot shares are edited directly
//! - **Insertion order on demand**: sequence numbers per entry, compacted
//!   when they become sparse
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Features
//!
//! - `sync`: `Arc` links, so collections are `Send + Sync`
//! - `fxhash`: hash keys with `FxHasher` instead of `SipHash`
//! - `serde`: (de)serialize [`SequenceConfig`]
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015: "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001: "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod cursor;
pub mod dot;
pub mod error;
pub mod event;
pub mod hash;
pub mod iter;
pub mod node;
pub mod sequenced;
pub mod trie;

mod map;
mod ops;
mod sequenced_map;
mod sequenced_set;
mod set;

#[cfg(test)]
mod tests;

pub use config::SequenceConfig;
pub use cursor::{Cursor, CursorSource};
pub use error::{ChampError, Result};
pub use event::ChangeEvent;
pub use map::{ChampMap, MapIntoIter, MapIter, MutableChampMap};
pub use node::{Entry, Node, SizeClass};
pub use sequenced_map::{MutableSequencedChampMap, SequencedChampMap, SequencedMapIter};
pub use sequenced_set::{MutableSequencedChampSet, SequencedChampSet, SequencedSetIter};
pub use set::{ChampSet, MutableChampSet, SetIntoIter, SetIter};
pub use trie::Trie;
