//! Key hashing.
//!
//! Every trie in a process must agree on the hash of a key, otherwise two
//! tries could not be merged bitmap by bitmap. The hasher is therefore
//! deterministic: `SipHash` with fixed keys (`DefaultHasher::new()`), or
//! `FxHasher` with the `fxhash` feature. The 64-bit result is folded to the
//! 32 bits the trie consumes.

use std::hash::{Hash, Hasher};

/// Computes the 32-bit trie hash of a value.
#[must_use]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u32 {
    let mut hasher = new_hasher();
    value.hash(&mut hasher);
    fold(hasher.finish())
}

/// Folds a 64-bit hash into 32 bits, keeping entropy from both halves.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn fold(hash: u64) -> u32 {
    (hash ^ (hash >> 32)) as u32
}

#[cfg(not(feature = "fxhash"))]
fn new_hasher() -> std::collections::hash_map::DefaultHasher {
    std::collections::hash_map::DefaultHasher::new()
}

#[cfg(feature = "fxhash")]
fn new_hasher() -> rustc_hash::FxHasher {
    rustc_hash::FxHasher::default()
}
