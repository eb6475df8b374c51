//! Change records reported by trie writes, and the functions that decide
//! what happens when an update meets an existing key.

use std::fmt;

use crate::node::Entry;

/// What a single write did to the trie.
pub enum ChangeEvent<K, V> {
    /// Nothing changed; the root link is untouched.
    Unchanged,
    /// A new key was added.
    Inserted,
    /// An existing entry was overwritten; holds the previous entry.
    Replaced(Entry<K, V>),
    /// An entry was deleted; holds the removed entry.
    Removed(Entry<K, V>),
}

impl<K, V> ChangeEvent<K, V> {
    /// Returns `true` unless the event is [`Unchanged`](Self::Unchanged).
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }

    /// Returns `true` if a key was added or removed, changing the size.
    #[must_use]
    pub const fn changes_size(&self) -> bool {
        matches!(self, Self::Inserted | Self::Removed(_))
    }

    /// Returns the replaced or removed entry, if any.
    #[must_use]
    pub const fn old_entry(&self) -> Option<&Entry<K, V>> {
        match self {
            Self::Replaced(entry) | Self::Removed(entry) => Some(entry),
            Self::Unchanged | Self::Inserted => None,
        }
    }

    /// Consumes the event, returning the replaced or removed entry.
    #[must_use]
    pub fn into_old_entry(self) -> Option<Entry<K, V>> {
        match self {
            Self::Replaced(entry) | Self::Removed(entry) => Some(entry),
            Self::Unchanged | Self::Inserted => None,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ChangeEvent<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unchanged => f.write_str("Unchanged"),
            Self::Inserted => f.write_str("Inserted"),
            Self::Replaced(entry) => f.debug_tuple("Replaced").field(entry).finish(),
            Self::Removed(entry) => f.debug_tuple("Removed").field(entry).finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Resolve functions
//
// `update` calls one of these when the incoming entry's key is already
// stored. `None` leaves the trie untouched; `Some(entry)` overwrites the
// stored entry.
// ---------------------------------------------------------------------------

/// Keeps the stored entry (set semantics).
#[must_use]
pub fn keep_existing<K, V>(_existing: &Entry<K, V>, _incoming: Entry<K, V>) -> Option<Entry<K, V>> {
    None
}

/// Overwrites the stored entry, keeping its sequence number.
#[must_use]
pub fn replace_value<K, V>(existing: &Entry<K, V>, incoming: Entry<K, V>) -> Option<Entry<K, V>> {
    Some(incoming.with_sequence(existing.seq))
}

/// Overwrites the stored entry only when the value differs, keeping its
/// sequence number. Writing an equal value reports no change.
#[must_use]
pub fn replace_value_if_changed<K, V: PartialEq>(
    existing: &Entry<K, V>,
    incoming: Entry<K, V>,
) -> Option<Entry<K, V>> {
    if existing.value == incoming.value {
        None
    } else {
        Some(incoming.with_sequence(existing.seq))
    }
}

/// Overwrites the stored entry including its sequence number (moves the
/// key to the incoming position in a sequenced collection).
#[must_use]
pub fn replace_entry<K, V>(_existing: &Entry<K, V>, incoming: Entry<K, V>) -> Option<Entry<K, V>> {
    Some(incoming)
}
