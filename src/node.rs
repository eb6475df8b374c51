//! CHAMP trie node types and bitmap helpers.

use std::fmt;
use std::hash::Hash;

use crate::hash;

/// Reference-counted link between nodes.
///
/// `Arc` with the `sync` feature, `Rc` otherwise. A link whose strong count
/// is 1 marks a node that the holder may edit in place.
#[cfg(feature = "sync")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "sync"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// Shared pointer to a child node.
pub(crate) type Link<K, V> = ReferenceCounter<Node<K, V>>;

/// Bits per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Width of the hash consumed by the bitmap levels.
pub const HASH_BITS: u32 = 32;

/// Maximum number of nodes on a root-to-leaf path: seven bitmap levels
/// (shifts 0 through 30) plus one collision level.
pub const MAX_DEPTH: usize = 8;

/// A stored key-value pair with its cached hash and sequence number.
///
/// Identity is the key alone; the sequence number is only meaningful in
/// sequenced collections and is `0` everywhere else.
#[derive(Clone)]
pub struct Entry<K, V> {
    pub(crate) hash: u32,
    pub(crate) seq: i32,
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K: Hash, V> Entry<K, V> {
    /// Creates an entry, hashing `key` with the crate hasher.
    #[must_use]
    pub fn new(key: K, value: V) -> Self {
        Self::with_hash(hash::hash_one(&key), key, value)
    }

    /// Creates an entry carrying a sequence number.
    #[must_use]
    pub fn sequenced(key: K, value: V, seq: i32) -> Self {
        let mut entry = Self::new(key, value);
        entry.seq = seq;
        entry
    }
}

impl<K, V> Entry<K, V> {
    /// Creates an entry with an explicit hash.
    ///
    /// Lookups through [`Trie::find`](crate::Trie::find) recompute the hash
    /// from the key, so entries built this way must be found with
    /// [`Trie::find_hashed`](crate::Trie::find_hashed).
    #[must_use]
    pub const fn with_hash(hash: u32, key: K, value: V) -> Self {
        Self {
            hash,
            seq: 0,
            key,
            value,
        }
    }

    /// Returns the key.
    #[must_use]
    pub const fn key(&self) -> &K {
        &self.key
    }

    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// Returns the cached 32-bit hash of the key.
    #[must_use]
    pub const fn hash(&self) -> u32 {
        self.hash
    }

    /// Returns the sequence number.
    #[must_use]
    pub const fn sequence(&self) -> i32 {
        self.seq
    }

    /// Returns a copy of this entry carrying `seq`.
    #[must_use]
    pub fn with_sequence(mut self, seq: i32) -> Self {
        self.seq = seq;
        self
    }

    /// Consumes the entry, returning the key.
    #[must_use]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Consumes the entry, returning the value.
    #[must_use]
    pub fn into_value(self) -> V {
        self.value
    }

    /// Consumes the entry, returning `(key, value)`.
    #[must_use]
    pub fn into_parts(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Entry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("hash", &format_args!("{:#010x}", self.hash))
            .field("seq", &self.seq)
            .finish()
    }
}

/// CHAMP trie node.
///
/// - [`Bitmap`](Self::Bitmap): bitmap-compressed node at shift `< 32`
/// - [`Collision`](Self::Collision): linear node for full 32-bit hash collisions
#[derive(Clone)]
pub enum Node<K, V> {
    /// Bitmap-compressed inner node.
    Bitmap(BitmapNode<K, V>),
    /// Collision node for keys sharing the same 32-bit hash.
    Collision(CollisionNode<K, V>),
}

/// Bitmap-compressed node.
///
/// Invariant: `data_map & node_map == 0`, `entries.len() == data_map.count_ones()`,
/// `nodes.len() == node_map.count_ones()`. Both vectors are ordered by
/// ascending bit position.
#[derive(Clone)]
pub struct BitmapNode<K, V> {
    pub(crate) data_map: u32,
    pub(crate) node_map: u32,
    pub(crate) entries: Vec<Entry<K, V>>,
    pub(crate) nodes: Vec<Link<K, V>>,
}

/// Collision node for keys sharing the same 32-bit hash.
///
/// Invariant: `entries.len() >= 2`, every entry has hash `hash`.
#[derive(Clone)]
pub struct CollisionNode<K, V> {
    pub(crate) hash: u32,
    pub(crate) entries: Vec<Entry<K, V>>,
}

/// Coarse size of a subtree, used by the collapse rules of removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeClass {
    /// No entries (only an empty root).
    Empty,
    /// A single inlined entry and no sub-nodes.
    One,
    /// Two or more entries.
    More,
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
///
/// `shift` must be below [`HASH_BITS`].
#[inline]
#[must_use]
pub const fn fragment(hash: u32, shift: u32) -> u32 {
    (hash >> shift) & 0x1F
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl<K, V> BitmapNode<K, V> {
    pub(crate) const fn empty() -> Self {
        Self {
            data_map: 0,
            node_map: 0,
            entries: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// A node holding one entry at its shift-0 position, so it stays a
    /// valid root when escalated all the way up.
    pub(crate) fn singleton(entry: Entry<K, V>) -> Self {
        Self {
            data_map: mask(fragment(entry.hash, 0)),
            node_map: 0,
            entries: vec![entry],
            nodes: Vec::new(),
        }
    }
}

impl<K, V> Node<K, V> {
    pub(crate) const fn empty() -> Self {
        Self::Bitmap(BitmapNode::empty())
    }

    pub(crate) fn as_bitmap_mut(&mut self) -> &mut BitmapNode<K, V> {
        match self {
            Self::Bitmap(node) => node,
            Self::Collision(_) => unreachable!("collision node where a bitmap node was expected"),
        }
    }

    pub(crate) fn as_collision_mut(&mut self) -> &mut CollisionNode<K, V> {
        match self {
            Self::Collision(node) => node,
            Self::Bitmap(_) => unreachable!("bitmap node where a collision node was expected"),
        }
    }

    /// Moves the single entry out of a node whose size class is `One`.
    pub(crate) fn into_single_entry(self) -> Entry<K, V> {
        match self {
            Self::Bitmap(mut node) if node.entries.len() == 1 && node.nodes.is_empty() => {
                match node.entries.pop() {
                    Some(entry) => entry,
                    None => unreachable!(),
                }
            }
            _ => unreachable!("node does not hold exactly one entry"),
        }
    }
}

/// Takes the single entry out of `link`, cloning it if the node is shared.
pub(crate) fn take_single_entry<K: Clone, V: Clone>(link: Link<K, V>) -> Entry<K, V> {
    match ReferenceCounter::try_unwrap(link) {
        Ok(node) => node.into_single_entry(),
        Err(shared) => shared.entry(0).clone(),
    }
}

// ---------------------------------------------------------------------------
// Introspection
// ---------------------------------------------------------------------------

impl<K, V> Node<K, V> {
    /// Returns the bitmap of positions holding inline entries
    /// (0 for collision nodes).
    #[must_use]
    pub const fn data_map(&self) -> u32 {
        match self {
            Self::Bitmap(node) => node.data_map,
            Self::Collision(_) => 0,
        }
    }

    /// Returns the bitmap of positions holding sub-nodes
    /// (0 for collision nodes).
    #[must_use]
    pub const fn node_map(&self) -> u32 {
        match self {
            Self::Bitmap(node) => node.node_map,
            Self::Collision(_) => 0,
        }
    }

    /// Returns the number of entries stored directly in this node.
    #[must_use]
    pub fn payload_arity(&self) -> usize {
        self.entries().len()
    }

    /// Returns the number of sub-nodes (always 0 for collision nodes).
    #[must_use]
    pub fn node_arity(&self) -> usize {
        match self {
            Self::Bitmap(node) => node.nodes.len(),
            Self::Collision(_) => 0,
        }
    }

    /// Returns the entries stored directly in this node.
    #[must_use]
    pub fn entries(&self) -> &[Entry<K, V>] {
        match self {
            Self::Bitmap(node) => &node.entries,
            Self::Collision(node) => &node.entries,
        }
    }

    /// Returns the `i`-th inline entry.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.payload_arity()`.
    #[must_use]
    pub fn entry(&self, i: usize) -> &Entry<K, V> {
        &self.entries()[i]
    }

    /// Returns the `i`-th sub-node.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.node_arity()`.
    #[must_use]
    pub fn child(&self, i: usize) -> &Self {
        match self {
            Self::Bitmap(node) => &*node.nodes[i],
            Self::Collision(_) => panic!("collision nodes have no children"),
        }
    }

    /// Returns `true` for collision nodes.
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        matches!(self, Self::Collision(_))
    }

    /// Returns the shared hash of a collision node.
    #[must_use]
    pub const fn collision_hash(&self) -> Option<u32> {
        match self {
            Self::Collision(node) => Some(node.hash),
            Self::Bitmap(_) => None,
        }
    }

    /// Classifies this node for the collapse rules of removal.
    #[must_use]
    pub fn size_class(&self) -> SizeClass {
        match self {
            Self::Bitmap(node) => match (node.entries.len(), node.nodes.len()) {
                (0, 0) => SizeClass::Empty,
                (1, 0) => SizeClass::One,
                _ => SizeClass::More,
            },
            Self::Collision(node) => match node.entries.len() {
                0 => SizeClass::Empty,
                1 => SizeClass::One,
                _ => SizeClass::More,
            },
        }
    }

    /// Counts every entry in this subtree.
    #[must_use]
    pub fn count_entries(&self) -> usize {
        match self {
            Self::Bitmap(node) => {
                node.entries.len() + node.nodes.iter().map(|child| child.count_entries()).sum::<usize>()
            }
            Self::Collision(node) => node.entries.len(),
        }
    }
}

// ---------------------------------------------------------------------------
// Manual Debug: bitmaps in binary, entries summarized.
// ---------------------------------------------------------------------------

impl<K, V> fmt::Debug for Node<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bitmap(node) => f
                .debug_struct("Bitmap")
                .field("data_map", &format_args!("{:#034b}", node.data_map))
                .field("node_map", &format_args!("{:#034b}", node.node_map))
                .field("payload_arity", &node.entries.len())
                .field("node_arity", &node.nodes.len())
                .finish(),
            Self::Collision(node) => f
                .debug_struct("Collision")
                .field("hash", &format_args!("{:#010x}", node.hash))
                .field("entries_len", &node.entries.len())
                .finish(),
        }
    }
}
