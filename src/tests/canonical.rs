use rstest::rstest;

use super::check_invariants;
use crate::dot::to_dot;
use crate::{ChampMap, MutableChampMap};

fn build(pairs: impl IntoIterator<Item = (u64, u64)>) -> MutableChampMap<u64, u64> {
    pairs.into_iter().collect()
}

/// Insertion order must not affect the resulting structure.
#[rstest]
#[case(&[(1, 10), (2, 20), (3, 30)], &[(3, 30), (2, 20), (1, 10)])]
#[case(&[(1, 10), (2, 20), (3, 30)], &[(2, 20), (3, 30), (1, 10)])]
#[case(&[(7, 0), (700, 0), (70_000, 0), (7_000_000, 0)], &[(7_000_000, 0), (7, 0), (70_000, 0), (700, 0)])]
fn same_keys_same_shape(#[case] a: &[(u64, u64)], #[case] b: &[(u64, u64)]) {
    let map_a = build(a.iter().copied());
    let map_b = build(b.iter().copied());
    assert_eq!(to_dot(map_a.trie()), to_dot(map_b.trie()));
}

/// Larger set: 1000 entries, three orderings.
#[test]
fn insert_order_1000_entries() {
    let entries: Vec<(u64, u64)> = (0..1000).map(|i| (i, i * 7)).collect();

    let forward = build(entries.iter().copied());
    let backward = build(entries.iter().rev().copied());
    let interleaved = build(
        entries
            .iter()
            .step_by(2)
            .chain(entries.iter().skip(1).step_by(2))
            .copied(),
    );

    let shape = to_dot(forward.trie());
    assert_eq!(shape, to_dot(backward.trie()));
    assert_eq!(shape, to_dot(interleaved.trie()));
    assert_eq!(check_invariants(forward.trie()), 1000);
}

/// After overwrite, order independence still holds.
#[test]
fn overwrite_preserves_canonicity() {
    let mut map_a = MutableChampMap::new();
    map_a.insert(1, 10);
    map_a.insert(2, 20);
    map_a.insert(1, 11);

    let mut map_b = MutableChampMap::new();
    map_b.insert(2, 20);
    map_b.insert(1, 11);

    assert_eq!(to_dot(map_a.trie()), to_dot(map_b.trie()));
}

/// After deletes, the tree is the one the survivors build from scratch.
#[test]
fn delete_preserves_canonicity() {
    let mut map_a = build((0..500).map(|i| (i, i)));
    for i in (0..500).filter(|i| i % 3 != 0) {
        map_a.remove(&i);
    }
    let map_b = build((0..500).filter(|i| i % 3 == 0).map(|i| (i, i)));

    assert_eq!(map_a.len(), map_b.len());
    assert_eq!(to_dot(map_a.trie()), to_dot(map_b.trie()));
    check_invariants(map_a.trie());
}

/// Persistent writes build the same shape as in-place writes.
#[test]
fn persistent_and_mutable_agree() {
    let persistent = (0..200_u64).fold(ChampMap::new(), |map, i| map.insert(i, i)).remove(&17);
    let mut mutable = build((0..200).map(|i| (i, i)));
    mutable.remove(&17);
    assert_eq!(to_dot(persistent.trie()), to_dot(mutable.trie()));
}

#[test]
fn dot_output_lists_every_entry() {
    let map = build([(1, 100), (2, 200)]);
    let dot = to_dot(map.trie());
    assert!(dot.starts_with("digraph champ {"));
    assert!(dot.trim_end().ends_with('}'));
    assert!(dot.contains("1: 100"));
    assert!(dot.contains("2: 200"));
}
