use std::collections::HashMap;

use rstest::rstest;

use super::check_invariants;
use crate::dot::to_dot;
use crate::event;
use crate::{ChampMap, ChampSet, Entry, MutableChampMap, MutableSequencedChampSet, SequencedChampMap, Trie};

fn map_of(keys: impl IntoIterator<Item = u32>, tag: u32) -> ChampMap<u32, u32> {
    keys.into_iter().map(|k| (k, k * 10 + tag)).collect()
}

#[rstest]
#[case::disjoint(0..100, 100..200)]
#[case::overlapping(0..150, 50..200)]
#[case::contained(0..200, 50..60)]
#[case::containing(50..60, 0..200)]
#[case::left_empty(0..0, 0..50)]
#[case::right_empty(0..50, 0..0)]
#[case::large(0..3000, 1500..4500)]
fn union_matches_model(#[case] left: std::ops::Range<u32>, #[case] right: std::ops::Range<u32>) {
    let a = map_of(left.clone(), 1);
    let b = map_of(right.clone(), 2);

    let mut model: HashMap<u32, u32> = left.map(|k| (k, k * 10 + 1)).collect();
    model.extend(right.map(|k| (k, k * 10 + 2)));

    let merged = a.union(&b);
    assert_eq!(merged.len(), model.len());
    assert_eq!(check_invariants(merged.trie()), model.len());
    for (k, v) in &model {
        assert_eq!(merged.get(k), Some(v), "key {k}");
    }

    // Same tree as inserting the union one by one.
    let rebuilt: ChampMap<u32, u32> = model.into_iter().collect();
    assert_eq!(to_dot(merged.trie()), to_dot(rebuilt.trie()));

    // Inputs untouched.
    assert_eq!(check_invariants(a.trie()), a.len());
    assert_eq!(check_invariants(b.trie()), b.len());
}

#[test]
fn duplicate_count() {
    let mut left = Trie::new();
    let mut right = Trie::new();
    for i in 0..100_u32 {
        left.update(Entry::new(i, 'l'), event::replace_value);
    }
    for i in 60..160_u32 {
        right.update(Entry::new(i, 'r'), event::replace_value);
    }

    assert_eq!(left.merge_all(&right), 40);
    assert_eq!(left.find(&70).map(Entry::value), Some(&'r'));
    assert_eq!(left.find(&10).map(Entry::value), Some(&'l'));
}

#[test]
fn union_with_self_shares_everything() {
    let a = map_of(0..500, 0);
    let merged = a.union(&a);
    assert_eq!(merged.len(), 500);
    assert!(merged.ptr_eq(&a));
}

#[test]
fn union_with_empty_shares_the_other_side() {
    let a = map_of(0..100, 0);
    assert!(a.union(&ChampMap::new()).ptr_eq(&a));
    assert!(ChampMap::new().union(&a).ptr_eq(&a));
}

#[test]
fn union_of_sets() {
    let a: ChampSet<&str> = ["x", "y"].into_iter().collect();
    let b: ChampSet<&str> = ["y", "z"].into_iter().collect();
    let merged = a.union(&b);
    assert_eq!(merged.len(), 3);
    assert!(["x", "y", "z"].iter().all(|s| merged.contains(s)));
}

#[test]
fn mutable_union_in_place() {
    let mut map: MutableChampMap<u32, u32> = (0..10).map(|i| (i, i)).collect();
    let other = map_of(5..15, 0);
    map.union(&other);
    assert_eq!(map.len(), 15);
    assert_eq!(map.get(&7), Some(&70));
    assert_eq!(map.get(&2), Some(&2));
}

#[test]
fn sequenced_union_appends_in_order() {
    let a: SequencedChampMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    let b: SequencedChampMap<&str, i32> = [("c", 3), ("a", 10)].into_iter().collect();
    let merged = a.union(&b);
    let pairs: Vec<(&str, i32)> = merged.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(pairs, [("a", 10), ("b", 2), ("c", 3)]);

    let mut set: MutableSequencedChampSet<u8> = [3, 1].into_iter().collect();
    set.union(&[2, 3, 0].into_iter().collect());
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [3, 1, 2, 0]);
}
