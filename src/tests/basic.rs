use super::check_invariants;
use crate::{ChampMap, ChampSet, MutableChampMap, MutableChampSet};

#[test]
fn empty_map() {
    let map: MutableChampMap<String, i32> = MutableChampMap::new();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
    assert!(map.trie().is_empty());
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn insert_one() {
    let mut map = MutableChampMap::new();
    let old = map.insert("hello", 42);
    assert_eq!(old, None);
    assert_eq!(map.len(), 1);
    assert!(!map.is_empty());
}

#[test]
fn insert_and_get() {
    let mut map = MutableChampMap::new();
    map.insert("key", 100);
    assert_eq!(map.get("key"), Some(&100));
}

#[test]
fn get_missing_key() {
    let mut map = MutableChampMap::new();
    map.insert("a", 1);
    assert_eq!(map.get("b"), None);
}

#[test]
fn unit_value_is_distinguishable_from_absence() {
    let mut map = MutableChampMap::new();
    map.insert(1, ());
    assert_eq!(map.get(&1), Some(&()));
    assert_eq!(map.get(&2), None);
}

#[test]
fn borrowed_lookup() {
    let mut map = MutableChampMap::new();
    map.insert(String::from("owned"), 1);
    assert_eq!(map.get("owned"), Some(&1));
    assert!(map.contains_key("owned"));
    assert_eq!(map.remove("owned"), Some(1));
}

#[test]
fn insert_multiple() {
    let mut map = MutableChampMap::new();
    for i in 0..10 {
        map.insert(i, i * 10);
    }
    assert_eq!(map.len(), 10);
    for i in 0..10 {
        assert_eq!(map.get(&i), Some(&(i * 10)));
    }
    assert_eq!(check_invariants(map.trie()), 10);
}

#[test]
fn overwrite_value() {
    let mut map = MutableChampMap::new();
    assert_eq!(map.insert("k", 1), None);
    assert_eq!(map.insert("k", 2), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("k"), Some(&2));
}

#[test]
fn contains_key_true() {
    let mut map = MutableChampMap::new();
    map.insert(42, "val");
    assert!(map.contains_key(&42));
}

#[test]
fn contains_key_false() {
    let mut map = MutableChampMap::new();
    map.insert(1, "a");
    assert!(!map.contains_key(&2));
}

#[test]
fn remove_existing() {
    let mut map = MutableChampMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    assert_eq!(map.remove("a"), Some(1));
    assert_eq!(map.len(), 1);
    assert_eq!(map.get("a"), None);
    assert_eq!(map.get("b"), Some(&2));
}

#[test]
fn remove_missing() {
    let mut map = MutableChampMap::new();
    map.insert("a", 1);
    assert_eq!(map.remove("z"), None);
    assert_eq!(map.len(), 1);
}

#[test]
fn remove_all_leaves_empty_root() {
    let mut map = MutableChampMap::new();
    for i in 0..50 {
        map.insert(i, i);
    }
    for i in 0..50 {
        map.remove(&i);
    }
    assert!(map.is_empty());
    assert!(map.trie().is_empty());
    assert_eq!(check_invariants(map.trie()), 0);
}

#[test]
fn clear_map() {
    let mut map: MutableChampMap<i32, i32> = (0..20).map(|i| (i, i)).collect();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.get(&3), None);
}

#[test]
fn iter_visits_every_entry_once() {
    let map: MutableChampMap<u32, u32> = (0..300).map(|i| (i, i * 2)).collect();
    let mut seen: Vec<(u32, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    seen.sort_unstable();
    assert_eq!(seen, (0..300).map(|i| (i, i * 2)).collect::<Vec<_>>());
    assert_eq!(map.iter().len(), 300);
}

#[test]
fn persistent_insert_and_remove() {
    let empty = ChampMap::new();
    let one = empty.insert("a", 1);
    let two = one.insert("b", 2);
    let back = two.remove("b");

    assert!(empty.is_empty());
    assert_eq!(one.len(), 1);
    assert_eq!(two.len(), 2);
    assert_eq!(back.len(), 1);
    assert_eq!(back.get("a"), Some(&1));
    assert_eq!(back, one);
}

#[test]
fn persistent_overwrite() {
    let map = ChampMap::new().insert("k", 1);
    let updated = map.insert("k", 2);
    assert_eq!(map.get("k"), Some(&1));
    assert_eq!(updated.get("k"), Some(&2));
    assert_eq!(updated.len(), 1);
}

#[test]
fn set_basics() {
    let mut set = MutableChampSet::new();
    assert!(set.insert("x"));
    assert!(!set.insert("x"));
    assert!(set.contains("x"));
    assert_eq!(set.len(), 1);
    assert!(set.remove("x"));
    assert!(!set.remove("x"));
    assert!(set.is_empty());
}

#[test]
fn persistent_set_basics() {
    let set: ChampSet<u8> = [1, 2, 3].into_iter().collect();
    let more = set.insert(4);
    let fewer = set.remove(&1);
    assert_eq!(set.len(), 3);
    assert_eq!(more.len(), 4);
    assert_eq!(fewer.len(), 2);
    assert_eq!(set.get(&2), Some(&2));
    assert!(!fewer.contains(&1));
}
