use super::check_invariants;
use crate::{ChampMap, MutableChampMap, MutableSequencedChampMap, SequenceConfig};

/// 10 000 entries: insert all, verify all, remove all.
#[test]
fn ten_thousand_entries() {
    let mut map = MutableChampMap::new();
    for i in 0_u64..10_000 {
        map.insert(i, i * 3);
    }
    assert_eq!(map.len(), 10_000);
    assert_eq!(check_invariants(map.trie()), 10_000);

    for i in 0_u64..10_000 {
        assert_eq!(map.get(&i), Some(&(i * 3)), "missing key {i}");
    }

    for i in 0_u64..10_000 {
        assert!(map.remove(&i).is_some(), "failed to remove key {i}");
    }
    assert!(map.is_empty());
    assert!(map.trie().is_empty());
}

/// Insert + overwrite + remove interleaved.
#[test]
fn interleaved_operations() {
    let mut map = MutableChampMap::new();
    for i in 0_u64..2000 {
        map.insert(i, i);
    }
    // Overwrite even keys.
    for i in (0_u64..2000).step_by(2) {
        map.insert(i, i + 1000);
    }
    // Remove odd keys.
    for i in (1_u64..2000).step_by(2) {
        assert!(map.remove(&i).is_some());
    }
    assert_eq!(map.len(), 1000);
    for i in (0_u64..2000).step_by(2) {
        assert_eq!(map.get(&i), Some(&(i + 1000)));
    }
    assert_eq!(check_invariants(map.trie()), 1000);
}

/// Many persistent versions alive at once, each sharing most of its nodes.
#[test]
fn many_live_versions() {
    let base: ChampMap<u64, u64> = (0..5000).map(|i| (i, i)).collect();
    let versions: Vec<ChampMap<u64, u64>> = (0..100).map(|i| base.insert(i, u64::MAX).remove(&(4999 - i))).collect();

    for (i, version) in (0_u64..).zip(&versions) {
        assert_eq!(version.len(), 4999);
        assert_eq!(version.get(&i), Some(&u64::MAX));
        assert!(!version.contains_key(&(4999 - i)));
    }
    assert_eq!(base.len(), 5000);
    assert_eq!(base.get(&0), Some(&0));
}

/// A sequenced map that keeps moving keys around stays ordered and
/// compact, with renumbering forced constantly by a tiny counter range.
#[test]
fn sequenced_churn() {
    let config = SequenceConfig::default().with_counter_limit(64);
    let mut map = MutableSequencedChampMap::with_config(config);
    let mut model: Vec<u32> = Vec::new();

    for round in 0..3000_u32 {
        let key = round % 97;
        model.retain(|k| *k != key);
        if round % 3 == 0 {
            map.put_first(key, round);
            model.insert(0, key);
        } else {
            map.put_last(key, round);
            model.push(key);
        }
        if round % 7 == 0 {
            let victim = model.remove(model.len() / 2);
            assert!(map.remove(&victim).is_some());
        }
    }

    assert_eq!(map.keys().copied().collect::<Vec<_>>(), model);
    assert!(map.trie().iter().all(|entry| entry.sequence().abs() <= 64 + 97));
    check_invariants(map.trie());
}
