use std::collections::{HashMap, VecDeque};

use proptest::prelude::*;

use super::check_invariants;
use crate::dot::to_dot;
use crate::{ChampMap, MutableChampMap, MutableSequencedChampSet, SequenceConfig};

#[derive(Clone, Debug)]
enum MapOp {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
    Snapshot,
}

#[derive(Clone, Debug)]
enum OrderOp {
    Insert(u8),
    AddFirst(u8),
    AddLast(u8),
    Remove(u8),
    RemoveFirst,
    RemoveLast,
}

fn map_ops() -> impl Strategy<Value = Vec<MapOp>> {
    // Narrow key range so removals and overwrites actually hit.
    let key = 0u16..512;
    let op = prop_oneof![
        50 => (key.clone(), any::<u32>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        25 => key.clone().prop_map(MapOp::Remove),
        20 => key.prop_map(MapOp::Get),
        5 => Just(MapOp::Snapshot),
    ];
    prop::collection::vec(op, 0..=600)
}

fn order_ops() -> impl Strategy<Value = Vec<OrderOp>> {
    let key = 0u8..40;
    let op = prop_oneof![
        20 => key.clone().prop_map(OrderOp::Insert),
        20 => key.clone().prop_map(OrderOp::AddFirst),
        20 => key.clone().prop_map(OrderOp::AddLast),
        20 => key.prop_map(OrderOp::Remove),
        10 => Just(OrderOp::RemoveFirst),
        10 => Just(OrderOp::RemoveLast),
    ];
    prop::collection::vec(op, 0..=400)
}

fn move_to_front(model: &mut VecDeque<u8>, key: u8) {
    model.retain(|k| *k != key);
    model.push_front(key);
}

fn move_to_back(model: &mut VecDeque<u8>, key: u8) {
    model.retain(|k| *k != key);
    model.push_back(key);
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        max_shrink_iters: 10_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_map_matches_model(ops in map_ops()) {
        let mut map: MutableChampMap<u16, u32> = MutableChampMap::new();
        let mut model: HashMap<u16, u32> = HashMap::new();
        let mut snapshots: Vec<(ChampMap<u16, u32>, HashMap<u16, u32>)> = Vec::new();

        for op in ops {
            match op {
                MapOp::Insert(key, value) => {
                    prop_assert_eq!(map.insert(key, value), model.insert(key, value));
                }
                MapOp::Remove(key) => {
                    prop_assert_eq!(map.remove(&key), model.remove(&key));
                }
                MapOp::Get(key) => {
                    prop_assert_eq!(map.get(&key), model.get(&key));
                }
                MapOp::Snapshot => snapshots.push((map.to_immutable(), model.clone())),
            }
            prop_assert_eq!(map.len(), model.len());
        }

        prop_assert_eq!(check_invariants(map.trie()), model.len());
        let rebuilt: ChampMap<u16, u32> = model.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(to_dot(map.trie()), to_dot(rebuilt.trie()));

        // Later writes never leak into earlier snapshots.
        for (snapshot, expected) in &snapshots {
            prop_assert_eq!(snapshot.len(), expected.len());
            prop_assert_eq!(check_invariants(snapshot.trie()), expected.len());
            for (k, v) in expected {
                prop_assert_eq!(snapshot.get(k), Some(v));
            }
        }
    }

    #[test]
    fn prop_insertion_order_is_irrelevant(keys in prop::collection::hash_set(any::<u32>(), 0..300)) {
        let forward: ChampMap<u32, ()> = keys.iter().map(|k| (*k, ())).collect();
        let mut sorted: Vec<u32> = keys.into_iter().collect();
        sorted.sort_unstable();
        let ascending: ChampMap<u32, ()> = sorted.iter().map(|k| (*k, ())).collect();
        let descending: ChampMap<u32, ()> = sorted.iter().rev().map(|k| (*k, ())).collect();

        prop_assert_eq!(to_dot(forward.trie()), to_dot(ascending.trie()));
        prop_assert_eq!(to_dot(ascending.trie()), to_dot(descending.trie()));
    }

    #[test]
    fn prop_union_matches_model(
        left in prop::collection::hash_map(0u16..400, any::<u8>(), 0..200),
        right in prop::collection::hash_map(0u16..400, any::<u8>(), 0..200),
    ) {
        let a: ChampMap<u16, u8> = left.iter().map(|(k, v)| (*k, *v)).collect();
        let b: ChampMap<u16, u8> = right.iter().map(|(k, v)| (*k, *v)).collect();
        let mut model = left;
        model.extend(right);

        let merged = a.union(&b);
        prop_assert_eq!(merged.len(), model.len());
        prop_assert_eq!(check_invariants(merged.trie()), model.len());
        for (k, v) in &model {
            prop_assert_eq!(merged.get(k), Some(v));
        }
    }

    #[test]
    fn prop_sequenced_set_matches_model(ops in order_ops(), counter_limit in 2i32..64) {
        let config = SequenceConfig::default().with_counter_limit(counter_limit);
        let mut set = MutableSequencedChampSet::with_config(config);
        let mut model: VecDeque<u8> = VecDeque::new();

        for op in ops {
            match op {
                OrderOp::Insert(key) => {
                    set.insert(key);
                    if !model.contains(&key) {
                        model.push_back(key);
                    }
                }
                OrderOp::AddFirst(key) => {
                    set.add_first(key);
                    move_to_front(&mut model, key);
                }
                OrderOp::AddLast(key) => {
                    set.add_last(key);
                    move_to_back(&mut model, key);
                }
                OrderOp::Remove(key) => {
                    let present = model.contains(&key);
                    model.retain(|k| *k != key);
                    prop_assert_eq!(set.remove(&key), present);
                }
                OrderOp::RemoveFirst => prop_assert_eq!(set.remove_first(), model.pop_front()),
                OrderOp::RemoveLast => prop_assert_eq!(set.remove_last(), model.pop_back()),
            }
            prop_assert_eq!(set.len(), model.len());
            prop_assert_eq!(set.first(), model.front());
            prop_assert_eq!(set.last(), model.back());
        }

        let forward: Vec<u8> = set.iter().copied().collect();
        prop_assert_eq!(&forward, &model.iter().copied().collect::<Vec<_>>());
        let mut backward: Vec<u8> = set.iter_rev().copied().collect();
        backward.reverse();
        prop_assert_eq!(backward, forward);
        prop_assert_eq!(check_invariants(set.trie()), model.len());
    }
}
