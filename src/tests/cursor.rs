use crate::cursor::CursorSource;
use crate::{ChampError, MutableChampMap, MutableChampSet, MutableSequencedChampMap, MutableSequencedChampSet};

#[test]
fn detects_insert_after_creation() {
    let mut map: MutableChampMap<u32, u32> = (0..10).map(|i| (i, i)).collect();
    let mut cursor = map.cursor();
    assert!(cursor.next(&map).is_ok());

    map.insert(99, 99);
    let err = cursor.next(&map).unwrap_err();
    assert_eq!(
        err,
        ChampError::ConcurrentModification {
            expected: 10,
            actual: 11,
        }
    );
}

#[test]
fn detects_removal_and_clear() {
    let mut set: MutableSequencedChampSet<u8> = (0..5).collect();
    let mut cursor = set.cursor();
    set.remove(&3);
    assert!(matches!(cursor.next(&set), Err(ChampError::ConcurrentModification { .. })));

    let mut cursor = set.cursor();
    set.clear();
    assert!(matches!(cursor.next(&set), Err(ChampError::ConcurrentModification { .. })));
}

#[test]
fn detects_reordering() {
    let mut set: MutableSequencedChampSet<u8> = (0..5).collect();
    let mut cursor = set.cursor();
    set.add_first(4);
    assert!(cursor.next(&set).is_err());
}

#[test]
fn value_replacement_is_not_a_modification() {
    let mut map: MutableSequencedChampMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    let mut cursor = map.cursor();
    map.insert("a", 10);
    map.put_last("b", 20);

    let first = cursor.next(&map).unwrap().map(|entry| entry.into_parts());
    assert_eq!(first, Some(("a", 1)));
}

#[test]
fn lone_survivor_move_is_not_a_modification() {
    let mut set: MutableSequencedChampSet<u8> = (1..=3).collect();
    set.remove(&2);
    set.remove(&1);
    let mut cursor = set.cursor();
    assert!(!set.add_first(3));
    assert_eq!(cursor.next(&set).unwrap().map(|entry| *entry.key()), Some(3));
}

#[test]
fn remove_from_a_collection_without_the_key() {
    let source: MutableChampMap<u32, u32> = (0..10).map(|i| (i, i)).collect();
    let mut other: MutableChampMap<u32, u32> = (10..20).map(|i| (i, i)).collect();
    let mut cursor = source.cursor();
    assert!(cursor.next(&source).unwrap().is_some());

    assert_eq!(cursor.remove(&mut other), Err(ChampError::CursorState));
    assert_eq!(other.len(), 10);
    assert!(cursor.next(&source).unwrap().is_some());
}

#[test]
fn own_removals_are_allowed() {
    let mut set: MutableChampSet<u32> = (0..100).collect();
    let mut cursor = set.cursor();
    let mut visited = 0;
    while let Some(entry) = cursor.next(&set).unwrap() {
        visited += 1;
        if entry.key() % 3 != 0 {
            cursor.remove(&mut set).unwrap();
        }
    }
    assert_eq!(visited, 100);
    assert_eq!(set.len(), 34);
    assert!(set.iter().all(|k| k % 3 == 0));
}

#[test]
fn sequenced_cursor_in_order_with_removal() {
    let mut map = MutableSequencedChampMap::new();
    for key in ["c", "a", "d", "b"] {
        map.put_last(key, key.len());
    }
    let mut cursor = map.cursor();
    let mut seen = Vec::new();
    while let Some(entry) = cursor.next(&map).unwrap() {
        seen.push(*entry.key());
        if *entry.key() == "a" {
            cursor.remove(&mut map).unwrap();
        }
    }
    assert_eq!(seen, ["c", "a", "d", "b"]);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["c", "d", "b"]);

    let mut reverse = map.cursor_rev();
    assert_eq!(reverse.next(&map).unwrap().map(|entry| *entry.key()), Some("b"));
    assert_eq!(reverse.remaining(), 2);
}

#[test]
fn remove_without_current_element() {
    let mut set: MutableChampSet<u32> = (0..3).collect();
    let mut cursor = set.cursor();
    assert_eq!(cursor.remove(&mut set), Err(ChampError::CursorState));

    assert!(cursor.next(&set).unwrap().is_some());
    assert_eq!(cursor.remove(&mut set), Ok(()));
    assert_eq!(cursor.remove(&mut set), Err(ChampError::CursorState));
    assert_eq!(set.len(), 2);
}

#[test]
fn snapshot_outlives_further_writes() {
    let mut map: MutableChampMap<u32, u32> = (0..4).map(|i| (i, i)).collect();
    let mut cursor = map.cursor();
    let before = map.modification_count();
    map.clear();
    assert_ne!(map.modification_count(), before);
    // The cursor still holds the old tree, but refuses to hand it out.
    assert_eq!(cursor.remaining(), 4);
    assert!(cursor.next(&map).is_err());
}

#[test]
fn error_messages() {
    let err = ChampError::ConcurrentModification { expected: 3, actual: 5 };
    assert_eq!(
        err.to_string(),
        "collection modified during iteration (expected modification count 3, found 5)"
    );
    assert_eq!(ChampError::CursorState.to_string(), "cursor has no current element to remove");
}
