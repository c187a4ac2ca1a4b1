//! Integration tests for `BinaryTreeMap`.

use bintree_map::comparator::{self, FloatOrder, IntegerOrder, SharedComparator, StringOrder};
use bintree_map::{BinaryTreeMap, Map, MapError, MapIterator};
use rstest::{fixture, rstest};
use std::collections::HashSet;
use std::hash::{BuildHasher, BuildHasherDefault, DefaultHasher};

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn integer_order() -> SharedComparator<i32> {
    comparator::shared(IntegerOrder)
}

fn string_map(entries: &[(&str, i32)]) -> BinaryTreeMap<String, i32> {
    let mut map = BinaryTreeMap::with_comparator(StringOrder);
    for &(key, value) in entries {
        map.put(key.to_string(), value);
    }
    map
}

fn integer_map(
    order: &SharedComparator<i32>,
    entries: &[(i32, &'static str)],
) -> BinaryTreeMap<i32, &'static str> {
    let mut map = BinaryTreeMap::new(order.clone());
    for &(key, value) in entries {
        map.put(key, value);
    }
    map
}

fn hash_of<T: std::hash::Hash>(value: &T) -> u64 {
    BuildHasherDefault::<DefaultHasher>::default().hash_one(value)
}

// =============================================================================
// Basic Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_map(integer_order: SharedComparator<i32>) {
    let map: BinaryTreeMap<i32, String> = BinaryTreeMap::new(integer_order);
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.iter().next(), None);
}

#[rstest]
fn test_with_capacity_creates_empty_map(integer_order: SharedComparator<i32>) {
    let mut map: BinaryTreeMap<i32, i32> = BinaryTreeMap::with_capacity(integer_order, 16);
    assert!(map.is_empty());
    map.put(1, 1);
    assert_eq!(map.len(), 1);
}

// =============================================================================
// Size Tests
// =============================================================================

#[rstest]
fn test_string_keys_size_follows_put_remove_clear() {
    let mut map = string_map(&[
        ("bb", 2),
        ("ab", 1),
        ("cd", 3),
        ("aa", 1324),
        ("ac", 3241),
        ("ad", 6),
    ]);
    assert_eq!(map.len(), 6);

    assert_eq!(map.remove(&"bb".to_string()), Some(2));
    assert_eq!(map.len(), 5);

    map.clear();
    assert_eq!(map.len(), 0);
    assert!(map.is_empty());
}

#[rstest]
fn test_is_empty_tracks_every_mutation(integer_order: SharedComparator<i32>) {
    let mut map = BinaryTreeMap::new(integer_order);
    assert!(map.is_empty());

    map.put(1, "one");
    assert!(!map.is_empty());

    map.remove(&1);
    assert!(map.is_empty());

    map.put(2, "two");
    map.put(3, "three");
    let mut cursor = map.iterator();
    while cursor.next().is_some() {
        cursor.remove();
    }
    drop(cursor);
    assert!(map.is_empty());
}

// =============================================================================
// Get / Put / Remove Tests
// =============================================================================

#[rstest]
fn test_put_replaces_value_and_keeps_size(integer_order: SharedComparator<i32>) {
    let mut map = integer_map(&integer_order, &[(5, "five"), (3, "three")]);
    assert_eq!(map.put(5, "FIVE"), Some("five"));
    assert_eq!(map.get(&5), Some(&"FIVE"));
    assert_eq!(map.len(), 2);
}

#[rstest]
fn test_get_absent_key_returns_none(integer_order: SharedComparator<i32>) {
    let map = integer_map(&integer_order, &[(5, "five")]);
    assert_eq!(map.get(&6), None);
    assert!(!map.contains_key(&6));
    assert!(map.contains_key(&5));
}

#[rstest]
fn test_remove_absent_key_returns_none(integer_order: SharedComparator<i32>) {
    let mut map = integer_map(&integer_order, &[(5, "five")]);
    assert_eq!(map.remove(&6), None);
    assert_eq!(map.len(), 1);
}

#[rstest]
fn test_remove_entry_returns_stored_key() {
    let mut map = string_map(&[("key", 1)]);
    assert_eq!(
        map.remove_entry(&"key".to_string()),
        Some(("key".to_string(), 1))
    );
}

#[rstest]
fn test_contains_value_uses_value_comparator() {
    let mut map = BinaryTreeMap::natural();
    map.put(1, "one".to_string());
    map.put(2, "two".to_string());

    assert!(map.contains_value(&"two".to_string(), &StringOrder));
    assert!(!map.contains_value(&"three".to_string(), &StringOrder));

    let by_length = |first: &String, second: &String| first.len().cmp(&second.len());
    assert!(map.contains_value(&"six".to_string(), &by_length));
}

#[rstest]
fn test_float_keys_with_total_order() {
    let mut map = BinaryTreeMap::with_comparator(FloatOrder);
    map.put(2.5_f64, "b");
    map.put(-1.0, "a");
    map.put(f64::NAN, "nan");
    map.put(f64::NAN, "nan again");

    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&f64::NAN), Some(&"nan again"));
    assert_eq!(map.min(), Some((&-1.0, &"a")));
}

// =============================================================================
// put_all Tests
// =============================================================================

#[rstest]
fn test_put_all_merges_same_comparator(integer_order: SharedComparator<i32>) {
    let mut target = integer_map(
        &integer_order,
        &[(5, "five"), (3, "three"), (10, "ten")],
    );
    let source = integer_map(
        &integer_order,
        &[
            (5, "five,eh"),
            (1, "one,eh"),
            (7, "seven,eh"),
            (12, "twelve,eh"),
        ],
    );

    assert_eq!(target.put_all(&source), Ok(()));

    assert_eq!(target.len(), 6);
    assert_eq!(target.get(&5), Some(&"five,eh"));
    assert_eq!(target.get(&3), Some(&"three"));
    assert_eq!(
        target.keys().copied().collect::<Vec<_>>(),
        vec![1, 3, 5, 7, 10, 12]
    );
    assert_eq!(source.len(), 4);
}

#[rstest]
fn test_put_all_rejects_different_comparator(integer_order: SharedComparator<i32>) {
    let mut target = integer_map(&integer_order, &[(5, "five"), (30, "thirty")]);
    let by_text = |first: &i32, second: &i32| first.to_string().cmp(&second.to_string());
    let mut source = BinaryTreeMap::with_comparator(by_text);
    source.put(4, "four");
    source.put(100, "hundred");

    let result = target.put_all(&source);

    assert_eq!(
        result,
        Err(MapError::IncompatibleComparator {
            operation: "put_all"
        })
    );
    assert_eq!(target.len(), 2);
    assert!(!target.contains_key(&4));
    assert_eq!(target.keys().copied().collect::<Vec<_>>(), vec![5, 30]);
}

#[rstest]
fn test_put_all_rejects_equal_but_distinct_comparators() {
    let mut target: BinaryTreeMap<i32, i32> = BinaryTreeMap::with_comparator(IntegerOrder);
    let source: BinaryTreeMap<i32, i32> = BinaryTreeMap::with_comparator(IntegerOrder);
    assert!(target.put_all(&source).is_err());
}

#[rstest]
fn test_put_all_from_empty_map_is_noop(integer_order: SharedComparator<i32>) {
    let mut target = integer_map(&integer_order, &[(1, "one")]);
    let source = integer_map(&integer_order, &[]);
    assert_eq!(target.put_all(&source), Ok(()));
    assert_eq!(target.len(), 1);
}

// =============================================================================
// Equality and Hash Tests
// =============================================================================

#[rstest]
fn test_equality_ignores_values(integer_order: SharedComparator<i32>) {
    let first = integer_map(&integer_order, &[(1, "one"), (2, "two")]);
    let second = integer_map(&integer_order, &[(2, "deux"), (1, "un")]);
    assert_eq!(first, second);
    assert!(first.map_eq(&second));
}

#[rstest]
fn test_equality_requires_same_keys(integer_order: SharedComparator<i32>) {
    let first = integer_map(&integer_order, &[(1, "one"), (2, "two")]);
    let second = integer_map(&integer_order, &[(1, "one"), (3, "two")]);
    let shorter = integer_map(&integer_order, &[(1, "one")]);
    assert_ne!(first, second);
    assert_ne!(first, shorter);
}

#[rstest]
fn test_equality_across_comparators_compares_contents() {
    let mut first = BinaryTreeMap::with_comparator(IntegerOrder);
    let mut second = BinaryTreeMap::natural();
    for key in [3, 1, 2] {
        first.put(key, ());
        second.put(key, ());
    }
    assert_eq!(first, second);
}

#[rstest]
fn test_hash_is_insertion_order_independent(integer_order: SharedComparator<i32>) {
    let ascending = integer_map(&integer_order, &[(1, "one"), (2, "two"), (3, "three")]);
    let scrambled = integer_map(&integer_order, &[(2, "two"), (3, "three"), (1, "one")]);

    assert_eq!(ascending.map_hash(), scrambled.map_hash());
    assert_eq!(hash_of(&ascending), hash_of(&scrambled));
}

#[rstest]
fn test_hash_depends_on_values(integer_order: SharedComparator<i32>) {
    let first = integer_map(&integer_order, &[(1, "one")]);
    let second = integer_map(&integer_order, &[(1, "uno")]);
    assert_ne!(first.map_hash(), second.map_hash());
}

#[rstest]
fn test_empty_map_hash_is_zero(integer_order: SharedComparator<i32>) {
    let map = integer_map(&integer_order, &[]);
    assert_eq!(map.map_hash(), 0);
}

#[rstest]
fn test_maps_usable_as_hash_set_members(integer_order: SharedComparator<i32>) {
    let mut set = HashSet::new();
    set.insert(hash_of(&integer_map(&integer_order, &[(1, "one")])));
    set.insert(hash_of(&integer_map(&integer_order, &[(1, "one")])));
    assert_eq!(set.len(), 1);
}

// =============================================================================
// Iteration Tests
// =============================================================================

#[rstest]
fn test_iter_is_ascending() {
    let map = string_map(&[("bb", 2), ("ab", 1), ("cd", 3), ("aa", 0)]);
    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["aa", "ab", "bb", "cd"]);
    let values: Vec<i32> = map.values().copied().collect();
    assert_eq!(values, vec![0, 1, 2, 3]);
}

#[rstest]
fn test_for_loop_over_reference(integer_order: SharedComparator<i32>) {
    let map = integer_map(&integer_order, &[(2, "two"), (1, "one")]);
    let mut collected = Vec::new();
    for (key, value) in &map {
        collected.push((*key, *value));
    }
    assert_eq!(collected, vec![(1, "one"), (2, "two")]);
}

#[rstest]
fn test_into_iter_is_ascending_and_reversible(integer_order: SharedComparator<i32>) {
    let map = integer_map(&integer_order, &[(2, "two"), (3, "three"), (1, "one")]);
    let reversed: Vec<i32> = map.into_iter().rev().map(|(key, _)| key).collect();
    assert_eq!(reversed, vec![3, 2, 1]);
}

#[rstest]
fn test_cursor_yields_owned_entries(integer_order: SharedComparator<i32>) {
    let mut map = integer_map(&integer_order, &[(2, "two"), (1, "one")]);
    let mut cursor = map.iterator();
    assert!(cursor.has_next());

    let mut first = cursor.next().unwrap();
    assert_eq!(first.key(), &1);
    first.set_value("changed locally");
    assert!(cursor.has_next());
    cursor.next();
    assert!(!cursor.has_next());
    assert_eq!(cursor.next(), None);
    drop(cursor);

    assert_eq!(map.get(&1), Some(&"one"));
}

#[rstest]
fn test_cursor_remove_every_other_entry(integer_order: SharedComparator<i32>) {
    let entries: Vec<(i32, &str)> = [50, 30, 70, 20, 40, 60, 80, 35, 45, 65]
        .into_iter()
        .map(|key| (key, "value"))
        .collect();
    let mut map = integer_map(&integer_order, &entries);

    let mut produced = Vec::new();
    let mut cursor = map.iterator();
    let mut remove = false;
    while let Some(entry) = cursor.next() {
        produced.push(*entry.key());
        if remove {
            assert_eq!(cursor.remove(), Some("value"));
        }
        remove = !remove;
    }
    drop(cursor);

    assert_eq!(produced, vec![20, 30, 35, 40, 45, 50, 60, 65, 70, 80]);
    assert_eq!(
        map.keys().copied().collect::<Vec<_>>(),
        vec![20, 35, 45, 60, 70]
    );
    assert_eq!(map.len(), 5);
}

#[rstest]
fn test_cursor_through_map_trait(integer_order: SharedComparator<i32>) {
    fn drain_matching<M: Map<i32, &'static str>>(map: &mut M, key: i32) -> Option<&'static str> {
        let mut cursor = map.iterator();
        while let Some(entry) = cursor.next() {
            if *entry.key() == key {
                return cursor.remove();
            }
        }
        None
    }

    let mut map = integer_map(&integer_order, &[(1, "one"), (2, "two")]);
    assert_eq!(drain_matching(&mut map, 2), Some("two"));
    assert_eq!(drain_matching(&mut map, 2), None);
    assert_eq!(Map::len(&map), 1);
}

// =============================================================================
// Display Tests
// =============================================================================

#[rstest]
fn test_display_lists_entries_in_order() {
    let map = string_map(&[("b", 2), ("a", 1)]);
    assert_eq!(format!("{map}"), "{a: 1, b: 2}");
}
