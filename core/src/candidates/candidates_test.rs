use super::*;
use crate::container::Value;

fn positional_candidates() -> Vec<Box<dyn SortedContainer>> {
    vec![
        Box::new(SegmentedList::new()),
        Box::new(SegmentedList::with_load(4)),
        Box::new(SegmentedList::with_key(keyed::identity)),
        Box::new(KeyedCollectionAdapter::identity()),
    ]
}

fn filled(mut obj: Box<dyn SortedContainer>, values: &[Value]) -> Box<dyn SortedContainer> {
    obj.update(values);
    obj
}

#[test]
fn test_update_then_iterate_is_sorted() {
    let values: Vec<Value> = (0..200).rev().collect();
    for obj in positional_candidates() {
        let obj = filled(obj, &values);
        assert_eq!(obj.len(), 200);
        assert_eq!(obj.iter().collect::<Vec<_>>(), (0..200).collect::<Vec<_>>());
    }
}

#[test]
fn test_add_keeps_duplicates_in_order() {
    for mut obj in positional_candidates() {
        for value in [5, 3, 5, 9, 1, 5] {
            obj.add(value);
        }
        assert_eq!(obj.iter().collect::<Vec<_>>(), vec![1, 3, 5, 5, 5, 9]);
        assert_eq!(obj.count(5), 3);
        assert_eq!(obj.bisect_left(5), 2);
        assert_eq!(obj.index_of(5), Some(2));
        assert_eq!(obj.index_of(4), None);
    }
}

#[test]
fn test_positional_reads_and_deletes() {
    let values: Vec<Value> = (0..50).collect();
    for obj in positional_candidates() {
        let mut obj = filled(obj, &values);
        assert_eq!(obj.get(17), Some(17));
        assert_eq!(obj.get(50), None);
        assert_eq!(obj.delete_at(10), Some(10));
        assert_eq!(obj.get(10), Some(11));
        assert_eq!(obj.delete_at(49), None);
        assert_eq!(obj.slice(8, 12), vec![8, 9, 11, 12]);
        assert_eq!(obj.slice(47, 100), vec![48, 49]);
        assert!(obj.slice(30, 30).is_empty());
    }
}

#[test]
fn test_pop_returns_descending_values() {
    let values: Vec<Value> = (0..30).collect();
    for obj in positional_candidates() {
        let mut obj = filled(obj, &values);
        let popped: Vec<Value> = (0..5).filter_map(|_| obj.pop()).collect();
        assert_eq!(popped, vec![29, 28, 27, 26, 25]);
        assert_eq!(obj.len(), 25);
    }
}

#[test]
fn test_remove_and_discard_absent_values() {
    for mut obj in positional_candidates() {
        obj.update(&[1, 2, 3]);
        assert!(obj.remove(2));
        assert!(!obj.remove(2));
        obj.discard(2);
        obj.discard(3);
        assert_eq!(obj.iter().collect::<Vec<_>>(), vec![1]);
        assert!(!obj.contains(3));
        assert!(obj.contains(1));
    }
}

#[test]
fn test_segmented_list_splits_and_merges_sublists() {
    let mut list = SegmentedList::with_load(4);
    for value in 0..40 {
        list.add(value);
    }
    assert!(list.sublist_count() > 1);
    for value in 0..38 {
        assert!(list.remove(value));
    }
    assert_eq!(list.sublist_count(), 1);
    assert_eq!(list.iter().collect::<Vec<_>>(), vec![38, 39]);
    assert_eq!(list.bisect_left(100), 2);
}

fn descending(value: Value) -> Value {
    u64::MAX - value
}

fn decade(value: Value) -> Value {
    value / 10
}

#[test]
fn test_segmented_list_orders_by_key() {
    let mut list = SegmentedList::with_key(descending);
    list.update(&[3, 9, 1]);
    for value in [7, 0, 5] {
        list.add(value);
    }
    assert_eq!(list.iter().collect::<Vec<_>>(), vec![9, 7, 5, 3, 1, 0]);
    assert_eq!(list.pop(), Some(0));
    assert_eq!(list.bisect_left(4), 3);
    assert_eq!(list.index_of(7), Some(1));
    assert!(list.remove(9));
    assert_eq!(list.get(0), Some(7));
}

#[test]
fn test_segmented_list_equal_keys_span_sublists() {
    let mut list = SegmentedList::with_load_and_key(4, decade);
    for value in [12, 15, 11, 19, 13, 12, 17, 14, 16, 18, 25, 5] {
        list.add(value);
    }
    assert!(list.sublist_count() > 1);
    // Items sharing a key stay in insertion order.
    assert_eq!(
        list.iter().collect::<Vec<_>>(),
        vec![5, 12, 15, 11, 19, 13, 12, 17, 14, 16, 18, 25]
    );
    assert_eq!(list.count(12), 2);
    assert_eq!(list.count(10), 0);
    assert!(!list.contains(10));
    assert_eq!(list.index_of(18), Some(10));
    assert_eq!(list.bisect_left(18), 1);
    assert!(list.remove(16));
    assert!(!list.remove(16));
    assert_eq!(list.index_of(18), Some(9));
    assert_eq!(list.len(), 11);
}

#[test]
fn test_keyed_collection_native_api() {
    let mut coll = KeyedCollection::new(keyed::identity);
    coll.insert(4);
    coll.insert(2);
    coll.insert(4);
    assert_eq!(coll.items(), &[2, 4, 4]);
    assert_eq!(coll.index(4), Ok(1));
    assert_eq!(coll.remove(7), Err(keyed::NotPresent(7)));
    assert_eq!(coll.count(4), 2);
}

#[test]
fn test_btree_multiset_basics() {
    let mut set = BTreeMultiset::new();
    set.update(&[3, 1, 3, 2]);
    assert_eq!(set.len(), 4);
    assert_eq!(set.distinct(), 3);
    assert_eq!(set.count(3), 2);
    assert_eq!(set.bisect_left(3), 2);
    assert_eq!(set.pop(), Some(3));
    assert_eq!(set.pop(), Some(3));
    assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(set.get(1), Some(2));
}

#[test]
fn test_standard_table_rejects_duplicates() {
    let mut table = CandidateTable::standard();
    assert_eq!(
        table.names().collect::<Vec<_>>(),
        vec![SEGMENTED_LIST, SEGMENTED_LIST_WITH_KEY, KEYED_COLLECTION, BTREE_MULTISET]
    );
    let err = table
        .register(Candidate::new(SEGMENTED_LIST, Capabilities::ALL, || Box::new(SegmentedList::new())))
        .unwrap_err();
    assert!(err.is_configuration());
    assert!(table.lookup("blist").unwrap_err().is_not_found());
    assert!(!table.lookup(BTREE_MULTISET).unwrap().supports(Capability::GetItem));
}

#[test]
fn test_construct_yields_fresh_instances() {
    let table = CandidateTable::standard();
    let candidate = table.lookup(SEGMENTED_LIST).unwrap();
    let mut first = candidate.construct();
    first.add(1);
    let second = candidate.construct();
    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}
