use key_index::{EmptyTreeError, Marker, OrderedKeyIndex};

use std::collections::{BTreeMap, HashSet};

use crate::Op;

/// Applies a set of operations to an index and a `BTreeMap` model.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same keys and occurrences in both.
fn do_ops<K>(
    ops: &[Op<K>],
    index: &mut OrderedKeyIndex<K>,
    map: &mut BTreeMap<K, Vec<Marker>>,
) where
    K: Clone + Ord,
{
    for op in ops {
        match op {
            Op::Insert(k, m) => {
                index.insert(k.clone(), *m);
                map.entry(k.clone()).or_default().push(*m);
            }
            Op::Remove(k) => {
                index.remove(k);
                map.remove(k);
            }
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut index = OrderedKeyIndex::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut index, &mut map);
    index
        .iter()
        .eq(map.iter().map(|(k, m)| (k, m.as_slice())))
}

#[quickcheck]
fn in_order_keys_strictly_increase(xs: Vec<i16>) -> bool {
    let index: OrderedKeyIndex<_> = xs.iter().map(|x| (*x, 0)).collect();
    let keys: Vec<_> = index.iter().map(|(k, _)| *k).collect();

    keys.windows(2).all(|w| w[0] < w[1])
}

#[quickcheck]
fn size_counts_distinct_keys(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut index: OrderedKeyIndex<_> = xs.iter().map(|x| (*x, 0)).collect();
    for r in &removes {
        index.remove(r);
    }

    let inserted: HashSet<_> = xs.into_iter().collect();
    let removed: HashSet<_> = removes.into_iter().collect();
    index.size() == inserted.difference(&removed).count() && index.size() >= index.height()
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let index: OrderedKeyIndex<_> = xs.iter().map(|x| (*x, 0)).collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !index.contains(x) && index.search(x).is_empty())
}

#[quickcheck]
fn with_removals(xs: Vec<(i8, Marker)>, removes: Vec<i8>) -> bool {
    let mut index: OrderedKeyIndex<_> = xs.iter().copied().collect();
    let before = index.clone();
    for r in &removes {
        index.remove(r);
    }

    // Every key that survived keeps exactly the occurrences it had.
    let survivors_unchanged = before
        .iter()
        .filter(|(k, _)| !removes.contains(*k))
        .all(|(k, occurrences)| index.search(k) == occurrences);

    removes.iter().all(|r| !index.contains(r)) && survivors_unchanged
}

#[quickcheck]
fn occurrences_keep_insertion_order(key: u8, markers: Vec<Marker>) -> bool {
    let mut index = OrderedKeyIndex::new();
    for m in &markers {
        index.insert(key, *m);
    }

    index.search(&key) == markers.as_slice() && index.size() == usize::from(!markers.is_empty())
}

#[quickcheck]
fn min_and_max_match_model(xs: Vec<i8>) -> bool {
    let index: OrderedKeyIndex<_> = xs.iter().map(|x| (*x, 0)).collect();

    match (xs.iter().min(), xs.iter().max()) {
        (Some(min), Some(max)) => index.find_min() == Ok(min) && index.find_max() == Ok(max),
        _ => index.find_min() == Err(EmptyTreeError) && index.find_max() == Err(EmptyTreeError),
    }
}
