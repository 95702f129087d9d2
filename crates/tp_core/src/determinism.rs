//! Determinism utilities: first-appearance grouping and distinct counts.
//!
//! The engine breaks every tie by the original item order, so the order in
//! which chapters first appear in the source data must survive grouping.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Group `(key, value)` pairs by key, keeping groups in first-appearance
/// order and values in encounter order.
pub fn group_in_first_appearance_order<K, V, I>(pairs: I) -> Vec<(K, Vec<V>)>
where
    K: Ord + Clone,
    I: IntoIterator<Item = (K, V)>,
{
    let mut slot: BTreeMap<K, usize> = BTreeMap::new();
    let mut groups: Vec<(K, Vec<V>)> = Vec::new();
    for (k, v) in pairs {
        match slot.get(&k) {
            Some(&i) => groups[i].1.push(v),
            None => {
                slot.insert(k.clone(), groups.len());
                groups.push((k, alloc::vec![v]));
            }
        }
    }
    groups
}

/// Count distinct values (by `Ord`).
pub fn count_distinct<T: Ord>(values: &[T]) -> usize {
    let mut refs: Vec<&T> = values.iter().collect();
    refs.sort_unstable();
    refs.dedup();
    refs.len()
}
