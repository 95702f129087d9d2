//! Largest Remainder (Hamilton) apportionment of a unit capacity across
//! weighted chapters, with a minimum of one unit per chapter.
//!
//! Contract:
//! - Exact shares: `w_i * capacity / W` as integer floor plus remainder
//!   `w_i * capacity % W`. All remainders share the denominator `W`, so they
//!   compare directly; no floats on the decision path.
//! - Every chapter gets at least 1. When that lifts the floors above the
//!   capacity, units are trimmed from the smallest remainders (later items
//!   first on ties), never below 1.
//! - Leftover units go one at a time to the largest remainders; ties go to
//!   the earlier item. The output sums to `capacity` exactly.
//! - `capacity < n`: every chapter gets 1 and a `CapacityInfeasible` warning
//!   rides along with the over-committed result.
//!
//! Determinism:
//! - Output order equals input order; the only tie key is the input index.

use alloc::vec::Vec;

use tp_core::ids::ChapterId;

use super::{AllocError, CapacityInfeasible};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Apportionment {
    /// `(chapter, units)` in input order.
    pub units: Vec<(ChapterId, u64)>,
    pub warning: Option<CapacityInfeasible>,
}

impl Apportionment {
    pub fn total(&self) -> u64 {
        self.units.iter().map(|(_, u)| *u).sum()
    }
}

pub fn allocate_proportional(
    items: &[(ChapterId, u32)],
    capacity: u64,
) -> Result<Apportionment, AllocError> {
    if items.is_empty() {
        return Err(AllocError::EmptyItemSet);
    }
    let n = items.len() as u64;
    let total_weight: u128 = items.iter().map(|(_, w)| *w as u128).sum();
    if total_weight == 0 {
        return Err(AllocError::ZeroTotalWeight);
    }

    if capacity < n {
        return Ok(Apportionment {
            units: items.iter().map(|(id, _)| (id.clone(), 1)).collect(),
            warning: Some(CapacityInfeasible { required: n, capacity }),
        });
    }

    let cap = capacity as u128;
    let mut units: Vec<u64> = Vec::with_capacity(items.len());
    let mut rems: Vec<u128> = Vec::with_capacity(items.len());
    let mut lifted: Vec<bool> = Vec::with_capacity(items.len());
    for (_, w) in items {
        let scaled = *w as u128 * cap;
        // floor <= capacity, so it fits in u64.
        let floor = (scaled / total_weight) as u64;
        units.push(floor.max(1));
        rems.push(scaled % total_weight);
        lifted.push(floor == 0);
    }

    let assigned: u64 = units.iter().sum();
    if assigned < capacity {
        distribute_leftovers(capacity - assigned, &mut units, &rems, &lifted);
    } else if assigned > capacity {
        trim_over_allocation(assigned - capacity, &mut units, &rems);
    }
    debug_assert_eq!(units.iter().sum::<u64>(), capacity);

    Ok(Apportionment {
        units: items.iter().map(|(id, _)| id.clone()).zip(units).collect(),
        warning: None,
    })
}

/// Hand out `extra` units by remainder ↓, then input index ↑. Chapters lifted
/// to the minimum already hold more than their share and are skipped.
fn distribute_leftovers(extra: u64, units: &mut [u64], rems: &[u128], lifted: &[bool]) {
    let mut ranking: Vec<usize> = (0..units.len()).filter(|&i| !lifted[i]).collect();
    if ranking.is_empty() {
        ranking = (0..units.len()).collect();
    }
    ranking.sort_by(|&a, &b| rems[b].cmp(&rems[a]).then_with(|| a.cmp(&b)));

    let mut given = 0u64;
    let mut idx = 0usize;
    while given < extra {
        units[ranking[idx]] += 1;
        given += 1;
        idx += 1;
        if idx == ranking.len() {
            idx = 0;
        }
    }
}

/// Remove `excess` units by remainder ↑, then input index ↓, never taking a
/// chapter below 1.
fn trim_over_allocation(excess: u64, units: &mut [u64], rems: &[u128]) {
    let mut ranking: Vec<usize> = (0..units.len()).collect();
    ranking.sort_by(|&a, &b| rems[a].cmp(&rems[b]).then_with(|| b.cmp(&a)));

    let mut taken = 0u64;
    while taken < excess {
        let mut progressed = false;
        for &i in &ranking {
            if taken == excess {
                break;
            }
            if units[i] > 1 {
                units[i] -= 1;
                taken += 1;
                progressed = true;
            }
        }
        if !progressed {
            // Every chapter is at the minimum; capacity >= n makes this unreachable.
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn items(ws: &[u32]) -> Vec<(ChapterId, u32)> {
        ws.iter()
            .enumerate()
            .map(|(i, w)| (("ch".to_string() + &i.to_string()).parse().unwrap(), *w))
            .collect()
    }

    fn units(a: &Apportionment) -> Vec<u64> {
        a.units.iter().map(|(_, u)| *u).collect()
    }

    #[test]
    fn equal_weights_tie_goes_to_first() {
        let a = allocate_proportional(&items(&[1, 1, 1]), 10).unwrap();
        assert_eq!(units(&a), vec![4, 3, 3]);
        assert!(a.warning.is_none());
    }

    #[test]
    fn largest_remainder_wins_leftover() {
        // shares 2.0, 3.0, 5.0 of 10 -> exact
        let a = allocate_proportional(&items(&[2, 3, 5]), 10).unwrap();
        assert_eq!(units(&a), vec![2, 3, 5]);
        // shares 1.67, 3.33, 5.0 of 10: leftover goes to the .67
        let a = allocate_proportional(&items(&[1, 2, 3]), 10).unwrap();
        assert_eq!(units(&a), vec![2, 3, 5]);
    }

    #[test]
    fn minimum_one_is_trimmed_back_to_capacity() {
        // shares 0.06, 0.06, 4.88: two lifted to 1, heavy one trimmed.
        let a = allocate_proportional(&items(&[1, 1, 80]), 5).unwrap();
        assert_eq!(units(&a), vec![1, 1, 3]);
        assert_eq!(a.total(), 5);
    }

    #[test]
    fn capacity_below_chapter_count_is_over_committed() {
        let a = allocate_proportional(&items(&[3, 1, 2, 5]), 2).unwrap();
        assert_eq!(units(&a), vec![1, 1, 1, 1]);
        assert_eq!(a.warning, Some(CapacityInfeasible { required: 4, capacity: 2 }));
    }

    #[test]
    fn empty_and_zero_weight_inputs() {
        assert_eq!(allocate_proportional(&[], 10), Err(AllocError::EmptyItemSet));
        assert_eq!(allocate_proportional(&items(&[0, 0]), 10), Err(AllocError::ZeroTotalWeight));
    }

    #[test]
    fn teaching_block_sums_exactly() {
        let a = allocate_proportional(&items(&[5, 4, 1, 3, 2, 5, 1]), 936).unwrap();
        assert_eq!(a.total(), 936);
        assert!(units(&a).iter().all(|&u| u >= 1));
    }
}
