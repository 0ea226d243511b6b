//! Grouped ranking
//!
//! Ranks are computed in descending order (highest value = rank 1) inside each
//! group independently. Ties receive the average of the positions they occupy:
//!
//! ```text
//! values: 48  45  45  42
//! ranks:   1 2.5 2.5   4
//! ```

use std::collections::HashMap;

use super::types::{CountryRanks, Resort};

/// Rank values in descending order with average tie ranks
///
/// The returned vector is index-aligned with `values`.
pub fn rank_descending(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[b].total_cmp(&values[a]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }

        // Positions start+1 ..= end share their mean
        let shared = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = shared;
        }
        start = end;
    }

    ranks
}

/// Rank `value` of every item within the group selected by `key`
///
/// Result is index-aligned with `items`; an item's rank depends only on the
/// items sharing its key.
pub fn rank_within_groups<T, K, V>(items: &[T], key: K, value: V) -> Vec<f64>
where
    K: Fn(&T) -> &str,
    V: Fn(&T) -> f64,
{
    let mut groups: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, item) in items.iter().enumerate() {
        groups.entry(key(item)).or_default().push(idx);
    }

    let mut ranks = vec![0.0; items.len()];
    for members in groups.values() {
        let values: Vec<f64> = members.iter().map(|&i| value(&items[i])).collect();
        for (&idx, rank) in members.iter().zip(rank_descending(&values)) {
            ranks[idx] = rank;
        }
    }

    ranks
}

/// Attach per-country ranks for elevation, price, slopes and cannons
pub fn assign_country_ranks(resorts: &mut [Resort]) {
    let elevation = rank_within_groups(resorts, country_of, |r| r.highest_point);
    let price = rank_within_groups(resorts, country_of, |r| r.price);
    let slopes = rank_within_groups(resorts, country_of, |r| r.total_slopes);
    let cannons = rank_within_groups(resorts, country_of, |r| r.snow_cannons);

    for (idx, resort) in resorts.iter_mut().enumerate() {
        resort.ranks = CountryRanks {
            elevation: elevation[idx],
            price: price[idx],
            slopes: slopes[idx],
            cannons: cannons[idx],
        };
    }
}

fn country_of(resort: &Resort) -> &str {
    &resort.country
}
