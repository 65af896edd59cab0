//! Percentage breakdowns of categorical counts.

use shared::DistributionSlice;
use std::collections::HashMap;
use std::hash::Hash;

/// `round(100 * count / total)`, with the total floored at one
pub fn percentage(count: u64, total: u64) -> u32 {
    let total = total.max(1);
    (100.0 * count as f64 / total as f64).round() as u32
}

/// Build slices from pre-counted categories.
///
/// Categories keep their given order; zero counts are dropped and each
/// percentage is rounded on its own, so the total may be off 100 by a point.
pub fn slices_from_counts<S>(counts: &[(S, u64)]) -> Vec<DistributionSlice>
where
    S: AsRef<str>,
{
    let total: u64 = counts.iter().map(|(_, count)| *count).sum();
    counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| DistributionSlice {
            label: label.as_ref().to_string(),
            count: *count,
            percentage: percentage(*count, total),
        })
        .collect()
}

/// Weighted breakdown of `items` over the categories in `order`.
///
/// Items whose category is not listed in `order` are ignored.
pub fn summarize_weighted<K, I, L>(order: &[K], label: L, items: I) -> Vec<DistributionSlice>
where
    K: Eq + Hash + Copy,
    I: IntoIterator<Item = (K, u64)>,
    L: Fn(&K) -> &'static str,
{
    let mut totals: HashMap<K, u64> = HashMap::new();
    for (key, weight) in items {
        *totals.entry(key).or_insert(0) += weight;
    }
    let counts: Vec<(&str, u64)> = order
        .iter()
        .map(|key| (label(key), totals.get(key).copied().unwrap_or(0)))
        .collect();
    slices_from_counts(&counts)
}

/// Occurrence breakdown of `items` over the categories in `order`
pub fn summarize<K, I, L>(order: &[K], label: L, items: I) -> Vec<DistributionSlice>
where
    K: Eq + Hash + Copy,
    I: IntoIterator<Item = K>,
    L: Fn(&K) -> &'static str,
{
    summarize_weighted(order, label, items.into_iter().map(|key| (key, 1)))
}
