//! # Pattern Primitives
//!
//! Small sequence operations the callbacks are built from:
//! - [`cyclic_get()`] - `items[i mod len]`
//! - [`rotate()`] - positive `n` rotates right, negative rotates left
//! - [`repeat_to_weight()`] - cycle a pattern until it reaches a target weight
//! - [`partition_by_counts()`] - cut a sequence into groups of given sizes
//! - [`partition_integer_by_ratio()`] - integer parts proportional to a ratio
//!
//! ## Example
//! ```rust
//! use baca::pattern::{partition_integer_by_ratio, rotate};
//!
//! assert_eq!(rotate(&[1, 2, 3, 4], 1), vec![4, 1, 2, 3]);
//! assert_eq!(partition_integer_by_ratio(10, &[1, 1, 1]), vec![3, 4, 3]);
//! ```

use num_rational::Rational64;

/// Item at `index` modulo the slice length. `None` only for empty slices.
pub fn cyclic_get<T>(items: &[T], index: usize) -> Option<&T> {
    if items.is_empty() {
        None
    } else {
        items.get(index % items.len())
    }
}

/// Rotate by `n` positions. Positive `n` moves the last item to the front.
pub fn rotate<T: Clone>(items: &[T], n: i64) -> Vec<T> {
    let mut rotated = items.to_vec();
    if rotated.is_empty() {
        return rotated;
    }
    let len = rotated.len() as i64;
    let shift = n.rem_euclid(len) as usize;
    rotated.rotate_right(shift);
    rotated
}

/// Cycle through `items` one at a time until the running weight reaches
/// `weight`. When the last item overshoots it is dropped, so the total is
/// never more than `weight`.
///
/// `weight_of` gives the (non-negative) weight of an item.
pub fn repeat_to_weight<T, F>(items: &[T], weight: Rational64, weight_of: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Rational64,
{
    let mut result = Vec::new();
    if items.is_empty() {
        return result;
    }
    let mut total = Rational64::from_integer(0);
    let mut i = 0;
    while total < weight {
        let item = items[i % items.len()].clone();
        let item_weight = weight_of(&item);
        if item_weight <= Rational64::from_integer(0) {
            // Zero-weight patterns never converge.
            break;
        }
        total += item_weight;
        result.push(item);
        i += 1;
    }
    if weight < total {
        result.pop();
    }
    result
}

/// Cut `items` into consecutive groups whose sizes are read from `counts`.
///
/// With `cyclic` the counts repeat until the items run out; otherwise each
/// count is used once. With `overhang` whatever is left after the counts are
/// used up (or a final short group) becomes one more group; without it the
/// leftovers are dropped.
pub fn partition_by_counts<T: Clone>(
    items: &[T],
    counts: &[usize],
    cyclic: bool,
    overhang: bool,
) -> Vec<Vec<T>> {
    let mut groups = Vec::new();
    if counts.is_empty() {
        if overhang && !items.is_empty() {
            groups.push(items.to_vec());
        }
        return groups;
    }
    let mut start = 0;
    let mut i = 0;
    while start < items.len() {
        if !cyclic && i == counts.len() {
            break;
        }
        let count = counts[i % counts.len()];
        let stop = start + count;
        if stop > items.len() {
            break;
        }
        groups.push(items[start..stop].to_vec());
        start = stop;
        i += 1;
    }
    if overhang && start < items.len() {
        groups.push(items[start..].to_vec());
    }
    groups
}

/// Partition integer `n` into parts proportional to `ratio`.
///
/// Each cumulative share is rounded (half to even) and the parts are the
/// differences between successive rounded shares, so they always sum to `n`.
/// Negative `n` is partitioned by magnitude and every part negated.
pub fn partition_integer_by_ratio(n: i64, ratio: &[i64]) -> Vec<i64> {
    let weight: i64 = ratio.iter().map(|part| part.abs()).sum();
    if weight == 0 {
        return vec![0; ratio.len()];
    }
    let magnitude = n.abs();
    let sign = if n < 0 { -1 } else { 1 };
    let mut parts = Vec::with_capacity(ratio.len());
    let mut cumulative = 0;
    let mut previous = 0;
    for part in ratio {
        cumulative += part.abs();
        let share = Rational64::new(magnitude * cumulative, weight);
        let rounded = round_half_even(share);
        parts.push(sign * (rounded - previous));
        previous = rounded;
    }
    parts
}

fn round_half_even(value: Rational64) -> i64 {
    let floor = value.floor().to_integer();
    let fraction = value - Rational64::from_integer(floor);
    let half = Rational64::new(1, 2);
    if fraction < half {
        floor
    } else if fraction > half {
        floor + 1
    } else if floor % 2 == 0 {
        floor
    } else {
        floor + 1
    }
}
