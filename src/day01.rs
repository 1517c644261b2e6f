use std::cmp::Ordering;

use anyhow::{anyhow, Result};

use crate::input;

const TARGET: i64 = 2020;

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut entries: Vec<i64> = input::numbers(input)?;
    entries.sort_unstable();

    let product = if part == 1 {
        pair_product(&entries, TARGET)
    } else {
        (0 .. entries.len()).find_map(|ix|
            pair_product(&entries[ix + 1 ..], TARGET - entries[ix]).map(|p| p * entries[ix])
        )
    };
    product.map(|p| p.to_string()).ok_or_else(|| anyhow!("no entries sum to {}", TARGET))
}

/// Two-pointer scan over sorted entries; each entry is used at most once.
fn pair_product(sorted: &[i64], target: i64) -> Option<i64> {
    let (mut lo, mut hi) = (0, sorted.len().checked_sub(1)?);
    while lo < hi {
        match (sorted[lo] + sorted[hi]).cmp(&target) {
            Ordering::Less => lo += 1,
            Ordering::Greater => hi -= 1,
            Ordering::Equal => return Some(sorted[lo] * sorted[hi]),
        }
    }
    None
}
