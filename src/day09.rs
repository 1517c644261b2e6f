use anyhow::{anyhow, Result};
use itertools::Itertools;

use crate::input;

const PREAMBLE: usize = 25;

/// The first number that is not a sum of two different numbers among the `preamble` before it.
fn first_invalid(numbers: &[u64], preamble: usize) -> Option<u64> {
    numbers.windows(preamble + 1).find_map(|window| {
        let (&target, previous) = window.split_last()?;
        let valid = previous.iter().tuple_combinations().any(|(a, b)| a != b && a + b == target);
        (!valid).then_some(target)
    })
}

/// min + max of a contiguous run of at least two numbers summing to `target`.
fn weakness(numbers: &[u64], target: u64) -> Option<u64> {
    let (mut lo, mut sum) = (0, 0);
    for hi in 0 .. numbers.len() {
        sum += numbers[hi];
        while sum > target {
            sum -= numbers[lo];
            lo += 1;
        }
        if sum == target && hi > lo {
            let (min, max) = numbers[lo ..= hi].iter().minmax().into_option()?;
            return Some(min + max);
        }
    }
    None
}

fn solve_with(part: u8, input: &str, preamble: usize) -> Result<String> {
    let numbers: Vec<u64> = input::numbers(input)?;
    let invalid = first_invalid(&numbers, preamble).ok_or_else(|| anyhow!("every number is a valid sum"))?;
    if part == 1 {return Ok(invalid.to_string())};
    weakness(&numbers, invalid).map(|w| w.to_string())
        .ok_or_else(|| anyhow!("no contiguous run sums to {}", invalid))
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    solve_with(part, input, PREAMBLE)
}
