use anyhow::{ensure, Result};

use crate::input;

/// The number spoken on turn `turns` (1-based).
fn spoken(start: &[u32], turns: usize) -> u32 {
    if turns <= start.len() {return start[turns - 1]};
    let largest = start.iter().copied().max().unwrap_or(0) as usize;
    // last_turn[n]: the turn n was last spoken on, before the current one; 0 for never
    let mut last_turn = vec![0u32; turns.max(largest + 1)];
    for (turn, &n) in start[.. start.len() - 1].iter().enumerate() {
        last_turn[n as usize] = turn as u32 + 1;
    }
    let mut current = start[start.len() - 1];
    for turn in start.len() as u32 .. turns as u32 {
        let previous = std::mem::replace(&mut last_turn[current as usize], turn);
        current = if previous == 0 {0} else {turn - previous};
    }
    current
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let start: Vec<u32> = input::comma_separated(input)?;
    ensure!(!start.is_empty(), "no starting numbers");
    let turns = if part == 1 {2020} else {30_000_000};
    Ok(spoken(&start, turns).to_string())
}
