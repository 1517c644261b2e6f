use anyhow::{bail, Result};

use crate::input;

/// The questions one person answered "yes" to, bit `n` standing for letter `a + n`.
fn answers(line: &str) -> Result<u32> {
    line.bytes().try_fold(0, |set, b| match b {
        b'a' ..= b'z' => Ok(set | 1 << (b - b'a')),
        _ => bail!("unexpected {:?} in answers {:?}", b as char, line),
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut total = 0;
    for group in input::blocks(input) {
        let people = group.iter().map(|line| answers(line.trim())).collect::<Result<Vec<_>>>()?;
        let merged = if part == 1 {
            people.iter().fold(0, |acc, set| acc | set)
        } else {
            people.iter().fold(u32::MAX, |acc, set| acc & set)
        };
        total += merged.count_ones();
    }
    Ok(total.to_string())
}
