use anyhow::{anyhow, bail, Result};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::input;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Mask {
    ones: u64,
    zeros: u64,
    floating: u64,
}

impl Mask {
    fn parse(bits: &str) -> Mask {
        bits.bytes().fold(Mask::default(), |mask, bit| Mask {
            ones: mask.ones << 1 | (bit == b'1') as u64,
            zeros: mask.zeros << 1 | (bit == b'0') as u64,
            floating: mask.floating << 1 | (bit == b'X') as u64,
        })
    }

    fn value(&self, value: u64) -> u64 {
        value & !self.zeros | self.ones
    }

    /// Every address a write to `address` lands on.
    fn addresses(&self, address: u64) -> impl Iterator<Item = u64> {
        let base = (address | self.ones) & !self.floating;
        let floating = self.floating;
        // walks the subsets of `floating` downwards, ending with the empty one
        let mut subset = Some(floating);
        std::iter::from_fn(move || {
            let current = subset?;
            subset = current.checked_sub(1).map(|next| next & floating);
            Some(base | current)
        })
    }
}

enum Line {
    Mask(Mask),
    Write {address: u64, value: u64},
}

fn parse(input: &str) -> Result<Vec<Line>> {
    let mask_re = Regex::new(r"^mask = ([01X]{36})$")?;
    let write_re = Regex::new(r"^mem\[(\d+)\] = (\d+)$")?;
    input.lines().map(str::trim).filter(|line| !line.is_empty()).map(|line| {
        if let Some(caps) = mask_re.captures(line) {
            Ok(Line::Mask(Mask::parse(&caps[1])))
        } else if let Some(caps) = write_re.captures(line) {
            Ok(Line::Write {address: input::parse(&caps[1])?, value: input::parse(&caps[2])?})
        } else {
            Err(anyhow!("malformed line {:?}", line))
        }
    }).collect()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut memory: FxHashMap<u64, u64> = FxHashMap::default();
    let mut mask = None;
    for line in parse(input)? {
        match line {
            Line::Mask(new) => mask = Some(new),
            Line::Write {address, value} => {
                let Some(mask) = mask else {bail!("mem[{}] written before any mask", address)};
                if part == 1 {
                    memory.insert(address, mask.value(value));
                } else {
                    memory.extend(mask.addresses(address).map(|address| (address, value)));
                }
            },
        }
    }
    Ok(memory.values().sum::<u64>().to_string())
}
