use anyhow::{anyhow, Result};
use regex::Regex;

use crate::input;

struct Entry<'a> {
    low: usize,
    high: usize,
    letter: u8,
    password: &'a [u8],
}

impl Entry<'_> {
    fn valid_by_count(&self) -> bool {
        (self.low ..= self.high).contains(&self.password.iter().filter(|&&b| b == self.letter).count())
    }

    /// Positions are 1-based; a position past the end never holds the letter.
    fn valid_by_position(&self) -> bool {
        let holds = |pos: usize| pos.checked_sub(1).and_then(|ix| self.password.get(ix)) == Some(&self.letter);
        holds(self.low) ^ holds(self.high)
    }
}

fn parse(input: &str) -> Result<Vec<Entry>> {
    let re = Regex::new(r"^(\d+)-(\d+) ([a-z]): ([a-z]*)$")?;
    input.lines().filter(|line| !line.trim().is_empty()).map(|line| {
        let caps = re.captures(line.trim()).ok_or_else(|| anyhow!("malformed password entry {:?}", line))?;
        Ok(Entry {
            low: input::parse(&caps[1])?,
            high: input::parse(&caps[2])?,
            letter: caps[3].as_bytes()[0],
            password: caps.get(4).map_or(&[][..], |m| m.as_str().as_bytes()),
        })
    }).collect()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let entries = parse(input)?;
    let valid = |entry: &Entry| if part == 1 {entry.valid_by_count()} else {entry.valid_by_position()};
    Ok(entries.iter().filter(|entry| valid(entry)).count().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "1-3 a: abcde\n1-3 b: cdefg\n2-9 c: ccccccccc\n";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "2");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "1");
    }

    #[test]
    fn short_password() {
        assert_eq!(solve(2, "2-9 c: xc\n").unwrap(), "1");
        assert!(solve(1, "2-9 c ccc\n").is_err());
    }
}
