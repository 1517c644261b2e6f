use anyhow::{anyhow, bail, ensure, Result};
use log::debug;

use crate::{gcd, input, lcm};

struct Notes {
    earliest: u64,
    /// (offset in the list, bus ID) for every bus in service.
    buses: Vec<(u64, u64)>,
}

fn parse(input: &str) -> Result<Notes> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());
    let (Some(earliest), Some(schedule)) = (lines.next(), lines.next()) else {
        return Err(anyhow!("expected a timestamp line and a bus line"))
    };
    let mut buses = vec![];
    for (offset, bus) in schedule.split(',').enumerate() {
        if bus == "x" {continue};
        let id: u64 = input::parse(bus)?;
        ensure!(id > 0, "bus ID 0 never departs");
        buses.push((offset as u64, id));
    }
    ensure!(!buses.is_empty(), "no bus is in service");
    Ok(Notes {earliest: input::parse(earliest)?, buses})
}

/// Earliest positive t where every bus departs at t + its offset, found by stepping
/// through candidates that already satisfy the buses handled so far.
fn contest(buses: &[(u64, u64)]) -> Result<u64> {
    let (mut t, mut step) = (0, 1);
    for &(offset, id) in buses {
        // t + k * step repeats modulo id after id / gcd(step, id) steps
        let Some(k) = (0 .. id / gcd(step, id)).find(|k| (t + k * step + offset) % id == 0) else {
            bail!("bus {} cannot line up with the buses before it", id);
        };
        t += k * step;
        step = lcm(step, id);
        debug!("bus {} fits at {}, stepping by {}", id, t, step);
    }
    Ok(if t == 0 {step} else {t})
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let notes = parse(input)?;
    if part == 1 {
        let wait = |id: u64| (id - notes.earliest % id) % id;
        notes.buses.iter().map(|&(_, id)| id).min_by_key(|&id| wait(id))
            .map(|id| (id * wait(id)).to_string()).ok_or_else(|| anyhow!("no bus is in service"))
    } else {
        Ok(contest(&notes.buses)?.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "939\n7,13,x,x,59,x,31,19\n";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "295");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "1068781");
    }

    #[test]
    fn contests() {
        for (schedule, expected) in [
            ("17,x,13,19", 3417),
            ("67,7,59,61", 754018),
            ("67,x,7,59,61", 779210),
            ("67,7,x,59,61", 1261476),
            ("1789,37,47,1889", 1202161486),
        ] {
            assert_eq!(solve(2, &format!("0\n{}\n", schedule)).unwrap(), expected.to_string(), "{}", schedule);
        }
    }

    #[test]
    fn unsatisfiable_schedule() {
        assert!(solve(2, "0\n2,4\n").is_err());
        assert!(solve(2, "0\n6,4\n").is_err());
    }

    #[test]
    fn timestamp_is_positive() {
        assert_eq!(solve(2, "0\n7\n").unwrap(), "7");
        assert_eq!(solve(2, "0\n3,x,x,5\n").unwrap(), "12");
    }

    #[test]
    fn missing_schedule() {
        assert!(solve(1, "939\n").is_err());
        assert!(solve(1, "939\nx,x\n").is_err());
    }
}
