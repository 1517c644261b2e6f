use anyhow::{bail, Result};
use itertools::Itertools;

use crate::input;

/// Sorted joltages from the outlet (0) through the adapters to the device (max + 3).
fn chain(input: &str) -> Result<Vec<u64>> {
    let mut joltages: Vec<u64> = input::numbers(input)?;
    joltages.push(0);
    joltages.sort_unstable();
    let device = joltages[joltages.len() - 1] + 3;
    joltages.push(device);
    if let Some((a, b)) = joltages.iter().tuple_windows().find(|(a, b)| !(1 ..= 3).contains(&(*b - *a))) {
        bail!("cannot connect {} jolts to {} jolts", a, b);
    }
    Ok(joltages)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let joltages = chain(input)?;
    if part == 1 {
        let gaps = joltages.iter().tuple_windows().map(|(a, b)| b - a).counts();
        let count = |gap: u64| gaps.get(&gap).copied().unwrap_or(0);
        Ok((count(1) * count(3)).to_string())
    } else {
        // ways[i]: arrangements ending at joltages[i]
        let mut ways = vec![0u64; joltages.len()];
        ways[0] = 1;
        for ix in 1 .. joltages.len() {
            ways[ix] = (ix.saturating_sub(3) .. ix)
                .filter(|&jx| joltages[ix] - joltages[jx] <= 3)
                .map(|jx| ways[jx])
                .sum();
        }
        Ok(ways[ways.len() - 1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = "16\n10\n15\n5\n1\n11\n7\n19\n6\n12\n4\n";
    const LARGE: &str = "\
28\n33\n18\n42\n31\n14\n46\n20\n48\n47\n24\n23\n49\n45\n19\n38\n39\n11\n1\n32\n25\n35\n8\n17\n7\n9\n4\n2\n34\n10\n3\n";

    #[test]
    fn example() {
        assert_eq!(solve(1, SMALL).unwrap(), "35");
        assert_eq!(solve(2, SMALL).unwrap(), "8");
        assert_eq!(solve(1, LARGE).unwrap(), "220");
        assert_eq!(solve(2, LARGE).unwrap(), "19208");
    }

    #[test]
    fn gap_too_wide() {
        assert!(solve(1, "1\n5\n").is_err());
        assert!(solve(1, "1\n1\n").is_err());
    }
}
