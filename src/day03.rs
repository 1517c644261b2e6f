use anyhow::Result;
use log::debug;
use rayon::prelude::*;

use crate::input::Grid;

const SLOPES: [(usize, usize); 5] = [(1, 1), (3, 1), (5, 1), (7, 1), (1, 2)];

/// Trees hit going `right` and `down` per step; the map repeats to the right.
fn trees(map: &Grid, right: usize, down: usize) -> u64 {
    (0 .. map.height).step_by(down).enumerate()
        .filter(|&(step, row)| map.get(row, step * right % map.width) == Some(b'#'))
        .count() as u64
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let map = Grid::parse(input.lines(), b".#")?;
    if part == 1 {
        Ok(trees(&map, 3, 1).to_string())
    } else {
        Ok(SLOPES.par_iter().map(|&(right, down)| {
            let hit = trees(&map, right, down);
            debug!("slope right {} down {}: {} trees", right, down, hit);
            hit
        }).product::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
..##.......
#...#...#..
.#....#..#.
..#.#...#.#
.#...##..#.
..#.##.....
.#.#.#....#
.#........#
#.##...#...
#...##....#
.#..#...#.#
";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "7");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "336");
    }

    #[test]
    fn slope_counts() {
        let map = Grid::parse(EXAMPLE.lines(), b".#").unwrap();
        let counts = SLOPES.iter().map(|&(right, down)| trees(&map, right, down)).collect::<Vec<_>>();
        assert_eq!(counts, vec![2, 7, 3, 4, 2]);
    }

    #[test]
    fn rejects_unknown_cells() {
        assert!(solve(1, "..#\n.o.\n").is_err());
    }
}
