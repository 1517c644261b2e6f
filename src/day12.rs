use anyhow::{bail, ensure, Result};

use crate::input;

#[derive(Clone, Copy, Debug)]
struct Action {
    kind: u8,
    value: i64,
}

fn parse(input: &str) -> Result<Vec<Action>> {
    input.lines().map(str::trim).filter(|line| !line.is_empty()).map(|line| {
        let kind = line.as_bytes()[0];
        ensure!(b"NSEWLRF".contains(&kind), "unknown action {:?}", line);
        let value: i64 = input::parse(&line[1 ..])?;
        if matches!(kind, b'L' | b'R') && value % 90 != 0 {bail!("cannot turn by {} degrees", value)};
        Ok(Action {kind, value})
    }).collect()
}

/// Quarter turns clockwise of an (east, north) vector.
fn turn_right((east, north): (i64, i64), degrees: i64) -> (i64, i64) {
    (0 .. degrees.rem_euclid(360) / 90).fold((east, north), |(e, n), _| (n, -e))
}

/// `vector` is the ship's heading, or its waypoint if `waypoint` is set; either way `F`
/// moves the ship by it and `L`/`R` rotate it. `N`/`S`/`E`/`W` move whichever is steered.
fn navigate(actions: &[Action], mut vector: (i64, i64), waypoint: bool) -> i64 {
    let mut ship = (0, 0);
    for &Action {kind, value} in actions {
        let moved = if waypoint {&mut vector} else {&mut ship};
        match kind {
            b'N' => moved.1 += value,
            b'S' => moved.1 -= value,
            b'E' => moved.0 += value,
            b'W' => moved.0 -= value,
            b'L' => vector = turn_right(vector, -value),
            b'R' => vector = turn_right(vector, value),
            _ => {ship.0 += vector.0 * value; ship.1 += vector.1 * value},
        }
    }
    ship.0.abs() + ship.1.abs()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let actions = parse(input)?;
    let distance = if part == 1 {navigate(&actions, (1, 0), false)} else {navigate(&actions, (10, 1), true)};
    Ok(distance.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "F10\nN3\nF7\nR90\nF11\n";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "25");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "286");
    }

    #[test]
    fn turns() {
        assert_eq!(turn_right((10, 4), 90), (4, -10));
        assert_eq!(turn_right((10, 4), -90), (-4, 10));
        assert_eq!(turn_right((10, 4), 180), (-10, -4));
        assert_eq!(turn_right((10, 4), 360), (10, 4));
    }

    #[test]
    fn bad_actions() {
        assert!(solve(1, "R45\n").is_err());
        assert!(solve(1, "X10\n").is_err());
    }
}
