//! Solutions to the 25 puzzles of Advent of Code 2020.
//!
//! Every day lives in its own module and exposes `solve(part, input)`, which
//! parses the puzzle text and returns the answer for part 1 or part 2. The days
//! share nothing but the parsing helpers in [`input`] and the command-line glue
//! in [`cli`].

use anyhow::{ensure, Context, Result};

pub mod cli;
pub mod input;

pub mod day01;
pub mod day02;
pub mod day03;
pub mod day04;
pub mod day05;
pub mod day06;
pub mod day07;
pub mod day08;
pub mod day09;
pub mod day10;
pub mod day11;
pub mod day12;
pub mod day13;
pub mod day14;
pub mod day15;
pub mod day16;
pub mod day17;
pub mod day18;
pub mod day19;
pub mod day20;
pub mod day21;
pub mod day22;
pub mod day23;
pub mod day24;
pub mod day25;

pub type Solver = fn(u8, &str) -> Result<String>;

pub struct Puzzle {
    pub day: u8,
    pub title: &'static str,
    /// Day 25 only has a first part.
    pub parts: u8,
    solve: Solver,
}

impl Puzzle {
    const fn new(day: u8, title: &'static str, solve: Solver) -> Puzzle {
        Puzzle {day, title, parts: if day == 25 {1} else {2}, solve}
    }

    pub fn run(&self, part: u8, input: &str) -> Result<String> {
        ensure!((1 ..= self.parts).contains(&part), "day {} has no part {}", self.day, part);
        (self.solve)(part, input).with_context(|| format!("day {} ({}) part {}", self.day, self.title, part))
    }
}

pub static PUZZLES: [Puzzle; 25] = [
    Puzzle::new(1, "Report Repair", day01::solve),
    Puzzle::new(2, "Password Philosophy", day02::solve),
    Puzzle::new(3, "Toboggan Trajectory", day03::solve),
    Puzzle::new(4, "Passport Processing", day04::solve),
    Puzzle::new(5, "Binary Boarding", day05::solve),
    Puzzle::new(6, "Custom Customs", day06::solve),
    Puzzle::new(7, "Handy Haversacks", day07::solve),
    Puzzle::new(8, "Handheld Halting", day08::solve),
    Puzzle::new(9, "Encoding Error", day09::solve),
    Puzzle::new(10, "Adapter Array", day10::solve),
    Puzzle::new(11, "Seating System", day11::solve),
    Puzzle::new(12, "Rain Risk", day12::solve),
    Puzzle::new(13, "Shuttle Search", day13::solve),
    Puzzle::new(14, "Docking Data", day14::solve),
    Puzzle::new(15, "Rambunctious Recitation", day15::solve),
    Puzzle::new(16, "Ticket Translation", day16::solve),
    Puzzle::new(17, "Conway Cubes", day17::solve),
    Puzzle::new(18, "Operation Order", day18::solve),
    Puzzle::new(19, "Monster Messages", day19::solve),
    Puzzle::new(20, "Jurassic Jigsaw", day20::solve),
    Puzzle::new(21, "Allergen Assessment", day21::solve),
    Puzzle::new(22, "Crab Combat", day22::solve),
    Puzzle::new(23, "Crab Cups", day23::solve),
    Puzzle::new(24, "Lobby Layout", day24::solve),
    Puzzle::new(25, "Combo Breaker", day25::solve),
];

pub fn puzzle(day: u8) -> Option<&'static Puzzle> {
    PUZZLES.get(usize::from(day).checked_sub(1)?)
}

pub(crate) fn gcd(a: u64, b: u64) -> u64 {if b == 0 {a} else {gcd(b, a % b)}}
pub(crate) fn lcm(a: u64, b: u64) -> u64 {a / gcd(a, b) * b}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_in_day_order() {
        for (ix, puzzle) in PUZZLES.iter().enumerate() {
            assert_eq!(usize::from(puzzle.day), ix + 1);
        }
        assert_eq!(puzzle(25).map(|p| p.parts), Some(1));
        assert!(puzzle(0).is_none());
        assert!(puzzle(26).is_none());
    }

    #[test]
    fn rejects_missing_parts() {
        let Some(day25) = puzzle(25) else {panic!("no day 25")};
        assert!(day25.run(2, "5764801\n17807724\n").is_err());
        assert!(day25.run(0, "5764801\n17807724\n").is_err());
    }

    #[test]
    fn gcd_and_lcm() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(lcm(4, 6), 12);
        assert_eq!(lcm(1, 7), 7);
    }
}
