//! Command-line glue for the per-day programs and the combined runner.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use log::{debug, info};
use thiserror::Error;

use crate::Puzzle;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("usage: {program} <input_file>")]
    Day {program: String},
    #[error("usage: {program} <day> [part] [input_file]")]
    Runner {program: String},
    #[error("no puzzle for day {0:?}, expected 1 to 25")]
    UnknownDay(String),
    #[error("part must be 1 or 2, got {0:?}")]
    UnknownPart(String),
}

#[derive(Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub day: u8,
    /// `None` runs every part the day has.
    pub part: Option<u8>,
    pub input: PathBuf,
}

impl RunConfig {
    /// Arguments of a `dayNN <input_file>` program, program name included.
    pub fn for_day(day: u8, args: &[String]) -> Result<RunConfig, UsageError> {
        match args {
            [_, input] => Ok(RunConfig {day, part: None, input: input.into()}),
            _ => Err(UsageError::Day {program: program_name(args, &format!("day{:02}", day))}),
        }
    }

    /// Arguments of `aoc2020 <day> [part] [input_file]`; the input defaults to `day<N>.in`.
    pub fn for_runner(args: &[String]) -> Result<RunConfig, UsageError> {
        let (day_arg, part_arg, input) = match args {
            [_, day_arg] => (day_arg, None, None),
            [_, day_arg, input] => (day_arg, None, Some(input)),
            [_, day_arg, part_arg, input] => (day_arg, Some(part_arg), Some(input)),
            _ => return Err(UsageError::Runner {program: program_name(args, "aoc2020")}),
        };
        let day = day_arg.parse().ok().filter(|day| crate::puzzle(*day).is_some())
            .ok_or_else(|| UsageError::UnknownDay(day_arg.clone()))?;
        let part = part_arg.map(|part_arg| match part_arg.as_str() {
            "1" => Ok(1),
            "2" => Ok(2),
            _ => Err(UsageError::UnknownPart(part_arg.clone())),
        }).transpose()?;
        let input = input.map_or_else(|| PathBuf::from(format!("day{}.in", day)), PathBuf::from);
        Ok(RunConfig {day, part, input})
    }
}

fn program_name(args: &[String], fallback: &str) -> String {
    args.first().cloned().unwrap_or_else(|| fallback.to_owned())
}

/// Reads the input file once and solves the requested parts in order.
pub fn solve_file(puzzle: &Puzzle, part: Option<u8>, path: &Path) -> Result<Vec<String>> {
    let input = fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    debug!("read {} bytes from {}", input.len(), path.display());
    let parts = match part {
        Some(part) => part ..= part,
        None => 1 ..= puzzle.parts,
    };
    parts.map(|part| {
        let time = Instant::now();
        let answer = puzzle.run(part, &input)?;
        info!("day {} part {}: {} seconds elapsed", puzzle.day, part, time.elapsed().as_secs_f32());
        Ok(answer)
    }).collect()
}

pub fn run(config: &RunConfig) -> Result<()> {
    let puzzle = crate::puzzle(config.day).ok_or_else(|| anyhow!("no puzzle for day {}", config.day))?;
    info!("day {}: {}", puzzle.day, puzzle.title);
    for answer in solve_file(puzzle, config.part, &config.input)? {
        println!("{}", answer);
    }
    Ok(())
}

/// Entry point of the `dayNN` programs.
pub fn day_main(day: u8) -> ExitCode {
    env_logger::init();
    let args = std::env::args().collect::<Vec<_>>();
    finish(RunConfig::for_day(day, &args).map_err(Into::into).and_then(|config| run(&config)))
}

/// Entry point of the combined runner.
pub fn runner_main() -> ExitCode {
    env_logger::init();
    let args = std::env::args().collect::<Vec<_>>();
    finish(RunConfig::for_runner(&args).map_err(Into::into).and_then(|config| run(&config)))
}

fn finish(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is::<UsageError>() => {
            eprintln!("{}", err);
            ExitCode::from(1)
        },
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::from(1)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn day_program_takes_exactly_one_file() {
        assert_eq!(
            RunConfig::for_day(3, &args(&["day03", "trees.txt"])),
            Ok(RunConfig {day: 3, part: None, input: "trees.txt".into()}),
        );
        assert_eq!(
            RunConfig::for_day(3, &args(&["day03"])),
            Err(UsageError::Day {program: "day03".into()}),
        );
        assert_eq!(
            RunConfig::for_day(3, &args(&["day03", "a", "b"])).unwrap_err().to_string(),
            "usage: day03 <input_file>",
        );
    }

    #[test]
    fn runner_defaults_to_the_day_input() {
        assert_eq!(
            RunConfig::for_runner(&args(&["aoc2020", "7"])),
            Ok(RunConfig {day: 7, part: None, input: "day7.in".into()}),
        );
        assert_eq!(
            RunConfig::for_runner(&args(&["aoc2020", "7", "bags.txt"])),
            Ok(RunConfig {day: 7, part: None, input: "bags.txt".into()}),
        );
        assert_eq!(
            RunConfig::for_runner(&args(&["aoc2020", "7", "2", "bags.txt"])),
            Ok(RunConfig {day: 7, part: Some(2), input: "bags.txt".into()}),
        );
    }

    #[test]
    fn runner_rejects_bad_arguments() {
        assert_eq!(RunConfig::for_runner(&args(&["aoc2020", "26"])), Err(UsageError::UnknownDay("26".into())));
        assert_eq!(RunConfig::for_runner(&args(&["aoc2020", "x"])), Err(UsageError::UnknownDay("x".into())));
        assert_eq!(
            RunConfig::for_runner(&args(&["aoc2020", "1", "3", "f"])),
            Err(UsageError::UnknownPart("3".into())),
        );
        assert_eq!(RunConfig::for_runner(&args(&["aoc2020"])), Err(UsageError::Runner {program: "aoc2020".into()}));
    }

    #[test]
    fn missing_file_is_an_error() {
        let Some(day1) = crate::puzzle(1) else {panic!("no day 1")};
        let err = solve_file(day1, None, Path::new("/nonexistent/day1.in")).unwrap_err();
        assert!(err.to_string().contains("cannot read"), "{:#}", err);
    }
}
