use std::process::ExitCode;

fn main() -> ExitCode {
    aoc2020::cli::day_main(9)
}
