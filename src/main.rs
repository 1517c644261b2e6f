use std::process::ExitCode;

fn main() -> ExitCode {
    aoc2020::cli::runner_main()
}
