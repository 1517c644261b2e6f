use std::fs;

use assert_cmd::Command;
use predicates::str::contains;
use tempfile::TempDir;

const REPORT: &str = "1721\n979\n366\n299\n675\n1456\n";

fn day(n: u8) -> Command {
    Command::cargo_bin(format!("day{:02}", n)).unwrap()
}

fn runner() -> Command {
    Command::cargo_bin("aoc2020").unwrap()
}

fn input_file(dir: &TempDir, name: &str, text: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, text).unwrap();
    path.to_str().unwrap().to_owned()
}

#[test]
fn day_program_prints_both_parts() {
    let dir = TempDir::new().unwrap();
    let report = input_file(&dir, "report.txt", REPORT);
    day(1).arg(&report).assert().success().stdout("514579\n241861950\n");
}

#[test]
fn day_25_has_one_answer() {
    let dir = TempDir::new().unwrap();
    let keys = input_file(&dir, "keys.txt", "5764801\n17807724\n");
    day(25).arg(&keys).assert().success().stdout("14897079\n");
}

#[test]
fn wrong_argument_count_prints_usage() {
    day(6).assert().code(1).stderr(contains("usage:")).stdout("");
    day(6).args(["a", "b"]).assert().code(1).stderr(contains("<input_file>"));
}

#[test]
fn missing_file_fails() {
    day(1).arg("/nonexistent/report.txt").assert().code(1).stderr(contains("cannot read"));
}

#[test]
fn bad_input_fails() {
    let dir = TempDir::new().unwrap();
    let answers = input_file(&dir, "answers.txt", "abC\n");
    day(6).arg(&answers).assert().code(1).stderr(contains("error:")).stdout("");
}

#[test]
fn runner_picks_day_and_part() {
    let dir = TempDir::new().unwrap();
    let report = input_file(&dir, "report.txt", REPORT);
    runner().args(["1", report.as_str()]).assert().success().stdout("514579\n241861950\n");
    runner().args(["1", "2", report.as_str()]).assert().success().stdout("241861950\n");
}

#[test]
fn runner_reads_the_default_input() {
    let dir = TempDir::new().unwrap();
    input_file(&dir, "day1.in", REPORT);
    runner().current_dir(dir.path()).arg("1").assert().success().stdout("514579\n241861950\n");
}

#[test]
fn runner_rejects_unknown_days() {
    runner().arg("26").assert().code(1).stderr(contains("no puzzle for day"));
}
