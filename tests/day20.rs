use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("day20_part1").unwrap();
    cmd.args(["inputs/day20_sample.txt", "--threshold", "20"]);

    cmd.assert().success().stdout(str::contains("5 cheat ways"));
}

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("day20_part2").unwrap();
    cmd.args(["inputs/day20_sample.txt", "--threshold", "50"]);

    cmd.assert().success().stdout(str::contains("285"));
}

#[test]
fn default_threshold_finds_nothing_on_sample() {
    let mut cmd = Command::cargo_bin("day20_part1").unwrap();
    cmd.arg("inputs/day20_sample.txt");

    cmd.assert().success().stdout(str::contains("0 cheat ways"));
}
