use assert_cmd::Command;
use predicates::prelude::predicate::str;

#[test]
fn part1_output_right_answer() {
    let mut cmd = Command::cargo_bin("day18_part1").unwrap();
    cmd.args(["inputs/day18_sample.txt", "7", "--corrupt-size", "12"]);

    cmd.assert().success().stdout(str::contains("22 steps"));
}

#[test]
fn part2_output_right_answer() {
    let mut cmd = Command::cargo_bin("day18_part2").unwrap();
    cmd.args(["inputs/day18_sample.txt", "7"]);

    cmd.assert().success().stdout(str::contains("6,1"));
}

#[test]
fn byte_outside_memory_fails() {
    let mut cmd = Command::cargo_bin("day18_part1").unwrap();
    cmd.args(["inputs/day18_sample.txt", "5"]);

    cmd.assert()
        .failure()
        .stderr(str::contains("outside of memory space"));
}
