use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("viewedit");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("viewedit"))
        .stdout(contains("--mock"));
}

#[test]
fn rejects_seed_without_mock() {
    let mut cmd = cargo::cargo_bin_cmd!("viewedit");
    cmd.args(["--seed", "7"])
        .assert()
        .failure()
        .stderr(contains("--mock"));
}

#[test]
fn reports_mixed_output_formats_before_starting() {
    let mut cmd = cargo::cargo_bin_cmd!("viewedit");
    cmd.args(["-o", "a.json", "b.yaml", "--force"])
        .assert()
        .failure()
        .stderr(contains("align extensions"));
}
