//! Binary smoke tests for argument handling.
//!
//! These only exercise invocations that exit before any network activity.

use assert_cmd::Command;
use predicates::prelude::*;

fn vidfetch() -> Command {
    Command::cargo_bin("vidfetch").expect("binary built")
}

#[test]
fn help_lists_page_arguments() {
    vidfetch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("START_PAGE"))
        .stdout(predicate::str::contains("--end-page"))
        .stdout(predicate::str::contains("--output-dir"));
}

#[test]
fn version_prints_package_version() {
    vidfetch()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_start_page_fails_with_usage() {
    vidfetch()
        .assert()
        .failure()
        .stderr(predicate::str::contains("START_PAGE"));
}

#[test]
fn zero_start_page_is_rejected() {
    vidfetch()
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn unknown_flag_is_rejected() {
    vidfetch()
        .args(["3", "--threads", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn end_page_below_start_page_fails() {
    vidfetch()
        .args(["5", "--end-page", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--end-page"));
}
