// --debug prints a step-by-step trace table and suppresses program I/O.
use std::io::Write;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bfc").unwrap();
    cmd.env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"));
    cmd
}

fn program_file(source: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, "{source}").unwrap();
    file
}

#[test]
fn debug_prints_the_trace_table() {
    let file = program_file("+++.");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("--debug")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("STEP")
                .and(predicate::str::contains("ACTION"))
                .and(predicate::str::contains("suppressed"))
                .and(predicate::str::contains("\u{3}").not()),
        );
}

#[test]
fn debug_does_not_consume_stdin() {
    let file = program_file(",.");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("-d")
        .arg(file.path())
        .write_stdin("Z")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("end of input").and(predicate::str::contains("Z").not()),
        );
}

#[test]
fn debug_narrates_loop_decisions() {
    let file = program_file("+[-]");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("--debug")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("enter loop").and(predicate::str::contains("exit loop")),
        );
}
