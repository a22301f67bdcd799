// --dump prints the compiled bytecode listing without running anything.
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
fn dump_lists_run_length_encoded_instructions() {
    let file = program_file("+++[-].");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("--dump")
        .arg(file.path())
        .assert()
        .success()
        .stdout(
            predicate::str::contains("0: + 3")
                .and(predicate::str::contains("1: [ 4"))
                .and(predicate::str::contains("3: ] 2")),
        );
}

#[test]
fn dump_does_not_execute() {
    let file = program_file("+++.");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("--dump")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\u{3}").not());
}

#[test]
fn dump_still_rejects_unbalanced_brackets() {
    let file = program_file("]");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("--dump")
        .arg(file.path())
        .assert()
        .code(255)
        .stderr(predicate::str::contains("unmatched ']'"));
}
