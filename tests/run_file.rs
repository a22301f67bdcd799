// End-to-end runs of source files through the compile-then-execute
// pipeline.
use std::io::Write;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

const HELLO_WORLD: &str =
    "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";

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
fn hello_world_runs_to_completion() {
    let file = program_file(HELLO_WORLD);
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg(file.path())
        .assert()
        .success()
        .stdout("Hello World!\n\n");
}

#[test]
fn comment_text_is_ignored() {
    let file = program_file("say three: +++ then print one byte .");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg(file.path())
        .assert()
        .success()
        .stdout("\u{3}\n");
}

#[test]
fn comment_only_program_prints_just_the_trailing_newline() {
    let file = program_file("no operators in here at all");
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg(file.path())
        .assert()
        .success()
        .stdout("\n");
}

#[test]
fn missing_file_fails_with_a_read_error() {
    cargo_bin()
        .timeout(Duration::from_secs(5))
        .arg("definitely-not-here.bf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read"));
}
