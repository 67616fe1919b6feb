//! End-to-end checks of the overflow-safe binary: stdout line and exit status.

use std::io::Write;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_overflow-safe"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("run overflow-safe")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn no_arguments_reports_overflow() {
    let output = run_cli(&[]);
    assert_eq!(stdout(&output), "Overflow detected\n");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn boundary_scenarios() {
    let cases: &[(&str, &str, &str, i32)] = &[
        ("127", "1", "Overflow detected\n", 1),
        ("126", "1", "a = 127\n", 0),
        ("1", "1", "a = 2\n", 0),
        ("-128", "-1", "a = 127\n", 0),
        ("0", "0", "a = 0\n", 0),
    ];
    for (a, add, expected, code) in cases {
        let output = run_cli(&["--a", a, "--add", add]);
        assert_eq!(stdout(&output), *expected, "{} + {}", a, add);
        assert_eq!(output.status.code(), Some(*code), "{} + {}", a, add);
    }
}

#[test]
fn policy_and_narrowing_flags() {
    let output = run_cli(&["--a", "-128", "--add", "-1", "--policy", "symmetric"]);
    assert_eq!(stdout(&output), "Overflow detected\n");
    assert_eq!(output.status.code(), Some(1));

    let output = run_cli(&["--a", "-128", "--add", "-1", "--narrowing", "saturating"]);
    assert_eq!(stdout(&output), "a = -128\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn run_file_is_applied() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "a = 100\nadd = 27").unwrap();
    let path = file.path().to_str().unwrap();

    let output = run_cli(&["--config", path]);
    assert_eq!(stdout(&output), "a = 127\n");
    assert_eq!(output.status.code(), Some(0));

    let output = run_cli(&["--config", path, "--add", "28"]);
    assert_eq!(stdout(&output), "Overflow detected\n");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn invalid_input_is_a_usage_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "a = 300").unwrap();
    let output = run_cli(&["--config", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());

    let output = run_cli(&["--a", "128"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn verbose_logs_stay_off_stdout() {
    let output = run_cli(&["--verbose", "--a", "5", "--add", "5"]);
    assert_eq!(stdout(&output), "a = 10\n");
    assert_eq!(output.status.code(), Some(0));
}
