use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn rowcsv(args: &[&str], input: &str) -> Output {
    rowcsv_with_env(args, input, &[])
}

fn rowcsv_with_env(args: &[&str], input: &str, env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rowcsv"));
    cmd.args(args).stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped());
    for key in [
        "ROWCSV_LOG_DIR",
        "ROWCSV_LOG_LEVEL",
        "ROWCSV_WRITE_HEADERS",
        "ROWCSV_HEADERS",
        "ROWCSV_TIME_FORMAT",
        "ROWCSV_DELIMITER",
    ] {
        cmd.env_remove(key);
    }
    cmd.envs(env.iter().copied());
    let mut child = cmd.spawn().expect("spawn rowcsv");
    child.stdin.as_mut().unwrap().write_all(input.as_bytes()).unwrap();
    drop(child.stdin.take());
    child.wait_with_output().unwrap()
}

fn stdout(out: &Output) -> String {
    String::from_utf8(out.stdout.clone()).unwrap()
}

fn stderr(out: &Output) -> String {
    String::from_utf8(out.stderr.clone()).unwrap()
}

const PEOPLE: &str = "{\"name\":\"Alice\",\"age\":1,\"bdate\":\"1973-11-29T21:33:09Z\"}\n\n{\"name\":\"Bob\"}\n";

#[test]
fn columns_sorted_and_missing_keys_empty() {
    let out = rowcsv(&[], PEOPLE);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "age,bdate,name\n1,1973-11-29T21:33:09Z,Alice\n,,Bob\n");
}

#[test]
fn time_columns_use_default_rendering() {
    let out = rowcsv(&["--time-columns", "bdate"], PEOPLE);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "age,bdate,name\n1,1973-11-29 21:33:09 +0000 UTC,Alice\n,,Bob\n");
}

#[test]
fn flags_override_config_file() {
    let dir = tempdir().unwrap();
    let cfg = dir.path().join("rowcsv.toml");
    std::fs::write(&cfg, "delimiter = \";\"\ntime_format = \"%Y\"\nheaders = [\"X\", \"Y\", \"Z\"]\n")
        .unwrap();
    let cfg = cfg.to_str().unwrap();

    let from_file = rowcsv(&["--config", cfg, "--time-columns", "bdate"], PEOPLE);
    assert!(from_file.status.success(), "stderr: {}", stderr(&from_file));
    assert_eq!(stdout(&from_file), "X;Y;Z\n1;1973;Alice\n;;Bob\n");

    let overridden = rowcsv(
        &[
            "--config", cfg, "--time-columns", "bdate", "--delimiter", "\\t",
            "--time-format", "%-I:%M%p", "--headers", "A,B,C",
        ],
        PEOPLE,
    );
    assert!(overridden.status.success(), "stderr: {}", stderr(&overridden));
    assert_eq!(stdout(&overridden), "A\tB\tC\n1\t9:33PM\tAlice\n\t\tBob\n");

    let bare = rowcsv(&["--config", cfg, "--no-headers"], PEOPLE);
    assert_eq!(stdout(&bare), "1;1973-11-29T21:33:09Z;Alice\n;;Bob\n");
}

#[test]
fn bad_row_fails_after_earlier_rows() {
    let out = rowcsv(&[], "{\"a\":1}\n[1]\n{\"a\":2}\n");
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(stdout(&out), "a\n1\n");
    assert!(stderr(&out).contains("cursor read error"), "stderr: {}", stderr(&out));
}

#[test]
fn invalid_delimiter_is_reported() {
    let out = rowcsv(&["--delimiter", "\""], PEOPLE);
    assert_eq!(out.status.code(), Some(1));
    assert!(out.stdout.is_empty());
    assert!(stderr(&out).starts_with("rowcsv: "));
}

#[test]
fn output_flag_writes_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    let out = rowcsv(&["--output", path.to_str().unwrap(), "--no-headers"], PEOPLE);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(out.stdout.is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1,1973-11-29T21:33:09Z,Alice\n,,Bob\n");
}

#[test]
fn empty_input_writes_nothing() {
    let out = rowcsv(&[], "\n\n");
    assert!(out.status.success());
    assert!(out.stdout.is_empty());
}

#[test]
fn log_level_applies_to_env_log_dir() {
    let dir = tempdir().unwrap();
    let logs = dir.path().join("logs");
    let out = rowcsv_with_env(
        &["--log-level", "debug"],
        PEOPLE,
        &[("ROWCSV_LOG_DIR", logs.to_str().unwrap()), ("ROWCSV_LOG_LEVEL", "error")],
    );
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let log = std::fs::read_to_string(logs.join("app.log")).unwrap();
    assert!(log.contains("[DEBUG]"), "log: {log}");
}

#[test]
fn log_level_without_log_dir_warns() {
    let out = rowcsv(&["--log-level", "debug"], PEOPLE);
    assert!(out.status.success());
    assert!(stderr(&out).contains("--log-level has no effect"), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out), "age,bdate,name\n1,1973-11-29T21:33:09Z,Alice\n,,Bob\n");
}
