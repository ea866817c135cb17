//! End-to-end tests driving the shellaid binary.

use std::net::TcpListener;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Command for the binary with an isolated config and environment.
fn shellaid(dir: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_shellaid"));
    cmd.arg("--config")
        .arg(dir.path().join("config.json"))
        .current_dir(dir.path())
        .env_remove("EMAIL")
        .env("TMP", dir.path())
        .env("RUST_LOG", "off")
        .stdin(Stdio::null());
    cmd
}

fn run(cmd: &mut Command) -> Output {
    cmd.output().expect("failed to run shellaid")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn extract_unsupported_format_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();

    let output = run(shellaid(&dir).args(["extract", "notes.txt"]));
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("'notes.txt' cannot be extracted: unsupported format"));
}

#[test]
fn extract_missing_file_exits_1() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args(["extract", "missing.tar.gz"]));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("'missing.tar.gz' is not a valid file"));
}

#[test]
fn extract_without_argument_exits_1() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).arg("extract"));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("missing argument"));
}

#[test]
fn extract_lists_formats() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args(["extract", "--list-formats"]));
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains(".tar.gz"));
    assert!(text.contains("7z x FILE"));
}

#[test]
fn emailme_without_email_exits_1_and_runs_nothing() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args(["emailme", "touch", "ran"]));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("EMAIL is not set"));
    assert!(!dir.path().join("ran").exists());
}

#[test]
fn if_stdin_picks_piped_branch_for_redirected_input() {
    let dir = tempfile::tempdir().unwrap();

    // stdin is /dev/null here, which is not a terminal.
    let output = run(shellaid(&dir).args(["if-stdin", "sh -c 'exit 3'", "sh -c 'exit 4'"]));
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn if_stdin_forwards_arguments_verbatim() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args([
        "if-stdin",
        "printf '[%s]'",
        "true",
        "two words",
        "--flag",
    ]));
    assert!(output.status.success());
    assert_eq!(stdout(&output), "[two words][--flag]");
}

#[test]
fn quiet_hides_output_on_success() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args(["quiet", "sh", "-c", "echo hidden; echo also >&2"]));
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).is_empty());
}

#[test]
fn quiet_replays_output_on_failure() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args(["quiet", "sh", "-c", "echo out; echo err >&2; exit 5"]));
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stdout(&output), "out\nerr\n");
}

#[test]
fn wait_port_returns_once_listening() {
    let dir = tempfile::tempdir().unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port().to_string();

    let output = run(shellaid(&dir).args(["wait-port", "--host", "127.0.0.1", &port]));
    assert!(output.status.success(), "{}", stderr(&output));
}

#[test]
fn wait_port_times_out() {
    let dir = tempfile::tempdir().unwrap();
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port().to_string()
    };

    let output = run(shellaid(&dir).args([
        "wait-port",
        "--host",
        "127.0.0.1",
        "--timeout",
        "1",
        "--interval-ms",
        "100",
        &port,
    ]));
    assert_eq!(output.status.code(), Some(124));
}

#[cfg(target_os = "linux")]
#[test]
fn wait_ext_warns_about_missing_first_pid() {
    let dir = tempfile::tempdir().unwrap();

    let mut child = Command::new("true").spawn().unwrap();
    let pid = child.id().to_string();
    child.wait().unwrap();

    let output = run(shellaid(&dir).args(["wait-ext", &pid]));
    assert!(output.status.success());
    assert!(stderr(&output).contains(&format!("warning: process {} does not exist", pid)));
}

#[cfg(unix)]
#[test]
fn wait_ext_waits_for_running_process() {
    let dir = tempfile::tempdir().unwrap();
    let mut child = Command::new("sleep").arg("1").spawn().unwrap();
    let pid = child.id().to_string();

    // Reap the child from another thread so it leaves the process table.
    let reaper = std::thread::spawn(move || child.wait());

    let output = run(shellaid(&dir).args(["wait-ext", "--interval-ms", "100", &pid]));
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(!stderr(&output).contains("does not exist"));
    reaper.join().unwrap().unwrap();
}

#[test]
fn wait_ext_times_out_on_live_process() {
    let dir = tempfile::tempdir().unwrap();
    let pid = std::process::id().to_string();

    let output = run(shellaid(&dir).args([
        "wait-ext",
        "--timeout",
        "1",
        "--interval-ms",
        "100",
        &pid,
    ]));
    assert_eq!(output.status.code(), Some(124));
}

#[test]
fn jrun_rejects_non_java_source() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args(["jrun", "Main.class"]));
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn config_set_then_show() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args(["config", "set", "mainBranch", "trunk"]));
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(Path::new(&dir.path().join("config.json")).exists());

    let output = run(shellaid(&dir).args(["config", "show", "--json"]));
    assert!(output.status.success());
    let settings: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(settings["mainBranch"], "trunk");
    assert_eq!(settings["host"], "localhost");
}

#[test]
fn config_set_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args(["config", "set", "colour", "blue"]));
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown key"));
}

#[test]
fn missing_program_exits_127() {
    let dir = tempfile::tempdir().unwrap();

    let output = run(shellaid(&dir).args(["quiet", "shellaid-no-such-program"]));
    assert_eq!(output.status.code(), Some(127));
}
