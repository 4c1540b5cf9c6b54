use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::NamedTempFile;

fn alphapass(args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_alphapass"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(stdin).unwrap();
    child.wait_with_output().unwrap()
}

fn entropy_file(bytes: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

fn assert_failed(output: &Output, message: &str) {
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty(), "{:?}", String::from_utf8_lossy(&output.stdout));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(message), "{stderr}");
}

#[test]
fn prints_the_password_from_a_known_source() {
    let file = entropy_file(&[5]);
    let path = file.path().to_str().unwrap();
    let output = alphapass(&["-t", "binary", "-l", "8", "-r", path], b"");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"00000101\n");
}

#[test]
fn invalid_utf8_on_stdin_still_contributes() {
    let file = entropy_file(&[0]);
    let path = file.path().to_str().unwrap();
    let output = alphapass(&["-A", "-l", "4", "-r", path, "--format", "json"], b"ab\xff");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["alphabet_size"], 3);
    assert_eq!(report["password"], "aaaa");
}

#[test]
fn duplicate_alphabet_fails() {
    let output = alphapass(&["-A", "-l", "4"], b"aa");
    assert_failed(&output, "Cannot create new password generator: duplicate character 'a'");
}

#[test]
fn empty_alphabet_fails() {
    let output = alphapass(&["-l", "4"], b"");
    assert_failed(&output, "No characters included in password");
}

#[test]
fn exhausted_random_source_fails() {
    let file = entropy_file(&[]);
    let path = file.path().to_str().unwrap();
    let output = alphapass(&["-t", "hex", "-l", "16", "-r", path], b"");
    assert_failed(&output, "Cannot generate password");
}

#[test]
fn missing_random_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-file");
    let output = alphapass(&["-t", "hex", "-r", path.to_str().unwrap()], b"");
    assert_failed(&output, "cannot open");
}
