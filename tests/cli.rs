//! Integration tests for the `relqa` binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

fn relqa_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("relqa");
    path
}

const NOTES: &str = "Product: Acme Editor\n\
                     Version 3.0\n\
                     New Features:\n- Dark mode\n\
                     Bug Fixes:\n- Crash on launch\n\
                     Known Issues:\n- Minor lag\n";

fn setup_test_env() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();
    let config_path = config_dir.join("relqa.toml");
    fs::write(
        &config_path,
        r#"
[routing]
similarity_threshold = 0.4

[embedding]
provider = "hash"
dims = 256
"#,
    )
    .unwrap();

    let notes_path = root.join("notes.txt");
    fs::write(&notes_path, NOTES).unwrap();

    (tmp, config_path, notes_path)
}

fn run_relqa(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let output = Command::new(relqa_binary())
        .arg("--config")
        .arg(config_path)
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run relqa: {}", e));
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_sections_lists_found_sections() {
    let (_tmp, config_path, notes_path) = setup_test_env();
    let (stdout, stderr, success) =
        run_relqa(&config_path, &["sections", notes_path.to_str().unwrap()]);
    assert!(success, "sections failed: {}", stderr);
    assert!(stdout.contains("== Product Info =="));
    assert!(stdout.contains("Acme Editor"));
    assert!(stdout.contains("== Known Issues =="));
    assert!(!stdout.contains("== End of Support =="));
}

#[test]
fn test_ask_prints_conversation() {
    let (_tmp, config_path, notes_path) = setup_test_env();
    let (stdout, stderr, success) = run_relqa(
        &config_path,
        &[
            "ask",
            notes_path.to_str().unwrap(),
            "what bugs were fixed",
            "which product is this",
        ],
    );
    assert!(success, "ask failed: {}", stderr);
    assert_eq!(
        stdout,
        "Q: what bugs were fixed\n\nA: The bug fixes included in this release are:\nCrash on launch\n\n\
         Q: which product is this\n\nA: This release is about the product:\nAcme Editor\n\n"
    );
}

#[test]
fn test_ask_rejects_invalid_document() {
    let (tmp, config_path, _) = setup_test_env();
    let bad = tmp.path().join("agenda.txt");
    fs::write(&bad, "Meeting agenda: budget").unwrap();

    let (_, stderr, success) =
        run_relqa(&config_path, &["ask", bad.to_str().unwrap(), "what bugs were fixed"]);
    assert!(!success);
    assert!(stderr.contains("Invalid release notes uploaded"), "stderr: {}", stderr);
}

#[test]
fn test_ask_rejects_unsupported_extension() {
    let (tmp, config_path, _) = setup_test_env();
    let md = tmp.path().join("notes.md");
    fs::write(&md, NOTES).unwrap();

    let (_, stderr, success) = run_relqa(&config_path, &["sections", md.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("Unsupported file format"), "stderr: {}", stderr);
}

#[test]
fn test_partial_config_uses_defaults() {
    let (tmp, _, notes_path) = setup_test_env();
    let partial = tmp.path().join("partial.toml");
    fs::write(&partial, "[embedding]\nprovider = \"hash\"\n").unwrap();
    let (stdout, stderr, success) = run_relqa(
        &partial,
        &["ask", notes_path.to_str().unwrap(), "any known issues?"],
    );
    assert!(success, "ask failed: {}", stderr);
    assert!(stdout.contains("The known issues reported in this release are:\nMinor lag"));
}

#[test]
fn test_invalid_config_fails() {
    let (tmp, _, notes_path) = setup_test_env();
    let config_path = tmp.path().join("bad.toml");
    fs::write(&config_path, "[routing]\nsimilarity_threshold = 3.0\n").unwrap();

    let (_, _, success) = run_relqa(&config_path, &["sections", notes_path.to_str().unwrap()]);
    assert!(!success);
}

#[test]
fn test_chat_session() {
    let (_tmp, config_path, notes_path) = setup_test_env();
    let mut child = Command::new(relqa_binary())
        .arg("--config")
        .arg(&config_path)
        .arg("chat")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    let script = format!(
        "what bugs were fixed\n:load {}\nwhat bugs were fixed\n:reset\n:quit\n",
        notes_path.display()
    );
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Error: No release notes loaded."));
    assert!(stdout.contains("File uploaded successfully!"));
    assert!(stdout.contains("A: The bug fixes included in this release are:\nCrash on launch"));
    assert!(stdout.contains("No file uploaded."));
}
