//! End-to-end checks of the non-interactive subcommands, driving the real
//! binary against a scratch data directory.

use std::{
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
    time::{SystemTime, UNIX_EPOCH},
};

const OUTLINE: &str = "Dogs\n- Breeds\n  - Retriever\n- Care\n";

fn scratch_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("mindmap-tui-cli-{tag}-{nanos}"))
}

fn run(data_dir: &PathBuf, args: &[&str], stdin: Option<&str>) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mindmap-tui"));
    cmd.arg("--data-dir").arg(data_dir).args(args);
    if stdin.is_some() {
        cmd.stdin(Stdio::piped());
    }
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("failed to spawn binary");
    if let Some(text) = stdin {
        child
            .stdin
            .as_mut()
            .unwrap()
            .write_all(text.as_bytes())
            .unwrap();
    }
    child.wait_with_output().expect("binary did not exit")
}

#[test]
fn import_then_list_round_trips() {
    let dir = scratch_dir("roundtrip");

    let import = run(&dir, &["import"], Some(OUTLINE));
    assert!(import.status.success(), "import failed: {import:?}");
    let id = String::from_utf8(import.stdout).unwrap().trim().to_string();
    assert!(id.starts_with("dogs-"), "unexpected id {id}");

    let list = run(&dir, &["list"], None);
    assert!(list.status.success());
    let listed = String::from_utf8(list.stdout).unwrap();
    assert_eq!(listed.trim(), id);

    let stored = std::fs::read_to_string(dir.join(format!("{id}.json"))).unwrap();
    assert!(stored.contains("\"Retriever\""));
    assert!(stored.contains("\"source_text\""));

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn delete_removes_the_map() {
    let dir = scratch_dir("delete");

    let import = run(&dir, &["import"], Some(OUTLINE));
    assert!(import.status.success());
    let id = String::from_utf8(import.stdout).unwrap().trim().to_string();

    let delete = run(&dir, &["delete", &id], None);
    assert!(delete.status.success());

    let list = run(&dir, &["list"], None);
    assert!(String::from_utf8(list.stdout).unwrap().trim().is_empty());

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn viewing_a_missing_map_fails_cleanly() {
    let dir = scratch_dir("missing");

    let view = run(&dir, &["view", "no-such-map"], None);
    assert!(!view.status.success());
    let stderr = String::from_utf8(view.stderr).unwrap();
    assert!(stderr.contains("Error:"), "stderr was: {stderr}");

    std::fs::remove_dir_all(dir).unwrap();
}
