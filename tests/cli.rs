//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::{Command, Output, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_peer-identity");

fn peer_identity(args: &[&str]) -> Output {
    Command::new(BIN)
        .args(args)
        .env_remove("PEER_IDENTITY_ON_CORRUPT")
        .env_remove("PEER_IDENTITY_MAX_ATTEMPTS")
        .output()
        .expect("failed to run peer-identity binary")
}

fn identity_file(root: &Path, prefix: &str) -> std::path::PathBuf {
    root.join(".peer-identity").join(format!("{prefix}.id"))
}

fn is_peer_name(text: &str) -> bool {
    let groups: Vec<&str> = text.split(':').collect();
    groups.len() == 6
        && groups.iter().all(|g| g.len() == 2 && g.bytes().all(|b| b.is_ascii_hexdigit()))
}

#[test]
fn unique_id_creates_and_prints_name() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    let output = peer_identity(&["unique-id", "weave", root]);
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert!(is_peer_name(&stdout), "unexpected output {stdout:?}");
    assert_eq!(std::fs::read_to_string(identity_file(dir.path(), "weave")).unwrap(), stdout);
}

#[test]
fn unique_id_is_stable_across_invocations() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    let first = peer_identity(&["unique-id", "weave", root]);
    let second = peer_identity(&["unique-id", "weave", root]);

    assert!(first.status.success() && second.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn unique_id_returns_stored_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = identity_file(dir.path(), "weave");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "02:aa:bb:cc:dd:ee").unwrap();

    let output = peer_identity(&["unique-id", "weave", dir.path().to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(output.stdout, b"02:aa:bb:cc:dd:ee");
}

#[test]
fn unique_id_heals_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let path = identity_file(dir.path(), "weave");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "").unwrap();

    let healed = peer_identity(&["unique-id", "weave", root]);
    let again = peer_identity(&["unique-id", "weave", root]);

    assert!(healed.status.success());
    assert!(is_peer_name(&String::from_utf8_lossy(&healed.stdout)));
    assert_eq!(healed.stdout, again.stdout);
}

#[test]
fn fail_policy_exits_nonzero_on_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = identity_file(dir.path(), "weave");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "garbage").unwrap();

    let root = dir.path().to_str().unwrap();
    let output = peer_identity(&["--on-corrupt", "fail", "unique-id", "weave", root]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("storage corrupt"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "garbage");
}

#[test]
fn empty_prefix_is_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let output = peer_identity(&["unique-id", "", dir.path().to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("db-prefix"));
    assert!(output.stdout.is_empty());
    assert!(!dir.path().join(".peer-identity").exists());
}

#[test]
fn wrong_argument_count_is_a_usage_error() {
    let output = peer_identity(&["unique-id", "weave"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr.contains("HOST_ROOT"));
}

#[test]
fn help_succeeds() {
    let output = peer_identity(&["unique-id", "--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("DB_PREFIX"));
}

#[test]
fn show_reports_uninitialized_domain() {
    let dir = tempfile::tempdir().unwrap();

    let output = peer_identity(&["show", "weave", dir.path().to_str().unwrap()]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(!output.status.success());
    assert!(stderr.contains("no peer name stored"));
}

#[test]
fn location_prints_escaped_path() {
    let output = peer_identity(&["location", "/weavedb/weave-net", "/host"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert_eq!(stdout.trim_end(), "/host/.peer-identity/%2Fweavedb%2Fweave-net.id");
}

#[test]
fn concurrent_processes_converge_on_one_name() {
    const PROCESSES: usize = 8;
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    let children: Vec<_> = (0..PROCESSES)
        .map(|_| {
            Command::new(BIN)
                .args(["unique-id", "--json", "weave", root])
                .stdout(Stdio::piped())
                .stderr(Stdio::piped())
                .spawn()
                .expect("failed to spawn peer-identity")
        })
        .collect();

    let reports: Vec<serde_json::Value> = children
        .into_iter()
        .map(|child| {
            let output = child.wait_with_output().unwrap();
            assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
            serde_json::from_slice(&output.stdout).unwrap()
        })
        .collect();

    let winner = reports[0]["peer_name"].as_str().unwrap().to_string();
    assert!(reports.iter().all(|r| r["peer_name"] == winner.as_str()));
    assert_eq!(reports.iter().filter(|r| r["origin"] == "created").count(), 1);
    assert_eq!(std::fs::read_to_string(identity_file(dir.path(), "weave")).unwrap(), winner);
}
