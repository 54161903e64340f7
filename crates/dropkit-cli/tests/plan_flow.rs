//! plan_flow.rs
//!
//! Runs `dropkit plan` against a temporary metadata directory and checks the
//! printed batch plan. Skipped when the binary has not been built (set
//! DROPKIT_BIN to point at one explicitly).

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .and_then(|p| p.parent())
        .map(|p| p.to_path_buf())
        .expect("workspace root")
}

fn dropkit_bin() -> Option<PathBuf> {
    if let Ok(p) = env::var("DROPKIT_BIN") {
        let pb = PathBuf::from(p);
        if pb.exists() {
            return Some(pb);
        }
    }
    let p = workspace_root()
        .join("target")
        .join("debug")
        .join(if cfg!(windows) { "dropkit.exe" } else { "dropkit" });
    if p.exists() {
        Some(p)
    } else {
        None
    }
}

#[test]
fn plan_smoke() {
    let Some(bin) = dropkit_bin() else {
        eprintln!("skip: dropkit binary not found (set DROPKIT_BIN or build dropkit-cli)");
        return;
    };

    let dir = tempfile::tempdir().unwrap();
    for i in 0..7 {
        fs::write(
            dir.path().join(format!("{i}.json")),
            format!(r#"{{"name": "Drop #{i}"}}"#),
        )
        .unwrap();
    }

    let out = Command::new(&bin)
        .arg("--json")
        .arg("plan")
        .arg(dir.path())
        .arg("--loaded")
        .arg("10")
        .output()
        .expect("failed to run dropkit plan");

    assert!(
        out.status.success(),
        "plan failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let v: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(v["items"], 7);
    assert_eq!(v["transactions"], 2);
    assert_eq!(v["batches"][0]["start_index"], 10);
    assert_eq!(v["batches"][0]["items"], 5);
    assert_eq!(v["batches"][1]["start_index"], 15);
    assert_eq!(v["batches"][1]["items"], 2);
}

#[test]
fn plan_rejects_empty_directory() {
    let Some(bin) = dropkit_bin() else {
        eprintln!("skip: dropkit binary not found (set DROPKIT_BIN or build dropkit-cli)");
        return;
    };

    let dir = tempfile::tempdir().unwrap();
    let out = Command::new(&bin)
        .arg("plan")
        .arg(dir.path())
        .output()
        .expect("failed to run dropkit plan");

    assert!(!out.status.success());
}
