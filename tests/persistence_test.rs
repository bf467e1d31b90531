#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn run(db_path: &Path, user: &str, args: &[&str]) -> Output {
    Command::new(cargo_bin!("loancalc"))
        .args(args)
        .arg("--db-path")
        .arg(db_path)
        .arg("--user")
        .arg(user)
        .output()
        .expect("Failed to execute command")
}

fn json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_saved_calculations_survive_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: save a calculation
    let saved = json(&run(
        &db_path,
        "alice",
        &[
            "save", "--amount", "100000", "--rate", "5", "--term", "30", "--name", "House",
            "--tag", "home",
        ],
    ));
    let id = saved["id"].as_str().unwrap().to_string();
    assert_eq!(saved["calculation"]["numberOfPayments"], 360);

    // 2. Second run: it is listed from the same DB path
    let list = json(&run(&db_path, "alice", &["list"]));
    assert_eq!(list["count"], 1);
    assert_eq!(list["calculations"][0]["id"], id.as_str());
    assert_eq!(list["calculations"][0]["tags"][0], "home");

    // 3. Update, then read back in a fresh process
    json(&run(
        &db_path,
        "alice",
        &["update", &id, "--name", "Dream house", "--favorite", "true"],
    ));
    let shown = json(&run(&db_path, "alice", &["show", &id]));
    assert_eq!(shown["name"], "Dream house");
    assert_eq!(shown["is_favorite"], true);

    // 4. Another user cannot see or delete it
    assert_eq!(json(&run(&db_path, "bob", &["list"]))["count"], 0);
    assert!(!run(&db_path, "bob", &["delete", &id]).status.success());

    // 5. Delete and confirm it is gone
    assert!(run(&db_path, "alice", &["delete", &id]).status.success());
    assert_eq!(json(&run(&db_path, "alice", &["list"]))["count"], 0);
}
