use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[cfg(not(feature = "storage-rocksdb"))]
#[test]
fn test_rocksdb_fallback_warning() {
    let mut cmd = Command::new(cargo_bin!("loancalc"));
    cmd.args(["list", "--db-path", "some_db"]);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("'storage-rocksdb'"))
        .stderr(predicate::str::contains("Falling back"))
        .stdout(predicate::str::contains("\"count\": 0"));
}

#[cfg(feature = "storage-rocksdb")]
#[test]
fn test_rocksdb_no_fallback_warning() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    let mut cmd = Command::new(cargo_bin!("loancalc"));
    cmd.arg("list").arg("--db-path").arg(&db_path);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Falling back").not());
}
