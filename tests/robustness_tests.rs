mod common;

use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_malformed_batch_rows() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("requests.csv");
    common::write_requests(
        &input,
        &[
            ["100000", "5", "30"],
            // Not a number
            ["abc", "5", "30"],
            // Rate above policy
            ["5000", "75", "2"],
            // Missing term
            ["5000", "4", ""],
            ["12000", "0", "1"],
        ],
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("loancalc"));
    cmd.arg("batch").arg(&input);

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error processing request on row 2"))
        .stderr(predicate::str::contains("Error processing request on row 3"))
        .stderr(predicate::str::contains("Error processing request on row 4"))
        .stdout(predicate::str::contains(
            "principal,annual_rate_percent,term_years,number_of_payments,monthly_payment,total_payment,total_interest",
        ))
        .stdout(predicate::str::contains(
            "100000.00,5.0,30.0,360,536.82,193255.78,93255.78",
        ))
        .stdout(predicate::str::contains(
            "12000.00,0.0,1.0,12,1000.00,12000.00,0.00",
        ));
}

#[test]
fn test_batch_with_missing_file() {
    let mut cmd = Command::new(cargo_bin!("loancalc"));
    cmd.args(["batch", "does_not_exist.csv"]);

    cmd.assert().failure();
}

#[test]
fn test_large_batch() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("generated.csv");
    common::write_generated_requests(&input, 2_000).unwrap();

    let output = Command::new(cargo_bin!("loancalc"))
        .arg("batch")
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    // Header + one summary per request
    assert_eq!(stdout.lines().count(), 2_001);
    assert!(output.stderr.is_empty());
}
