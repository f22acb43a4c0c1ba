#![cfg(feature = "storage-rocksdb")]

use assert_cmd::cargo_bin;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_rocksdb_persistence_recovery() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test_db");

    // 1. First run: one completed, one declined, one rolled back
    let csv1 = common::orders_csv(&["정상", "잔고부족", "예외"]).unwrap();

    let mut cmd1 = Command::new(cargo_bin!("order-tx"));
    cmd1.arg(csv1.path()).arg("--db-path").arg(&db_path);

    let output1 = cmd1.output().expect("Failed to execute command");
    assert!(output1.status.success());
    let stdout1 = String::from_utf8_lossy(&output1.stdout);
    assert!(stdout1.contains("1,정상,완료"));
    assert!(stdout1.contains("2,잔고부족,대기"));
    assert!(!stdout1.contains("예외"));

    // 2. Second run on the same DB path skips the id the rolled-back order used
    let csv2 = common::orders_csv(&["정상"]).unwrap();

    let mut cmd2 = Command::new(cargo_bin!("order-tx"));
    cmd2.arg(csv2.path()).arg("--db-path").arg(&db_path);

    let output2 = cmd2.output().expect("Failed to execute command");
    assert!(output2.status.success());
    let stdout2 = String::from_utf8_lossy(&output2.stdout);

    assert!(stdout2.contains("1,정상,완료"));
    assert!(stdout2.contains("2,잔고부족,대기"));
    assert!(stdout2.contains("4,정상,완료"));
    assert!(!stdout2.contains("3,"));
}
