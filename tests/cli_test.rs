use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let csv = common::orders_csv(&["정상", "잔고부족", "예외", "정상"])?;

    let mut cmd = Command::new(cargo_bin!("order-tx"));
    cmd.arg(csv.path());

    // The failed order consumed id 3 before rolling back.
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("id,username,pay_status"))
        .stdout(predicate::str::contains("1,정상,완료"))
        .stdout(predicate::str::contains("2,잔고부족,대기"))
        .stdout(predicate::str::contains("예외").not())
        .stdout(predicate::str::contains("4,정상,완료"))
        .stderr(predicate::str::contains("Payment declined for order 2"))
        .stderr(predicate::str::contains("Order failed: System error"));

    Ok(())
}

#[test]
fn test_cli_rollback_on_business_error() -> Result<(), Box<dyn std::error::Error>> {
    let csv = common::orders_csv(&["잔고부족", "정상"])?;

    let mut cmd = Command::new(cargo_bin!("order-tx"));
    cmd.arg(csv.path()).arg("--rollback-on-business-error");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("잔고부족").not())
        .stdout(predicate::str::contains("2,정상,완료"))
        .stderr(predicate::str::contains("Payment declined for order 1"));

    Ok(())
}

#[test]
fn test_cli_missing_input_file() {
    let mut cmd = Command::new(cargo_bin!("order-tx"));
    cmd.arg("does/not/exist.csv");

    cmd.assert().failure();
}
