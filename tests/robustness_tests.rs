use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_missing_username_column() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "customer").unwrap();
    writeln!(file, "정상").unwrap();

    let mut cmd = Command::new(cargo_bin!("order-tx"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading order"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_extra_columns_and_whitespace() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "username, note").unwrap();
    writeln!(file, " 정상 , first").unwrap();
    writeln!(file, "잔고부족").unwrap();

    let mut cmd = Command::new(cargo_bin!("order-tx"));
    cmd.arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("1,정상,완료"))
        .stdout(predicate::str::contains("2,잔고부족,대기"));
}
