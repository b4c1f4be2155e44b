use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn scatterplot(dir: &tempfile::TempDir) -> Command {
  let mut cmd = Command::cargo_bin("scatterplot").unwrap();
  cmd.current_dir(dir.path());
  cmd
}

#[test]
fn missing_data_file_fails() {
  let dir = tempfile::tempdir().unwrap();

  scatterplot(&dir)
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to open ./data.txt"))
    .stderr(predicate::str::contains("viewer window opened").not());
}

#[test]
fn non_numeric_field_fails() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("data.txt"), "1,two\n").unwrap();

  scatterplot(&dir)
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to parse ./data.txt"))
    .stderr(predicate::str::contains("viewer window opened").not());
}

#[test]
fn ragged_row_fails() {
  let dir = tempfile::tempdir().unwrap();
  fs::write(dir.path().join("data.txt"), "1,2\n3,4,5\n").unwrap();

  scatterplot(&dir)
    .assert()
    .failure()
    .stderr(predicate::str::contains("failed to parse ./data.txt"));
}
