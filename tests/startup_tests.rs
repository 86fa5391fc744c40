// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rupeewise::config::DATA_DIR_ENV;
use rupeewise::persist::BUDGETS_KEY;
use std::process::Command;
use tempfile::tempdir;

fn corrupt_data_dir() -> tempfile::TempDir {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", BUDGETS_KEY)), "{not json").unwrap();
    dir
}

fn rupeewise(dir: &tempfile::TempDir, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rupeewise"))
        .args(args)
        .env(DATA_DIR_ENV, dir.path())
        .output()
        .unwrap()
}

#[test]
fn category_list_does_not_load_saved_data() {
    let dir = corrupt_data_dir();
    let out = rupeewise(&dir, &["category", "list"]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Food"));
}

#[test]
fn data_commands_report_a_corrupt_blob() {
    let dir = corrupt_data_dir();
    let out = rupeewise(&dir, &["budget", "list"]);
    assert!(!out.status.success());
}
