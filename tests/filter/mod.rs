//
// Copyright (c) 2025-2026 Jeff Garzik
//
// This file is part of the cscan project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Filtered stream output (-E) through the cscan binary
//

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn run_filter(content: &str) -> (String, String, bool) {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("input.c");
    fs::write(&src, content).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cscan"))
        .args(["-E", src.to_str().unwrap()])
        .output()
        .expect("Failed to execute cscan");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn filter_strips_comments_and_literals() {
    let (stdout, _, success) = run_filter("int x = 1; /* hi */ y;\n\"str\" 'c'\n");
    assert!(success);
    assert_eq!(stdout, "int x = 1;   y;\n\"\" ''\n");
}

#[test]
fn filter_joins_continued_lines() {
    let (stdout, _, success) = run_filter("AB\\\nCD\n");
    assert!(success);
    assert_eq!(stdout, "ABCD\n");
}

#[test]
fn filter_folds_trigraphs_and_directives() {
    let (stdout, _, success) = run_filter("??=define T 1\nx??(1??)\n");
    assert!(success);
    assert_eq!(stdout, "\nx[1]\n");
}

#[test]
fn filter_suppresses_if0_blocks() {
    let (stdout, _, success) = run_filter("#if 0\ndead\n#endif\nlive\n");
    assert!(success);
    assert_eq!(stdout, "\nlive\n");
}

#[test]
fn filter_unknown_file_type() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("notes.txt");
    fs::write(&src, "text\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_cscan"))
        .args(["-E", src.to_str().unwrap()])
        .output()
        .expect("Failed to execute cscan");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown file type"), "{}", stderr);
}
