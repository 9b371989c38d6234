//
// Copyright (c) 2025-2026 Jeff Garzik
//
// This file is part of the cscan project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Tag extraction through the cscan binary
//

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn run_cscan(args: &[&str]) -> (String, String, bool) {
    let output = Command::new(env!("CARGO_BIN_EXE_cscan"))
        .args(args)
        .output()
        .expect("Failed to execute cscan");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn tags_file_basic() {
    let temp_dir = TempDir::new().unwrap();
    let tags_file = temp_dir.path().join("tags");

    let (_, stderr, success) =
        run_cscan(&["-f", tags_file.to_str().unwrap(), "tests/tags/test.c"]);

    assert!(success, "cscan failed: {}", stderr);
    assert!(tags_file.exists(), "tags file should be created");

    let tags_content = fs::read_to_string(&tags_file).unwrap();

    assert!(
        tags_content.contains("MAX\ttests/tags/test.c\t/^#define MAX/"),
        "Should contain MAX macro tag: {}",
        tags_content
    );
    assert!(
        tags_content.contains("signature:(a, b)"),
        "MAX should carry its argument list: {}",
        tags_content
    );
    assert!(
        tags_content.contains("LIMIT\ttests/tags/test.c"),
        "Should contain LIMIT macro tag"
    );
    assert!(
        tags_content.contains("WIDE\ttests/tags/test.c"),
        "Should contain WIDE macro tag"
    );
    assert!(
        tags_content.contains("weak_symbol\ttests/tags/test.c"),
        "Should contain #pragma weak tag"
    );

    // the string body on the WIDE line must not produce a tag
    assert!(
        !tags_content.contains("NOTAG"),
        "No tag from inside a string literal"
    );
    // the #if 0 block is skipped by default
    assert!(
        !tags_content.contains("HIDDEN"),
        "No tag from inside #if 0"
    );
}

#[test]
fn tags_sorted_output() {
    let temp_dir = TempDir::new().unwrap();
    let tags_file = temp_dir.path().join("tags");

    let (_, _, success) = run_cscan(&["-f", tags_file.to_str().unwrap(), "tests/tags/test.c"]);
    assert!(success);

    let tags_content = fs::read_to_string(&tags_file).unwrap();
    let tag_names: Vec<&str> = tags_content
        .lines()
        .filter_map(|line| line.split('\t').next())
        .collect();

    let mut sorted_names = tag_names.clone();
    sorted_names.sort();
    assert_eq!(tag_names, sorted_names, "Tags should be sorted");
}

#[test]
fn tags_index_mode() {
    let (stdout, stderr, success) = run_cscan(&["-x", "tests/tags/test.c"]);

    assert!(success, "cscan -x failed: {}", stderr);
    assert!(stdout.contains("MAX"), "Should list MAX in index output");
    assert!(stdout.contains("LIMIT"), "Should list LIMIT in index output");
    assert!(
        stdout.contains("#define LIMIT 4096"),
        "Index lines carry the source text"
    );
}

#[test]
fn tags_append_mode() {
    let temp_dir = TempDir::new().unwrap();
    let tags_file = temp_dir.path().join("tags");

    fs::write(&tags_file, "existing\tfile.c\t/^existing$/\n").unwrap();

    let (_, stderr, success) = run_cscan(&[
        "-a",
        "-f",
        tags_file.to_str().unwrap(),
        "tests/tags/test.c",
    ]);

    assert!(success, "cscan -a failed: {}", stderr);

    let tags_content = fs::read_to_string(&tags_file).unwrap();
    assert!(
        tags_content.contains("existing\tfile.c"),
        "Should preserve existing tags"
    );
    assert!(
        tags_content.contains("MAX\ttests/tags/test.c"),
        "Should contain new MAX tag"
    );
}

#[test]
fn tags_line_numbers() {
    let temp_dir = TempDir::new().unwrap();
    let tags_file = temp_dir.path().join("tags");

    let (_, _, success) = run_cscan(&[
        "-n",
        "-f",
        tags_file.to_str().unwrap(),
        "tests/tags/test.c",
    ]);
    assert!(success);

    let tags_content = fs::read_to_string(&tags_file).unwrap();
    assert!(
        tags_content.contains("LIMIT\ttests/tags/test.c\t3"),
        "LIMIT is defined on line 3: {}",
        tags_content
    );
    assert!(
        tags_content.contains("weak_symbol\ttests/tags/test.c\t10"),
        "weak_symbol is declared on line 10: {}",
        tags_content
    );
}

#[test]
fn tags_if0_scans_dead_code() {
    let temp_dir = TempDir::new().unwrap();
    let tags_file = temp_dir.path().join("tags");

    let (_, _, success) = run_cscan(&[
        "--if0",
        "-f",
        tags_file.to_str().unwrap(),
        "tests/tags/test.c",
    ]);
    assert!(success);

    let tags_content = fs::read_to_string(&tags_file).unwrap();
    assert!(
        tags_content.contains("HIDDEN\ttests/tags/test.c"),
        "--if0 should surface macros inside #if 0: {}",
        tags_content
    );
}

#[test]
fn tags_cpp_raw_strings_are_opaque() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("raw.cpp");
    fs::write(
        &src,
        "const char *s = R\"x(#define NO 1)x\";\n#define REAL 1\n",
    )
    .unwrap();
    let tags_file = temp_dir.path().join("tags");

    let (_, stderr, success) = run_cscan(&[
        "-f",
        tags_file.to_str().unwrap(),
        src.to_str().unwrap(),
    ]);
    assert!(success, "cscan failed: {}", stderr);

    let tags_content = fs::read_to_string(&tags_file).unwrap();
    assert!(tags_content.contains("REAL"), "Should tag REAL");
    assert!(
        !tags_content.contains("NO\t"),
        "No tag from inside a raw string: {}",
        tags_content
    );
}

#[test]
fn tags_unknown_file_type() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("notes.txt");
    fs::write(&src, "#define NOPE 1\n").unwrap();
    let tags_file = temp_dir.path().join("tags");

    let (_, stderr, success) = run_cscan(&[
        "-f",
        tags_file.to_str().unwrap(),
        src.to_str().unwrap(),
    ]);

    assert!(success);
    assert!(
        stderr.contains("unknown file type"),
        "Should report unknown file type: {}",
        stderr
    );
    let tags_content = fs::read_to_string(&tags_file).unwrap();
    assert!(!tags_content.contains("NOPE"));
}
