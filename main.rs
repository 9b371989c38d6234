//
// Copyright (c) 2025-2026 Jeff Garzik
//
// This file is part of the cscan project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// cscan - extract macro tags from C-family sources
//
// Drives the preprocessing scanner over each input file, collecting one
// tag per #define / #undef / #pragma weak, and writes a sorted tags
// file, a -x index, or the filtered character stream.
//

use clap::Parser;
use cscan::cpp::{CppChar, Scanner};
use cscan::options::{Language, Options, TagLocate};
use cscan::tags::TagEntry;
use gettextrs::{bind_textdomain_codeset, gettext, setlocale, textdomain, LocaleCategory};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::process::ExitCode;

// ============================================================================
// CLI
// ============================================================================

#[derive(Parser)]
#[command(version, about = gettext("cscan - extract macro tags from C-family sources"))]
struct Args {
    /// Append to existing tags file
    #[arg(short = 'a', long, help = gettext("Append to tagsfile"))]
    append: bool,

    /// Write tags to specified file (default: tags)
    #[arg(short = 'f', long = "file", default_value = "tags", help = gettext("Write tags to specified file"))]
    tags_file: String,

    /// Print index to stdout instead of creating tags file
    #[arg(short = 'x', long, help = gettext("Print index to stdout"))]
    index: bool,

    /// Locate tags by line number instead of search pattern
    #[arg(short = 'n', long = "line-numbers", help = gettext("Locate tags by line number"))]
    line_numbers: bool,

    /// Dump the filtered stream instead of emitting tags.
    /// String and character literals print as "" and ''.
    #[arg(short = 'E', long = "filter", help = gettext("Print the preprocessed stream to stdout"))]
    filter: bool,

    /// Scan the bodies of #if 0 blocks
    #[arg(long = "if0", help = gettext("Scan code excluded by #if 0"))]
    if0: bool,

    /// Input files
    #[arg(required = true)]
    files: Vec<String>,
}

// ============================================================================
// Source File Processing
// ============================================================================

/// One tag plus the context needed to format it
struct FileTag {
    entry: TagEntry,
    file: String,
    line_content: String,
}

/// Get the line content for a given line number (1-based)
fn get_line_content(lines: &[String], line_num: u32) -> String {
    if line_num == 0 || line_num as usize > lines.len() {
        String::new()
    } else {
        lines[line_num as usize - 1].clone()
    }
}

/// Scan one source file and collect its macro tags
fn process_file(path: &str, lang: Language, options: &Options) -> io::Result<Vec<FileTag>> {
    let content = fs::read(path)?;
    let lines: Vec<String> = String::from_utf8_lossy(&content)
        .lines()
        .map(String::from)
        .collect();

    let mut scanner = Scanner::new(&content, path, lang, *options);
    while !scanner.next_char().is_eof() {}

    Ok(scanner
        .take_tags()
        .into_iter()
        .map(|entry| {
            let line_content = get_line_content(&lines, entry.line);
            FileTag {
                entry,
                file: path.to_string(),
                line_content,
            }
        })
        .collect())
}

/// Print one source file's filtered character stream to stdout
fn filter_file(path: &str, lang: Language, options: &Options) -> io::Result<()> {
    let content = fs::read(path)?;
    let mut scanner = Scanner::new(&content, path, lang, *options);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    loop {
        match scanner.next_char() {
            CppChar::Eof => break,
            CppChar::Byte(b) => out.write_all(&[b])?,
            CppChar::StringLit => out.write_all(b"\"\"")?,
            CppChar::CharLit => out.write_all(b"''")?,
        }
    }
    out.flush()
}

// ============================================================================
// Main
// ============================================================================

fn main() -> ExitCode {
    setlocale(LocaleCategory::LcAll, "");
    textdomain("cscan").unwrap();
    bind_textdomain_codeset("cscan", "UTF-8").unwrap();

    let args = Args::parse();

    let options = Options {
        if0: args.if0,
        locate: if args.line_numbers {
            TagLocate::LineNumber
        } else {
            TagLocate::Pattern
        },
        ..Options::default()
    };

    if args.filter {
        for file in &args.files {
            match Language::from_path(file) {
                Some(lang) => {
                    if let Err(e) = filter_file(file, lang, &options) {
                        eprintln!("cscan: {}: {}", file, e);
                        return ExitCode::from(1);
                    }
                }
                None => eprintln!("cscan: {}: unknown file type", file),
            }
        }
        return ExitCode::SUCCESS;
    }

    // Collect all tags, keyed by name for sorted output
    let mut all_tags: BTreeMap<String, FileTag> = BTreeMap::new();

    for file in &args.files {
        match Language::from_path(file) {
            Some(lang) => match process_file(file, lang, &options) {
                Ok(tags) => {
                    for tag in tags {
                        all_tags.insert(tag.entry.name.clone(), tag);
                    }
                }
                Err(e) => {
                    eprintln!("cscan: {}: {}", file, e);
                }
            },
            None => {
                eprintln!("cscan: {}: unknown file type", file);
            }
        }
    }

    if args.index {
        // Print -x index to stdout
        for tag in all_tags.values() {
            println!("{}", tag.entry.format_index(&tag.file, &tag.line_content));
        }
    } else {
        // Write tags file
        let open_result = if args.append {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&args.tags_file)
        } else {
            File::create(&args.tags_file)
        };

        match open_result {
            Ok(mut file) => {
                for tag in all_tags.values() {
                    if let Err(e) = writeln!(
                        file,
                        "{}",
                        tag.entry.format_tags(&tag.file, &tag.line_content)
                    ) {
                        eprintln!("cscan: error writing to {}: {}", args.tags_file, e);
                        return ExitCode::from(1);
                    }
                }
            }
            Err(e) => {
                eprintln!("cscan: cannot open {}: {}", args.tags_file, e);
                return ExitCode::from(1);
            }
        }
    }

    ExitCode::SUCCESS
}
