//
// Copyright (c) 2025-2026 Jeff Garzik
//
// This file is part of the cscan project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Session options and per-language capabilities
//

use std::path::Path;

// ============================================================================
// Options
// ============================================================================

/// How tag entries locate their definition in the tags file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagLocate {
    /// Emit an ex search pattern
    Pattern,
    /// Emit the line number
    LineNumber,
}

/// Options consumed by the scanner and the tag writer.
#[derive(Debug, Clone, Copy)]
pub struct Options {
    /// Emit tags for macro definitions
    pub define_tags: bool,
    /// Emit tags that are visible only within their own file
    pub include_file_scope: bool,
    /// How emitted tags locate their definition
    pub locate: TagLocate,
    /// Scan the bodies of `#if 0` blocks instead of skipping them
    pub if0: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            define_tags: true,
            include_file_scope: true,
            locate: TagLocate::Pattern,
            if0: false,
        }
    }
}

// ============================================================================
// Language Capabilities
// ============================================================================

/// Per-session scanner capabilities, normally chosen from the file
/// extension.
#[derive(Debug, Clone, Copy)]
pub struct Language {
    /// Language display name
    pub name: &'static str,
    /// `@"..."` verbatim strings are recognized
    pub at_literal_strings: bool,
    /// `R"delim(...)delim"` raw strings are recognized
    pub raw_literal_strings: bool,
    /// Block ends are found by brace counting, not statement completion
    pub brace_format: bool,
    /// The file is a header, so its macros are not file-scoped
    pub header_file: bool,
}

impl Language {
    /// Map a file path to its language by extension. Returns None for
    /// file types the scanner does not understand.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Language> {
        let ext = path.as_ref().extension().and_then(|e| e.to_str())?;
        let (name, at_literal_strings, raw_literal_strings, header_file) = match ext {
            "c" => ("C", false, false, false),
            "h" => ("C", false, false, true),
            "C" | "cc" | "cpp" | "cxx" => ("C++", false, true, false),
            "hh" | "hpp" | "hxx" => ("C++", false, true, true),
            "m" | "mm" => ("Objective-C", true, false, false),
            "cs" => ("C#", true, false, false),
            "d" | "di" => ("D", false, false, false),
            "vr" | "vri" => ("Vera", false, false, false),
            "vrh" => ("Vera", false, false, true),
            _ => return None,
        };
        Some(Language {
            name,
            at_literal_strings,
            raw_literal_strings,
            brace_format: false,
            header_file,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
