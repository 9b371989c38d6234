//
// Copyright (c) 2025-2026 Jeff Garzik
//
// This file is part of the cscan project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Tag entries and tags-file formatting
//

use std::fmt::Write;

// ============================================================================
// Tag Entry
// ============================================================================

/// A tag entry representing a macro definition location
#[derive(Debug, Clone)]
pub struct TagEntry {
    /// The identifier name
    pub name: String,
    /// Single-letter tag kind
    pub kind: char,
    /// Long tag kind name
    pub kind_name: &'static str,
    /// Line number (1-based)
    pub line: u32,
    /// Locate by line number instead of search pattern
    pub line_number_entry: bool,
    /// Tag is visible only within its own file
    pub is_file_scope: bool,
    /// Truncate the search pattern just past the tag name
    pub truncate_line: bool,
    /// Argument list of a parameterized macro
    pub signature: Option<String>,
}

impl TagEntry {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: 'd',
            kind_name: "macro",
            line: 0,
            line_number_entry: false,
            is_file_scope: false,
            truncate_line: false,
            signature: None,
        }
    }

    /// Format as tags file line:
    /// identifier<TAB>filename<TAB>location;"<TAB>extension fields
    pub fn format_tags(&self, file: &str, line_content: &str) -> String {
        let mut out = if self.line_number_entry {
            format!("{}\t{}\t{}", self.name, file, self.line)
        } else {
            let mut pattern = line_content.trim_end().to_string();
            let mut truncated = false;
            if self.truncate_line {
                if let Some(idx) = pattern.find(&self.name) {
                    pattern.truncate(idx + self.name.len());
                    truncated = true;
                }
            }
            // Escape slashes and backslashes in the pattern
            let pattern = pattern.replace('\\', "\\\\").replace('/', "\\/");
            if truncated {
                // a cut pattern cannot anchor to the end of the line
                format!("{}\t{}\t/^{}/", self.name, file, pattern)
            } else {
                format!("{}\t{}\t/^{}$/", self.name, file, pattern)
            }
        };

        let _ = write!(out, ";\"\t{}", self.kind);
        if let Some(signature) = &self.signature {
            let _ = write!(out, "\tsignature:{}", signature);
        }
        if self.is_file_scope {
            out.push_str("\tfile:");
        }
        out
    }

    /// Format as -x index line: name line file text
    pub fn format_index(&self, file: &str, line_content: &str) -> String {
        format!(
            "{:<16} {:>6} {:<20} {}",
            self.name,
            self.line,
            file,
            line_content.trim()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tags_pattern() {
        let mut e = TagEntry::new("LIMIT");
        e.line = 3;
        let line = e.format_tags("src/a.c", "#define LIMIT 4096");
        assert_eq!(line, "LIMIT\tsrc/a.c\t/^#define LIMIT 4096$/;\"\td");
    }

    #[test]
    fn test_format_tags_truncates_after_name() {
        let mut e = TagEntry::new("MAX");
        e.truncate_line = true;
        let line = e.format_tags("a.c", "#define MAX(a, b) ((a) > (b) ? (a) : (b))");
        assert_eq!(line, "MAX\ta.c\t/^#define MAX/;\"\td");
    }

    #[test]
    fn test_format_tags_escapes_pattern() {
        let e = TagEntry::new("SEP");
        let line = e.format_tags("a.c", "#define SEP \"/\\\\\"");
        assert_eq!(line, "SEP\ta.c\t/^#define SEP \"\\/\\\\\\\\\"$/;\"\td");
    }

    #[test]
    fn test_format_tags_line_number() {
        let mut e = TagEntry::new("FOO");
        e.line = 12;
        e.line_number_entry = true;
        let line = e.format_tags("a.c", "#define FOO 1");
        assert_eq!(line, "FOO\ta.c\t12;\"\td");
    }

    #[test]
    fn test_format_tags_extension_fields() {
        let mut e = TagEntry::new("ADD");
        e.is_file_scope = true;
        e.signature = Some("(a,b)".to_string());
        let line = e.format_tags("a.c", "#define ADD(a,b) a+b");
        assert_eq!(
            line,
            "ADD\ta.c\t/^#define ADD(a,b) a+b$/;\"\td\tsignature:(a,b)\tfile:"
        );
    }

    #[test]
    fn test_format_index() {
        let mut e = TagEntry::new("FOO");
        e.line = 7;
        let line = e.format_index("a.c", "  #define FOO 1  ");
        assert_eq!(line, "FOO                   7 a.c                  #define FOO 1");
    }
}
