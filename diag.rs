//
// Copyright (c) 2025-2026 Jeff Garzik
//
// This file is part of the cscan project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Diagnostic output for cscan
//
// Warnings are written to stderr with a file:line prefix. Counters are
// kept so tests can observe diagnostic traffic without scraping stderr.
//

use std::io::{self, Write};
use std::sync::atomic::{AtomicU32, Ordering};

static WARNING_COUNT: AtomicU32 = AtomicU32::new(0);

/// Print a warning message for a source location.
pub fn warning(path: &str, line: u32, msg: &str) {
    WARNING_COUNT.fetch_add(1, Ordering::Relaxed);
    let _ = writeln!(io::stderr(), "{}:{}: warning: {}", path, line, msg);
}

/// Get warning count
#[cfg(test)]
pub fn warning_count() -> u32 {
    WARNING_COUNT.load(Ordering::Relaxed)
}

// ============================================================================
// Tests
// ============================================================================
