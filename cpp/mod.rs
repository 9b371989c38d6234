//
// Copyright (c) 2025-2026 Jeff Garzik
//
// This file is part of the cscan project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Preprocessing scanner module for cscan
//
// This module exports the character-stream transducer and the macro
// argument-list extractor.
//

mod arglist;
mod scanner;

pub use arglist::{arglist_from_str, strip_code};
pub use scanner::{CppChar, Scanner};
