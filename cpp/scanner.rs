//
// Copyright (c) 2025-2026 Jeff Garzik
//
// This file is part of the cscan project covered under
// the MIT License.  For the full license text, please see the LICENSE
// file in the root directory of this project.
// SPDX-License-Identifier: MIT
//
// Preprocessing character-stream scanner
//
// Returns source characters one at a time, stripping out comments,
// preprocessor directives, and the contents of single and double
// quoted strings; in short, everything that places a burden upon a
// downstream tokenizer. Macro definitions encountered along the way
// are collected as tag entries.
//

use super::arglist;
use crate::diag;
use crate::options::{Language, Options, TagLocate};
use crate::reader::{SourceReader, EOF};
use crate::tags::TagEntry;

// ============================================================================
// Character Constants
// ============================================================================

const TAB: i32 = b'\t' as i32;
const SPACE: i32 = b' ' as i32;
const NEWLINE: i32 = b'\n' as i32;
const BACKSLASH: i32 = b'\\' as i32;
const DOUBLE_QUOTE: i32 = b'"' as i32;
const SINGLE_QUOTE: i32 = b'\'' as i32;
const HASH: i32 = b'#' as i32;
const SLASH: i32 = b'/' as i32;
const QUESTION: i32 = b'?' as i32;
const LESS_THAN: i32 = b'<' as i32;
const COLON: i32 = b':' as i32;
const PERCENT: i32 = b'%' as i32;

/// Sentinels standing in for elided literals. Like multi-character
/// operators in a token stream, they live above the byte range so they
/// can never collide with an input byte or with EOF.
const SYMBOL_BASE: i32 = 256;
const STRING_SYMBOL: i32 = SYMBOL_BASE;
const CHAR_SYMBOL: i32 = SYMBOL_BASE + 1;

const MAX_NESTING_LEVEL: usize = 20;
const MAX_DIRECTIVE_NAME: usize = 10;
const MAX_PUSHBACK: usize = 2;
const MAX_RAW_DELIMITER: usize = 16;

/// Trigraph second characters and their replacements.
/// The full sequence is "??" followed by the left column.
const TRIGRAPHS: &[(u8, u8)] = &[
    (b'(', b'['),
    (b')', b']'),
    (b'<', b'{'),
    (b'>', b'}'),
    (b'/', b'\\'),
    (b'!', b'|'),
    (b'\'', b'^'),
    (b'-', b'~'),
    (b'=', b'#'),
];

fn trigraph_target(c: i32) -> Option<i32> {
    TRIGRAPHS
        .iter()
        .find(|&&(second, _)| second as i32 == c)
        .map(|&(_, target)| target as i32)
}

// ============================================================================
// Character Classification
// ============================================================================

fn is_alpha(c: i32) -> bool {
    (0..=255).contains(&c) && (c as u8).is_ascii_alphabetic()
}

fn is_alnum(c: i32) -> bool {
    (0..=255).contains(&c) && (c as u8).is_ascii_alphanumeric()
}

fn is_identifier_start(c: i32) -> bool {
    (0..=255).contains(&c) && {
        let b = c as u8;
        b.is_ascii_alphabetic() || b == b'_'
    }
}

fn is_identifier(c: i32) -> bool {
    (0..=255).contains(&c) && {
        let b = c as u8;
        b.is_ascii_alphanumeric() || b == b'_'
    }
}

// ============================================================================
// Filtered Characters
// ============================================================================

/// One element of the filtered character stream.
///
/// Elided string and character literals surface as opaque sentinels so
/// a downstream parser can treat each literal as a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CppChar {
    /// An ordinary character that survived preprocessing
    Byte(u8),
    /// Sentinel standing in for a string literal
    StringLit,
    /// Sentinel standing in for a character literal
    CharLit,
    /// End of input
    Eof,
}

impl CppChar {
    fn from_raw(c: i32) -> Self {
        match c {
            EOF => CppChar::Eof,
            STRING_SYMBOL => CppChar::StringLit,
            CHAR_SYMBOL => CppChar::CharLit,
            _ => CppChar::Byte(c as u8),
        }
    }

    fn raw(self) -> i32 {
        match self {
            CppChar::Eof => EOF,
            CppChar::StringLit => STRING_SYMBOL,
            CppChar::CharLit => CHAR_SYMBOL,
            CppChar::Byte(b) => b as i32,
        }
    }

    /// The ordinary byte, if this is one.
    pub fn as_byte(self) -> Option<u8> {
        match self {
            CppChar::Byte(b) => Some(b),
            _ => None,
        }
    }

    pub fn is_eof(self) -> bool {
        self == CppChar::Eof
    }
}

// ============================================================================
// Directive State
// ============================================================================

/// Kind of comment introduced by a '/'
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comment {
    None,
    C,
    Cplus,
    D,
}

/// Current directive being processed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DirectiveState {
    /// No known directive; ignore to end of line
    None,
    /// Initial '#' read; determine the directive
    Hash,
    /// "#define" encountered
    Define,
    /// "#undef" encountered
    Undef,
    /// "#if" or "#ifdef" encountered
    If,
    /// "#pragma" encountered
    Pragma,
}

/// One nesting level of a preprocessor conditional.
#[derive(Debug, Clone, Copy, Default)]
struct Conditional {
    /// Ignoring the parent conditional's branch
    ignore_all_branches: bool,
    /// Only one branch of this conditional may be followed
    single_branch: bool,
    /// A branch has already been selected
    branch_chosen: bool,
    /// Current ignore state
    ignoring: bool,
}

struct Directive {
    state: DirectiveState,
    /// A '#' here would start a directive
    accept: bool,
    /// Scratch buffer for macro and pragma names
    name: String,
    /// Conditional depth; level 0 is the always-active outermost frame
    nest_level: usize,
    ifdef: [Conditional; MAX_NESTING_LEVEL],
}

// ============================================================================
// Scanner
// ============================================================================

/// The preprocessing scanner for one extraction session.
///
/// `next_char` is the sole read operation: comments read as a single
/// space, string and character literals read as sentinels, trigraphs
/// and digraphs fold to their canonical characters, backslash-newline
/// pairs splice lines, preprocessor directives are consumed whole, and
/// bytes inside inactive conditional branches never surface. Macro
/// tags discovered while scanning accumulate in the session and are
/// drained with `take_tags`.
pub struct Scanner<'a> {
    reader: SourceReader<'a>,
    path: String,
    options: Options,
    at_literal_strings: bool,
    raw_literal_strings: bool,
    brace_format: bool,
    header_file: bool,
    /// An incomplete statement restricts conditional branch following
    resolve_required: bool,
    pushback: [i32; MAX_PUSHBACK],
    pushback_len: usize,
    directive: Directive,
    tags: Vec<TagEntry>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a [u8], path: &str, lang: Language, options: Options) -> Self {
        Self {
            reader: SourceReader::new(source),
            path: path.to_string(),
            options,
            at_literal_strings: lang.at_literal_strings,
            raw_literal_strings: lang.raw_literal_strings,
            brace_format: lang.brace_format,
            header_file: lang.header_file,
            resolve_required: false,
            pushback: [0; MAX_PUSHBACK],
            pushback_len: 0,
            directive: Directive {
                state: DirectiveState::None,
                accept: true,
                name: String::new(),
                nest_level: 0,
                ifdef: [Conditional::default(); MAX_NESTING_LEVEL],
            },
            tags: Vec::new(),
        }
    }

    /// Flag that a multi-token construct is in progress; at most one
    /// branch of any conditional entered from here on may be followed.
    pub fn begin_statement(&mut self) {
        self.resolve_required = true;
    }

    /// Clear the statement-in-progress flag at a statement boundary.
    pub fn end_statement(&mut self) {
        self.resolve_required = false;
    }

    /// Current conditional nesting depth.
    pub fn nest_level(&self) -> usize {
        self.directive.nest_level
    }

    /// Whether block ends are detected by brace counting.
    pub fn is_brace_format(&self) -> bool {
        self.brace_format
    }

    /// Push a filtered character back into the stream. At most two
    /// characters may be outstanding before the next read.
    pub fn unget_char(&mut self, c: CppChar) {
        debug_assert!(self.pushback_len < MAX_PUSHBACK, "scanner pushback overflow");
        if self.pushback_len < MAX_PUSHBACK {
            self.pushback[self.pushback_len] = c.raw();
            self.pushback_len += 1;
        }
    }

    /// Tags collected so far, draining the session's buffer.
    pub fn take_tags(&mut self) -> Vec<TagEntry> {
        std::mem::take(&mut self.tags)
    }

    /// Reconstruct the parenthesized argument list that follows `name`,
    /// searching from byte offset `start` to the end of that physical
    /// line.
    pub fn arglist_at(&self, start: usize, name: &str) -> Option<String> {
        let end = self.reader.line_end(start);
        let mut buf = self.reader.slice(start, end).to_vec();
        arglist::arglist_from_str(&mut buf, name)
    }

    // ========================================================================
    // Conditional Stack
    // ========================================================================

    fn current_conditional(&mut self) -> &mut Conditional {
        &mut self.directive.ifdef[self.directive.nest_level]
    }

    fn is_ignore(&self) -> bool {
        self.directive.ifdef[self.directive.nest_level].ignoring
    }

    fn set_ignore(&mut self, ignoring: bool) -> bool {
        self.current_conditional().ignoring = ignoring;
        ignoring
    }

    /// Whether the branch introduced by an `#elif`/`#else` must be
    /// ignored.
    fn is_ignore_branch(&mut self) -> bool {
        // Force a single branch if an incomplete statement is
        // discovered en route. Earlier branches containing complete
        // statements may have been followed, but no further branches
        // can be.
        if self.resolve_required && !self.brace_format {
            self.current_conditional().single_branch = true;
        }
        let ifdef = self.directive.ifdef[self.directive.nest_level];
        ifdef.ignore_all_branches || (ifdef.branch_chosen && ifdef.single_branch)
    }

    fn choose_branch(&mut self) {
        if !self.brace_format {
            let resolve_required = self.resolve_required;
            let ifdef = self.current_conditional();
            ifdef.branch_chosen = ifdef.single_branch || resolve_required;
        }
    }

    /// Push one nesting level for an `#if` directive, indicating
    /// whether the branch should be ignored and whether a branch has
    /// already been chosen. A push beyond the depth limit is dropped.
    fn push_conditional(&mut self, first_branch_chosen: bool) -> bool {
        let ignore_all_branches = self.is_ignore();
        let mut ignore_branch = false;

        if self.directive.nest_level < MAX_NESTING_LEVEL - 1 {
            self.directive.nest_level += 1;

            // Snapshot whether an incomplete statement is in progress
            // upon entering the conditional; if so, only a single
            // branch of the conditional may be followed.
            let single_branch = self.resolve_required;
            let brace_format = self.brace_format;
            let if0 = self.options.if0;
            let ifdef = self.current_conditional();
            ifdef.ignore_all_branches = ignore_all_branches;
            ifdef.single_branch = single_branch;
            ifdef.branch_chosen = first_branch_chosen;
            ifdef.ignoring = ignore_all_branches
                || (!first_branch_chosen && !brace_format && (single_branch || !if0));
            ignore_branch = ifdef.ignoring;
        }
        ignore_branch
    }

    /// Pop one nesting level for an `#endif` directive.
    fn pop_conditional(&mut self) -> bool {
        if self.directive.nest_level > 0 {
            self.directive.nest_level -= 1;
        }
        self.is_ignore()
    }

    // ========================================================================
    // Directive Parsing
    // ========================================================================

    /// Read a directive name of up to nine alphabetic characters, the
    /// first of which is `first`. The terminating character is pushed
    /// back.
    fn read_directive_word(&mut self, first: i32) -> String {
        let mut name = String::new();
        let mut c = first;
        for i in 0..MAX_DIRECTIVE_NAME - 1 {
            if i > 0 {
                c = self.reader.getc();
                if c == EOF || !is_alpha(c) {
                    self.reader.ungetc(c);
                    break;
                }
            }
            name.push(c as u8 as char);
        }
        name
    }

    /// Read an identifier whose first character is `first` into the
    /// directive scratch buffer.
    fn read_identifier(&mut self, first: i32) {
        self.directive.name.clear();
        let mut c = first;
        loop {
            self.directive.name.push(c as u8 as char);
            c = self.reader.getc();
            if c == EOF || !is_identifier(c) {
                break;
            }
        }
        self.reader.ungetc(c);
    }

    /// Emit a macro tag for the identifier in the scratch buffer.
    /// `arglist_start` carries the buffer offset of a parameterized
    /// macro's name, from which the signature is reconstructed.
    fn make_define_tag(&mut self, arglist_start: Option<usize>, line: u32) {
        let is_file_scope = !self.header_file;

        if self.options.define_tags && (!is_file_scope || self.options.include_file_scope) {
            let name = self.directive.name.clone();
            let mut entry = TagEntry::new(&name);
            entry.line = line;
            entry.line_number_entry = self.options.locate != TagLocate::Pattern;
            entry.is_file_scope = is_file_scope;
            entry.truncate_line = true;
            if let Some(start) = arglist_start {
                entry.signature = self.arglist_at(start, &name);
            }
            self.tags.push(entry);
        }
    }

    /// Handle the identifier of a `#define` or `#undef`.
    fn directive_define(&mut self, c: i32) {
        if is_identifier_start(c) {
            let name_start = self.reader.tell() - 1;
            let line = self.reader.line();
            self.read_identifier(c);
            let nc = self.reader.getc();
            self.reader.ungetc(nc);
            let parameterized = nc == b'(' as i32;
            if !self.is_ignore() {
                let arglist_start = if parameterized { Some(name_start) } else { None };
                self.make_define_tag(arglist_start, line);
            }
        }
        self.directive.state = DirectiveState::None;
    }

    /// Handle the body of a `#pragma`. Only `#pragma weak NAME` is of
    /// interest; it yields a macro tag for the weak symbol name.
    fn directive_pragma(&mut self, c: i32) {
        if is_identifier_start(c) {
            self.read_identifier(c);
            if self.directive.name == "weak" {
                let mut c = self.reader.getc();
                while c == SPACE {
                    c = self.reader.getc();
                }
                if is_identifier_start(c) {
                    let line = self.reader.line();
                    self.read_identifier(c);
                    self.make_define_tag(None, line);
                }
            }
        }
        self.directive.state = DirectiveState::None;
    }

    /// Handle the first non-space character after an `#if`-family
    /// directive. No expression evaluation is done: a branch is taken
    /// to be chosen unless it opens with the classic `#if 0`.
    fn directive_if(&mut self, c: i32) -> bool {
        let ignore = self.push_conditional(c != b'0' as i32);
        self.directive.state = DirectiveState::None;
        ignore
    }

    /// Determine the directive following a '#' and dispatch it.
    fn directive_hash(&mut self, c: i32) -> bool {
        let mut ignore = false;
        let name = self.read_directive_word(c);

        if name == "define" {
            self.directive.state = DirectiveState::Define;
        } else if name == "undef" {
            self.directive.state = DirectiveState::Undef;
        } else if name.starts_with("if") {
            self.directive.state = DirectiveState::If;
        } else if name == "elif" || name == "else" {
            let branch_ignored = self.is_ignore_branch();
            ignore = self.set_ignore(branch_ignored);
            if !ignore && name == "else" {
                self.choose_branch();
            }
            self.directive.state = DirectiveState::None;
        } else if name == "endif" {
            ignore = self.pop_conditional();
            self.directive.state = DirectiveState::None;
        } else if name == "pragma" {
            self.directive.state = DirectiveState::Pragma;
        } else {
            self.directive.state = DirectiveState::None;
        }
        ignore
    }

    /// Handle one character of a preprocessor directive.
    fn handle_directive(&mut self, c: i32) -> bool {
        let ignore = self.is_ignore();
        match self.directive.state {
            DirectiveState::None => self.is_ignore(),
            DirectiveState::Hash => self.directive_hash(c),
            DirectiveState::If => self.directive_if(c),
            DirectiveState::Define | DirectiveState::Undef => {
                self.directive_define(c);
                ignore
            }
            DirectiveState::Pragma => {
                self.directive_pragma(c);
                ignore
            }
        }
    }

    // ========================================================================
    // Comment and Literal Skippers
    // ========================================================================

    /// Determine whether a '/' starts a comment, and its flavor.
    fn comment_kind(&mut self) -> Comment {
        let next = self.reader.getc();
        if next == b'*' as i32 {
            Comment::C
        } else if next == SLASH {
            Comment::Cplus
        } else if next == b'+' as i32 {
            Comment::D
        } else {
            self.reader.ungetc(next);
            Comment::None
        }
    }

    /// Skip over a C comment. A comment reads as white space, so a
    /// single space is substituted.
    fn skip_c_comment(&mut self) -> i32 {
        let line = self.reader.line();
        let mut c = self.reader.getc();

        while c != EOF {
            if c != b'*' as i32 {
                c = self.reader.getc();
            } else {
                let next = self.reader.getc();
                if next != SLASH {
                    c = next;
                } else {
                    c = SPACE;
                    break;
                }
            }
        }
        if c == EOF {
            diag::warning(&self.path, line, "end of file in the middle of a comment");
        }
        c
    }

    /// Skip over a C++ comment. A backslash continues the comment onto
    /// the next line.
    fn skip_cplus_comment(&mut self) -> i32 {
        loop {
            let c = self.reader.getc();
            if c == BACKSLASH {
                self.reader.getc(); // throw away the next character, too
            } else if c == NEWLINE || c == EOF {
                return c;
            }
        }
    }

    /// Skip over a D comment. Nested `/+ +/` comments are not matched.
    fn skip_d_comment(&mut self) -> i32 {
        let line = self.reader.line();
        let mut c = self.reader.getc();

        while c != EOF {
            if c != b'+' as i32 {
                c = self.reader.getc();
            } else {
                let next = self.reader.getc();
                if next != SLASH {
                    c = next;
                } else {
                    c = SPACE;
                    break;
                }
            }
        }
        if c == EOF {
            diag::warning(&self.path, line, "end of file in the middle of a comment");
        }
        c
    }

    /// Skip to the end of a string literal, returning a sentinel that
    /// stands in for the whole literal. Verbatim strings pass
    /// `ignore_backslash` since backslash has no escape meaning there.
    fn skip_string(&mut self, ignore_backslash: bool) -> i32 {
        let line = self.reader.line();
        loop {
            let c = self.reader.getc();
            if c == EOF {
                diag::warning(&self.path, line, "end of file in the middle of a string");
                break;
            }
            if c == BACKSLASH && !ignore_backslash {
                self.reader.getc(); // throw away the next character, too
            } else if c == DOUBLE_QUOTE {
                break;
            }
        }
        STRING_SYMBOL
    }

    /// Skip to the end of a character literal, returning a sentinel.
    /// Vera numbers with a base specifier (e.g. 'b1010) are consumed
    /// as a unit.
    fn skip_char(&mut self) -> i32 {
        let mut count = 0;
        let mut vera_base = 0;

        loop {
            let c = self.reader.getc();
            if c == EOF {
                break;
            }
            count += 1;
            if c == BACKSLASH {
                self.reader.getc(); // throw away the next character, too
            } else if c == SINGLE_QUOTE {
                break;
            } else if c == NEWLINE {
                self.reader.ungetc(c);
                break;
            } else if count == 1 && matches!((c as u8).to_ascii_uppercase(), b'D' | b'H' | b'O' | b'B')
            {
                vera_base = c;
            } else if vera_base != 0 && !is_alnum(c) {
                self.reader.ungetc(c);
                break;
            }
        }
        CHAR_SYMBOL
    }

    fn is_raw_delimiter_char(c: i32) -> bool {
        if c == EOF {
            return false;
        }
        !matches!(
            c as u8,
            b' ' | b'\x0c' | b'\n' | b'\r' | b'\t' | b'\x0b' | b'(' | b')' | b'\\'
        )
    }

    /// Skip a raw string literal `R"delim(...)delim"`. The `R"` has
    /// already been consumed. Without a valid delimiter or '(', the
    /// literal is scanned as a plain string instead.
    fn skip_raw_string(&mut self) -> i32 {
        let line = self.reader.line();
        let mut c = self.reader.getc();

        if c != b'(' as i32 && !Self::is_raw_delimiter_char(c) {
            self.reader.ungetc(c);
            return self.skip_string(false);
        }

        let mut delim = [0i32; MAX_RAW_DELIMITER];
        let mut delim_len = 0;
        let mut collect_delim = true;
        loop {
            if collect_delim {
                if Self::is_raw_delimiter_char(c) && delim_len < MAX_RAW_DELIMITER {
                    delim[delim_len] = c;
                    delim_len += 1;
                } else {
                    collect_delim = false;
                }
            } else if c == b')' as i32 {
                let mut i = 0;
                loop {
                    c = self.reader.getc();
                    if c == EOF || i >= delim_len || delim[i] != c {
                        break;
                    }
                    i += 1;
                }
                if i == delim_len && c == DOUBLE_QUOTE {
                    return STRING_SYMBOL;
                }
                self.reader.ungetc(c);
            }

            c = self.reader.getc();
            if c == EOF {
                diag::warning(&self.path, line, "end of file in the middle of a string");
                break;
            }
        }
        STRING_SYMBOL
    }

    // ========================================================================
    // Driver
    // ========================================================================

    /// Tail handling for an ordinary character: a directive can no
    /// longer start on this line, and inside a directive the character
    /// feeds the directive state machine.
    fn plain_char(&mut self, c: i32, directive: bool, ignore: bool) -> bool {
        self.directive.accept = false;
        if directive {
            self.handle_directive(c)
        } else {
            ignore
        }
    }

    /// Return the next character of the filtered stream.
    pub fn next_char(&mut self) -> CppChar {
        if self.pushback_len > 0 {
            self.pushback_len -= 1;
            return CppChar::from_raw(self.pushback[self.pushback_len]);
        }

        let mut directive = false;
        let mut ignore = false;

        let c = 'scan: loop {
            let mut c = self.reader.getc();

            'process: loop {
                match c {
                    EOF => {
                        ignore = false;
                        directive = false;
                    }

                    TAB | SPACE => {} // most white space flows through untouched

                    NEWLINE => {
                        if directive && !ignore {
                            directive = false;
                        }
                        self.directive.accept = true;
                    }

                    DOUBLE_QUOTE => {
                        self.directive.accept = false;
                        c = self.skip_string(false);
                    }

                    HASH => {
                        if self.directive.accept {
                            directive = true;
                            self.directive.state = DirectiveState::Hash;
                            self.directive.accept = false;
                        }
                    }

                    SINGLE_QUOTE => {
                        self.directive.accept = false;
                        c = self.skip_char();
                    }

                    SLASH => match self.comment_kind() {
                        Comment::C => c = self.skip_c_comment(),
                        Comment::Cplus => {
                            c = self.skip_cplus_comment();
                            if c == NEWLINE {
                                self.reader.ungetc(c);
                            }
                        }
                        Comment::D => c = self.skip_d_comment(),
                        Comment::None => self.directive.accept = false,
                    },

                    BACKSLASH => {
                        let next = self.reader.getc();
                        if next == NEWLINE {
                            continue 'scan; // line continuation
                        }
                        self.reader.ungetc(next);
                    }

                    QUESTION => {
                        let next = self.reader.getc();
                        if next != QUESTION {
                            self.reader.ungetc(next);
                        } else {
                            let next = self.reader.getc();
                            match trigraph_target(next) {
                                Some(HASH) => {
                                    c = HASH;
                                    continue 'process; // may start a directive
                                }
                                Some(BACKSLASH) => {
                                    c = BACKSLASH;
                                    continue 'process; // may continue a line
                                }
                                Some(folded) => c = folded,
                                None => {
                                    // not a trigraph; the consumed pair
                                    // re-reads in its original order
                                    self.reader.ungetc(next);
                                    self.reader.ungetc(QUESTION);
                                }
                            }
                        }
                    }

                    // digraphs:
                    // input:  <:  :>  <%  %>  %:
                    // output: [   ]   {   }   #
                    LESS_THAN => {
                        let next = self.reader.getc();
                        if next == COLON {
                            c = b'[' as i32;
                        } else if next == PERCENT {
                            c = b'{' as i32;
                        } else {
                            self.reader.ungetc(next);
                        }
                        ignore = self.plain_char(c, directive, ignore);
                    }
                    COLON => {
                        let next = self.reader.getc();
                        if next == b'>' as i32 {
                            c = b']' as i32;
                        } else {
                            self.reader.ungetc(next);
                        }
                        ignore = self.plain_char(c, directive, ignore);
                    }
                    PERCENT => {
                        let next = self.reader.getc();
                        if next == b'>' as i32 {
                            c = b'}' as i32;
                        } else if next == COLON {
                            c = HASH;
                            continue 'process; // may start a directive
                        } else {
                            self.reader.ungetc(next);
                        }
                        ignore = self.plain_char(c, directive, ignore);
                    }

                    _ => {
                        if c == b'@' as i32 && self.at_literal_strings {
                            let next = self.reader.getc();
                            if next == DOUBLE_QUOTE {
                                self.directive.accept = false;
                                c = self.skip_string(true);
                                break 'process;
                            }
                            self.reader.ungetc(next);
                        } else if c == b'R' as i32 && self.raw_literal_strings {
                            // "R" must stand alone, not end an
                            // identifier, except for the raw-string
                            // encoding prefixes LR, uR, UR and u8R.
                            let prev = self.reader.nth_prev(1, 0);
                            let prev2 = self.reader.nth_prev(2, 0);
                            let prev3 = self.reader.nth_prev(3, 0);
                            if !is_identifier(prev)
                                || (!is_identifier(prev2)
                                    && (prev == b'L' as i32
                                        || prev == b'u' as i32
                                        || prev == b'U' as i32))
                                || (!is_identifier(prev3)
                                    && prev2 == b'u' as i32
                                    && prev == b'8' as i32)
                            {
                                let next = self.reader.getc();
                                if next != DOUBLE_QUOTE {
                                    self.reader.ungetc(next);
                                } else {
                                    self.directive.accept = false;
                                    c = self.skip_raw_string();
                                    break 'process;
                                }
                            }
                        }
                        ignore = self.plain_char(c, directive, ignore);
                    }
                }
                break 'process;
            }

            if !(directive || ignore) {
                break 'scan c;
            }
        };

        CppChar::from_raw(c)
    }
}

// ============================================================================
// Tests
// ============================================================================
