//! Regex literal payloads.
//!
//! A `@pattern@flags` literal is compiled once, at parse time. The flag
//! set mirrors the source surface (`g i m s u y`); only `i`, `m`, `s` and
//! `u` influence matching — `g` and `y` are positional concerns that do
//! not apply to a pure membership test, but they are preserved so two
//! literals with different flags never compare equal.

use std::fmt;
use std::sync::Arc;

use bitflags::bitflags;
use regex::{Regex, RegexBuilder};

bitflags! {
    /// Source-level regex flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RegexFlags: u8 {
        /// `g`
        const GLOBAL = 1 << 0;
        /// `i`
        const IGNORE_CASE = 1 << 1;
        /// `m`
        const MULTI_LINE = 1 << 2;
        /// `s`
        const DOT_ALL = 1 << 3;
        /// `u`
        const UNICODE = 1 << 4;
        /// `y`
        const STICKY = 1 << 5;
    }
}

impl RegexFlags {
    /// Map one source flag character. Returns `None` for anything outside
    /// the recognised set.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'g' => Some(RegexFlags::GLOBAL),
            'i' => Some(RegexFlags::IGNORE_CASE),
            'm' => Some(RegexFlags::MULTI_LINE),
            's' => Some(RegexFlags::DOT_ALL),
            'u' => Some(RegexFlags::UNICODE),
            'y' => Some(RegexFlags::STICKY),
            _ => None,
        }
    }

    /// Render the flags in canonical `gimsuy` order.
    pub fn render(self) -> String {
        let mut out = String::new();
        for (flag, c) in [
            (RegexFlags::GLOBAL, 'g'),
            (RegexFlags::IGNORE_CASE, 'i'),
            (RegexFlags::MULTI_LINE, 'm'),
            (RegexFlags::DOT_ALL, 's'),
            (RegexFlags::UNICODE, 'u'),
            (RegexFlags::STICKY, 'y'),
        ] {
            if self.contains(flag) {
                out.push(c);
            }
        }
        out
    }
}

/// A precompiled regex literal: pattern source, flags, and the compiled
/// matcher.
#[derive(Clone, Debug)]
pub struct RegexSource {
    pattern: String,
    flags: RegexFlags,
    compiled: Arc<Regex>,
}

impl RegexSource {
    /// Compile a pattern with the given flag set.
    ///
    /// Compilation happens exactly once, at parse time; an invalid pattern
    /// is a syntax error in the conscription.
    pub fn compile(pattern: &str, flags: RegexFlags) -> Result<Self, regex::Error> {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(flags.contains(RegexFlags::IGNORE_CASE))
            .multi_line(flags.contains(RegexFlags::MULTI_LINE))
            .dot_matches_new_line(flags.contains(RegexFlags::DOT_ALL))
            .unicode(true)
            .build()?;
        Ok(RegexSource {
            pattern: pattern.to_string(),
            flags,
            compiled: Arc::new(compiled),
        })
    }

    /// The pattern text as written in the source.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The source flag set.
    pub fn flags(&self) -> RegexFlags {
        self.flags
    }

    /// Test a string against the pattern.
    pub fn is_match(&self, haystack: &str) -> bool {
        self.compiled.is_match(haystack)
    }
}

/// Regexes compare by pattern and flags, not matcher identity.
impl PartialEq for RegexSource {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.flags == other.flags
    }
}

impl fmt::Display for RegexSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}@{}", self.pattern, self.flags.render())
    }
}
