//! Source positions for error reporting
//!
//! Both grammars report failures against the original text. The exchange
//! grammar runs over `char`s, so chumsky hands back char offsets; the
//! properties grammar runs over logos tokens, which carry byte ranges. Either
//! way the offset is turned into a [`Position`] through [`SourceLocation`],
//! which pre-computes line start offsets once per source:
//!
//! ```text
//! Source: "1CClientBankExchange\nH1=V1"
//!   line_starts = [0, 21]
//!   byte_to_position(24) -> line 2, column 4 (1-based, counted in chars)
//! ```
//!
//! Lines and columns are 1-based, the way editors show them. Columns count
//! characters rather than bytes, since exchange files are mostly Cyrillic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset into the source
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0, 1, 1)
    }
}

/// Converts offsets into line/column positions for one source text
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];

        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }

        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a position. Offsets past the end clamp to it.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let mut offset = byte_offset.min(self.source.len());
        while !self.source.is_char_boundary(offset) {
            offset -= 1;
        }

        let line = self
            .line_starts
            .binary_search(&offset)
            .unwrap_or_else(|i| i - 1);
        let line_start = self.line_starts[line];
        let column = self.source[line_start..offset].chars().count();

        Position::new(offset, line + 1, column + 1)
    }

    /// Convert a char offset (as reported by char-level parsers) to a position
    pub fn char_to_position(&self, char_offset: usize) -> Position {
        let byte_offset = self
            .source
            .char_indices()
            .nth(char_offset)
            .map(|(byte, _)| byte)
            .unwrap_or(self.source.len());
        self.byte_to_position(byte_offset)
    }

    /// The text of a 1-based line, without its terminator
    pub fn line_text(&self, line: usize) -> Option<&'a str> {
        let start = *self.line_starts.get(line.checked_sub(1)?)?;
        let end = self
            .line_starts
            .get(line)
            .copied()
            .unwrap_or(self.source.len());
        Some(self.source[start..end].trim_end_matches(['\r', '\n']))
    }
}

/// Drop a leading UTF-8 byte order mark
pub(crate) fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}
