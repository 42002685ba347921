//! Error types shared by both grammars

use crate::location::Position;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a parse failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParseErrorKind {
    /// The input does not match the expected structure at some position
    GrammarMismatch,
    /// The input ended while a mandatory construct was still open
    IncompleteInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::GrammarMismatch => write!(f, "grammar mismatch"),
            ParseErrorKind::IncompleteInput => write!(f, "incomplete input"),
        }
    }
}

/// A grammar failure. No partial document accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
    /// Tokens that would have let the parse continue, in display form
    pub expected: Vec<String>,
    /// What was actually found, `None` at end of input
    pub found: Option<String>,
    /// Extra context for failures that are not a plain token mismatch
    pub reason: Option<String>,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        Self {
            kind,
            position,
            expected: Vec::new(),
            found: None,
            reason: None,
        }
    }

    pub fn with_expected<I, S>(mut self, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut expected: Vec<String> = expected.into_iter().map(Into::into).collect();
        expected.sort();
        expected.dedup();
        self.expected = expected;
        self
    }

    pub fn with_found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.kind, self.position.line, self.position.column
        )?;
        if let Some(reason) = &self.reason {
            write!(f, ": {}", reason)?;
        }
        if !self.expected.is_empty() {
            write!(f, ": expected {}", self.expected.join(" or "))?;
        }
        match &self.found {
            Some(found) => write!(f, ", found {}", found),
            None => write!(f, ", found end of input"),
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors returned by the parser services and the configuration loader
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("failed to serialize as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to serialize as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The model holds text that would not read back the same way
    #[error("cannot write as text: {0}")]
    Render(String),
}

impl Error {
    /// The grammar failure behind this error, if it is one
    pub fn as_parse_error(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
