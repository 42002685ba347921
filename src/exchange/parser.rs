//! Parser service for client bank exchange files
//!
//! The grammar lives in [`combinators`] (primitive rules) and [`elements`]
//! (sections and the document). This module drives it against a full text
//! buffer and turns a grammar failure into a [`ParseError`].
//!
//! Every rule returns its own typed value and the enclosing rule composes
//! them, so a parse keeps no state outside the call. [`ExchangeParser`] is a
//! plain value that can be shared freely between threads.
//!
//! A parse either succeeds with a complete [`Document`] or fails; there is no
//! partial result and no recovery past the first failure.

pub mod combinators;
pub mod elements;


use chumsky::error::SimpleReason;
use chumsky::Parser as _;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, ParseError, ParseErrorKind, Result};
use crate::exchange::ast::Document;
use crate::location::{strip_bom, SourceLocation};
use combinators::ParserError;
use elements::document::document;

/// Parses exchange text into a [`Document`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ExchangeParser;

impl ExchangeParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse a whole exchange file held in memory
    pub fn parse(&self, source: &str) -> Result<Document> {
        debug!(bytes = source.len(), "parsing exchange document");

        match document().parse(source) {
            Ok(doc) => {
                debug!(
                    heading = doc.heading.len(),
                    account = doc.account.items.len(),
                    sections = doc.sections.len(),
                    "parsed exchange document"
                );
                Ok(doc)
            }
            Err(errors) => {
                let error = convert_errors(source, errors);
                debug!(%error, "exchange document rejected");
                Err(error.into())
            }
        }
    }

    /// Read a file fully into memory, then parse it
    ///
    /// A leading UTF-8 byte order mark is skipped.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading exchange file");

        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(strip_bom(&source))
    }
}

/// Parse exchange text with a fresh [`ExchangeParser`]
pub fn parse(source: &str) -> Result<Document> {
    ExchangeParser::new().parse(source)
}

/// Read and parse an exchange file with a fresh [`ExchangeParser`]
pub fn parse_file(path: impl AsRef<Path>) -> Result<Document> {
    ExchangeParser::new().parse_file(path)
}

/// Keep the error that got furthest into the input
fn convert_errors(source: &str, errors: Vec<ParserError>) -> ParseError {
    let locator = SourceLocation::new(source);
    errors
        .into_iter()
        .max_by_key(|error| error.span().start)
        .map(|error| convert_error(source, &locator, error))
        .unwrap_or_else(|| {
            ParseError::new(
                ParseErrorKind::GrammarMismatch,
                locator.char_to_position(0),
            )
        })
}

fn convert_error(source: &str, locator: &SourceLocation, error: ParserError) -> ParseError {
    let span = error.span();
    let position = locator.char_to_position(span.start);

    let expected: Vec<String> = match error.label() {
        Some(label) => vec![label.to_string()],
        None => error
            .expected()
            .map(|expected| match expected {
                Some(c) => format!("{:?}", c),
                None => "end of input".to_string(),
            })
            .collect(),
    };

    match error.reason() {
        SimpleReason::Custom(reason) => {
            let found: String = source
                .chars()
                .skip(span.start)
                .take(span.end.saturating_sub(span.start))
                .take_while(|c| *c != '\r' && *c != '\n')
                .collect();
            ParseError::new(ParseErrorKind::GrammarMismatch, position)
                .with_expected(expected)
                .with_found(format!("{:?}", found))
                .with_reason(reason.clone())
        }
        _ => match error.found() {
            Some(found) => ParseError::new(ParseErrorKind::GrammarMismatch, position)
                .with_expected(expected)
                .with_found(format!("{:?}", found)),
            None => ParseError::new(ParseErrorKind::IncompleteInput, position)
                .with_expected(expected),
        },
    }
}
