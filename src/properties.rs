//! Sectioned properties files
//!
//! A small companion format: root-level `key=value` lines mixed with named
//! blocks that open with `[Name]` and close with `[-Name]`.
//!
//! ```text
//! host=localhost
//! [Database]
//! user=admin
//! [-Database]
//! ```
//!
//! Tokenizing is done by logos ([`tokens`], [`lexer`]); the grammar in
//! [`parser`] runs over the token stream.

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod tokens;

use chumsky::Parser as _;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::location::strip_bom;
pub use ast::{PropertiesSection, SimpleProperties};

/// Parses properties text into [`SimpleProperties`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesParser;

impl PropertiesParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, source: &str) -> Result<SimpleProperties> {
        let tokens = lexer::tokenize_with_locations(source);
        debug!(tokens = tokens.len(), "parsing properties");

        match parser::document(Arc::new(source.to_string())).parse(tokens.as_slice()) {
            Ok(properties) => {
                debug!(
                    properties = properties.properties.len(),
                    sections = properties.sections.len(),
                    "parsed properties"
                );
                Ok(properties)
            }
            Err(errors) => {
                let error = parser::convert_errors(source, &tokens, errors);
                debug!(%error, "properties rejected");
                Err(error.into())
            }
        }
    }

    /// Read a file fully into memory, then parse it
    ///
    /// A leading UTF-8 byte order mark is skipped.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<SimpleProperties> {
        let path = path.as_ref();
        debug!(path = %path.display(), "reading properties file");

        let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(strip_bom(&source))
    }
}

pub fn parse(source: &str) -> Result<SimpleProperties> {
    PropertiesParser::new().parse(source)
}

pub fn parse_file(path: impl AsRef<Path>) -> Result<SimpleProperties> {
    PropertiesParser::new().parse_file(path)
}
