//! # clientbank
//!
//! Parsers for 1C "client bank exchange" files and for a small sectioned
//! properties format.
//!
//! - [`exchange`]: the exchange grammar, its document model and a builder.
//! - [`properties`]: root `key=value` lines and `[Name] ... [-Name]` blocks.
//! - [`formats`]: summary, JSON, YAML and text output for both models.
//! - [`config`]: layered settings for the `clientbank` command.
//!
//! Parsing is all or nothing: a call returns a complete document or a
//! [`ParseError`] with the position where the input stopped matching.

pub mod config;
pub mod error;
pub mod exchange;
pub mod formats;
pub mod location;
pub mod properties;

pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use exchange::{Document, DocumentBuilder, ExchangeParser};
pub use formats::OutputFormat;
pub use location::Position;
pub use properties::{PropertiesParser, SimpleProperties};
