//! Parser for the sectioned properties format using chumsky
//!
//! Runs over the `(Token, byte range)` pairs produced by the lexer and slices
//! names, keys and values out of the source by range.
//!
//! Grammar:
//!     <document>   = <newline>* (<entry> <newline>*)* <end-of-input>
//!     <entry>      = <section> | <property>
//!     <property>   = <word> "=" <any-but-newline>*
//!     <section>    = "[" <word>@open "]" <newline>+
//!                    (<property> <newline>*)*
//!                    "[" "-" <word>@close "]"         where close == open
//!
//! The closing tag is the one place where the grammar is not context free.
//! It is parsed like any other name and then compared against the opening
//! name. A mismatch is emitted as an error at the closing name, so the
//! document as a whole is rejected even though parsing carries on.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;
use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::Arc;

use crate::error::{ParseError, ParseErrorKind};
use crate::location::SourceLocation;
use crate::properties::ast::{PropertiesSection, SimpleProperties};
use crate::properties::lexer::TokenLocation;
use crate::properties::tokens::Token;

/// Type alias for parser error
pub(crate) type ParserError = Simple<TokenLocation>;

enum Entry {
    Property(String, String),
    Section(PropertiesSection),
}

/// Helper: match a specific token type, yielding its byte range
fn token(expected: Token) -> impl Parser<TokenLocation, Range<usize>, Error = ParserError> + Clone {
    let label = expected.describe();
    filter(move |(token, _): &TokenLocation| token == &expected)
        .map(|(_, location)| location)
        .labelled(label)
}

fn newline() -> impl Parser<TokenLocation, (), Error = ParserError> + Clone {
    token(Token::Newline).ignored()
}

fn name(source: Arc<String>) -> impl Parser<TokenLocation, String, Error = ParserError> + Clone {
    token(Token::Word)
        .map(move |range| source[range].to_string())
        .labelled("section name")
}

/// `key=value`, the value running to the end of the line untouched
pub(crate) fn property(
    source: Arc<String>,
) -> impl Parser<TokenLocation, (String, String), Error = ParserError> + Clone {
    let key_source = source.clone();
    let key = token(Token::Word)
        .map(move |range| key_source[range].to_string())
        .labelled("key");

    let value = filter(|(token, _): &TokenLocation| !token.is_newline())
        .repeated()
        .map(move |tokens: Vec<TokenLocation>| match (tokens.first(), tokens.last()) {
            (Some((_, first)), Some((_, last))) => source[first.start..last.end].to_string(),
            _ => String::new(),
        });

    key.then_ignore(token(Token::Equals)).then(value)
}

fn property_lines(
    source: Arc<String>,
) -> impl Parser<TokenLocation, BTreeMap<String, String>, Error = ParserError> + Clone {
    property(source)
        .then_ignore(newline().repeated())
        .repeated()
        .map(|pairs| pairs.into_iter().collect())
}

/// `[Name]` ... `[-Name]`, with the closing name checked against the opening one
pub(crate) fn section(
    source: Arc<String>,
) -> impl Parser<TokenLocation, PropertiesSection, Error = ParserError> + Clone {
    let open = token(Token::OpenBracket)
        .ignore_then(name(source.clone()))
        .then_ignore(token(Token::CloseBracket));

    let close = token(Token::OpenBracket)
        .ignore_then(token(Token::Dash))
        .ignore_then(name(source.clone()).map_with_span(|name, span| (name, span)))
        .then_ignore(token(Token::CloseBracket));

    open.then_ignore(newline().repeated().at_least(1))
        .then(property_lines(source))
        .then(close)
        .validate(|((opened, properties), (closed, span)), _, emit| {
            if closed != opened {
                emit(Simple::custom(
                    span,
                    format!("section [{}] is closed by [-{}]", opened, closed),
                ));
            }
            PropertiesSection::new(opened, properties)
        })
}

pub(crate) fn document(
    source: Arc<String>,
) -> impl Parser<TokenLocation, SimpleProperties, Error = ParserError> + Clone {
    let entry = section(source.clone())
        .map(Entry::Section)
        .or(property(source).map(|(key, value)| Entry::Property(key, value)))
        .then_ignore(newline().repeated());

    newline()
        .repeated()
        .ignore_then(entry.repeated())
        .then_ignore(end())
        .map(|entries| {
            let mut document = SimpleProperties::default();
            for entry in entries {
                match entry {
                    Entry::Property(key, value) => {
                        document.properties.insert(key, value);
                    }
                    Entry::Section(section) => document.sections.push(section),
                }
            }
            document
        })
}

/// Keep the error that got furthest into the token stream
pub(crate) fn convert_errors(
    source: &str,
    tokens: &[TokenLocation],
    errors: Vec<ParserError>,
) -> ParseError {
    let locator = SourceLocation::new(source);
    errors
        .into_iter()
        .max_by_key(|error| error.span().start)
        .map(|error| convert_error(source, tokens, &locator, error))
        .unwrap_or_else(|| {
            ParseError::new(ParseErrorKind::GrammarMismatch, locator.byte_to_position(0))
        })
}

fn convert_error(
    source: &str,
    tokens: &[TokenLocation],
    locator: &SourceLocation,
    error: ParserError,
) -> ParseError {
    let span = error.span();
    let byte = tokens
        .get(span.start)
        .map(|(_, location)| location.start)
        .unwrap_or(source.len());
    let position = locator.byte_to_position(byte);

    let expected: Vec<String> = match error.label() {
        Some(label) => vec![label.to_string()],
        None => error
            .expected()
            .map(|expected| match expected {
                Some((token, _)) => token.describe().to_string(),
                None => "end of input".to_string(),
            })
            .collect(),
    };

    match error.reason() {
        SimpleReason::Custom(reason) => {
            let mut err = ParseError::new(ParseErrorKind::GrammarMismatch, position)
                .with_expected(expected)
                .with_reason(reason.clone());
            let covered = tokens.get(span.start..span.end).and_then(|slice| {
                Some(source[slice.first()?.1.start..slice.last()?.1.end].to_string())
            });
            if let Some(text) = covered {
                err = err.with_found(format!("{:?}", text));
            }
            err
        }
        _ => match error.found() {
            Some((_, location)) => ParseError::new(ParseErrorKind::GrammarMismatch, position)
                .with_expected(expected)
                .with_found(format!("{:?}", &source[location.clone()])),
            None => ParseError::new(ParseErrorKind::IncompleteInput, position)
                .with_expected(expected),
        },
    }
}
