//! Tokenization for the sectioned properties format
//!
//! The actual tokenization is handled entirely by logos; this module keeps the
//! byte range of every token so the parser can slice keys, values and section
//! names straight out of the source.

use logos::Logos;
use std::ops::Range;

use crate::properties::tokens::Token;

/// Token paired with its byte range in the source
pub type TokenLocation = (Token, Range<usize>);

/// Tokenize a string and collect tokens with their byte ranges
pub fn tokenize_with_locations(source: &str) -> Vec<TokenLocation> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }

    tokens
}
