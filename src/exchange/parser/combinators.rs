//! Primitive rules and reusable combinators for the exchange grammar
//!
//! The grammar runs directly over the characters of the source. Everything
//! in the format is a keyword line or a `key=value` line, so a separate token
//! stage buys nothing here.
//!
//! Grammar:
//!     <key>                 = [^=\r\n]+            (trimmed)
//!     <value>               = [^\r\n]*             (trimmed)
//!     <section-name>        = [^\r\n]+             (trimmed)
//!     <whitespace>          = [ \t\r\n]+
//!     <optional-whitespace> = [ \t\r\n]*
//!     <item>                = <key> <optional-whitespace> "=" <optional-whitespace> <value>
//!
//! Keywords compare case-insensitively, letter by letter, so `КОНЕЦФАЙЛА` and
//! `конецфайла` both close a file.

use chumsky::error::Error as _;
use chumsky::prelude::*;

use crate::exchange::ast::Item;

/// Type alias for parser error
pub(crate) type ParserError = Simple<char>;

pub(crate) const HEADER: &str = "1CClientBankExchange";
pub(crate) const ACCOUNT_OPEN: &str = "СекцияРасчСчет";
pub(crate) const ACCOUNT_CLOSE: &str = "КонецРасчСчет";
pub(crate) const DOCUMENT_OPEN: &str = "СекцияДокумент=";
pub(crate) const DOCUMENT_CLOSE: &str = "КонецДокумента";
pub(crate) const END_OF_FILE: &str = "КонецФайла";

const WHITESPACE: &str = " \t\r\n";
const LINE_BREAK: &str = "\r\n";

/// Reason attached to a keyword that was present but spelled differently
pub(crate) const KEYWORD_MISMATCH: &str = "keyword does not match";

fn same_letter(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn eq_ignore_case(found: &str, word: &str) -> bool {
    found.chars().count() == word.chars().count()
        && found.chars().zip(word.chars()).all(|(a, b)| same_letter(a, b))
}

fn is_prefix_ignore_case(found: &str, word: &str) -> bool {
    found
        .chars()
        .zip(word.chars())
        .all(|(a, b)| same_letter(a, b))
}

/// Whether `text` begins with `word`, compared the way keywords are
pub(crate) fn starts_with_keyword(text: &str, word: &str) -> bool {
    text.chars().count() >= word.chars().count() && is_prefix_ignore_case(text, word)
}

/// Match a structural keyword, ignoring case
///
/// Reads up to as many characters as the keyword has and compares them as a
/// whole. Input that runs out while still agreeing with the keyword is
/// reported as an unexpected end; anything else is a mismatch covering the
/// characters read.
pub(crate) fn keyword(word: &'static str) -> impl Parser<char, (), Error = ParserError> + Clone {
    let width = word.chars().count();

    any()
        .repeated()
        .at_most(width)
        .collect::<String>()
        .try_map(move |found, span: std::ops::Range<usize>| {
            if eq_ignore_case(&found, word) {
                Ok(())
            } else if is_prefix_ignore_case(&found, word) {
                let next = word.chars().nth(found.chars().count());
                Err(Simple::expected_input_found(span.end..span.end, [next], None))
            } else {
                Err(Simple::custom(span, KEYWORD_MISMATCH))
            }
        })
        .labelled(word)
}

/// Zero-width test that succeeds only when `word` does not start here
pub(crate) fn not_at(word: &'static str) -> impl Parser<char, (), Error = ParserError> + Clone {
    keyword(word).not().rewind().ignored()
}

pub(crate) fn whitespace() -> impl Parser<char, (), Error = ParserError> + Clone {
    one_of(WHITESPACE).repeated().at_least(1).ignored()
}

pub(crate) fn optional_whitespace() -> impl Parser<char, (), Error = ParserError> + Clone {
    one_of(WHITESPACE).repeated().ignored()
}

fn trimmed(text: String) -> String {
    text.trim().to_string()
}

pub(crate) fn key() -> impl Parser<char, String, Error = ParserError> + Clone {
    none_of("=\r\n")
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(trimmed)
        .labelled("key")
}

pub(crate) fn value() -> impl Parser<char, String, Error = ParserError> + Clone {
    none_of(LINE_BREAK)
        .repeated()
        .collect::<String>()
        .map(trimmed)
}

pub(crate) fn section_name() -> impl Parser<char, String, Error = ParserError> + Clone {
    none_of(LINE_BREAK)
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(trimmed)
        .labelled("section name")
}

/// `key=value`
///
/// Whitespace on either side of `=` may include line breaks, so a value left
/// empty at the end of its line is taken from the next non-blank line.
pub(crate) fn item() -> impl Parser<char, Item, Error = ParserError> + Clone {
    key()
        .then_ignore(optional_whitespace())
        .then_ignore(just('='))
        .then_ignore(optional_whitespace())
        .then(value())
        .map(|(key, value)| Item { key, value })
}

/// Items up to, but not including, the line that starts with `closing`
///
/// The lookahead runs before every item. Without it a closing keyword line
/// would be read as the next item whenever it happens to contain an `=`.
pub(crate) fn items_until(
    closing: &'static str,
) -> impl Parser<char, Vec<Item>, Error = ParserError> + Clone {
    not_at(closing)
        .ignore_then(item())
        .then_ignore(optional_whitespace())
        .repeated()
}
