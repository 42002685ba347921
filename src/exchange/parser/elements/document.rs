//! Document-level parser responsible for parsing an entire exchange file.
//!
//! Grammar:
//!     <document> = "1CClientBankExchange" <whitespace>
//!                  (!"СекцияРасчСчет" <item> <optional-whitespace>)*
//!                  <account-section> <whitespace>
//!                  (<document-section> <optional-whitespace>)*
//!                  "КонецФайла" <optional-whitespace> <end-of-input>
//!
//! The heading loop stops on the account-section keyword rather than on
//! anything the heading itself contains. A heading line that merely starts
//! with `СекцияРасчСчет` therefore ends the heading.

use chumsky::prelude::*;

use crate::exchange::ast::Document;
use crate::exchange::parser::combinators::{
    items_until, keyword, optional_whitespace, whitespace, ParserError, ACCOUNT_OPEN, END_OF_FILE,
    HEADER,
};
use crate::exchange::parser::elements::sections::{account_section, document_section};

/// Parse a complete exchange file, up to and including the end of input
pub(crate) fn document() -> impl Parser<char, Document, Error = ParserError> + Clone {
    let heading = items_until(ACCOUNT_OPEN);
    let sections = document_section()
        .then_ignore(optional_whitespace())
        .repeated();

    keyword(HEADER)
        .ignore_then(whitespace())
        .ignore_then(heading)
        .then(account_section())
        .then_ignore(whitespace())
        .then(sections)
        .then_ignore(keyword(END_OF_FILE))
        .then_ignore(optional_whitespace())
        .then_ignore(end())
        .map(|((heading, account), sections)| Document::new(heading, account, sections))
}
