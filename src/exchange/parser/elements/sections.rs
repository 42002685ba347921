//! Account and document section parsers
//!
//! Grammar:
//!     <account-section>  = "СекцияРасчСчет" <whitespace>
//!                          (!"КонецРасчСчет" <item> <optional-whitespace>)*
//!                          "КонецРасчСчет"
//!     <document-section> = "СекцияДокумент=" <section-name> <whitespace>
//!                          (!"КонецДокумента" <item> <optional-whitespace>)*
//!                          "КонецДокумента"
//!
//! Both sections are the same shape: an opening keyword, a run of items
//! guarded by a lookahead for the closing keyword, and the closing keyword
//! itself. A section whose closing keyword never shows up fails as a whole.

use chumsky::prelude::*;

use crate::exchange::ast::{AccountSection, DocumentSection};
use crate::exchange::parser::combinators::{
    items_until, keyword, section_name, whitespace, ParserError, ACCOUNT_CLOSE, ACCOUNT_OPEN,
    DOCUMENT_CLOSE, DOCUMENT_OPEN,
};

pub(crate) fn account_section() -> impl Parser<char, AccountSection, Error = ParserError> + Clone
{
    keyword(ACCOUNT_OPEN)
        .ignore_then(whitespace())
        .ignore_then(items_until(ACCOUNT_CLOSE))
        .then_ignore(keyword(ACCOUNT_CLOSE))
        .map(AccountSection::new)
}

pub(crate) fn document_section(
) -> impl Parser<char, DocumentSection, Error = ParserError> + Clone {
    keyword(DOCUMENT_OPEN)
        .ignore_then(section_name())
        .then_ignore(whitespace())
        .then(items_until(DOCUMENT_CLOSE))
        .then_ignore(keyword(DOCUMENT_CLOSE))
        .map(|(name, items)| DocumentSection::new(name, items))
}
