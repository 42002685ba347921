//! Fluent construction of exchange documents
//!
//! The parser is not the only way to get a [`Document`]: files are also
//! produced by programs. [`DocumentBuilder`] collects heading and account
//! items, and [`SectionBuilder`] scopes the items of one document section
//! until [`SectionBuilder::end_section`] hands control back.
//!
//! ```text
//! let doc = DocumentBuilder::new()
//!     .heading("ВерсияФормата", "1.03")
//!     .account("РасчСчет", "40702810000000000001")
//!     .section("Платежное поручение")
//!         .item("Номер", "15")
//!         .item("Сумма", "100.00")
//!     .end_section()
//!     .build();
//! ```

use crate::exchange::ast::{AccountSection, Document, DocumentSection, Item};

#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    heading: Vec<Item>,
    account: Vec<Item>,
    sections: Vec<DocumentSection>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heading(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.heading.push(Item::new(key, value));
        self
    }

    pub fn account(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.account.push(Item::new(key, value));
        self
    }

    /// Open a document section; items go to it until `end_section`
    pub fn section(self, name: impl Into<String>) -> SectionBuilder {
        SectionBuilder {
            parent: self,
            section: DocumentSection::new(name, Vec::new()),
        }
    }

    /// Finish the document. The account section is always present, even if
    /// no account item was added.
    pub fn build(self) -> Document {
        Document::new(
            self.heading,
            AccountSection::new(self.account),
            self.sections,
        )
    }
}

/// Collects the items of one document section
#[derive(Debug, Clone)]
pub struct SectionBuilder {
    parent: DocumentBuilder,
    section: DocumentSection,
}

impl SectionBuilder {
    pub fn item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.section.items.push(Item::new(key, value));
        self
    }

    pub fn end_section(mut self) -> DocumentBuilder {
        self.parent.sections.push(self.section);
        self.parent
    }
}
