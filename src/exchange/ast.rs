//! Document model for client bank exchange files
//!
//!     A parsed file is a [`Document`]: the heading items that follow the
//!     `1CClientBankExchange` marker, exactly one [`AccountSection`], and any
//!     number of named [`DocumentSection`]s. Every section is an ordered list of
//!     [`Item`]s. Values are handed out as finished snapshots; there is no API
//!     to edit a parsed document in place.

use serde::{Deserialize, Serialize};

/// A single `key=value` line, both sides trimmed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub value: String,
}

impl Item {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// First value stored under `key`, duplicates keep their source order
fn lookup<'a>(items: &'a [Item], key: &str) -> Option<&'a str> {
    items
        .iter()
        .find(|item| item.key == key)
        .map(|item| item.value.as_str())
}

/// The block between `СекцияРасчСчет` and `КонецРасчСчет`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSection {
    pub items: Vec<Item>,
}

impl AccountSection {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        lookup(&self.items, key)
    }
}

/// A `СекцияДокумент=<name>` block, closed by `КонецДокумента`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSection {
    pub name: String,
    pub items: Vec<Item>,
}

impl DocumentSection {
    pub fn new(name: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            name: name.into(),
            items,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        lookup(&self.items, key)
    }
}

/// Root of a parsed exchange file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub heading: Vec<Item>,
    pub account: AccountSection,
    pub sections: Vec<DocumentSection>,
}

impl Document {
    pub fn new(heading: Vec<Item>, account: AccountSection, sections: Vec<DocumentSection>) -> Self {
        Self {
            heading,
            account,
            sections,
        }
    }

    pub fn heading_value(&self, key: &str) -> Option<&str> {
        lookup(&self.heading, key)
    }

    /// Sections whose name matches exactly, in file order
    pub fn sections_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a DocumentSection> + 'a {
        self.sections.iter().filter(move |section| section.name == name)
    }

    /// Number of items across heading, account and all sections
    pub fn item_count(&self) -> usize {
        self.heading.len()
            + self.account.items.len()
            + self
                .sections
                .iter()
                .map(|section| section.items.len())
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document::new(
            vec![Item::new("ВерсияФормата", "1.03"), Item::new("Кодировка", "Windows")],
            AccountSection::new(vec![Item::new("РасчСчет", "40702810000000000001")]),
            vec![
                DocumentSection::new(
                    "Платежное поручение",
                    vec![Item::new("Номер", "1"), Item::new("Номер", "2")],
                ),
                DocumentSection::new("Банковский ордер", vec![]),
                DocumentSection::new("Платежное поручение", vec![Item::new("Номер", "3")]),
            ],
        )
    }

    #[test]
    fn test_lookup_returns_first_duplicate() {
        let doc = sample();
        assert_eq!(doc.sections[0].get("Номер"), Some("1"));
        assert_eq!(doc.sections[0].get("Сумма"), None);
    }

    #[test]
    fn test_heading_and_account_lookup() {
        let doc = sample();
        assert_eq!(doc.heading_value("Кодировка"), Some("Windows"));
        assert_eq!(doc.account.get("РасчСчет"), Some("40702810000000000001"));
    }

    #[test]
    fn test_sections_named_keeps_file_order() {
        let doc = sample();
        let numbers: Vec<_> = doc
            .sections_named("Платежное поручение")
            .filter_map(|section| section.get("Номер"))
            .collect();
        assert_eq!(numbers, vec!["1", "3"]);
    }

    #[test]
    fn test_item_count() {
        assert_eq!(sample().item_count(), 6);
    }
}
