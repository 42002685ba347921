//! Output formats for parsed documents
//!
//! Both document models can be written out four ways: a short structural
//! summary, JSON, YAML, or their own text format. Exchange text written by
//! [`render`] parses back into an equal [`Document`]; a model that could not
//! make that trip is refused with [`Error::Render`] instead of being written.
//!
//! For exchange text that means:
//! - keys are non-empty, trimmed, on one line and free of `=`;
//! - a key does not begin with the keyword that ends its part of the file;
//! - values are non-empty, trimmed and on one line. An empty value would
//!   take the following line as its value;
//! - section names are non-empty, trimmed and on one line.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::exchange::ast::{Document, Item};
use crate::exchange::parser::combinators::{
    starts_with_keyword, ACCOUNT_CLOSE, ACCOUNT_OPEN, DOCUMENT_CLOSE, DOCUMENT_OPEN, END_OF_FILE,
    HEADER,
};
use crate::properties::ast::SimpleProperties;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Summary,
    Json,
    Yaml,
    Text,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Summary,
        OutputFormat::Json,
        OutputFormat::Yaml,
        OutputFormat::Text,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Summary => "summary",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Text => "text",
        }
    }

    /// Write any renderable model in this format
    pub fn write<T: Render>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Summary => Ok(value.summary()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            OutputFormat::Text => value.to_text(),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown format '{}', expected one of: summary, json, yaml, text",
                    s
                )
            })
    }
}

/// A parsed model that knows its own summary and text forms
pub trait Render: Serialize {
    fn summary(&self) -> String;
    fn to_text(&self) -> Result<String>;
}

impl Render for Document {
    fn summary(&self) -> String {
        summary(self)
    }

    fn to_text(&self) -> Result<String> {
        render(self)
    }
}

impl Render for SimpleProperties {
    fn summary(&self) -> String {
        let mut out = String::from("Properties structure:\n");
        let _ = writeln!(out, "- Root properties: {}", self.properties.len());
        let _ = writeln!(out, "- Sections: {}", self.sections.len());
        if !self.sections.is_empty() {
            out.push_str("\nSections:\n");
            for section in &self.sections {
                let _ = writeln!(
                    out,
                    "  - {} ({} properties)",
                    section.name,
                    section.properties.len()
                );
            }
        }
        out
    }

    /// Root properties come first, so their interleaving with sections is
    /// not preserved.
    fn to_text(&self) -> Result<String> {
        let mut out = String::new();
        write_properties(&mut out, &self.properties)?;
        for section in &self.sections {
            check_word("section name", &section.name)?;
            let _ = writeln!(out, "[{}]", section.name);
            write_properties(&mut out, &section.properties)?;
            let _ = writeln!(out, "[-{}]", section.name);
        }
        Ok(out)
    }
}

fn unwritable(what: &str, text: &str, problem: &str) -> Error {
    Error::Render(format!("{} {:?} {}", what, text, problem))
}

/// Properties keys and section names are ASCII letters only
fn check_word(what: &str, text: &str) -> Result<()> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(unwritable(what, text, "must be one or more ASCII letters"));
    }
    Ok(())
}

fn write_properties(
    out: &mut String,
    properties: &std::collections::BTreeMap<String, String>,
) -> Result<()> {
    for (key, value) in properties {
        check_word("key", key)?;
        if value.contains(['\r', '\n']) {
            return Err(unwritable("value", value, "contains a line break"));
        }
        let _ = writeln!(out, "{}={}", key, value);
    }
    Ok(())
}

/// Non-empty, already trimmed, single-line text
fn check_line(what: &str, text: &str) -> Result<()> {
    if text.is_empty() {
        Err(unwritable(what, text, "is empty"))
    } else if text.contains(['\r', '\n']) {
        Err(unwritable(what, text, "contains a line break"))
    } else if text.trim() != text {
        Err(unwritable(what, text, "has surrounding whitespace"))
    } else {
        Ok(())
    }
}

/// Items of one part of the file, `closing` being the keyword that ends it
fn write_items(out: &mut String, items: &[Item], closing: &'static str) -> Result<()> {
    for item in items {
        check_line("key", &item.key)?;
        if item.key.contains('=') {
            return Err(unwritable("key", &item.key, "contains '='"));
        }
        if starts_with_keyword(&item.key, closing) {
            return Err(unwritable("key", &item.key, &format!("begins with {}", closing)));
        }
        check_line("value", &item.value)?;
        let _ = writeln!(out, "{}={}", item.key, item.value);
    }
    Ok(())
}

/// Write a document back in exchange format with LF line endings
pub fn render(doc: &Document) -> Result<String> {
    let mut out = String::new();
    let _ = writeln!(out, "{}", HEADER);
    write_items(&mut out, &doc.heading, ACCOUNT_OPEN)?;

    let _ = writeln!(out, "{}", ACCOUNT_OPEN);
    write_items(&mut out, &doc.account.items, ACCOUNT_CLOSE)?;
    let _ = writeln!(out, "{}", ACCOUNT_CLOSE);

    for section in &doc.sections {
        check_line("section name", &section.name)?;
        let _ = writeln!(out, "{}{}", DOCUMENT_OPEN, section.name);
        write_items(&mut out, &section.items, DOCUMENT_CLOSE)?;
        let _ = writeln!(out, "{}", DOCUMENT_CLOSE);
    }

    let _ = writeln!(out, "{}", END_OF_FILE);
    Ok(out)
}

/// Item counts per part of the document, then one line per section
pub fn summary(doc: &Document) -> String {
    let mut out = String::from("Document structure:\n");
    let _ = writeln!(out, "- Heading items: {}", doc.heading.len());
    let _ = writeln!(out, "- Account items: {}", doc.account.items.len());
    let _ = writeln!(out, "- Document sections: {}", doc.sections.len());
    if !doc.sections.is_empty() {
        out.push_str("\nSections:\n");
        for section in &doc.sections {
            let _ = writeln!(out, "  - {} ({} items)", section.name, section.items.len());
        }
    }
    out
}

pub fn to_json(doc: &Document) -> Result<String> {
    OutputFormat::Json.write(doc)
}

pub fn to_yaml(doc: &Document) -> Result<String> {
    OutputFormat::Yaml.write(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exchange::builder::DocumentBuilder;
    use crate::properties;

    fn payment() -> Document {
        DocumentBuilder::new()
            .heading("ВерсияФормата", "1.03")
            .heading("Кодировка", "Windows")
            .account("РасчСчет", "40702810000000000001")
            .section("Платежное поручение")
            .item("Номер", "15")
            .item("Сумма", "100.00")
            .end_section()
            .build()
    }

    #[test]
    fn test_render_exchange_text() {
        insta::assert_snapshot!(render(&payment()).unwrap(), @r"
        1CClientBankExchange
        ВерсияФормата=1.03
        Кодировка=Windows
        СекцияРасчСчет
        РасчСчет=40702810000000000001
        КонецРасчСчет
        СекцияДокумент=Платежное поручение
        Номер=15
        Сумма=100.00
        КонецДокумента
        КонецФайла
        ");
    }

    #[test]
    fn test_rendered_text_parses_back() {
        let doc = payment();
        assert_eq!(crate::exchange::parse(&render(&doc).unwrap()).unwrap(), doc);
    }

    fn render_error(doc: &Document) -> String {
        match render(doc) {
            Err(Error::Render(reason)) => reason,
            other => panic!("expected a render error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_refuses_text_that_would_not_parse_back() {
        let key_with_equals = DocumentBuilder::new().heading("a=b", "c").build();
        assert!(render_error(&key_with_equals).contains("contains '='"));

        let empty_section_name = DocumentBuilder::new().section("").end_section().build();
        assert!(render_error(&empty_section_name).starts_with("section name"));

        let multiline_value = DocumentBuilder::new().account("Ключ", "а\nб").build();
        assert!(render_error(&multiline_value).contains("line break"));

        let padded_key = DocumentBuilder::new().heading(" Ключ", "1").build();
        assert!(render_error(&padded_key).contains("surrounding whitespace"));

        let empty_value = DocumentBuilder::new()
            .section("Платежное поручение")
            .item("ПолучательКПП", "")
            .end_section()
            .build();
        assert!(render_error(&empty_value).starts_with("value"));

        let keyword_key = DocumentBuilder::new()
            .section("Платежное поручение")
            .item("КонецДокумента", "1")
            .end_section()
            .build();
        assert!(render_error(&keyword_key).contains("begins with КонецДокумента"));
    }

    #[test]
    fn test_keyword_prefix_only_matters_for_its_own_part() {
        // A heading key may look like a section terminator
        let doc = DocumentBuilder::new().heading("КонецДокумента", "1").build();
        assert_eq!(crate::exchange::parse(&render(&doc).unwrap()).unwrap(), doc);
    }

    #[test]
    fn test_summary() {
        insta::assert_snapshot!(summary(&payment()), @r"
        Document structure:
        - Heading items: 2
        - Account items: 1
        - Document sections: 1

        Sections:
          - Платежное поручение (2 items)
        ");
    }

    #[test]
    fn test_summary_without_sections() {
        let doc = DocumentBuilder::new().build();
        assert_eq!(
            summary(&doc),
            "Document structure:\n- Heading items: 0\n- Account items: 0\n- Document sections: 0\n"
        );
    }

    #[test]
    fn test_json_keeps_item_order() {
        let json = to_json(&payment()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["heading"][0]["key"], "ВерсияФормата");
        assert_eq!(value["heading"][1]["key"], "Кодировка");
        assert_eq!(value["sections"][0]["name"], "Платежное поручение");
        assert_eq!(value["sections"][0]["items"][1]["value"], "100.00");
    }

    #[test]
    fn test_yaml_deserializes_to_same_document() {
        let doc = payment();
        let yaml = to_yaml(&doc).unwrap();
        let back: Document = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_properties_text_and_summary() {
        let props =
            properties::parse("b=2\na=1\n[Database]\nuser=admin\n[-Database]\n").unwrap();
        insta::assert_snapshot!(props.to_text().unwrap(), @r"
        a=1
        b=2
        [Database]
        user=admin
        [-Database]
        ");
        assert_eq!(
            props.summary(),
            "Properties structure:\n- Root properties: 2\n- Sections: 1\n\nSections:\n  - Database (1 properties)\n"
        );
    }

    #[test]
    fn test_properties_text_refuses_unreadable_names() {
        let mut props = SimpleProperties::default();
        props.properties.insert("key1".to_string(), "v".to_string());
        assert!(matches!(props.to_text(), Err(Error::Render(_))));

        let mut props = SimpleProperties::default();
        props.properties.insert("key".to_string(), "a\nb".to_string());
        assert!(matches!(props.to_text(), Err(Error::Render(_))));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("YAML".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert!("xml".parse::<OutputFormat>().is_err());
    }
}
