//! Property-based tests for the exchange grammar
//!
//! Documents are generated as models, written out as text (plainly, or with
//! random whitespace around every token) and parsed back.

use clientbank::exchange::{self, AccountSection, Document, DocumentSection, Item};
use clientbank::formats::render;
use proptest::prelude::*;

/// Keys never start with a keyword, so plain ASCII is enough
fn key_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,10}"
}

/// Values are stored trimmed and start and end with a non-blank
fn value_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z0-9.,]{1,12}",
        "[A-Za-z0-9.,][A-Za-z0-9., =]{0,10}[A-Za-z0-9.,]",
    ]
}

fn section_name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,10}[A-Za-z0-9]"
}

fn items_strategy() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        (key_strategy(), value_strategy()).prop_map(|(key, value)| Item::new(key, value)),
        0..6,
    )
}

fn document_strategy() -> impl Strategy<Value = Document> {
    (
        items_strategy(),
        items_strategy(),
        prop::collection::vec((section_name_strategy(), items_strategy()), 0..4),
    )
        .prop_map(|(heading, account, sections)| {
            Document::new(
                heading,
                AccountSection::new(account),
                sections
                    .into_iter()
                    .map(|(name, items)| DocumentSection::new(name, items))
                    .collect(),
            )
        })
}

fn pad_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,3}"
}

/// Around `=` and between items the padding may also break the line
fn item_pad_strategy() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,3}"
}

/// Writes a document with a fresh run of whitespace before and after every
/// token. The header line is left alone: the file must start with it.
/// Keyword lines only get spaces and tabs, since a section name must stay on
/// the line of its keyword.
struct PaddedWriter {
    pads: Vec<String>,
    item_pads: Vec<String>,
    next: usize,
    out: String,
}

impl PaddedWriter {
    fn pad(&mut self) -> String {
        let pad = self.pads[self.next % self.pads.len()].clone();
        self.next += 1;
        pad
    }

    fn item_pad(&mut self) -> String {
        let pad = self.item_pads[self.next % self.item_pads.len()].clone();
        self.next += 1;
        pad
    }

    fn line(&mut self, text: &str) {
        let (before, after) = (self.pad(), self.pad());
        self.out.push_str(&format!("{}{}{}\n", before, text, after));
    }

    fn items(&mut self, items: &[Item]) {
        for item in items {
            let pads = [self.item_pad(), self.item_pad(), self.item_pad(), self.item_pad()];
            self.out.push_str(&format!(
                "{}{}{}={}{}{}\n",
                pads[0], item.key, pads[1], pads[2], item.value, pads[3]
            ));
        }
    }

    fn write(mut self, doc: &Document) -> String {
        self.out.push_str("1CClientBankExchange\n");
        self.items(&doc.heading);
        self.line("СекцияРасчСчет");
        self.items(&doc.account.items);
        self.line("КонецРасчСчет");
        for section in &doc.sections {
            let pad = self.pad();
            self.line(&format!("СекцияДокумент={}{}", pad, section.name));
            self.items(&section.items);
            self.line("КонецДокумента");
        }
        self.line("КонецФайла");
        self.out
    }
}

proptest! {
    #[test]
    fn rendered_documents_parse_back(doc in document_strategy()) {
        let text = render(&doc).unwrap();
        prop_assert_eq!(exchange::parse(&text).unwrap(), doc);
    }

    #[test]
    fn horizontal_whitespace_is_insignificant(
        doc in document_strategy(),
        pads in prop::collection::vec(pad_strategy(), 1..32),
        item_pads in prop::collection::vec(item_pad_strategy(), 1..32),
    ) {
        let writer = PaddedWriter { pads, item_pads, next: 0, out: String::new() };
        let text = writer.write(&doc);
        prop_assert_eq!(exchange::parse(&text).unwrap(), doc);
    }

    #[test]
    fn crlf_and_lf_parse_the_same(doc in document_strategy()) {
        let lf = render(&doc).unwrap();
        let crlf = lf.replace('\n', "\r\n");
        prop_assert_eq!(exchange::parse(&crlf).unwrap(), exchange::parse(&lf).unwrap());
    }

    #[test]
    fn unterminated_account_section_never_parses(
        heading in items_strategy(),
        account in items_strategy(),
    ) {
        let doc = Document::new(heading, AccountSection::new(account), vec![]);
        let text = render(&doc).unwrap().replace("КонецРасчСчет\n", "");
        prop_assert!(exchange::parse(&text).is_err());
    }

    #[test]
    fn unwritable_keys_are_refused(
        doc in document_strategy(),
        bad_key in prop_oneof!["[A-Za-z]{1,4}=[A-Za-z]{0,4}", "[A-Za-z]{1,4}\n[A-Za-z]{1,4}", " [A-Za-z]{1,4}"],
    ) {
        let mut doc = doc;
        doc.heading.push(Item::new(bad_key, "1"));
        prop_assert!(render(&doc).is_err());
    }

    #[test]
    fn trailing_content_is_rejected(doc in document_strategy(), tail in "[A-Za-z0-9=]{1,8}") {
        let text = format!("{}{}\n", render(&doc).unwrap(), tail);
        prop_assert!(exchange::parse(&text).is_err());
    }
}
