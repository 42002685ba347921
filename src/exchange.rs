//! 1C client bank exchange files
//!
//! An exchange file is a flat list of `key=value` lines framed by marker
//! lines:
//!
//! ```text
//! 1CClientBankExchange
//! ВерсияФормата=1.03
//! СекцияРасчСчет
//! РасчСчет=40702810000000000001
//! КонецРасчСчет
//! СекцияДокумент=Платежное поручение
//! Номер=15
//! КонецДокумента
//! КонецФайла
//! ```
//!
//! [`parser`] turns such text into an [`ast::Document`]; [`builder`] creates
//! documents from code.

pub mod ast;
pub mod builder;
pub mod parser;

pub use ast::{AccountSection, Document, DocumentSection, Item};
pub use builder::{DocumentBuilder, SectionBuilder};
pub use parser::{parse, parse_file, ExchangeParser};
