//! Element-specific parsers
//!
//! Each structural element of an exchange file has its own module with its
//! parser and tests.

pub mod document;
pub mod sections;
