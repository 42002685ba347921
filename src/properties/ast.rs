//! Document model for sectioned properties

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root-level properties plus the named sections, in file order
///
/// Root lines may be spread around the file; they all land in one map. A key
/// that appears twice keeps its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleProperties {
    pub properties: BTreeMap<String, String>,
    pub sections: Vec<PropertiesSection>,
}

impl SimpleProperties {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// First section with this name
    pub fn section(&self, name: &str) -> Option<&PropertiesSection> {
        self.sections.iter().find(|section| section.name == name)
    }
}

/// A `[Name] ... [-Name]` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertiesSection {
    pub name: String,
    pub properties: BTreeMap<String, String>,
}

impl PropertiesSection {
    pub fn new(name: impl Into<String>, properties: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}
