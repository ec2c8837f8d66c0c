//! Schema component identity and source locations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A schema component identity: target namespace URI plus local name.
///
/// The empty string stands for "no namespace".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QName {
    #[serde(default)]
    pub namespace: String,
    pub local: String,
}

impl QName {
    pub fn new(namespace: impl Into<String>, local: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local: local.into(),
        }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace.is_empty() {
            write!(f, "{}", self.local)
        } else {
            write!(f, "{{{}}}{}", self.namespace, self.local)
        }
    }
}

/// Where a declaration came from (schema document, 1-based line/column).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locator {
    pub system_id: String,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.system_id, self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_clark_notation() {
        assert_eq!(
            QName::new("urn:example", "AddressGroup").to_string(),
            "{urn:example}AddressGroup"
        );
        assert_eq!(QName::new("", "Local").to_string(), "Local");
    }
}
