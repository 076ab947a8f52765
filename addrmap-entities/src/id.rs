use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// Stable row identifier assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(u64);

impl RecordId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn to_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for RecordId {
    fn from(from: u64) -> Self {
        Self(from)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// Opaque handle of a host table.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(String);

impl TableId {
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for TableId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Borrow<str> for TableId {
    fn borrow(&self) -> &str {
        self.as_ref()
    }
}

impl From<String> for TableId {
    fn from(from: String) -> Self {
        Self(from)
    }
}

impl From<&str> for TableId {
    fn from(from: &str) -> Self {
        from.to_owned().into()
    }
}

impl From<TableId> for String {
    fn from(from: TableId) -> Self {
        from.0
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_table_ids_are_invalid() {
        assert!(!TableId::default().is_valid());
        assert!(!TableId::from("  ").is_valid());
        assert!(TableId::from("Places").is_valid());
    }

    #[test]
    fn record_ids_are_plain_json_numbers() {
        let id: RecordId = serde_json::from_str("42").unwrap();
        assert_eq!(RecordId::new(42), id);
        assert_eq!("42", serde_json::to_string(&id).unwrap());
    }
}
