use serde::{Deserialize, Serialize};

/// Access level the host grants to the widget.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum AccessLevel {
    #[default]
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    None,
    #[serde(rename = "read table")]
    #[strum(serialize = "read table")]
    ReadTable,
    #[serde(rename = "full")]
    #[strum(serialize = "full")]
    Full,
}

impl AccessLevel {
    pub const fn has_write_access(self) -> bool {
        matches!(self, Self::Full)
    }
}
