use serde::{Deserialize, Serialize};

/// Controls which records end up on the map.
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
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DisplayMode {
    /// Only the currently selected record.
    Single,
    /// All records of the table, the selected one highlighted.
    #[default]
    Multi,
}
