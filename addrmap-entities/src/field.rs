use serde::{Deserialize, Serialize};

/// Logical role of a record field.
///
/// The string representation is the column name that is assumed
/// if the host did not map the role to a custom column.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::AsRefStr,
)]
pub enum FieldRole {
    /// Label of the marker (required).
    Name,
    /// Required.
    Longitude,
    /// Required.
    Latitude,
    /// Switch column that opts a record into geocoding.
    Geocode,
    /// Free text address to resolve, might be computed by the host.
    Address,
    /// The address that produced the current coordinates.
    GeocodedAddress,
}

impl FieldRole {
    pub const fn is_optional(self) -> bool {
        matches!(self, Self::Geocode | Self::Address | Self::GeocodedAddress)
    }
}

/// Maps each [FieldRole] to the actual column of a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldMapping {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub geocode: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub geocoded_address: Option<String>,
}

impl FieldMapping {
    /// Every role mapped to the column of the same name.
    pub fn canonical() -> Self {
        let mut mapping = Self::default();
        for role in <FieldRole as strum::IntoEnumIterator>::iter() {
            *mapping.slot_mut(role) = Some(role.to_string());
        }
        mapping
    }

    pub fn with(mut self, role: FieldRole, column: impl Into<String>) -> Self {
        *self.slot_mut(role) = Some(column.into());
        self
    }

    pub fn without(mut self, role: FieldRole) -> Self {
        *self.slot_mut(role) = None;
        self
    }

    /// The column of `role`, `None` if the role is not mapped.
    pub fn column(&self, role: FieldRole) -> Option<&str> {
        let slot = match role {
            FieldRole::Name => &self.name,
            FieldRole::Longitude => &self.longitude,
            FieldRole::Latitude => &self.latitude,
            FieldRole::Geocode => &self.geocode,
            FieldRole::Address => &self.address,
            FieldRole::GeocodedAddress => &self.geocoded_address,
        };
        slot.as_deref().filter(|col| !col.is_empty())
    }

    fn slot_mut(&mut self, role: FieldRole) -> &mut Option<String> {
        match role {
            FieldRole::Name => &mut self.name,
            FieldRole::Longitude => &mut self.longitude,
            FieldRole::Latitude => &mut self.latitude,
            FieldRole::Geocode => &mut self.geocode,
            FieldRole::Address => &mut self.address,
            FieldRole::GeocodedAddress => &mut self.geocoded_address,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_mapping() {
        let mapping = FieldMapping::canonical();
        assert_eq!(Some("Name"), mapping.column(FieldRole::Name));
        assert_eq!(
            Some("GeocodedAddress"),
            mapping.column(FieldRole::GeocodedAddress)
        );
    }

    #[test]
    fn empty_column_names_are_unmapped() {
        let mapping = FieldMapping::canonical().with(FieldRole::Geocode, "");
        assert_eq!(None, mapping.column(FieldRole::Geocode));
        assert_eq!(Some("Address"), mapping.column(FieldRole::Address));
    }

    #[test]
    fn deserialize_host_mapping() {
        let json = r#"{
            "Name": "Title",
            "Longitude": "Lng",
            "Latitude": "Lat",
            "Geocode": null,
            "Address": "Street"
        }"#;
        let mapping: FieldMapping = serde_json::from_str(json).unwrap();
        assert_eq!(Some("Title"), mapping.column(FieldRole::Name));
        assert_eq!(Some("Street"), mapping.column(FieldRole::Address));
        assert_eq!(None, mapping.column(FieldRole::Geocode));
        assert_eq!(None, mapping.column(FieldRole::GeocodedAddress));
    }

    #[test]
    fn optional_roles() {
        assert!(!FieldRole::Name.is_optional());
        assert!(!FieldRole::Latitude.is_optional());
        assert!(FieldRole::Address.is_optional());
    }
}
