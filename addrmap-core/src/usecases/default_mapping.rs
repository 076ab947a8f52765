use super::prelude::*;

/// The mapping of a table, falling back to the canonical column names.
///
/// Tables that were configured by renaming their columns instead of
/// mapping them get the required roles mapped by name. Optional roles
/// are only mapped if the `sample` record actually has such a column.
pub fn default_mapping(sample: Option<&Record>, supplied: Option<FieldMapping>) -> FieldMapping {
    if let Some(mapping) = supplied {
        return mapping;
    }
    let canonical = FieldMapping::canonical();
    let mut mapping = FieldMapping::default();
    for role in [
        FieldRole::Name,
        FieldRole::Longitude,
        FieldRole::Latitude,
        FieldRole::Geocode,
        FieldRole::Address,
        FieldRole::GeocodedAddress,
    ] {
        let Some(col) = canonical.column(role) else {
            continue;
        };
        let present = sample.is_some_and(|rec| rec.has_column(col));
        if !role.is_optional() || present {
            mapping = mapping.with(role, col);
        }
    }
    mapping
}
