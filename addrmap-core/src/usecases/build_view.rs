use thiserror::Error;

use super::prelude::*;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ViewProblem {
    #[error("No data found yet")]
    NoData,
    #[error(
        "Table does not yet have all expected columns: Name, Longitude, Latitude. \
         You can map custom columns in the Creator Panel."
    )]
    MissingColumns,
}

/// Turns records into map markers.
///
/// Records with pending, invalid or (almost) zero coordinates are left out.
pub fn build_view(
    records: &[Record],
    mapping: &FieldMapping,
    selected: Option<RecordId>,
) -> std::result::Result<MapView, ViewProblem> {
    let Some(first) = records.first() else {
        return Err(ViewProblem::NoData);
    };
    let has_required_columns = [FieldRole::Longitude, FieldRole::Latitude, FieldRole::Name]
        .into_iter()
        .all(|role| first.has_role(mapping, role));
    if !has_required_columns {
        return Err(ViewProblem::MissingColumns);
    }
    let markers: Vec<_> = records
        .iter()
        .filter_map(|rec| marker(rec, mapping, selected))
        .collect();
    let bounds = MapBbox::enclosing(markers.iter().map(|m| m.pos));
    Ok(MapView {
        markers,
        bounds,
        selected,
    })
}

fn marker(rec: &Record, mapping: &FieldMapping, selected: Option<RecordId>) -> Option<Marker> {
    let parsed = |role| rec.role_value(mapping, role).map(value::parse_value);
    let lng = parsed(FieldRole::Longitude)?;
    if value::is_pending(&lng) {
        return None;
    }
    let lat = parsed(FieldRole::Latitude)?;
    let pos = MapPoint::try_from_lat_lng_deg(value::as_degrees(&lat)?, value::as_degrees(&lng)?);
    let Some(pos) = pos.filter(|pos| !pos.is_near_null_island()) else {
        log::debug!("Skipping marker of record {} at {lat},{lng}", rec.id);
        return None;
    };
    let name = parsed(FieldRole::Name)
        .as_ref()
        .and_then(value::as_text)
        .unwrap_or_default();
    Some(Marker {
        id: rec.id,
        name,
        pos,
        selected: selected == Some(rec.id),
    })
}
