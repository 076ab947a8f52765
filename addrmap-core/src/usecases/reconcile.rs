use std::time::Duration;

use serde_json::Value;

use super::prelude::*;
use crate::gateways::{geocode::GeoCodingGateway, store::RecordStore};

/// Pause between two geocoding requests.
pub const DEFAULT_RATE_LIMIT: Duration = Duration::from_millis(1000);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Records with a written location.
    pub resolved: usize,
    /// Records whose address did not match any location.
    pub unmatched: usize,
    /// Records that did not need geocoding.
    pub skipped: usize,
}

/// Resolves the addresses of geocoding enabled records and writes
/// the locations back into `table`.
///
/// Records are processed one after another. Every record costs at most
/// one geocoding request and one write, followed by a pause of
/// `rate_limit`. The first failure aborts the remaining records.
///
/// The coordinates of a record whose address differs from the cached
/// geocoded address are cleared in `records` only, the store is not
/// touched until the new address has been resolved.
pub async fn reconcile<G, S>(
    geo_gw: &G,
    store: &S,
    table: &TableId,
    records: &mut [Record],
    mapping: &FieldMapping,
    rate_limit: Duration,
) -> Result<ReconcileReport>
where
    G: GeoCodingGateway + ?Sized,
    S: RecordStore + ?Sized,
{
    let mut report = ReconcileReport::default();
    let Some(geocode_col) = mapping.column(FieldRole::Geocode) else {
        log::debug!("Table {table} has no geocode column");
        return Ok(report);
    };
    let (Some(lng_col), Some(lat_col)) = (
        mapping.column(FieldRole::Longitude),
        mapping.column(FieldRole::Latitude),
    ) else {
        log::warn!("Table {table} has no location columns to store resolved addresses");
        return Ok(report);
    };
    let cache_col = mapping.column(FieldRole::GeocodedAddress);

    for record in records.iter_mut() {
        let Some(enabled) = record.get(geocode_col) else {
            // The column exists in every record of a table
            log::debug!("Record {} has no geocode column", record.id);
            break;
        };
        if !value::is_truthy(enabled) {
            report.skipped += 1;
            continue;
        }
        let address = record
            .role_value(mapping, FieldRole::Address)
            .and_then(value::as_text);
        let cached = record
            .role_value(mapping, FieldRole::GeocodedAddress)
            .filter(|v| value::is_truthy(v))
            .map(value::as_text);
        if cached.is_some_and(|cached| cached != address) {
            log::debug!("Address of record {} has changed", record.id);
            record.set_role(mapping, FieldRole::Longitude, Value::Null);
            record.set_role(mapping, FieldRole::Latitude, Value::Null);
        }
        let has_location = record.get(lng_col).is_some_and(value::is_truthy);
        let Some(address) = address.filter(|_| !has_location) else {
            report.skipped += 1;
            continue;
        };

        log::debug!("Resolving address of record {}: '{address}'", record.id);
        let pos = geo_gw
            .resolve_address(&address)
            .await
            .map_err(|source| Error::Geocoding {
                record: record.id,
                source,
            })?;
        match pos {
            Some(pos) => {
                let mut values = FieldValues::new();
                values.insert(lng_col.to_owned(), pos.lng().into());
                values.insert(lat_col.to_owned(), pos.lat().into());
                if let Some(col) = cache_col {
                    values.insert(col.to_owned(), address.into());
                }
                store
                    .update_record(table, record.id, values.clone())
                    .await
                    .map_err(|source| Error::WriteBack {
                        record: record.id,
                        source,
                    })?;
                record.merge(values);
                log::info!("Updated location of record {}: {pos}", record.id);
                report.resolved += 1;
            }
            None => {
                log::warn!("No location found for address '{address}'");
                report.unmatched += 1;
            }
        }
        tokio::time::sleep(rate_limit).await;
    }
    Ok(report)
}
