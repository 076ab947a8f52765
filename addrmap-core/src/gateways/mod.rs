use thiserror::Error;

use crate::entities::{RecordId, TableId};

pub mod geocode;
pub mod render;
pub mod store;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Geocoding request failed: {0}")]
    Geocoding(#[source] anyhow::Error),
    #[error("The table '{0}' does not exist")]
    TableNotFound(TableId),
    #[error("The record {0} does not exist")]
    RecordNotFound(RecordId),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
