use crate::{entities::RecordId, gateways};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to resolve the address of record {record}")]
    Geocoding {
        record: RecordId,
        #[source]
        source: gateways::Error,
    },
    #[error("Unable to write the location of record {record}")]
    WriteBack {
        record: RecordId,
        #[source]
        source: gateways::Error,
    },
    #[error("Unable to store the widget options")]
    Options(#[source] gateways::Error),
}
