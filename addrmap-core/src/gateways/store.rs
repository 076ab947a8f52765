use async_trait::async_trait;
use serde_json::Value;

use super::Error;
use crate::entities::{FieldValues, RecordId, TableId};

/// Write access to the records of the host.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Applies all `values` to a single record as one atomic update.
    async fn update_record(
        &self,
        table: &TableId,
        id: RecordId,
        values: FieldValues,
    ) -> Result<(), Error>;

    /// Persists a widget option.
    async fn set_option(&self, key: &str, value: Value) -> Result<(), Error>;
}
