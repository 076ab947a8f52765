use async_trait::async_trait;

use super::Error;
use crate::entities::MapPoint;

#[async_trait]
pub trait GeoCodingGateway: Send + Sync {
    /// Resolves the best matching location of a free text address.
    ///
    /// Returns `Ok(None)` if nothing matched.
    async fn resolve_address(&self, address: &str) -> Result<Option<MapPoint>, Error>;
}
