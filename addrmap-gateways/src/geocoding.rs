use ::geocoding::{Forward, GeocodingError, Opencage, Openstreetmap, Point};
use addrmap_core::{
    entities::MapPoint,
    gateways::{geocode::GeoCodingGateway, Error},
};
use async_trait::async_trait;
use itertools::Itertools;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provider {
    /// Nominatim service of OpenStreetMap.
    Openstreetmap,
    OpenCage { api_key: String },
}

/// Resolves addresses through a public geocoding service.
#[derive(Debug, Clone)]
pub struct GeoCoder {
    provider: Provider,
}

impl GeoCoder {
    pub const fn new(provider: Provider) -> Self {
        Self { provider }
    }
}

fn forward_query_string(address: &str) -> String {
    address
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .join(",")
}

// The provider clients are blocking and must not be created,
// used or dropped within the async runtime.
fn forward(provider: &Provider, query: &str) -> Result<Vec<Point<f64>>, GeocodingError> {
    match provider {
        Provider::Openstreetmap => Openstreetmap::new().forward(query),
        Provider::OpenCage { api_key } => Opencage::new(api_key.clone()).forward(query),
    }
}

#[async_trait]
impl GeoCodingGateway for GeoCoder {
    async fn resolve_address(&self, address: &str) -> Result<Option<MapPoint>, Error> {
        let query = forward_query_string(address);
        if query.is_empty() {
            return Ok(None);
        }
        let provider = self.provider.clone();
        let points = {
            let query = query.clone();
            tokio::task::spawn_blocking(move || forward(&provider, &query))
                .await
                .map_err(|err| Error::Geocoding(err.into()))?
                .map_err(|err| Error::Geocoding(err.into()))?
        };
        let Some(point) = points.first() else {
            log::debug!("No location found for '{query}'");
            return Ok(None);
        };
        // Points are in (x, y) = (lng, lat) order
        let pos = MapPoint::try_from_lat_lng_deg(point.y(), point.x());
        match pos {
            Some(pos) => log::debug!("Resolved address location '{query}': {pos}"),
            None => log::warn!("Resolved invalid location for '{query}': {point:?}"),
        }
        Ok(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_to_forward_query_string() {
        assert_eq!(
            "A street,A city",
            forward_query_string("A street, A city")
        );
        assert_eq!(
            "1234,A city,A country",
            forward_query_string(" 1234 ,, A city ,A country,")
        );
        assert_eq!("", forward_query_string(" , "));
    }

    #[tokio::test]
    async fn blank_addresses_are_not_sent() {
        let gw = GeoCoder::new(Provider::OpenCage {
            api_key: "invalid".into(),
        });
        assert_eq!(None, gw.resolve_address("  ").await.unwrap());
    }
}
