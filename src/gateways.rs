use crate::config;
use addrmap_gateways::{
    geocoding::{GeoCoder, Provider},
    json_file::JsonFileStore,
};
use anyhow::{Context as _, Result};

pub fn geocoding_gateway(cfg: &config::Geocoding) -> GeoCoder {
    let provider = match &cfg.gateway {
        config::GeocodingGateway::Openstreetmap => {
            log::info!("Use OpenStreetMap geocoding gateway");
            Provider::Openstreetmap
        }
        config::GeocodingGateway::OpenCage { api_key } => {
            log::info!("Use OpenCage geocoding gateway");
            Provider::OpenCage {
                api_key: api_key.clone(),
            }
        }
    };
    GeoCoder::new(provider)
}

pub fn record_store(cfg: &config::Store) -> Result<JsonFileStore> {
    let store = JsonFileStore::try_new(&cfg.dir)
        .with_context(|| format!("Unable to open record store {}", cfg.dir.display()))?;
    log::info!("Use JSON file record store ({})", store.path().display());
    Ok(store)
}
