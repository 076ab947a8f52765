use addrmap_entities::mode::DisplayMode;
use anyhow::{anyhow, Context as _, Result};
use std::{
    env, fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "addrmap.toml";

const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";
const ENV_NAME_STORE_DIR: &str = "ADDRMAP_STORE_DIR";

pub struct Config {
    pub geocoding: Geocoding,
    pub widget: Widget,
    pub store: Store,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)
                .with_context(|| format!("Invalid configuration {}", file_path.display()))?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!("{} not found => load default configuration.", file_path.display());
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        if let Ok(api_key) = env::var(ENV_NAME_OPENCAGE_API_KEY) {
            if let GeocodingGateway::OpenCage { api_key: key } = &mut cfg.geocoding.gateway {
                *key = api_key;
            }
        }
        if let Ok(dir) = env::var(ENV_NAME_STORE_DIR) {
            cfg.store.dir = dir.into();
        }
        Ok(cfg)
    }
}

pub struct Geocoding {
    pub gateway: GeocodingGateway,
    /// Pause between two geocoding requests.
    pub rate_limit: Duration,
}

#[derive(Clone)]
pub enum GeocodingGateway {
    Openstreetmap,
    OpenCage { api_key: String },
}

pub struct Widget {
    pub mode: DisplayMode,
}

pub struct Store {
    /// File system directory of the JSON table files.
    pub dir: PathBuf,
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            geocoding,
            gateway,
            widget,
            store,
        } = from;

        let raw::Geocoding {
            gateway: geo_gateway,
            rate_limit,
        } = geocoding.unwrap_or_default();

        let geo_gateway = match geo_gateway
            .or_else(|| raw::Geocoding::default().gateway)
            .ok_or_else(|| anyhow!("Missing geocoding gateway"))?
        {
            raw::GeocodingGateway::Openstreetmap => GeocodingGateway::Openstreetmap,
            raw::GeocodingGateway::Opencage => {
                let raw::OpenCage { api_key } = gateway
                    .unwrap_or_default()
                    .opencage
                    .or_else(|| {
                        env::var(ENV_NAME_OPENCAGE_API_KEY)
                            .ok()
                            .map(|api_key| raw::OpenCage { api_key })
                    })
                    .ok_or_else(|| anyhow!("Missing 'opencage' gateway configuration"))?;
                GeocodingGateway::OpenCage { api_key }
            }
        };
        let rate_limit = rate_limit
            .or_else(|| raw::Geocoding::default().rate_limit)
            .ok_or_else(|| anyhow!("Missing geocoding rate limit"))?;
        let geocoding = Geocoding {
            gateway: geo_gateway,
            rate_limit,
        };

        let raw::Widget { mode } = widget.unwrap_or_default();
        let mode = match mode {
            Some(mode) => mode
                .parse()
                .map_err(|_| anyhow!("Invalid widget mode '{mode}'"))?,
            None => DisplayMode::default(),
        };
        let widget = Widget { mode };

        let raw::Store { dir } = store.unwrap_or_default();
        let store = Store { dir };

        Ok(Self {
            geocoding,
            widget,
            store,
        })
    }
}
