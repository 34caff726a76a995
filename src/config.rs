use std::path::PathBuf;

use config::{Config, File};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "thali.toml";

/// Runtime settings, read from an optional TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the persisted draft.
    pub storage_dir: PathBuf,

    /// Directory holding `lunch.json|csv` and `dinner.json|csv`.
    pub menu_dir: PathBuf,

    /// Local order log.
    pub orders_file: PathBuf,

    /// Signed-in customer. Unset means anonymous.
    pub customer: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".thali"),
            menu_dir: PathBuf::from("menus"),
            orders_file: PathBuf::from(".thali/orders.json"),
            customer: None,
        }
    }
}

impl Settings {
    /// Load settings from `config_path`, or from `thali.toml` when unset.
    ///
    /// A missing or unreadable default file falls back to defaults; an
    /// explicitly named file must load.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        match Self::load_from_file(config_path) {
            Ok(settings) => Ok(settings),
            Err(err) if config_path.is_none() => {
                warn!("Could not read config file: {}. Using default configuration.", err);
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    fn load_from_file(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_FILE);

        let settings = Config::builder()
            .add_source(File::with_name(path).required(config_path.is_some()))
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(settings)
    }
}
