//! Scrape profiles, loaded from a JSON file keyed by profile name.
//!
//! ```json
//! {
//!   "figma": {
//!     "pageURL": "https://www.figma.com/developers/api",
//!     "objectRowSelector": "...",
//!     "objectRowToNameSelector": "...",
//!     "objectRowToPropertiesSelector": "...",
//!     "objectRowToInheritanceSelector": "...",
//!     "propertyRowToNameSelector": "...",
//!     "propertyRowToTypeSelector": "...",
//!     "render": { "style": "es_module" }
//!   }
//! }
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::FetchConfig;
use crate::extract::LocatorConfig;
use crate::model::RenderConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown profile '{0}'")]
    UnknownProfile(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything needed to scrape one documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    #[serde(rename = "pageURL")]
    pub page_url: String,
    #[serde(flatten)]
    pub locators: LocatorConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Named scrape profiles, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileSet {
    profiles: IndexMap<String, ScrapeConfig>,
}

impl ProfileSet {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn get(&self, name: &str) -> ConfigResult<&ScrapeConfig> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScrapeConfig)> {
        self.profiles.iter().map(|(name, config)| (name.as_str(), config))
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
