//! # dox-config
//!
//! Layered configuration loading for Doxymark using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DOXYMARK_*` prefix, `__` as separator)
//! 2. A file named explicitly (`doxymark --config PATH`)
//! 3. Project-level `.doxymark/config.toml`
//! 4. User-level `~/.config/doxymark/config.toml`
//! 5. Built-in defaults
//!
//! Figment maps `DOXYMARK_EXTRACTION__XML_OUTPUT` -> `extraction.xml_output`
//! and `DOXYMARK_RENDER__SHOW_RETURN` -> `render.show_return`.
//!
//! # Usage
//!
//! ```no_run
//! use dox_config::DoxConfig;
//!
//! let config = DoxConfig::load_with_dotenv().expect("config");
//! println!("XML output: {}", config.extraction.xml_output.display());
//! ```

mod error;
mod extraction;
mod render;

pub use error::ConfigError;
pub use extraction::ExtractionConfig;
pub use render::RenderOptions;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "DOXYMARK_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DoxConfig {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub render: RenderOptions,
}

impl DoxConfig {
    /// Load configuration from the default TOML files and the environment.
    ///
    /// Does NOT call `dotenvy`; use [`DoxConfig::load_with_dotenv`] for that.
    ///
    /// # Errors
    /// Returns `ConfigError::Figment` if a source cannot be parsed or has the
    /// wrong shape.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    /// Same as [`DoxConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an explicit file layered over the project
    /// and user files.
    ///
    /// # Errors
    /// `MissingFile` if `path` does not exist, otherwise as
    /// [`DoxConfig::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.display().to_string()));
        }
        let _ = dotenvy::dotenv();
        Self::figment_with(Some(path))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the default provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the provider chain, optionally with an explicit config file.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    #[must_use]
    pub fn figment_with(config_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".doxymark/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit file
        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("doxymark").join("config.toml"))
    }
}
