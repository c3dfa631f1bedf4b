//! Doxygen extraction settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_doxygen() -> PathBuf {
    PathBuf::from("doxygen")
}

fn default_source_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_xml_output() -> PathBuf {
    PathBuf::from("build/doxygen/xml")
}

fn default_project_name() -> String {
    "Doxymark".to_string()
}

/// `[extraction]` section: how to run Doxygen and where its XML lands.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Doxygen executable.
    #[serde(default = "default_doxygen")]
    pub doxygen: PathBuf,

    /// Directory Doxygen runs in; also the include path.
    #[serde(default = "default_source_directory")]
    pub source_directory: PathBuf,

    /// Headers to document, relative to `source_directory`.
    #[serde(default)]
    pub sources: Vec<String>,

    /// Preprocessor symbols (`NAME` or `NAME=value`).
    #[serde(default)]
    pub predefined: Vec<String>,

    #[serde(default = "default_xml_output")]
    pub xml_output: PathBuf,

    #[serde(default = "default_project_name")]
    pub project_name: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            doxygen: default_doxygen(),
            source_directory: default_source_directory(),
            sources: Vec::new(),
            predefined: Vec::new(),
            xml_output: default_xml_output(),
            project_name: default_project_name(),
        }
    }
}

impl ExtractionConfig {
    /// Check the settings are complete enough to run Doxygen.
    ///
    /// # Errors
    /// `InvalidValue` when no sources are listed or a source is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extraction.sources".to_string(),
                reason: "at least one source file is required".to_string(),
            });
        }
        if self.sources.iter().any(|s| s.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "extraction.sources".to_string(),
                reason: "source paths must not be blank".to_string(),
            });
        }
        Ok(())
    }
}
