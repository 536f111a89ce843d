//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine
//! configuration from YAML files.

use chrono::FixedOffset;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};
use crate::reconciliation::{DEFAULT_WEEKDAY_LABELS, LocalCalendar};

use super::types::{EngineConfig, OrganizationConfig, ServerConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── organization.yaml   # Name, UTC offset, weekday labels
/// ├── server.yaml         # Bind address, optional seed data
/// └── seed.json           # Records for the in-memory store
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Organization: {}", loader.organization().name);
/// # Ok::<(), attendance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    base_dir: PathBuf,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The UTC offset cannot be parsed, or the weekday label list does not
    ///   have exactly seven entries
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let organization = Self::load_yaml::<OrganizationConfig>(&path.join("organization.yaml"))?;
        let server = Self::load_yaml::<ServerConfig>(&path.join("server.yaml"))?;
        let calendar = Self::build_calendar(&organization)?;

        Ok(Self {
            config: EngineConfig::new(organization, server, calendar),
            base_dir: path.to_path_buf(),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn build_calendar(organization: &OrganizationConfig) -> EngineResult<LocalCalendar> {
        let offset: FixedOffset =
            organization
                .utc_offset
                .parse()
                .map_err(|e: chrono::ParseError| EngineError::InvalidConfig {
                    field: "utc_offset".to_string(),
                    message: format!("'{}': {}", organization.utc_offset, e),
                })?;

        let labels = match &organization.weekday_labels {
            None => DEFAULT_WEEKDAY_LABELS.map(str::to_string),
            Some(labels) => <[String; 7]>::try_from(labels.clone()).map_err(|labels| {
                EngineError::InvalidConfig {
                    field: "weekday_labels".to_string(),
                    message: format!("expected 7 labels, got {}", labels.len()),
                }
            })?,
        };

        Ok(LocalCalendar::new(offset, labels))
    }

    /// Returns the organization settings.
    pub fn organization(&self) -> &OrganizationConfig {
        self.config.organization()
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        self.config.server()
    }

    /// Returns the organization's local calendar.
    pub fn calendar(&self) -> &LocalCalendar {
        self.config.calendar()
    }

    /// Returns the seed data path resolved against the config directory.
    pub fn seed_data_path(&self) -> Option<PathBuf> {
        self.config
            .server()
            .seed_data
            .as_ref()
            .map(|seed| self.base_dir.join(seed))
    }
}
