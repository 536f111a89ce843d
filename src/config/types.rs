//! Configuration types for the Attendance Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::Deserialize;

use crate::reconciliation::LocalCalendar;

fn default_utc_offset() -> String {
    "+00:00".to_string()
}

fn default_bind_address() -> String {
    "0.0.0.0:8080".to_string()
}

/// Organization settings from `organization.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrganizationConfig {
    /// The organization's display name.
    pub name: String,
    /// UTC offset of the organization's local calendar, e.g. `"+09:00"`.
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
    /// Weekday labels, index 0 = Sunday. Defaults to `Sun..Sat`.
    #[serde(default)]
    pub weekday_labels: Option<Vec<String>>,
}

/// Server settings from `server.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP API binds to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    /// Seed JSON for the in-memory store, relative to the config directory.
    #[serde(default)]
    pub seed_data: Option<String>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    organization: OrganizationConfig,
    server: ServerConfig,
    calendar: LocalCalendar,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        organization: OrganizationConfig,
        server: ServerConfig,
        calendar: LocalCalendar,
    ) -> Self {
        Self {
            organization,
            server,
            calendar,
        }
    }

    /// Returns the organization settings.
    pub fn organization(&self) -> &OrganizationConfig {
        &self.organization
    }

    /// Returns the server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.server
    }

    /// Returns the organization's local calendar.
    pub fn calendar(&self) -> &LocalCalendar {
        &self.calendar
    }
}
