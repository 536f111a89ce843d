//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the organization's calendar settings and the server
//! settings from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded organization: {}", config.organization().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, OrganizationConfig, ServerConfig};
