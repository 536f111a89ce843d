//! Application state for the Attendance Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::reconciliation::LocalCalendar;
use crate::source::{RecordSource, UserDirectory};

/// Shared application state.
///
/// Holds the loaded configuration and the collaborators the engine reads
/// users and records from.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    directory: Arc<dyn UserDirectory>,
    source: Arc<dyn RecordSource>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        config: ConfigLoader,
        directory: Arc<dyn UserDirectory>,
        source: Arc<dyn RecordSource>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            directory,
            source,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the organization's local calendar.
    pub fn calendar(&self) -> &LocalCalendar {
        self.config.calendar()
    }

    /// Returns the user directory.
    pub fn directory(&self) -> &dyn UserDirectory {
        self.directory.as_ref()
    }

    /// Returns the record source.
    pub fn source(&self) -> &dyn RecordSource {
        self.source.as_ref()
    }
}
