//! Error types for the Attendance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Sparse data (a day without a shift, a shift without punches) is never an
//! error; only structurally invalid requests, rejected scopes, upstream
//! failures and configuration problems are.

use thiserror::Error;

/// The main error type for the Attendance Engine.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::InvalidScope {
///     message: "no user ids given".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid report scope: no user ids given");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A required scope parameter was missing or empty.
    #[error("Invalid report scope: {message}")]
    InvalidScope {
        /// What was wrong with the scope.
        message: String,
    },

    /// The scope was well-formed but resolved to zero users.
    #[error("No users resolved for scope {scope}")]
    NoUsersResolved {
        /// A description of the scope that resolved to nothing.
        scope: String,
    },

    /// The permission layer refused the requested scope.
    #[error("Scope not permitted: {message}")]
    ScopeNotPermitted {
        /// The reason given by the permission layer.
        message: String,
    },

    /// A batched fetch from the persistence layer failed.
    #[error("Failed to fetch {source_name}: {message}")]
    UpstreamFetch {
        /// Which record stream failed (e.g. "shifts").
        source_name: String,
        /// The upstream error message.
        message: String,
    },

    /// The requested year/month does not name a calendar month.
    #[error("Invalid month {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month.
        month: u32,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// A description of the problem.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_scope_displays_message() {
        let error = EngineError::InvalidScope {
            message: "company scope requires a partner id".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid report scope: company scope requires a partner id"
        );
    }

    #[test]
    fn test_no_users_resolved_displays_scope() {
        let error = EngineError::NoUsersResolved {
            scope: "company(acme)".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "No users resolved for scope company(acme)"
        );
    }

    #[test]
    fn test_upstream_fetch_displays_source_and_message() {
        let error = EngineError::UpstreamFetch {
            source_name: "shifts".to_string(),
            message: "connection reset".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to fetch shifts: connection reset"
        );
    }

    #[test]
    fn test_invalid_month_displays_year_and_month() {
        let error = EngineError::InvalidMonth {
            year: 2026,
            month: 13,
        };
        assert_eq!(error.to_string(), "Invalid month 2026-13");
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_month() -> EngineResult<()> {
            Err(EngineError::InvalidMonth {
                year: 2026,
                month: 0,
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_month()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
