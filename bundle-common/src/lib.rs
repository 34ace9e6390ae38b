//! Common types and utilities shared across the bundle crates.
//!
//! This crate defines the shared error type and the observability helpers used
//! throughout the workspace. It is intentionally lightweight so that every
//! crate can depend on it without introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`BundleError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use bundle_common::BundleError;
//!
//! let err = BundleError::PayloadMissing {
//!     element_id: "webpack-bundle-page-data".to_string(),
//! };
//! assert!(err.to_string().contains("webpack-bundle-page-data"));
//! ```
use std::path::PathBuf;

pub mod observability;

/// Error types used across a bundle extraction run.
#[derive(thiserror::Error, Debug)]
pub enum BundleError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The bundle page could not be fetched.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The page carried no embedded payload script.
    #[error("Could not find the {element_id} script tag")]
    PayloadMissing { element_id: String },

    /// The embedded payload is not valid JSON.
    #[error("Payload is not valid JSON: {0}")]
    PayloadJson(#[from] serde_json::Error),

    /// Writing an output file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BundleError {
    /// Wrap an I/O failure together with the file it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenient alias for results that use [`BundleError`].
pub type Result<T> = std::result::Result<T, BundleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_mentions_path() {
        let err = BundleError::io(
            "out/report.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/report.txt"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn json_errors_convert() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: BundleError = parse.into();
        assert!(matches!(err, BundleError::PayloadJson(_)));
    }
}
