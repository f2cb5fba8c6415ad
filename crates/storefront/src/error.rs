//! Startup and serving errors.
//!
//! Request handling itself cannot fail (static files either exist or 404), so
//! the only errors are the ones that stop the server from running at all.
//! `main` reports these to Sentry before exiting.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that prevent the storefront from serving.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The site directory does not exist or is not a directory.
    #[error("Site directory not found: {}", .0.display())]
    SiteDirMissing(PathBuf),

    /// The listener could not be bound.
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an I/O error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Result type alias for `ServerError`.
pub type Result<T> = std::result::Result<T, ServerError>;
