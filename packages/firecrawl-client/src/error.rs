//! Error types for the Firecrawl client.

use thiserror::Error;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, FirecrawlError>;

/// Firecrawl client errors.
#[derive(Debug, Error)]
pub enum FirecrawlError {
    /// Configuration error (missing API key, invalid settings)
    #[error("configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// API error (non-2xx response or `success: false`)
    #[error("Firecrawl API error: {0}")]
    Api(String),

    /// The response was missing an expected payload
    #[error("missing data in Firecrawl response: {0}")]
    MissingData(String),
}
