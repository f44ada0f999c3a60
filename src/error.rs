//! Error types for the Zotero MCP server.

/// Errors that can occur when talking to the Zotero Web API or serving MCP.
#[derive(Debug, thiserror::Error)]
pub enum ZoteroError {
    /// HTTP request failed (network, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Zotero API returned an unexpected error status code.
    #[error("API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// Credentials missing or rejected.
    #[error("Authentication required: set ZOTERO_API_KEY and ZOTERO_USER_ID environment variables")]
    AuthRequired,

    /// Rate limited by the Zotero API (HTTP 429). Propagated, never retried.
    #[error("Rate limited by Zotero API")]
    RateLimited,

    /// Failed to parse an API response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Tool argument missing or of the wrong type.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Resource not found (HTTP 403/404).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration or transport-plumbing error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias for Results using [`ZoteroError`].
pub type Result<T> = std::result::Result<T, ZoteroError>;
