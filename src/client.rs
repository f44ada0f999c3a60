//! The Zotero Web API client.

use crate::error::{Result, ZoteroError};
use reqwest::Client;
use std::time::Duration;

/// Async client for the Zotero Web API v3.
///
/// Carries the immutable credentials (API key and library owner id) for the
/// process lifetime; handlers receive it by reference, never from globals.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> zotero_mcp::error::Result<()> {
/// let client = zotero_mcp::ZoteroClient::from_env()?;
/// let outcome = client.search_items("quantum computing").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ZoteroClient {
    pub(crate) http: Client,
    pub(crate) api_key: String,
    pub(crate) user_id: String,
    pub(crate) base_url: String,
}

impl ZoteroClient {
    /// Create a new client with the given API key and library owner id.
    pub fn new(api_key: impl Into<String>, user_id: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            http,
            api_key: api_key.into(),
            user_id: user_id.into(),
            base_url: "https://api.zotero.org".to_string(),
        }
    }

    /// Create a client from `ZOTERO_API_KEY` and `ZOTERO_USER_ID`.
    ///
    /// Absence of either is a fatal startup condition for the server binary.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("ZOTERO_API_KEY").map_err(|_| ZoteroError::AuthRequired)?;
        let user_id = std::env::var("ZOTERO_USER_ID").map_err(|_| ZoteroError::AuthRequired)?;
        if api_key.is_empty() || user_id.is_empty() {
            return Err(ZoteroError::AuthRequired);
        }
        Ok(Self::new(api_key, user_id))
    }

    /// Override the base URL (useful for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// The library owner id this client is scoped to.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Path prefix for the user-scoped library.
    pub(crate) fn user_path(&self, suffix: &str) -> String {
        format!("/users/{}{}", self.user_id, suffix)
    }

    /// Make an authenticated GET request to the Zotero API.
    pub(crate) async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get(&url)
            .header("Zotero-API-Key", &self.api_key)
            .header("Zotero-API-Version", "3")
            .header("User-Agent", concat!("zotero-mcp/", env!("CARGO_PKG_VERSION")))
            .query(params)
            .send()
            .await?;

        handle_response(response).await
    }
}

/// Map the HTTP response to a body or a typed error, once, at this boundary.
async fn handle_response(response: reqwest::Response) -> Result<String> {
    let status = response.status().as_u16();
    let body = match status {
        200..=299 => response.text().await?,
        _ => response.text().await.unwrap_or_default(),
    };
    status_outcome(status, body)
}

/// Status-code → outcome mapping.
///
/// 403 and 404 both collapse into [`ZoteroError::NotFound`]: Zotero answers
/// either depending on whether a key is nonexistent or merely invisible to
/// the caller's credentials, and handlers treat the two identically.
fn status_outcome(status: u16, body: String) -> Result<String> {
    match status {
        200..=299 => Ok(body),
        401 => Err(ZoteroError::AuthRequired),
        403 | 404 => Err(ZoteroError::NotFound("Resource not found".to_string())),
        429 => Err(ZoteroError::RateLimited),
        _ => Err(ZoteroError::Api {
            status,
            message: body,
        }),
    }
}
