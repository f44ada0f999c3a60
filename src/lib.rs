//! # zotero-mcp
//!
//! An MCP (Model Context Protocol) server exposing a personal Zotero
//! reference library to AI assistants.
//!
//! Provides:
//! - **Library**: Async client for the Zotero Web API v3 (collections,
//!   items, search, recency)
//! - **Server**: `zotero-mcp` binary speaking JSON-RPC 2.0 over stdio
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> zotero_mcp::error::Result<()> {
//! use zotero_mcp::{Fetch, ZoteroClient};
//!
//! // Credentials come from ZOTERO_API_KEY and ZOTERO_USER_ID.
//! let client = ZoteroClient::from_env()?;
//!
//! if let Fetch::Found(items) = client.search_items("turing").await? {
//!     for item in &items {
//!         println!("{}: {:?}", item.key, item.data.title);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod format;
pub mod library;
pub mod mcp;
pub mod parse;
pub mod types;

// Re-export key types at the crate root.
pub use client::ZoteroClient;
pub use error::ZoteroError;
pub use types::*;
