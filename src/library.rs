//! User-library read endpoints.
//!
//! Covers the five reads the MCP tools forward to: collections, collection
//! items, single item, free-text search, and recently added items. Each
//! performs exactly one roundtrip and fails fast; the 403/404 signature is
//! converted into [`Fetch::NotFound`] here so handlers never see status codes.

use crate::client::ZoteroClient;
use crate::error::{Result, ZoteroError};
use crate::parse::{parse_collections, parse_item_page, parse_single_item, ItemPage};
use crate::types::{Fetch, Item};
use serde_json::Value;

impl ZoteroClient {
    /// One GET; `None` is the not-found signature, other errors propagate.
    async fn read(&self, path: &str, params: &[(&str, &str)]) -> Result<Option<String>> {
        match self.get(path, params).await {
            Ok(body) => Ok(Some(body)),
            Err(ZoteroError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Fetch all collections in the library, as raw records.
    pub async fn collections(&self) -> Result<Fetch<Vec<Value>>> {
        let Some(body) = self.read(&self.user_path("/collections"), &[]).await? else {
            return Ok(Fetch::NotFound);
        };

        let collections = parse_collections(&body)?;
        if collections.is_empty() {
            Ok(Fetch::Empty)
        } else {
            Ok(Fetch::Found(collections))
        }
    }

    /// Fetch the items of one collection.
    ///
    /// `Found` may carry an empty vec: the remote returned entries but none
    /// had the minimum viable item shape. A zero-length remote result is
    /// `Empty` instead.
    pub async fn collection_items(&self, collection_key: &str) -> Result<Fetch<Vec<Item>>> {
        let path = self.user_path(&format!("/collections/{}/items", collection_key));
        let Some(body) = self.read(&path, &[]).await? else {
            return Ok(Fetch::NotFound);
        };

        Ok(page_outcome(parse_item_page(&body)?))
    }

    /// Fetch a single item by key.
    pub async fn item(&self, item_key: &str) -> Result<Fetch<Item>> {
        let path = self.user_path(&format!("/items/{}", item_key));
        let Some(body) = self.read(&path, &[]).await? else {
            return Ok(Fetch::NotFound);
        };

        Ok(Fetch::Found(parse_single_item(&body)?))
    }

    /// Free-text search across the whole library. Single page, no paging.
    pub async fn search_items(&self, query: &str) -> Result<Fetch<Vec<Item>>> {
        let path = self.user_path("/items");
        let Some(body) = self.read(&path, &[("q", query)]).await? else {
            return Ok(Fetch::NotFound);
        };

        Ok(page_outcome(parse_item_page(&body)?))
    }

    /// Most recently added items, newest first.
    pub async fn recent_items(&self, limit: u32) -> Result<Fetch<Vec<Item>>> {
        let path = self.user_path("/items");
        let limit_str = limit.to_string();
        let params = [
            ("sort", "dateAdded"),
            ("direction", "desc"),
            ("limit", limit_str.as_str()),
        ];
        let Some(body) = self.read(&path, &params).await? else {
            return Ok(Fetch::NotFound);
        };

        Ok(page_outcome(parse_item_page(&body)?))
    }
}

/// A zero-length remote page is `Empty`; anything else is `Found`, even if
/// lenient parsing kept nothing of it.
fn page_outcome(page: ItemPage) -> Fetch<Vec<Item>> {
    if page.total == 0 {
        Fetch::Empty
    } else {
        Fetch::Found(page.items)
    }
}
