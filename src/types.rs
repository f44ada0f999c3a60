//! Wire types for the Zotero Web API.
//!
//! The remote shape is never trusted beyond the fields declared here: every
//! descriptive field is optional, unknown fields (`library`, `links`, `meta`)
//! are ignored on deserialize, and formatting decides placeholders later.

use serde::{Deserialize, Serialize};

/// Outcome of a read against the Zotero API.
///
/// Decided once at the client boundary so handlers branch on a variant
/// instead of inspecting HTTP status codes. Transport and parse failures
/// stay in the `Err` channel of [`crate::error::Result`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch<T> {
    /// A usable payload was returned.
    Found(T),
    /// The remote answered with a zero-length result.
    Empty,
    /// HTTP 403/404: nonexistent or not accessible with these credentials.
    NotFound,
}

/// A Zotero item wrapper: stable key, version, and the descriptive payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub version: i64,
    pub data: ItemData,
}

/// The descriptive payload of an item or collection record.
///
/// All fields are optional; Zotero also serializes unset fields as `""`,
/// which the formatters treat the same as missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemData {
    pub key: Option<String>,
    pub version: Option<i64>,
    #[serde(rename = "itemType")]
    pub item_type: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub creators: Vec<Creator>,
    #[serde(rename = "abstractNote")]
    pub abstract_note: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "dateAdded")]
    pub date_added: Option<String>,
    #[serde(rename = "dateModified")]
    pub date_modified: Option<String>,
    #[serde(rename = "DOI")]
    pub doi: Option<String>,
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(rename = "publicationTitle")]
    pub publication_title: Option<String>,
}

/// A creator (author, editor, ...) of an item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Creator {
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    /// Single-field form used for institutional creators.
    pub name: Option<String>,
    #[serde(rename = "creatorType")]
    pub creator_type: Option<String>,
}

impl Creator {
    /// Build a personal creator from first and last name.
    pub fn person(first: impl Into<String>, last: impl Into<String>) -> Self {
        Creator {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            name: None,
            creator_type: Some("author".to_string()),
        }
    }
}

/// A tag attached to an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub tag: String,
    #[serde(rename = "type")]
    pub kind: Option<i64>,
}
