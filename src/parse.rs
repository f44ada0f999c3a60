//! Zotero API response parsing.
//!
//! Parsing is deliberately lenient: item lists are read as raw JSON arrays
//! first, nulls and entries without the minimum viable shape (top-level
//! `key` and `version`) are dropped, and the raw entry count is preserved so
//! callers can tell "the remote returned nothing" apart from "nothing
//! survived parsing".

use crate::error::ZoteroError;
use crate::types::Item;
use serde_json::Value;

/// One page of items, with the pre-filter entry count.
#[derive(Debug)]
pub struct ItemPage {
    /// Number of entries the remote returned, including unusable ones.
    pub total: usize,
    /// Entries that deserialized into the declared item shape.
    pub items: Vec<Item>,
}

/// Parse an item-list response body.
pub fn parse_item_page(json: &str) -> crate::error::Result<ItemPage> {
    let raw: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| ZoteroError::Parse(format!("Invalid item list: {}", e)))?;

    let total = raw.len();
    let items = raw
        .into_iter()
        .filter(|v| !v.is_null())
        .filter_map(|v| serde_json::from_value::<Item>(v).ok())
        .collect();

    Ok(ItemPage { total, items })
}

/// Parse a single-item response body.
pub fn parse_single_item(json: &str) -> crate::error::Result<Item> {
    serde_json::from_str(json).map_err(|e| ZoteroError::Parse(format!("Invalid item: {}", e)))
}

/// Parse a collection-list response body.
///
/// Collections are kept as raw values: the `get_collections` tool passes
/// full records through without field reduction.
pub fn parse_collections(json: &str) -> crate::error::Result<Vec<Value>> {
    serde_json::from_str(json)
        .map_err(|e| ZoteroError::Parse(format!("Invalid collection list: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = r#"[
        {
            "key": "ABCD2345",
            "version": 12,
            "library": {"type": "user", "id": 12345, "name": "someone"},
            "data": {
                "key": "ABCD2345",
                "version": 12,
                "itemType": "journalArticle",
                "title": "A Paper About Graphs",
                "creators": [{"creatorType": "author", "firstName": "Ada", "lastName": "Lovelace"}],
                "date": "2021",
                "tags": [{"tag": "graphs"}]
            }
        },
        {
            "key": "EFGH6789",
            "version": 3,
            "data": {"key": "EFGH6789", "version": 3, "itemType": "book", "title": "A Book"}
        }
    ]"#;

    #[test]
    fn parses_item_page() {
        let page = parse_item_page(SAMPLE_PAGE).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 2);

        let first = &page.items[0];
        assert_eq!(first.key, "ABCD2345");
        assert_eq!(first.version, 12);
        assert_eq!(first.data.title.as_deref(), Some("A Paper About Graphs"));
        assert_eq!(first.data.creators.len(), 1);
        assert_eq!(first.data.tags[0].tag, "graphs");
    }

    #[test]
    fn drops_null_entries_but_keeps_total() {
        let json = r#"[
            null,
            {"key": "ABCD2345", "version": 1, "data": {"title": "Real"}}
        ]"#;
        let page = parse_item_page(json).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].key, "ABCD2345");
    }

    #[test]
    fn drops_entries_without_minimum_shape() {
        // No top-level key/version: not a viable item record.
        let json = r#"[{"data": {"title": "Shapeless"}}, {"title": "Bare"}]"#;
        let page = parse_item_page(json).unwrap();
        assert_eq!(page.total, 2);
        assert!(page.items.is_empty());
    }

    #[test]
    fn empty_page_is_distinct_from_all_invalid() {
        let empty = parse_item_page("[]").unwrap();
        assert_eq!(empty.total, 0);
        assert!(empty.items.is_empty());

        let invalid = parse_item_page("[null]").unwrap();
        assert_eq!(invalid.total, 1);
        assert!(invalid.items.is_empty());
    }

    #[test]
    fn rejects_non_array_page() {
        assert!(parse_item_page(r#"{"error": "nope"}"#).is_err());
    }

    #[test]
    fn parses_single_item() {
        let json = r#"{
            "key": "ABCD2345",
            "version": 7,
            "data": {
                "key": "ABCD2345",
                "itemType": "journalArticle",
                "title": "Solo",
                "DOI": "10.1000/xyz123",
                "collections": ["COLL1111"]
            }
        }"#;
        let item = parse_single_item(json).unwrap();
        assert_eq!(item.data.doi.as_deref(), Some("10.1000/xyz123"));
        assert_eq!(item.data.collections, vec!["COLL1111".to_string()]);
    }

    #[test]
    fn parses_collections_raw() {
        let json = r#"[
            {"key": "COLL1111", "version": 2, "data": {"name": "Reading List", "parentCollection": false}}
        ]"#;
        let collections = parse_collections(json).unwrap();
        assert_eq!(collections.len(), 1);
        // Full record preserved, no field reduction.
        assert_eq!(collections[0]["data"]["name"], "Reading List");
    }
}
