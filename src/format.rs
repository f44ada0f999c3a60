//! Response formatters.
//!
//! Pure projections from the remote item payload into the reduced,
//! defaulted shapes the tools return. Every documented field is always
//! present in the output: the real value, the documented placeholder, or
//! JSON null for the list-level optional fields. The Zotero API serializes
//! unset fields as `""`, so empty-after-trim counts as absent.

use crate::types::{Creator, ItemData, Tag};
use serde::Serialize;

/// Substitute `placeholder` for a missing or blank field.
fn text_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

/// Keep a field only if it carries a non-blank value.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Join creators into a single authors string.
///
/// First and last name are joined with a space and trimmed; creators that
/// trim to empty (including institutional creators carrying only `name`)
/// are dropped. An empty result becomes `"No authors listed"`.
pub fn format_authors(creators: &[Creator]) -> String {
    let names: Vec<String> = creators
        .iter()
        .map(|c| {
            format!(
                "{} {}",
                c.first_name.as_deref().unwrap_or(""),
                c.last_name.as_deref().unwrap_or("")
            )
            .trim()
            .to_string()
        })
        .filter(|name| !name.is_empty())
        .collect();

    if names.is_empty() {
        "No authors listed".to_string()
    } else {
        names.join(", ")
    }
}

fn tag_names(tags: &[Tag]) -> Vec<String> {
    tags.iter()
        .map(|t| t.tag.clone())
        .filter(|t| !t.is_empty())
        .collect()
}

/// List entry for `get_collection_items`.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionEntry {
    pub title: String,
    pub authors: String,
    pub date: String,
    pub key: String,
    #[serde(rename = "itemType")]
    pub item_type: String,
    #[serde(rename = "abstractNote")]
    pub abstract_note: String,
    pub tags: Vec<String>,
    pub doi: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "publicationTitle")]
    pub publication_title: Option<String>,
}

impl CollectionEntry {
    pub fn from_data(data: &ItemData) -> Self {
        CollectionEntry {
            title: text_or(data.title.as_deref(), "Untitled"),
            authors: format_authors(&data.creators),
            date: text_or(data.date.as_deref(), "No date"),
            key: text_or(data.key.as_deref(), "No key"),
            item_type: text_or(data.item_type.as_deref(), "Unknown type"),
            abstract_note: text_or(data.abstract_note.as_deref(), "No abstract available"),
            tags: tag_names(&data.tags),
            doi: non_blank(data.doi.as_deref()),
            url: non_blank(data.url.as_deref()),
            publication_title: non_blank(data.publication_title.as_deref()),
        }
    }
}

/// List entry for `search_library`.
#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    pub title: String,
    pub authors: String,
    pub date: String,
    pub key: Option<String>,
    #[serde(rename = "itemType")]
    pub item_type: Option<String>,
    #[serde(rename = "abstractNote")]
    pub abstract_note: String,
}

impl ItemSummary {
    pub fn from_data(data: &ItemData) -> Self {
        ItemSummary {
            title: text_or(data.title.as_deref(), "Untitled"),
            authors: format_authors(&data.creators),
            date: text_or(data.date.as_deref(), "No date"),
            key: non_blank(data.key.as_deref()),
            item_type: non_blank(data.item_type.as_deref()),
            abstract_note: text_or(data.abstract_note.as_deref(), "No abstract available"),
        }
    }
}

/// Rich single-item view for `get_item_details`.
#[derive(Debug, Clone, Serialize)]
pub struct ItemDetails {
    pub title: String,
    pub authors: String,
    pub date: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    #[serde(rename = "publicationTitle")]
    pub publication_title: String,
    pub doi: String,
    pub url: String,
    pub tags: Vec<String>,
    pub collections: Vec<String>,
}

impl ItemDetails {
    pub fn from_data(data: &ItemData) -> Self {
        ItemDetails {
            title: text_or(data.title.as_deref(), "Untitled"),
            authors: format_authors(&data.creators),
            date: text_or(data.date.as_deref(), "No date"),
            abstract_text: text_or(data.abstract_note.as_deref(), "No abstract available"),
            publication_title: text_or(
                data.publication_title.as_deref(),
                "No publication title",
            ),
            doi: text_or(data.doi.as_deref(), "No DOI"),
            url: text_or(data.url.as_deref(), "No URL"),
            tags: tag_names(&data.tags),
            collections: data.collections.clone(),
        }
    }
}

/// Minimal entry for `get_recent`.
#[derive(Debug, Clone, Serialize)]
pub struct RecentEntry {
    pub title: String,
    pub authors: String,
    #[serde(rename = "dateAdded")]
    pub date_added: String,
    pub key: Option<String>,
    #[serde(rename = "itemType")]
    pub item_type: Option<String>,
}

impl RecentEntry {
    pub fn from_data(data: &ItemData) -> Self {
        RecentEntry {
            title: text_or(data.title.as_deref(), "Untitled"),
            authors: format_authors(&data.creators),
            date_added: text_or(data.date_added.as_deref(), "No date"),
            key: non_blank(data.key.as_deref()),
            item_type: non_blank(data.item_type.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(name: &str) -> Tag {
        Tag {
            tag: name.to_string(),
            kind: None,
        }
    }

    #[test]
    fn authors_joined_with_comma() {
        let creators = vec![
            Creator::person("Ada", "Lovelace"),
            Creator::person("Charles", "Babbage"),
        ];
        assert_eq!(format_authors(&creators), "Ada Lovelace, Charles Babbage");
    }

    #[test]
    fn blank_creators_dropped() {
        let creators = vec![Creator::person("Ada", "Lovelace"), Creator::person("", "")];
        assert_eq!(format_authors(&creators), "Ada Lovelace");
    }

    #[test]
    fn no_creators_yields_placeholder() {
        assert_eq!(format_authors(&[]), "No authors listed");
        let all_empty = vec![Creator::person("", ""), Creator::default()];
        assert_eq!(format_authors(&all_empty), "No authors listed");
    }

    #[test]
    fn last_name_only_survives() {
        let creators = vec![Creator {
            last_name: Some("Collaboration".to_string()),
            ..Creator::default()
        }];
        assert_eq!(format_authors(&creators), "Collaboration");
    }

    #[test]
    fn institutional_name_does_not_contribute() {
        let creators = vec![Creator {
            name: Some("CERN".to_string()),
            ..Creator::default()
        }];
        assert_eq!(format_authors(&creators), "No authors listed");
    }

    fn populated() -> ItemData {
        ItemData {
            key: Some("ABCD2345".to_string()),
            item_type: Some("journalArticle".to_string()),
            title: Some("On Computable Numbers".to_string()),
            creators: vec![Creator::person("Alan", "Turing")],
            abstract_note: Some("The computable numbers may be described briefly.".to_string()),
            date: Some("1936".to_string()),
            date_added: Some("2024-03-01T12:00:00Z".to_string()),
            doi: Some("10.1112/plms/s2-42.1.230".to_string()),
            url: Some("https://example.org/turing".to_string()),
            tags: vec![tag("computability"), tag("logic")],
            collections: vec!["COLL1111".to_string()],
            publication_title: Some("Proc. London Math. Soc.".to_string()),
            ..ItemData::default()
        }
    }

    #[test]
    fn details_round_trip_populated() {
        let details = ItemDetails::from_data(&populated());
        assert_eq!(details.title, "On Computable Numbers");
        assert_eq!(details.authors, "Alan Turing");
        assert_eq!(details.date, "1936");
        assert_eq!(
            details.abstract_text,
            "The computable numbers may be described briefly."
        );
        assert_eq!(details.publication_title, "Proc. London Math. Soc.");
        assert_eq!(details.doi, "10.1112/plms/s2-42.1.230");
        assert_eq!(details.url, "https://example.org/turing");
        assert_eq!(details.tags, vec!["computability", "logic"]);
        assert_eq!(details.collections, vec!["COLL1111"]);
    }

    #[test]
    fn details_round_trip_all_absent() {
        let details = ItemDetails::from_data(&ItemData::default());
        assert_eq!(details.title, "Untitled");
        assert_eq!(details.authors, "No authors listed");
        assert_eq!(details.date, "No date");
        assert_eq!(details.abstract_text, "No abstract available");
        assert_eq!(details.publication_title, "No publication title");
        assert_eq!(details.doi, "No DOI");
        assert_eq!(details.url, "No URL");
        assert!(details.tags.is_empty());
        assert!(details.collections.is_empty());
    }

    #[test]
    fn empty_string_fields_count_as_absent() {
        let data = ItemData {
            title: Some("".to_string()),
            date: Some("  ".to_string()),
            doi: Some("".to_string()),
            ..ItemData::default()
        };
        let details = ItemDetails::from_data(&data);
        assert_eq!(details.title, "Untitled");
        assert_eq!(details.date, "No date");
        assert_eq!(details.doi, "No DOI");
    }

    #[test]
    fn collection_entry_defaults() {
        let entry = CollectionEntry::from_data(&ItemData::default());
        assert_eq!(entry.key, "No key");
        assert_eq!(entry.item_type, "Unknown type");
        assert_eq!(entry.doi, None);
        assert_eq!(entry.url, None);
        assert_eq!(entry.publication_title, None);
    }

    #[test]
    fn collection_entry_drops_empty_tags() {
        let data = ItemData {
            tags: vec![tag("keep"), tag("")],
            ..ItemData::default()
        };
        let entry = CollectionEntry::from_data(&data);
        assert_eq!(entry.tags, vec!["keep"]);
    }

    #[test]
    fn summary_serializes_wire_names() {
        let value = serde_json::to_value(ItemSummary::from_data(&populated())).unwrap();
        assert_eq!(value["itemType"], "journalArticle");
        assert_eq!(
            value["abstractNote"],
            "The computable numbers may be described briefly."
        );
        // Field present even when optional.
        let empty = serde_json::to_value(ItemSummary::from_data(&ItemData::default())).unwrap();
        assert!(empty.get("key").is_some());
        assert_eq!(empty["key"], serde_json::Value::Null);
    }

    #[test]
    fn recent_entry_uses_date_added() {
        let entry = RecentEntry::from_data(&populated());
        assert_eq!(entry.date_added, "2024-03-01T12:00:00Z");
        let empty = RecentEntry::from_data(&ItemData::default());
        assert_eq!(empty.date_added, "No date");
    }
}
