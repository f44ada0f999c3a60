//! MCP (Model Context Protocol) server implementation.
//!
//! Implements the JSON-RPC 2.0 protocol over stdio, exposing the Zotero
//! library tools for AI agent integration.
//!
//! Expected "nothing to show" conditions (empty collection, unknown key,
//! no search hits, blank required argument) are returned as *advisory*
//! payloads: a successful content envelope whose JSON carries an `error`
//! string the assistant can render. Only argument-validation failures,
//! unknown tools, and unrecognized transport errors use the `isError`
//! envelope.

use crate::client::ZoteroClient;
use crate::error::ZoteroError;
use crate::format::{CollectionEntry, ItemDetails, ItemSummary, RecentEntry};
use crate::types::Fetch;
use serde_json::{json, Value};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

/// Hard cap on `get_recent`, regardless of caller input.
const RECENT_LIMIT_CAP: u64 = 100;

/// Run the MCP server over stdin/stdout.
pub async fn run_server(client: ZoteroClient) -> crate::error::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.map_err(|e| ZoteroError::Config(format!("stdin error: {}", e)))?;
        if line.trim().is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_str(&line) {
            Ok(v) => v,
            Err(e) => {
                let error_response = json!({
                    "jsonrpc": "2.0",
                    "id": null,
                    "error": { "code": -32700, "message": format!("Parse error: {}", e) }
                });
                writeln!(stdout.lock(), "{}", error_response)
                    .map_err(|e| ZoteroError::Config(format!("stdout error: {}", e)))?;
                continue;
            }
        };

        let id = request.get("id").cloned().unwrap_or(Value::Null);
        let method = request["method"].as_str().unwrap_or("");

        let response = match method {
            "initialize" => handle_initialize(&id),
            "tools/list" => handle_tools_list(&id),
            "tools/call" => handle_tool_call(&client, &id, &request["params"]).await,
            "resources/list" => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": { "resources": [] }
            }),
            m if m.starts_with("notifications/") => continue,
            _ => json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": { "code": -32601, "message": format!("Method not found: {}", method) }
            }),
        };

        writeln!(stdout.lock(), "{}", response)
            .map_err(|e| ZoteroError::Config(format!("stdout error: {}", e)))?;
        stdout
            .lock()
            .flush()
            .map_err(|e| ZoteroError::Config(format!("stdout flush error: {}", e)))?;
    }

    Ok(())
}

fn handle_initialize(id: &Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "protocolVersion": "2024-11-05",
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "zotero-mcp",
                "version": env!("CARGO_PKG_VERSION")
            }
        }
    })
}

fn handle_tools_list(id: &Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": {
            "tools": tool_definitions()
        }
    })
}

async fn handle_tool_call(client: &ZoteroClient, id: &Value, params: &Value) -> Value {
    let tool_name = params["name"].as_str().unwrap_or("");
    let args = &params["arguments"];

    let result = match tool_name {
        "get_collections" => tool_get_collections(client).await,
        "get_collection_items" => tool_get_collection_items(client, args).await,
        "get_item_details" => tool_get_item_details(client, args).await,
        "search_library" => tool_search_library(client, args).await,
        "get_recent" => tool_get_recent(client, args).await,
        _ => Err(ZoteroError::Config(format!("Unknown tool: {}", tool_name))),
    };

    match result {
        Ok(content) => json!({
            "jsonrpc": "2.0",
            "id": id,
            "result": {
                "content": [{ "type": "text", "text": content }]
            }
        }),
        Err(e) => {
            warn!(tool = tool_name, error = %e, "tool call failed");
            json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": {
                    "content": [{ "type": "text", "text": format!("Error: {}", e) }],
                    "isError": true
                }
            })
        }
    }
}

// --- Argument helpers ---

/// Extract a required string argument; missing or wrongly typed is a
/// propagated validation error, issued before any remote call.
fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, ZoteroError> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| ZoteroError::InvalidArgument(format!("'{}' parameter required", key)))
}

/// Default and clamp the `get_recent` limit. Zero counts as absent and
/// falls back to the default; over-cap values are silently clamped, not
/// rejected.
fn clamp_limit(requested: Option<u64>) -> u32 {
    requested
        .filter(|&n| n > 0)
        .unwrap_or(10)
        .min(RECENT_LIMIT_CAP) as u32
}

/// Serialize an advisory payload into the success content envelope.
fn advisory(payload: Value) -> Result<String, ZoteroError> {
    Ok(serde_json::to_string_pretty(&payload)?)
}

// --- Tool implementations ---

async fn tool_get_collections(client: &ZoteroClient) -> Result<String, ZoteroError> {
    match client.collections().await? {
        Fetch::Found(collections) => {
            info!(count = collections.len(), "collections fetched");
            // Deliberate pass-through: full records, no field reduction.
            Ok(serde_json::to_string_pretty(&collections)?)
        }
        Fetch::Empty | Fetch::NotFound => {
            info!("no collections in library");
            advisory(json!({
                "error": "No collections found",
                "suggestion": "Create a collection in your Zotero library first",
                "helpUrl": "https://www.zotero.org/support/collections"
            }))
        }
    }
}

async fn tool_get_collection_items(
    client: &ZoteroClient,
    args: &Value,
) -> Result<String, ZoteroError> {
    let collection_key = required_str(args, "collectionKey")?;
    if collection_key.trim().is_empty() {
        return advisory(json!({ "error": "Collection key is required" }));
    }

    match client.collection_items(collection_key).await? {
        Fetch::Empty => {
            info!(collection_key, "collection is empty");
            advisory(json!({
                "error": "Collection is empty",
                "collectionKey": collection_key,
                "suggestion": "Add some items to this collection in Zotero",
                "status": "empty"
            }))
        }
        Fetch::NotFound => {
            warn!(collection_key, "collection not accessible");
            advisory(json!({
                "error": "Collection is empty or not accessible",
                "collectionKey": collection_key,
                "suggestion": "Verify the collection exists and try adding some items to it",
                "status": "not_found"
            }))
        }
        Fetch::Found(items) => {
            let formatted: Vec<CollectionEntry> = items
                .iter()
                .map(|item| CollectionEntry::from_data(&item.data))
                .collect();

            // Entries survived the remote but not lenient parsing: distinct
            // from a truly empty collection.
            if formatted.is_empty() {
                warn!(collection_key, "no items with usable metadata");
                return advisory(json!({
                    "error": "No valid items found in collection",
                    "collectionKey": collection_key,
                    "suggestion": "The collection's items are missing usable metadata",
                    "status": "no_valid_items"
                }));
            }

            info!(collection_key, count = formatted.len(), "collection items formatted");
            Ok(serde_json::to_string_pretty(&formatted)?)
        }
    }
}

async fn tool_get_item_details(client: &ZoteroClient, args: &Value) -> Result<String, ZoteroError> {
    let item_key = required_str(args, "itemKey")?;
    if item_key.trim().is_empty() {
        return advisory(json!({ "error": "Item key is required" }));
    }

    match client.item(item_key).await? {
        Fetch::Found(item) => {
            info!(item_key, "item retrieved");
            Ok(serde_json::to_string_pretty(&ItemDetails::from_data(
                &item.data,
            ))?)
        }
        Fetch::Empty | Fetch::NotFound => {
            info!(item_key, "item not found");
            advisory(json!({
                "error": "Item not found or inaccessible",
                "itemKey": item_key,
                "suggestion": "Verify the item exists and you have permission to access it"
            }))
        }
    }
}

async fn tool_search_library(client: &ZoteroClient, args: &Value) -> Result<String, ZoteroError> {
    let query = required_str(args, "query")?;
    if query.trim().is_empty() {
        return advisory(json!({ "error": "Search query is required" }));
    }

    match client.search_items(query).await? {
        Fetch::Found(items) => {
            info!(query, count = items.len(), "search results");
            let formatted: Vec<ItemSummary> = items
                .iter()
                .map(|item| ItemSummary::from_data(&item.data))
                .collect();
            Ok(serde_json::to_string_pretty(&formatted)?)
        }
        Fetch::Empty | Fetch::NotFound => {
            info!(query, "no search results");
            advisory(json!({
                "error": "No results found",
                "query": query,
                "suggestion": "Try a different search term or verify your library contains matching items"
            }))
        }
    }
}

async fn tool_get_recent(client: &ZoteroClient, args: &Value) -> Result<String, ZoteroError> {
    let requested = match args.get("limit") {
        None | Some(Value::Null) => None,
        Some(v) => Some(v.as_u64().ok_or_else(|| {
            ZoteroError::InvalidArgument("'limit' must be a non-negative integer".to_string())
        })?),
    };
    let limit = clamp_limit(requested);

    match client.recent_items(limit).await? {
        Fetch::Found(items) => {
            info!(limit, count = items.len(), "recent items");
            let formatted: Vec<RecentEntry> = items
                .iter()
                .map(|item| RecentEntry::from_data(&item.data))
                .collect();
            Ok(serde_json::to_string_pretty(&formatted)?)
        }
        Fetch::Empty | Fetch::NotFound => {
            info!("no recent items");
            advisory(json!({
                "error": "No recent items found",
                "suggestion": "Add some items to your Zotero library first"
            }))
        }
    }
}

// --- Tool definitions ---

fn tool_definitions() -> Value {
    json!([
        {
            "name": "get_collections",
            "description": "List all collections in your Zotero library",
            "inputSchema": {
                "type": "object",
                "properties": {},
                "required": []
            },
            "annotations": {
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": true
            }
        },
        {
            "name": "get_collection_items",
            "description": "Get all items in a specific collection in your Zotero library",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "collectionKey": { "type": "string", "description": "Key of the collection to list" }
                },
                "required": ["collectionKey"]
            },
            "annotations": {
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": true
            }
        },
        {
            "name": "get_item_details",
            "description": "Get detailed information about a specific item in your Zotero library",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "itemKey": { "type": "string", "description": "Key of the item to fetch" }
                },
                "required": ["itemKey"]
            },
            "annotations": {
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": true
            }
        },
        {
            "name": "search_library",
            "description": "Search your entire Zotero library",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Free-text search query" }
                },
                "required": ["query"]
            },
            "annotations": {
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": true
            }
        },
        {
            "name": "get_recent",
            "description": "Get recently added items in your library",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "limit": { "type": "integer", "description": "Max items to return (default 10, capped at 100)", "default": 10 }
                },
                "required": []
            },
            "annotations": {
                "readOnlyHint": true,
                "destructiveHint": false,
                "idempotentHint": true,
                "openWorldHint": true
            }
        }
    ])
}
