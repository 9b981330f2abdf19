//! Snapshot Parser
//!
//! Pure, total decoding of raw node snapshots into typed entities. A
//! malformed child never aborts its siblings: bad records are skipped
//! with a logged warning and everything salvageable is kept.

use std::collections::HashMap;

use serde_json::Value;

use crate::domain::{DomainError, DomainResult, Item, LayoutType, Meta};

/// Decode the items node into an ordered sequence
///
/// Children are visited in key order, so the sequence is deterministic
/// for a given snapshot. Records missing a usable `id` are skipped.
pub fn parse_items(snapshot: &Value) -> Vec<Item> {
    let children = match snapshot.as_object() {
        Some(children) => children,
        None => {
            if !snapshot.is_null() {
                log::warn!("items node is not a collection, ignoring snapshot");
            }
            return Vec::new();
        }
    };
    let mut items = Vec::with_capacity(children.len());
    for (key, child) in children {
        match parse_item(child) {
            Ok(item) => items.push(item),
            Err(e) => log::warn!("skipping malformed item {}: {}", key, e),
        }
    }
    items
}

fn parse_item(value: &Value) -> DomainResult<Item> {
    let record = value
        .as_object()
        .ok_or_else(|| DomainError::InvalidValue("item is not a record".to_string()))?;
    let id = record.get("id").and_then(Value::as_str).unwrap_or_default();
    if id.is_empty() {
        return Err(DomainError::MissingField("id".to_string()));
    }
    let title = record.get("title").and_then(Value::as_str).unwrap_or_default();
    let description = record
        .get("description")
        .and_then(Value::as_str)
        .unwrap_or_default();
    // Either key may carry the flag; only an exact boolean counts as set
    let is_favorite = record
        .get("isFavorite")
        .or_else(|| record.get("favorite"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    Ok(Item {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        is_favorite,
    })
}

/// Decode the layout-definitions node into a name-to-layout map
///
/// Unrecognized or unusable definitions degrade to `List` instead of
/// failing the snapshot.
pub fn parse_layout_definitions(snapshot: &Value) -> HashMap<String, LayoutType> {
    let children = match snapshot.as_object() {
        Some(children) => children,
        None => {
            if !snapshot.is_null() {
                log::warn!("layout node is not a collection, ignoring snapshot");
            }
            return HashMap::new();
        }
    };
    let mut layouts = HashMap::with_capacity(children.len());
    for (name, child) in children {
        layouts.insert(name.clone(), parse_layout(name, child));
    }
    layouts
}

fn parse_layout(name: &str, value: &Value) -> LayoutType {
    match value.get("type").and_then(Value::as_str) {
        Some("list") => LayoutType::List,
        Some("grid") => match value.get("columns").and_then(Value::as_u64) {
            Some(columns) if columns >= 1 => LayoutType::Grid {
                columns: columns as u32,
            },
            _ => {
                log::warn!("grid layout {} has no usable column count, falling back to list", name);
                LayoutType::List
            }
        },
        other => {
            log::warn!("unknown layout type {:?} for {}, falling back to list", other, name);
            LayoutType::List
        }
    }
}

/// Decode the meta node, defaulting every absent field
pub fn parse_meta(snapshot: &Value) -> Meta {
    Meta {
        can_favorite: snapshot
            .get("canFavorite")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        mode: snapshot
            .get("mode")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}
