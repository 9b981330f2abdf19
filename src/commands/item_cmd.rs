//! Item Intents
//!
//! Creating items and toggling their favorite flag.

use serde_json::Value;
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult, Item};
use crate::store::RemoteStore;
use crate::FeedContext;

/// Create a new item with a fresh unique id
///
/// Identifiers are globally unique by construction, so no conflict
/// detection happens. The favorite flag starts cleared.
pub async fn add_item(ctx: &FeedContext, title: String, description: String) -> DomainResult<Item> {
    let item = Item::new(Uuid::new_v4().to_string(), title, description);
    let value = serde_json::to_value(&item).map_err(|e| DomainError::InvalidValue(e.to_string()))?;
    ctx.store.put(&ctx.config.item_path(&item.id), value).await?;
    Ok(item)
}

/// Invert the favorite flag of an existing item, returning the new flag
pub async fn toggle_favorite(ctx: &FeedContext, item_id: &str) -> DomainResult<bool> {
    let path = ctx.config.item_path(item_id);
    let record = ctx.store.get(&path).await?;
    if record.is_null() {
        return Err(DomainError::NotFound(format!("item {}", item_id)));
    }
    let flag = record
        .get("isFavorite")
        .or_else(|| record.get("favorite"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    ctx.store
        .put(&format!("{}/isFavorite", path), Value::Bool(!flag))
        .await?;
    Ok(!flag)
}
