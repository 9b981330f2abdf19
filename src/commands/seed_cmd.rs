//! Initial Content Seeding
//!
//! Writes a starter data set so a fresh store renders something.

use crate::domain::{DomainError, DomainResult, LayoutType, Meta};
use crate::store::RemoteStore;
use crate::FeedContext;

use super::item_cmd::add_item;

const SAMPLE_ITEMS: [(&str, &str); 3] = [
    ("Welcome", "Pull this feed from anywhere; the layout follows the backend."),
    ("Layouts", "Switch the meta mode between list and grid to rearrange items."),
    ("Favorites", "Enable canFavorite to show the favorite affordance."),
];

/// Seed sample items, the two named layouts and the meta record
///
/// Not idempotent: every call creates a fresh set of item records, so
/// repeated seeding duplicates content.
pub async fn seed_initial_content(ctx: &FeedContext) -> DomainResult<()> {
    for (title, description) in SAMPLE_ITEMS {
        add_item(ctx, title.to_string(), description.to_string()).await?;
    }

    let list = serde_json::to_value(LayoutType::List).map_err(|e| DomainError::InvalidValue(e.to_string()))?;
    ctx.store.put(&ctx.config.layout_path("list"), list).await?;
    let grid = serde_json::to_value(LayoutType::Grid { columns: 2 })
        .map_err(|e| DomainError::InvalidValue(e.to_string()))?;
    ctx.store.put(&ctx.config.layout_path("grid"), grid).await?;

    let meta = serde_json::to_value(Meta {
        can_favorite: true,
        mode: "list".to_string(),
    })
    .map_err(|e| DomainError::InvalidValue(e.to_string()))?;
    ctx.store.put(&ctx.config.meta_node, meta).await?;

    Ok(())
}
