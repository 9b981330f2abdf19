//! Layout vocabulary and the aggregated view state
//!
//! The layout vocabulary is fixed to two variants; everything the remote
//! store publishes beyond these degrades to `List` at parse time.

use serde::{Deserialize, Serialize};

use super::item::Item;

/// How the rendering layer should arrange items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LayoutType {
    /// Vertical list
    #[default]
    List,
    /// Fixed-column grid, `columns >= 1`
    Grid { columns: u32 },
}

/// Presentation settings resolved from layout definitions and meta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutMeta {
    pub layout_type: LayoutType,
    pub favorite_enabled: bool,
}

/// The render-ready combination of items and presentation settings
///
/// Never constructed with empty `items`: "no data yet" is the absence of a
/// `ViewState`, not an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub layout_meta: LayoutMeta,
    pub items: Vec<Item>,
}
