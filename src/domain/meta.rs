//! Meta entity
//!
//! Global presentation settings published by the backend.

use serde::{Deserialize, Serialize};

/// Global presentation settings
///
/// `mode` names the layout definition to use; it need not resolve to a
/// known definition (unresolved modes fall back to the list layout).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Meta {
    pub can_favorite: bool,
    pub mode: String,
}
