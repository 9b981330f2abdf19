//! Commands Layer
//!
//! Write intents issued back to the remote store, bypassing the
//! aggregator. Fire-and-forget: the resulting state change comes back
//! through the feed like any other remote update.

mod item_cmd;
mod seed_cmd;

pub use item_cmd::*;
pub use seed_cmd::*;
