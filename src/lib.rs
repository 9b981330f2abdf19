//! Feedview Core
//!
//! Server-driven UI feed: a backend publishes content (items) and
//! presentation metadata (layout definitions, feature flags) into a
//! push-based hierarchical store; this crate subscribes to all three
//! nodes, combines them into one coherent view state and exposes it as
//! a shared observable for a rendering layer.
//!
//! Layered architecture:
//! - domain: Core entities and value types
//! - store: Remote store seam, subscriptions and snapshot parsing
//! - feed: Aggregation pipeline and shared observable state
//! - commands: Write intents issued back to the store

use std::sync::Arc;

pub mod commands;
pub mod domain;
pub mod feed;
pub mod store;

pub use domain::{DomainError, DomainResult, Item, LayoutMeta, LayoutType, Meta, ViewState};
pub use feed::{FeedConfig, FeedObserver, FeedState};
pub use store::{MemoryStore, RemoteStore};

/// Everything a hosting shell needs to drive one feed
///
/// Constructed by the shell and passed to the rendering layer; there is
/// no ambient global state. Must be created within a Tokio runtime.
pub struct FeedContext {
    pub store: Arc<dyn RemoteStore>,
    pub config: FeedConfig,
    pub feed: FeedState,
}

impl FeedContext {
    pub fn new(store: Arc<dyn RemoteStore>, config: FeedConfig) -> Self {
        let feed = FeedState::new(store.clone(), config.clone());
        Self {
            store,
            config,
            feed,
        }
    }
}
