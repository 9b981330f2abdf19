//! Store Layer - Core Traits
//!
//! Defines the seam to the remote store: a push-based hierarchical
//! key-value store that notifies value listeners with full snapshots.
//! Implementations can be in-memory, a cloud realtime database, etc.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{DomainError, DomainResult};

/// Identifies a registered listener so the exact instance can be removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Callback receiving the full current snapshot of a node
pub type SnapshotFn = Arc<dyn Fn(Value) + Send + Sync>;

/// Callback receiving a remote cancellation
pub type CancelFn = Arc<dyn Fn(DomainError) + Send + Sync>;

/// Value listener registered on a store node
///
/// `on_snapshot` fires with the node's full current state, not deltas.
/// `on_cancel` surfaces a remote cancellation; the listener stays
/// registered and simply receives no further snapshots until the store
/// recovers.
#[derive(Clone)]
pub struct NodeListener {
    pub on_snapshot: SnapshotFn,
    pub on_cancel: CancelFn,
}

impl NodeListener {
    pub fn new(on_snapshot: SnapshotFn, on_cancel: CancelFn) -> Self {
        Self {
            on_snapshot,
            on_cancel,
        }
    }
}

/// Push-based hierarchical key-value store
///
/// Paths are `/`-separated, e.g. `ui/data/42`. All operations are async to
/// support remote backends.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Register a value listener on `node`.
    ///
    /// The listener fires once with the node's current snapshot, then
    /// again on every change under the node.
    async fn add_listener(&self, node: &str, listener: NodeListener) -> DomainResult<ListenerId>;

    /// Deregister the exact listener previously returned by `add_listener`
    async fn remove_listener(&self, node: &str, id: ListenerId) -> DomainResult<()>;

    /// Read the value at a path; `Value::Null` if absent
    async fn get(&self, path: &str) -> DomainResult<Value>;

    /// Replace the subtree at `path` and notify listeners on overlapping nodes
    async fn put(&self, path: &str, value: Value) -> DomainResult<()>;
}
