//! Node Subscription
//!
//! Converts the store's callback registration into a cancellable sequence
//! of snapshots: a registered listener feeds an unbounded channel, and
//! `close` deregisters the exact listener instance again.

use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;

use crate::domain::DomainResult;

use super::traits::{ListenerId, NodeListener, RemoteStore};

/// An open subscription to one store node
pub struct NodeSubscription {
    store: Arc<dyn RemoteStore>,
    node: String,
    id: ListenerId,
    rx: mpsc::UnboundedReceiver<Value>,
}

impl NodeSubscription {
    /// Register a listener on `node` and start forwarding snapshots
    ///
    /// A remote cancellation is logged and leaves the sequence open; it
    /// simply yields nothing until the store recovers.
    pub async fn open(store: Arc<dyn RemoteStore>, node: &str) -> DomainResult<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let cancel_node = node.to_string();
        let listener = NodeListener::new(
            Arc::new(move |snapshot| {
                // Receiver gone means the subscription is closing; nothing to do
                let _ = tx.send(snapshot);
            }),
            Arc::new(move |error| {
                log::warn!("listener on {} cancelled: {}", cancel_node, error);
            }),
        );
        let id = store.add_listener(node, listener).await?;
        Ok(Self {
            store,
            node: node.to_string(),
            id,
            rx,
        })
    }

    /// Next snapshot, in the order the store produced them
    ///
    /// `None` once the store has dropped the listener for good.
    pub async fn recv(&mut self) -> Option<Value> {
        self.rx.recv().await
    }

    /// Deregister the listener
    pub async fn close(self) {
        if let Err(e) = self.store.remove_listener(&self.node, self.id).await {
            log::warn!("failed to deregister listener on {}: {}", self.node, e);
        }
    }
}
