//! In-Memory Remote Store
//!
//! Process-local `RemoteStore` implementation over a JSON tree. Backs the
//! test suite and embedding shells that feed data themselves. Listener
//! callbacks always run outside the state lock, so a callback may call
//! back into the store.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

use super::traits::{ListenerId, NodeListener, RemoteStore};

/// In-memory store state
struct Inner {
    root: Value,
    listeners: HashMap<String, Vec<(ListenerId, NodeListener)>>,
    next_listener: u64,
    /// Cumulative registrations per node, for lifecycle inspection
    registrations: HashMap<String, u64>,
}

/// Process-local remote store
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                root: Value::Null,
                listeners: HashMap::new(),
                next_listener: 0,
                registrations: HashMap::new(),
            }),
        }
    }

    /// Number of listeners currently registered on a node
    pub async fn listener_count(&self, node: &str) -> usize {
        let inner = self.inner.lock().await;
        inner.listeners.get(node).map(|l| l.len()).unwrap_or(0)
    }

    /// Total registrations ever made on a node
    pub async fn registration_count(&self, node: &str) -> u64 {
        let inner = self.inner.lock().await;
        inner.registrations.get(node).copied().unwrap_or(0)
    }

    /// Deliver a cancellation to every listener on a node
    ///
    /// Simulates the remote store revoking a subscription (permission
    /// change, connection loss). Listeners stay registered.
    pub async fn fire_cancel(&self, node: &str, error: DomainError) {
        let cancels: Vec<_> = {
            let inner = self.inner.lock().await;
            inner
                .listeners
                .get(node)
                .map(|listeners| listeners.iter().map(|(_, l)| l.on_cancel.clone()).collect())
                .unwrap_or_default()
        };
        for on_cancel in cancels {
            on_cancel(error.clone());
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Two paths overlap when one is a segment-prefix of the other
fn overlaps(node: &str, path: &str) -> bool {
    segments(node)
        .iter()
        .zip(segments(path).iter())
        .all(|(a, b)| a == b)
}

fn snapshot_at(root: &Value, path: &str) -> Value {
    let mut current = root;
    for segment in segments(path) {
        match current.get(segment) {
            Some(child) => current = child,
            None => return Value::Null,
        }
    }
    current.clone()
}

fn write_at(root: &mut Value, path: &str, value: Value) {
    fn write_segments(target: &mut Value, segs: &[&str], value: Value) {
        if segs.is_empty() {
            *target = value;
            return;
        }
        if !target.is_object() {
            *target = Value::Object(Map::new());
        }
        if let Value::Object(map) = target {
            let child = map.entry(segs[0].to_string()).or_insert(Value::Null);
            write_segments(child, &segs[1..], value);
        }
    }
    write_segments(root, &segments(path), value);
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn add_listener(&self, node: &str, listener: NodeListener) -> DomainResult<ListenerId> {
        let (on_snapshot, snapshot, id) = {
            let mut inner = self.inner.lock().await;
            inner.next_listener += 1;
            let id = ListenerId(inner.next_listener);
            let snapshot = snapshot_at(&inner.root, node);
            let on_snapshot = listener.on_snapshot.clone();
            inner
                .listeners
                .entry(node.to_string())
                .or_default()
                .push((id, listener));
            *inner.registrations.entry(node.to_string()).or_default() += 1;
            (on_snapshot, snapshot, id)
        };
        // Initial fire with the current state, outside the lock
        on_snapshot(snapshot);
        Ok(id)
    }

    async fn remove_listener(&self, node: &str, id: ListenerId) -> DomainResult<()> {
        let mut inner = self.inner.lock().await;
        let listeners = inner
            .listeners
            .get_mut(node)
            .ok_or_else(|| DomainError::NotFound(format!("listener node {}", node)))?;
        let before = listeners.len();
        listeners.retain(|(listener_id, _)| *listener_id != id);
        if listeners.len() == before {
            return Err(DomainError::NotFound(format!("listener {:?} on {}", id, node)));
        }
        Ok(())
    }

    async fn get(&self, path: &str) -> DomainResult<Value> {
        let inner = self.inner.lock().await;
        Ok(snapshot_at(&inner.root, path))
    }

    async fn put(&self, path: &str, value: Value) -> DomainResult<()> {
        let mut notifications = Vec::new();
        {
            let mut inner = self.inner.lock().await;
            write_at(&mut inner.root, path, value);
            for (node, listeners) in &inner.listeners {
                if !overlaps(node, path) {
                    continue;
                }
                let snapshot = snapshot_at(&inner.root, node);
                for (_, listener) in listeners {
                    notifications.push((listener.on_snapshot.clone(), snapshot.clone()));
                }
            }
        }
        for (on_snapshot, snapshot) in notifications {
            on_snapshot(snapshot);
        }
        Ok(())
    }
}
