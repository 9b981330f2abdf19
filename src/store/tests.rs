//! Store Integration Tests
//!
//! Tests for MemoryStore listener bookkeeping and the NodeSubscription
//! adapter.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};
    use tokio::sync::mpsc;

    use crate::domain::DomainError;
    use crate::store::{MemoryStore, NodeListener, NodeSubscription, RemoteStore};

    fn collecting_listener() -> (NodeListener, mpsc::UnboundedReceiver<Value>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let listener = NodeListener::new(
            Arc::new(move |snapshot| {
                let _ = tx.send(snapshot);
            }),
            Arc::new(|_| {}),
        );
        (listener, rx)
    }

    #[tokio::test]
    async fn test_put_and_get() {
        let store = MemoryStore::new();
        store
            .put("ui/meta", json!({"canFavorite": true}))
            .await
            .expect("put failed");

        let value = store.get("ui/meta").await.expect("get failed");
        assert_eq!(value, json!({"canFavorite": true}));

        let missing = store.get("ui/nothing").await.expect("get failed");
        assert!(missing.is_null());
    }

    #[tokio::test]
    async fn test_nested_put_builds_tree() {
        let store = MemoryStore::new();
        store
            .put("ui/data/a", json!({"id": "a"}))
            .await
            .expect("put failed");
        store
            .put("ui/data/b", json!({"id": "b"}))
            .await
            .expect("put failed");

        let node = store.get("ui/data").await.expect("get failed");
        assert_eq!(node, json!({"a": {"id": "a"}, "b": {"id": "b"}}));
    }

    #[tokio::test]
    async fn test_listener_fires_with_initial_snapshot() {
        let store = MemoryStore::new();
        store
            .put("ui/meta", json!({"mode": "plain"}))
            .await
            .expect("put failed");

        let (listener, mut rx) = collecting_listener();
        store
            .add_listener("ui/meta", listener)
            .await
            .expect("add_listener failed");

        let first = rx.recv().await.expect("no initial snapshot");
        assert_eq!(first, json!({"mode": "plain"}));
    }

    #[tokio::test]
    async fn test_listener_fires_on_overlapping_writes() {
        let store = MemoryStore::new();
        let (listener, mut rx) = collecting_listener();
        store
            .add_listener("ui/data", listener)
            .await
            .expect("add_listener failed");
        assert!(rx.recv().await.expect("no initial snapshot").is_null());

        // Child write notifies the node listener with the whole node
        store
            .put("ui/data/a", json!({"id": "a"}))
            .await
            .expect("put failed");
        let snapshot = rx.recv().await.expect("no snapshot");
        assert_eq!(snapshot, json!({"a": {"id": "a"}}));

        // Unrelated write stays silent
        store
            .put("ui/meta", json!({"mode": "x"}))
            .await
            .expect("put failed");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_remove_listener_stops_snapshots() {
        let store = MemoryStore::new();
        let (listener, mut rx) = collecting_listener();
        let id = store
            .add_listener("ui/data", listener)
            .await
            .expect("add_listener failed");
        let _ = rx.recv().await;

        store
            .remove_listener("ui/data", id)
            .await
            .expect("remove_listener failed");
        assert_eq!(store.listener_count("ui/data").await, 0);

        store
            .put("ui/data/a", json!({"id": "a"}))
            .await
            .expect("put failed");
        assert!(rx.try_recv().is_err());

        // The exact instance is gone; removing again is an error
        assert!(store.remove_listener("ui/data", id).await.is_err());
    }

    #[tokio::test]
    async fn test_cancel_does_not_end_the_stream() {
        let store = MemoryStore::new();
        let (tx, mut cancels) = mpsc::unbounded_channel();
        let (value_tx, mut values) = mpsc::unbounded_channel();
        let listener = NodeListener::new(
            Arc::new(move |snapshot| {
                let _ = value_tx.send(snapshot);
            }),
            Arc::new(move |error| {
                let _ = tx.send(error);
            }),
        );
        store
            .add_listener("ui/data", listener)
            .await
            .expect("add_listener failed");
        let _ = values.recv().await;

        store
            .fire_cancel("ui/data", DomainError::Store("permission denied".to_string()))
            .await;
        assert!(cancels.recv().await.is_some());

        // Still registered, still receiving
        assert_eq!(store.listener_count("ui/data").await, 1);
        store
            .put("ui/data/a", json!({"id": "a"}))
            .await
            .expect("put failed");
        assert!(values.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_node_subscription_round_trip() {
        let store = Arc::new(MemoryStore::new());
        let mut sub = NodeSubscription::open(store.clone(), "ui/data")
            .await
            .expect("open failed");
        assert_eq!(store.registration_count("ui/data").await, 1);

        assert!(sub.recv().await.expect("no initial snapshot").is_null());

        store
            .put("ui/data/a", json!({"id": "a"}))
            .await
            .expect("put failed");
        let snapshot = sub.recv().await.expect("no snapshot");
        assert_eq!(snapshot["a"]["id"], json!("a"));

        sub.close().await;
        assert_eq!(store.listener_count("ui/data").await, 0);
    }
}
