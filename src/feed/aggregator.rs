//! Stream Aggregator
//!
//! Three-way combine-latest over the items, layout and meta nodes. The
//! latest parsed value of each source sits in one of three optional slots
//! behind a single lock; every update from any source installs its value
//! and, once all three slots are populated, recombines and publishes the
//! result. Publishing happens while the lock is held, so emissions stay
//! in combination order. Identical consecutive states are published
//! again rather than deduplicated.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;

use crate::domain::{DomainResult, Item, LayoutMeta, LayoutType, Meta, ViewState};
use crate::store::{parse_items, parse_layout_definitions, parse_meta, NodeSubscription, RemoteStore};

use super::config::FeedConfig;

/// Combine the three latest snapshots into a render-ready state
///
/// Pure and deterministic. Empty `items` means "not yet loaded" and
/// yields `None` rather than an empty state; an unresolved `mode` falls
/// back to the list layout.
pub fn combine(items: &[Item], layouts: &HashMap<String, LayoutType>, meta: &Meta) -> Option<ViewState> {
    if items.is_empty() {
        return None;
    }
    let layout_type = layouts.get(&meta.mode).copied().unwrap_or(LayoutType::List);
    Some(ViewState {
        layout_meta: LayoutMeta {
            layout_type,
            favorite_enabled: meta.can_favorite,
        },
        items: items.to_vec(),
    })
}

/// One update from one source
enum SourceUpdate {
    Items(Vec<Item>),
    Layouts(HashMap<String, LayoutType>),
    Meta(Meta),
}

/// Latest-value slots for the three sources
#[derive(Default)]
struct Slots {
    items: Option<Vec<Item>>,
    layouts: Option<HashMap<String, LayoutType>>,
    meta: Option<Meta>,
}

struct Aggregator {
    slots: Mutex<Slots>,
    out: watch::Sender<Option<ViewState>>,
}

impl Aggregator {
    fn new(out: watch::Sender<Option<ViewState>>) -> Self {
        Self {
            slots: Mutex::new(Slots::default()),
            out,
        }
    }

    /// Install one source update and recombine
    ///
    /// Nothing is published until every source has delivered at least one
    /// snapshot.
    async fn apply(&self, update: SourceUpdate) {
        let mut slots = self.slots.lock().await;
        match update {
            SourceUpdate::Items(items) => slots.items = Some(items),
            SourceUpdate::Layouts(layouts) => slots.layouts = Some(layouts),
            SourceUpdate::Meta(meta) => slots.meta = Some(meta),
        }
        if let (Some(items), Some(layouts), Some(meta)) =
            (slots.items.as_ref(), slots.layouts.as_ref(), slots.meta.as_ref())
        {
            self.out.send_replace(combine(items, layouts, meta));
        }
    }
}

fn spawn_source<F>(
    mut sub: NodeSubscription,
    mut shutdown: watch::Receiver<bool>,
    aggregator: Arc<Aggregator>,
    parse: F,
) -> JoinHandle<()>
where
    F: Fn(&Value) -> SourceUpdate + Send + 'static,
{
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                next = sub.recv() => match next {
                    Some(snapshot) => aggregator.apply(parse(&snapshot)).await,
                    None => break,
                },
            }
        }
        sub.close().await;
    })
}

/// The running aggregation pipeline: three node subscriptions and the
/// tasks forwarding their snapshots into the aggregator
pub(crate) struct Pipeline {
    shutdown_tx: watch::Sender<bool>,
    handles: Vec<JoinHandle<()>>,
}

impl Pipeline {
    /// Open the three node subscriptions and start the forwarding tasks
    pub(crate) async fn start(
        store: Arc<dyn RemoteStore>,
        config: &FeedConfig,
        out: watch::Sender<Option<ViewState>>,
    ) -> DomainResult<Self> {
        let data_sub = NodeSubscription::open(store.clone(), &config.data_node).await?;
        let layout_sub = match NodeSubscription::open(store.clone(), &config.layout_node).await {
            Ok(sub) => sub,
            Err(e) => {
                data_sub.close().await;
                return Err(e);
            }
        };
        let meta_sub = match NodeSubscription::open(store.clone(), &config.meta_node).await {
            Ok(sub) => sub,
            Err(e) => {
                data_sub.close().await;
                layout_sub.close().await;
                return Err(e);
            }
        };

        let aggregator = Arc::new(Aggregator::new(out));
        let (shutdown_tx, _) = watch::channel(false);
        let handles = vec![
            spawn_source(data_sub, shutdown_tx.subscribe(), aggregator.clone(), |snapshot| {
                SourceUpdate::Items(parse_items(snapshot))
            }),
            spawn_source(layout_sub, shutdown_tx.subscribe(), aggregator.clone(), |snapshot| {
                SourceUpdate::Layouts(parse_layout_definitions(snapshot))
            }),
            spawn_source(meta_sub, shutdown_tx.subscribe(), aggregator, |snapshot| {
                SourceUpdate::Meta(parse_meta(snapshot))
            }),
        ];
        Ok(Self {
            shutdown_tx,
            handles,
        })
    }

    /// Signal the tasks and wait until every listener is deregistered
    pub(crate) async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        for handle in self.handles {
            if let Err(e) = handle.await {
                log::warn!("feed task ended abnormally: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_items() -> Vec<Item> {
        vec![Item {
            id: "1".to_string(),
            title: "A".to_string(),
            description: "d".to_string(),
            is_favorite: true,
        }]
    }

    #[test]
    fn test_combine_is_deterministic() {
        let items = sample_items();
        let layouts = HashMap::from([("m1".to_string(), LayoutType::Grid { columns: 2 })]);
        let meta = Meta {
            can_favorite: true,
            mode: "m1".to_string(),
        };
        let first = combine(&items, &layouts, &meta);
        let second = combine(&items, &layouts, &meta);
        assert_eq!(first, second);
    }

    #[test]
    fn test_combine_empty_items_is_no_value() {
        let layouts = HashMap::from([("m1".to_string(), LayoutType::Grid { columns: 2 })]);
        let meta = Meta {
            can_favorite: true,
            mode: "m1".to_string(),
        };
        assert_eq!(combine(&[], &layouts, &meta), None);
        assert_eq!(combine(&[], &HashMap::new(), &Meta::default()), None);
    }

    #[test]
    fn test_combine_unresolved_mode_falls_back_to_list() {
        let items = sample_items();
        let layouts = HashMap::from([("known".to_string(), LayoutType::Grid { columns: 4 })]);
        let meta = Meta {
            can_favorite: false,
            mode: "unknown".to_string(),
        };
        let state = combine(&items, &layouts, &meta).expect("expected a state");
        assert_eq!(state.layout_meta.layout_type, LayoutType::List);
    }

    #[test]
    fn test_combine_resolves_grid_scenario() {
        let items = sample_items();
        let layouts = HashMap::from([("m1".to_string(), LayoutType::Grid { columns: 2 })]);
        let meta = Meta {
            can_favorite: true,
            mode: "m1".to_string(),
        };
        let state = combine(&items, &layouts, &meta).expect("expected a state");
        assert_eq!(state.layout_meta.layout_type, LayoutType::Grid { columns: 2 });
        assert!(state.layout_meta.favorite_enabled);
        assert_eq!(state.items, items);
    }
}
