//! Shared Observable Feed State
//!
//! Multicast, replay-latest view over the aggregation pipeline with a
//! reference-counted lifecycle: the first observer starts the pipeline,
//! and after the last observer detaches the pipeline stays warm for a
//! grace period so a quickly returning observer (rotation, navigation)
//! reuses the live subscriptions instead of re-registering.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::{watch, Mutex};

use crate::domain::{DomainError, DomainResult, ViewState};
use crate::store::RemoteStore;

use super::aggregator::Pipeline;
use super::config::FeedConfig;

#[derive(Default)]
struct Lifecycle {
    observers: usize,
    /// Bumped on every subscribe; a pending grace timer only acts if the
    /// epoch it captured is still current
    epoch: u64,
    pipeline: Option<Pipeline>,
}

struct Shared {
    store: Arc<dyn RemoteStore>,
    config: FeedConfig,
    out: watch::Sender<Option<ViewState>>,
    lifecycle: Mutex<Lifecycle>,
    runtime: Handle,
}

impl Shared {
    async fn release(self: Arc<Self>) {
        let mut lifecycle = self.lifecycle.lock().await;
        lifecycle.observers = lifecycle.observers.saturating_sub(1);
        if lifecycle.observers > 0 {
            return;
        }
        let epoch = lifecycle.epoch;
        drop(lifecycle);

        log::debug!("last feed observer detached, starting grace timer");
        let shared = self.clone();
        self.runtime.spawn(async move {
            tokio::time::sleep(shared.config.grace_period()).await;
            let mut lifecycle = shared.lifecycle.lock().await;
            if lifecycle.observers > 0 || lifecycle.epoch != epoch {
                return;
            }
            if let Some(pipeline) = lifecycle.pipeline.take() {
                drop(lifecycle);
                log::debug!("grace period elapsed, stopping feed pipeline");
                pipeline.shutdown().await;
            }
        });
    }
}

/// Shared feed state handed to the rendering layer
///
/// The last published value survives pipeline restarts, so an observer
/// attaching after an idle teardown immediately sees the previous state
/// until fresh snapshots arrive.
pub struct FeedState {
    inner: Arc<Shared>,
}

impl FeedState {
    /// Create an idle feed; no remote subscription exists yet
    ///
    /// Must be called from within a Tokio runtime: observer release work
    /// is scheduled on the runtime handle captured here.
    pub fn new(store: Arc<dyn RemoteStore>, config: FeedConfig) -> Self {
        let (out, _) = watch::channel(None);
        Self {
            inner: Arc::new(Shared {
                store,
                config,
                out,
                lifecycle: Mutex::new(Lifecycle::default()),
                runtime: Handle::current(),
            }),
        }
    }

    /// Attach an observer
    ///
    /// The first observer starts the underlying node subscriptions; every
    /// observer shares the same pipeline. The latest known state is
    /// available immediately via [`FeedObserver::current`].
    pub async fn subscribe(&self) -> DomainResult<FeedObserver> {
        let mut lifecycle = self.inner.lifecycle.lock().await;
        lifecycle.epoch += 1;
        if lifecycle.pipeline.is_none() {
            log::debug!("first feed observer attached, starting pipeline");
            let pipeline = Pipeline::start(
                self.inner.store.clone(),
                &self.inner.config,
                self.inner.out.clone(),
            )
            .await?;
            lifecycle.pipeline = Some(pipeline);
        }
        lifecycle.observers += 1;
        Ok(FeedObserver {
            rx: self.inner.out.subscribe(),
            shared: self.inner.clone(),
        })
    }

    /// Number of attached observers
    pub async fn observer_count(&self) -> usize {
        self.inner.lifecycle.lock().await.observers
    }

    /// Whether the pipeline is currently running (observers attached, or
    /// idle within the grace period)
    pub async fn is_active(&self) -> bool {
        self.inner.lifecycle.lock().await.pipeline.is_some()
    }
}

/// One attached observer
///
/// Dropping the observer releases its reference; the pipeline is torn
/// down once no observer returns within the grace period.
pub struct FeedObserver {
    rx: watch::Receiver<Option<ViewState>>,
    shared: Arc<Shared>,
}

impl FeedObserver {
    /// Latest known state; `None` until the first non-empty combination
    pub fn current(&self) -> Option<ViewState> {
        self.rx.borrow().clone()
    }

    /// Wait for the next published state and return it
    pub async fn next(&mut self) -> DomainResult<Option<ViewState>> {
        self.rx
            .changed()
            .await
            .map_err(|_| DomainError::Store("feed state dropped".to_string()))?;
        Ok(self.rx.borrow_and_update().clone())
    }
}

impl Drop for FeedObserver {
    fn drop(&mut self) {
        let shared = self.shared.clone();
        let runtime = shared.runtime.clone();
        runtime.spawn(async move {
            shared.release().await;
        });
    }
}
