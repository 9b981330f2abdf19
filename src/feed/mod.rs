//! Feed Layer
//!
//! Combines the three remote nodes (items, layout definitions, meta) into
//! one observable view state:
//! - config: node paths and lifecycle tuning
//! - aggregator: three-slot combine-latest state and the pipeline tasks
//! - shared: multicast replay-latest handle with reference-counted lifecycle

mod aggregator;
mod config;
mod shared;


pub use aggregator::combine;
pub use config::FeedConfig;
pub use shared::{FeedObserver, FeedState};
