//! File-backed reference implementation of the Metrics Store and Ads Data
//! Source contracts.

pub mod dataset;
pub mod error;
pub mod memory;

pub use dataset::{AdsAccountMonth, Dataset, FollowerSnapshot, MetricsSnapshot, StoredPost};
pub use error::StoreError;
pub use memory::{MemoryStore, DEFAULT_ADS_CURRENCY};
