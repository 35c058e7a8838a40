//! Per-report binary asset fetching and caching.
//!
//! An [`AssetCache`] lives exactly as long as one report. Every URL is fetched
//! at most once; failures are remembered as "unavailable" so callers fall back
//! to text rendering without ever retrying.

pub mod cache;
pub mod error;
pub mod fetch;
pub mod probe;

pub use cache::{AssetCache, CacheStats};
pub use error::AssetError;
pub use fetch::{is_fetchable_url, AssetFetcher, HttpAssetFetcher};
pub use probe::{normalize_image, ImageAsset, ImageKind};
