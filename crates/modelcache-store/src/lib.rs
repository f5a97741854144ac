//! modelcache-store: Model instance storage
//!
//! This crate provides the model cache:
//! - Lazy construction of one instance per model name
//! - Numeric block ids collapsing onto the shared block model
//! - Humanoid fallback for names that cannot be resolved

pub mod cache;
pub mod resolve;

pub use cache::{CacheState, CacheStats, CachedModelInfo, ModelCache};
pub use resolve::{cache_key, constructible_kind, BLOCK_KEY, CONSTRUCTORS, FALLBACK_KEY};
