//! modelcache-core: Core types and traits for modelcache
//!
//! This crate provides the fundamental types shared by the other crates:
//! - Model kinds and the `Model` trait
//! - Configuration types
//! - Error handling

pub mod config;
pub mod error;
pub mod model;

pub use config::*;
pub use error::*;
pub use model::*;
