//! modelcache-render: Model construction layer
//!
//! This crate provides the seam between the cache and whatever renderer backs it:
//! - The `ModelFactory` trait the cache builds models through
//! - A headless context and factory for running without a GPU

pub mod headless;
pub mod traits;

pub use headless::{HeadlessContext, HeadlessFactory, HeadlessModel, ResourceHandle};
pub use traits::ModelFactory;
