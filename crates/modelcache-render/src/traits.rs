//! Factory trait definitions

use modelcache_core::{Model, ModelCacheResult, ModelKind};

/// Builds model instances against a rendering context
pub trait ModelFactory {
    /// Rendering/window context models are constructed with
    type Context;

    /// Construct a new model of the given kind
    fn create(&self, kind: ModelKind, context: &Self::Context)
        -> ModelCacheResult<Box<dyn Model>>;

    /// Get the factory name
    fn name(&self) -> &'static str;
}
