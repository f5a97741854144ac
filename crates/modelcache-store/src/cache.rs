//! Lazy model instance cache

use chrono::{DateTime, Utc};
use modelcache_core::{CacheConfig, Model, ModelCacheResult, ModelKind};
use modelcache_render::ModelFactory;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::resolve::{cache_key, constructible_kind, FALLBACK_KEY};

/// Lifecycle of a cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheState {
    /// Fallback built, lookups allowed
    Ready,
    /// Every instance released; terminal
    Disposed,
}

/// A stored model and its bookkeeping
struct CachedEntry {
    model: Box<dyn Model>,
    constructed_at: DateTime<Utc>,
    hits: u64,
}

impl CachedEntry {
    fn new(model: Box<dyn Model>) -> Self {
        Self {
            model,
            constructed_at: Utc::now(),
            hits: 0,
        }
    }

    fn info(&self) -> CachedModelInfo {
        CachedModelInfo {
            kind: self.model.kind(),
            id: self.model.id(),
            constructed_at: self.constructed_at,
            hits: self.hits,
        }
    }
}

/// Cached model metadata
#[derive(Debug, Clone, Serialize)]
pub struct CachedModelInfo {
    /// Kind of the cached model
    pub kind: ModelKind,
    /// Instance identifier
    pub id: Uuid,
    /// When the instance was built
    pub constructed_at: DateTime<Utc>,
    /// Lookups served by this entry
    pub hits: u64,
}

/// Model cache
///
/// Maps model names to lazily built instances, at most one per key. The
/// humanoid model is built with the cache and answers every lookup that
/// cannot be resolved. Not thread safe; callers serialise access.
pub struct ModelCache<F: ModelFactory> {
    /// Context forwarded to every constructor
    context: F::Context,
    /// Builds models on a miss
    factory: F,
    /// The humanoid entry
    fallback: CachedEntry,
    /// Models built on demand, by kind
    models: HashMap<ModelKind, CachedEntry>,
    /// Kinds whose construction failed
    failed: HashSet<ModelKind>,
    /// Retry kinds in `failed` on their next lookup
    retry_failed: bool,
    state: CacheState,
    hits: u64,
    fallbacks: u64,
    constructed: u64,
    failures: u64,
}

impl<F: ModelFactory> ModelCache<F> {
    /// Create a new model cache, building the fallback model
    pub fn new(context: F::Context, factory: F) -> ModelCacheResult<Self> {
        Self::with_config(context, factory, &CacheConfig::default())
    }

    /// Create a new model cache with explicit settings
    ///
    /// Fails only if the fallback model cannot be built. Names listed in
    /// `config.preload` are resolved before returning.
    pub fn with_config(
        context: F::Context,
        factory: F,
        config: &CacheConfig,
    ) -> ModelCacheResult<Self> {
        let fallback = factory.create(ModelKind::FALLBACK, &context)?;

        info!(
            factory = factory.name(),
            fallback = %fallback.id(),
            "Created model cache"
        );

        let mut cache = Self {
            context,
            factory,
            fallback: CachedEntry::new(fallback),
            models: HashMap::new(),
            failed: HashSet::new(),
            retry_failed: config.retry_failed,
            state: CacheState::Ready,
            hits: 0,
            fallbacks: 0,
            constructed: 0,
            failures: 0,
        };
        cache.preload(&config.preload);

        Ok(cache)
    }

    /// Get the model for a name, building it on first use
    ///
    /// Never fails: names without a constructor, and names whose constructor
    /// failed, resolve to the humanoid model.
    ///
    /// # Panics
    ///
    /// Panics if called after `dispose`.
    pub fn get_model(&mut self, name: &str) -> &dyn Model {
        assert!(
            self.state == CacheState::Ready,
            "model cache used after dispose"
        );

        let key = cache_key(name);
        if key == FALLBACK_KEY {
            self.hits += 1;
            self.fallback.hits += 1;
            return self.fallback.model.as_ref();
        }

        let Some(kind) = constructible_kind(key) else {
            debug!(name = name, "Unknown model, using fallback");
            self.fallbacks += 1;
            return self.fallback.model.as_ref();
        };

        if self.models.contains_key(&kind) {
            self.hits += 1;
        } else if !self.construct(kind) {
            self.fallbacks += 1;
            return self.fallback.model.as_ref();
        }

        match self.models.get_mut(&kind) {
            Some(entry) => {
                entry.hits += 1;
                entry.model.as_ref()
            }
            None => self.fallback.model.as_ref(),
        }
    }

    /// Build and store a model, returning whether it is now cached
    fn construct(&mut self, kind: ModelKind) -> bool {
        if self.failed.contains(&kind) && !self.retry_failed {
            return false;
        }

        match self.factory.create(kind, &self.context) {
            Ok(model) => {
                debug!(kind = %kind, id = %model.id(), "Added model to cache");
                self.failed.remove(&kind);
                self.models.insert(kind, CachedEntry::new(model));
                self.constructed += 1;
                true
            }
            Err(e) => {
                warn!(
                    kind = %kind,
                    error = %e,
                    "Failed to construct model, using fallback"
                );
                self.failed.insert(kind);
                self.failures += 1;
                false
            }
        }
    }

    /// Resolve each name once so later lookups are hits
    pub fn preload<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for name in names {
            self.get_model(name.as_ref());
        }
    }

    /// The humanoid model
    pub fn fallback(&self) -> &dyn Model {
        self.fallback.model.as_ref()
    }

    /// Check if the model for a name is already built, without building it
    pub fn contains(&self, name: &str) -> bool {
        if self.state == CacheState::Disposed {
            return false;
        }

        let key = cache_key(name);
        key == FALLBACK_KEY
            || constructible_kind(key).is_some_and(|kind| self.models.contains_key(&kind))
    }

    /// Number of cached instances, fallback included
    pub fn len(&self) -> usize {
        match self.state {
            CacheState::Ready => self.models.len() + 1,
            CacheState::Disposed => 0,
        }
    }

    /// Whether the cache holds no instances, which is only true once disposed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Kinds currently cached, sorted
    pub fn cached_kinds(&self) -> Vec<ModelKind> {
        self.list().into_iter().map(|info| info.kind).collect()
    }

    /// List all cached models, sorted by kind
    pub fn list(&self) -> Vec<CachedModelInfo> {
        if self.state == CacheState::Disposed {
            return Vec::new();
        }

        let mut infos: Vec<CachedModelInfo> = std::iter::once(&self.fallback)
            .chain(self.models.values())
            .map(CachedEntry::info)
            .collect();
        infos.sort_by_key(|info| info.kind);
        infos
    }

    /// Current lifecycle state
    pub fn state(&self) -> CacheState {
        self.state
    }

    /// Context models are built with
    pub fn context(&self) -> &F::Context {
        &self.context
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            state: self.state,
            model_count: self.len(),
            hits: self.hits,
            fallbacks: self.fallbacks,
            constructed: self.constructed,
            failures: self.failures,
            kinds: self.cached_kinds(),
        }
    }

    /// Release every cached instance, fallback included
    ///
    /// Calling this again does nothing.
    pub fn dispose(&mut self) {
        if self.state == CacheState::Disposed {
            return;
        }

        let mut released = 0usize;
        for (_, mut entry) in self.models.drain() {
            entry.model.dispose();
            released += 1;
        }
        self.fallback.model.dispose();
        released += 1;

        self.state = CacheState::Disposed;
        info!(released = released, "Disposed model cache");
    }
}

impl<F: ModelFactory> Drop for ModelCache<F> {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Cache statistics
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    /// Lifecycle state
    pub state: CacheState,
    /// Number of cached models, fallback included
    pub model_count: usize,
    /// Lookups served from an existing entry
    pub hits: u64,
    /// Lookups answered with the fallback
    pub fallbacks: u64,
    /// Models built on demand
    pub constructed: u64,
    /// Constructor calls that failed
    pub failures: u64,
    /// Kinds currently cached
    pub kinds: Vec<ModelKind>,
}
