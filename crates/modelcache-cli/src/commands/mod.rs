//! CLI commands implementation

use anyhow::Result;
use modelcache_core::{ClientConfig, ModelKind};
use modelcache_render::{HeadlessContext, HeadlessFactory};
use modelcache_store::{cache_key, CacheStats, ModelCache, CONSTRUCTORS, FALLBACK_KEY};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

/// Cache type every command runs against
pub type HeadlessCache = ModelCache<HeadlessFactory>;

/// Outcome of resolving one name
#[derive(Debug, Serialize)]
pub struct Resolution {
    pub name: String,
    pub key: String,
    pub kind: ModelKind,
    pub id: Uuid,
    /// Whether the name was answered with the fallback model
    pub fallback: bool,
}

/// Constructor table row
#[derive(Debug, Serialize)]
pub struct KindEntry {
    pub name: &'static str,
    pub kind: ModelKind,
}

/// Build a headless cache from configuration
pub fn build_cache(config: &ClientConfig) -> Result<HeadlessCache> {
    let cache = ModelCache::with_config(
        HeadlessContext::new(),
        HeadlessFactory::new(),
        &config.cache,
    )?;
    Ok(cache)
}

/// Resolve each name through the cache
pub fn resolve_all(cache: &mut HeadlessCache, names: &[String]) -> Vec<Resolution> {
    names
        .iter()
        .map(|name| {
            let key = cache_key(name).to_string();
            let model = cache.get_model(name);
            Resolution {
                fallback: model.kind().is_fallback() && key != FALLBACK_KEY,
                kind: model.kind(),
                id: model.id(),
                name: name.clone(),
                key,
            }
        })
        .collect()
}

/// Resolve names and print the result
pub fn resolve(cache: &mut HeadlessCache, names: &[String], json: bool) -> Result<()> {
    let resolutions = resolve_all(cache, names);

    if json {
        println!("{}", serde_json::to_string_pretty(&resolutions)?);
        return Ok(());
    }

    println!(
        "{:<16} {:<16} {:<10} {:<36} {:<8}",
        "NAME", "KEY", "KIND", "INSTANCE", "FALLBACK"
    );
    println!("{}", "-".repeat(90));
    for r in resolutions {
        println!(
            "{:<16} {:<16} {:<10} {:<36} {:<8}",
            r.name,
            r.key,
            r.kind,
            r.id,
            if r.fallback { "yes" } else { "no" }
        );
    }

    Ok(())
}

/// Constructor table, fallback first
pub fn kind_entries() -> Vec<KindEntry> {
    std::iter::once(KindEntry {
        name: FALLBACK_KEY,
        kind: ModelKind::FALLBACK,
    })
    .chain(
        CONSTRUCTORS
            .into_iter()
            .map(|(name, kind)| KindEntry { name, kind }),
    )
    .collect()
}

/// Print the model names the cache understands
pub fn kinds(json: bool) -> Result<()> {
    let entries = kind_entries();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    for entry in entries {
        let note = if entry.kind.is_fallback() {
            " (fallback, built with the cache)"
        } else {
            ""
        };
        println!("  {}{}", entry.name, note);
    }
    println!("  0-255 (block ids, share the block model)");

    Ok(())
}

/// Resolve names, then print cache statistics
pub fn stats(cache: &mut HeadlessCache, names: &[String], json: bool) -> Result<()> {
    cache.preload(names);
    let stats = cache.stats();

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    print_stats(&stats);
    println!();
    println!("{:<10} {:<36} {:<6} {}", "KIND", "INSTANCE", "HITS", "BUILT");
    println!("{}", "-".repeat(90));
    for model in cache.list() {
        println!(
            "{:<10} {:<36} {:<6} {}",
            model.kind,
            model.id,
            model.hits,
            model.constructed_at.to_rfc3339()
        );
    }

    Ok(())
}

/// Dispose the cache and report what was released
pub fn shutdown(mut cache: HeadlessCache) {
    cache.dispose();
    let context = cache.context();
    info!(
        allocated = context.allocated_count(),
        released = context.released_count(),
        live = context.live_count(),
        "Released render resources"
    );
}

/// Helper to print cache statistics
fn print_stats(stats: &CacheStats) {
    println!("Models cached: {}", stats.model_count);
    println!("  Hits: {}", stats.hits);
    println!("  Fallbacks: {}", stats.fallbacks);
    println!("  Constructed: {}", stats.constructed);
    println!("  Failures: {}", stats.failures);
}
