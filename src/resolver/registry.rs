//! Process-wide resolution caches

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use crate::render::MergeEngine;

/// Shared caches behind template resolution.
///
/// Entries are write-once and never evicted: the universe of
/// (template, language) pairs is small and static for the life of a
/// process, and callers rely on repeat loads hitting the caches.
pub struct TemplateRegistry {
    /// Requested cache key -> resolved cache key actually used
    key_aliases: DashMap<String, String>,
    /// Resolved cache key -> absolute template file path
    paths: DashMap<String, PathBuf>,
    /// Resolved cache key -> candidate language that matched a real file
    languages: DashMap<String, String>,
    /// Resolved cache key -> escape-normalized template text
    sources: DashMap<String, String>,
    /// Merge engine holding the compiled-template cache
    engine: MergeEngine,
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRegistry {
    /// Create an isolated registry with empty caches.
    pub fn new() -> Self {
        Self {
            key_aliases: DashMap::new(),
            paths: DashMap::new(),
            languages: DashMap::new(),
            sources: DashMap::new(),
            engine: MergeEngine::new(),
        }
    }

    /// The registry shared by every loader constructed without an explicit
    /// one. Lives for the whole process.
    pub fn shared() -> Arc<Self> {
        static SHARED: OnceLock<Arc<TemplateRegistry>> = OnceLock::new();
        SHARED.get_or_init(create_template_registry).clone()
    }

    /// Follow a previously recorded alias for a requested key.
    pub fn alias_for(&self, key: &str) -> Option<String> {
        self.key_aliases.get(key).map(|alias| alias.clone())
    }

    /// Record an alias from a requested key to the key it resolved to.
    /// The first writer wins; later writes are ignored.
    pub fn record_alias(&self, requested: &str, resolved: &str) {
        self.key_aliases
            .entry(requested.to_string())
            .or_insert_with(|| resolved.to_string());
    }

    /// Look up the file path recorded for a resolved key.
    pub fn path_for(&self, key: &str) -> Option<PathBuf> {
        self.paths.get(key).map(|path| path.clone())
    }

    /// Look up the language recorded for a resolved key.
    pub fn language_for(&self, key: &str) -> Option<String> {
        self.languages.get(key).map(|language| language.clone())
    }

    /// Record a first-time resolution: the file path and the candidate
    /// language that matched it. Write-once per key.
    pub fn record_resolution(&self, key: &str, path: &Path, language: &str) {
        self.paths
            .entry(key.to_string())
            .or_insert_with(|| path.to_path_buf());
        self.languages
            .entry(key.to_string())
            .or_insert_with(|| language.to_string());
    }

    /// Look up cached template text for a resolved key.
    pub fn source_for(&self, key: &str) -> Option<String> {
        self.sources.get(key).map(|source| source.clone())
    }

    /// Record template text for a resolved key, returning the cached value
    /// (the first writer's, when a racing populate got there first).
    pub fn record_source(&self, key: &str, source: String) -> String {
        self.sources
            .entry(key.to_string())
            .or_insert(source)
            .value()
            .clone()
    }

    /// The merge engine shared by all loaders on this registry.
    pub fn engine(&self) -> &MergeEngine {
        &self.engine
    }
}

/// Create an Arc-wrapped registry
pub fn create_template_registry() -> Arc<TemplateRegistry> {
    Arc::new(TemplateRegistry::new())
}
