//! Fallback resolution against the shared caches

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::TemplateSettings;
use crate::error::{Result, TemplateError};
use crate::language;

use super::keys;
use super::registry::TemplateRegistry;

/// Outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct ResolvedTemplate {
    /// Canonical cache key the template is stored under
    pub key: String,
    /// Candidate language that matched a real file (normalized form)
    pub language: String,
    /// Escape-normalized template text
    pub source: String,
}

/// Walks the language fallback chain, consulting the shared caches before
/// touching the file system.
pub struct TemplateResolver {
    settings: TemplateSettings,
    registry: Arc<TemplateRegistry>,
}

impl TemplateResolver {
    pub fn new(settings: TemplateSettings, registry: Arc<TemplateRegistry>) -> Self {
        Self { settings, registry }
    }

    /// Resolve a template request to a cache key, a resolved language, and
    /// the template text.
    ///
    /// Candidates are tried most specific first; the first cache hit or
    /// existing file wins. Each (template, resolved language) pair is read
    /// from disk at most once per process.
    pub fn resolve(
        &self,
        folder: &str,
        template_id: &str,
        language: &str,
        extension: Option<&str>,
    ) -> Result<ResolvedTemplate> {
        let requested = language;
        let substituted = self
            .settings
            .language_aliases
            .get(requested)
            .map(String::as_str)
            .unwrap_or(requested);

        let candidates = language::fallback_chain(substituted, &self.settings);
        let original_key = keys::cache_key(template_id, requested, &self.settings);

        let mut resolution: Option<(String, String, PathBuf)> = None;
        for candidate in &candidates {
            let mut key = keys::cache_key(template_id, candidate, &self.settings);
            if let Some(alias) = self.registry.alias_for(&key) {
                key = alias;
            }

            if let Some(path) = self.registry.path_for(&key) {
                let resolved_language = self
                    .registry
                    .language_for(&key)
                    .unwrap_or_else(|| candidate.clone());
                self.registry.record_alias(&original_key, &key);
                trace!(key = %key, language = %resolved_language, "template cache hit");
                resolution = Some((key, resolved_language, path));
                break;
            }

            let path =
                keys::template_path(folder, template_id, candidate, extension, &self.settings);
            if path.is_file() {
                self.registry.record_resolution(&key, &path, candidate);
                self.registry.record_alias(&original_key, &key);
                debug!(
                    key = %key,
                    language = %candidate,
                    path = %path.display(),
                    "template resolved from disk"
                );
                resolution = Some((key, candidate.clone(), path));
                break;
            }
        }

        let (key, resolved_language, path) =
            resolution.ok_or_else(|| TemplateError::NotFound {
                template_id: template_id.to_string(),
                language: requested.to_string(),
            })?;

        let source = match self.registry.source_for(&key) {
            Some(source) => source,
            None => {
                let text = fs::read_to_string(&path).map_err(|source| TemplateError::Read {
                    path: path.clone(),
                    source,
                })?;
                self.registry
                    .record_source(&key, normalize_media_escapes(&text))
            }
        };

        Ok(ResolvedTemplate {
            key,
            language: resolved_language,
            source,
        })
    }
}

/// Protect the literal CSS `@media` token from the merge engine's `@`
/// escape character by doubling the `@` of the first occurrence.
///
/// Text that already carries the escaped form is left untouched, so
/// applying the pass twice gives the same result as applying it once.
pub fn normalize_media_escapes(source: &str) -> String {
    // ASCII lowering keeps byte offsets valid in the original text
    let lowered = source.to_ascii_lowercase();
    if lowered.contains("@@media") {
        return source.to_string();
    }

    match lowered.find("@media") {
        Some(at) => {
            let mut normalized = String::with_capacity(source.len() + 1);
            normalized.push_str(&source[..at]);
            normalized.push('@');
            normalized.push_str(&source[at..]);
            normalized
        }
        None => source.to_string(),
    }
}
