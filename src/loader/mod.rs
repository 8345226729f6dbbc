//! Public entry point for loading localized email templates.
//!
//! # Example
//!
//! ```ignore
//! let mut loader = EmailTemplateLoader::new(TemplateSettings::default());
//! loader.load(
//!     "templates",
//!     "Zodiac",
//!     "en-CA",
//!     None,
//!     Some(&json!({"Zodiac": "Leo", "Name": "Joe", "Year": 2025})),
//! )?;
//!
//! let subject = loader.subject();
//! let body = loader.body();
//! let language = loader.language(); // "en-US" after fallback
//! ```

use std::sync::Arc;

use crate::config::TemplateSettings;
use crate::error::Result;
use crate::html;
use crate::language;
use crate::resolver::{TemplateRegistry, TemplateResolver};

/// Outputs of the most recent successful load.
#[derive(Debug, Clone)]
struct LoadedTemplate {
    template: String,
    body: String,
    subject: Option<String>,
    language: String,
    cached: bool,
}

/// Resolves, renders, and dissects one localized email template per call.
///
/// Instances are cheap and single-threaded; the resolution caches and the
/// merge engine are shared through the registry, so any number of loaders
/// across any number of threads benefit from each other's work.
pub struct EmailTemplateLoader {
    settings: TemplateSettings,
    registry: Arc<TemplateRegistry>,
    resolver: TemplateResolver,
    current: Option<LoadedTemplate>,
}

impl EmailTemplateLoader {
    /// Create a loader backed by the process-wide registry.
    pub fn new(settings: TemplateSettings) -> Self {
        Self::with_registry(settings, TemplateRegistry::shared())
    }

    /// Create a loader backed by an explicit registry. Tests use this to
    /// keep their caches isolated from the rest of the process.
    pub fn with_registry(settings: TemplateSettings, registry: Arc<TemplateRegistry>) -> Self {
        let resolver = TemplateResolver::new(settings.clone(), registry.clone());
        Self {
            settings,
            registry,
            resolver,
            current: None,
        }
    }

    /// Load and render one localized template.
    ///
    /// The template file is located through the language fallback chain,
    /// merged with `data` when supplied, and split into subject and body.
    /// Without `data` the raw template text passes through verbatim and the
    /// merge engine is never consulted.
    ///
    /// On failure the outputs of the last successful load stay untouched;
    /// outputs are committed only when the whole call succeeds.
    pub fn load(
        &mut self,
        folder: &str,
        template_id: &str,
        language: &str,
        extension: Option<&str>,
        data: Option<&serde_json::Value>,
    ) -> Result<()> {
        let resolved = self.resolver.resolve(folder, template_id, language, extension)?;

        let (body, cached) = match data {
            Some(data) => {
                let output = self
                    .registry
                    .engine()
                    .render(&resolved.key, &resolved.source, data)?;
                (output.body, output.from_cache)
            }
            None => (resolved.source.clone(), false),
        };

        let subject = html::extract_subject(&body)?;
        let display_language = language::display(&resolved.language, &self.settings);

        self.current = Some(LoadedTemplate {
            template: resolved.source,
            body,
            subject,
            language: display_language,
            cached,
        });

        Ok(())
    }

    /// Raw template text from the last successful load.
    pub fn template(&self) -> Option<&str> {
        self.current.as_ref().map(|loaded| loaded.template.as_str())
    }

    /// Rendered HTML body from the last successful load.
    pub fn body(&self) -> Option<&str> {
        self.current.as_ref().map(|loaded| loaded.body.as_str())
    }

    /// Subject extracted from the rendered `<title>`, when one exists.
    pub fn subject(&self) -> Option<&str> {
        self.current.as_ref().and_then(|loaded| loaded.subject.as_deref())
    }

    /// Display-formatted resolved language (`en-US` style).
    pub fn language(&self) -> Option<&str> {
        self.current.as_ref().map(|loaded| loaded.language.as_str())
    }

    /// Whether the last load reused a compiled template artifact.
    pub fn cached(&self) -> bool {
        self.current
            .as_ref()
            .map(|loaded| loaded.cached)
            .unwrap_or(false)
    }
}
