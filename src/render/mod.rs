//! Merge engine adapter.
//!
//! Bridges template text and caller data to the Handlebars engine. The
//! engine's named-template registry doubles as the compiled-template
//! cache: once a template is registered under its cache key, later renders
//! reuse the compiled artifact without recompiling.

use handlebars::Handlebars;
use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::error::{Result, TemplateError};

/// Result of one merge call.
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// Rendered template text
    pub body: String,
    /// Whether the render reused a previously compiled artifact
    pub from_cache: bool,
}

/// Serializes merge requests against the shared Handlebars instance.
///
/// Compiled-artifact lookups go through the registry lock; the
/// compile-and-render path is additionally serialized through the render
/// gate, one render in flight per process.
pub struct MergeEngine {
    registry: Mutex<Handlebars<'static>>,
    render_gate: Mutex<()>,
}

impl Default for MergeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MergeEngine {
    /// Create an engine with an empty compiled-template cache.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Handlebars::new()),
            render_gate: Mutex::new(()),
        }
    }

    /// Render `source` with `data` under `key`, compiling at most once per
    /// key across the process lifetime.
    ///
    /// `from_cache` reports whether a compiled artifact already existed
    /// when the call started.
    pub fn render(&self, key: &str, source: &str, data: &serde_json::Value) -> Result<MergeOutput> {
        let from_cache = self.registry.lock().has_template(key);

        let _in_flight = self.render_gate.lock();
        let mut registry = self.registry.lock();

        // Re-checked here so two callers racing past the lookup above still
        // compile the key only once.
        if !registry.has_template(key) {
            // Templates escape a literal `@` by doubling it; collapse the
            // escape before the text reaches the engine.
            let unescaped = source.replace("@@", "@");
            registry
                .register_template_string(key, unescaped)
                .map_err(|error| merge_error(key, data, error))?;
            debug!(key = %key, "template compiled");
        }

        let body = registry
            .render(key, data)
            .map_err(|error| merge_error(key, data, error))?;
        trace!(key = %key, from_cache, "template rendered");

        Ok(MergeOutput { body, from_cache })
    }
}

fn merge_error(
    key: &str,
    data: &serde_json::Value,
    source: impl std::error::Error + Send + Sync + 'static,
) -> TemplateError {
    TemplateError::Merge {
        key: key.to_string(),
        data: data.to_string(),
        source: Box::new(source),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_substitutes_data() {
        let engine = MergeEngine::new();

        let output = engine
            .render(
                "GREETINGEN",
                "<p>Hello {{Name}}, the year is {{Year}}.</p>",
                &json!({"Name": "Joe", "Year": 2025}),
            )
            .unwrap();

        assert_eq!(output.body, "<p>Hello Joe, the year is 2025.</p>");
        assert!(!output.from_cache);
    }

    #[test]
    fn test_second_render_reuses_compiled_artifact() {
        let engine = MergeEngine::new();
        let source = "<p>Hello {{Name}}.</p>";

        let first = engine
            .render("GREETINGEN", source, &json!({"Name": "Ana"}))
            .unwrap();
        let second = engine
            .render("GREETINGEN", source, &json!({"Name": "Joe"}))
            .unwrap();

        assert!(!first.from_cache);
        assert!(second.from_cache);
        assert_eq!(second.body, "<p>Hello Joe.</p>");
    }

    #[test]
    fn test_escaped_at_sign_renders_verbatim() {
        let engine = MergeEngine::new();

        let output = engine
            .render(
                "STYLEDEN",
                "<style>@@media screen {}</style>",
                &json!({"Name": "Joe"}),
            )
            .unwrap();

        assert_eq!(output.body, "<style>@media screen {}</style>");
    }

    #[test]
    fn test_compile_failure_reports_merge_error() {
        let engine = MergeEngine::new();

        let result = engine.render("BROKENEN", "<p>{{#if}}</p>", &json!({"Name": "Joe"}));

        match result {
            Err(TemplateError::Merge { key, data, .. }) => {
                assert_eq!(key, "BROKENEN");
                assert!(data.contains("Joe"));
            }
            other => panic!("expected merge error, got {:?}", other.map(|o| o.body)),
        }
    }
}
