//! Template resolution and caching.
//!
//! This module provides:
//! - Cache-key and file-path formatting for (template id, language) pairs
//! - The process-wide resolution caches shared by every loader
//! - The fallback walk that resolves a request to a template file

mod keys;
mod registry;
mod resolve;

pub use keys::{cache_key, template_path};
pub use registry::{create_template_registry, TemplateRegistry};
pub use resolve::{normalize_media_escapes, ResolvedTemplate, TemplateResolver};
