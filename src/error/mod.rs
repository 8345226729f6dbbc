//! Error types for template resolution and rendering

use std::path::PathBuf;

use thiserror::Error;

/// Template-loading error type
#[derive(Debug, Error)]
pub enum TemplateError {
    /// No candidate language produced an existing template file
    #[error("Template not found: {template_id} (language: {language})")]
    NotFound {
        template_id: String,
        language: String,
    },

    /// The resolved template file exists but could not be read
    #[error("Cannot read template file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendering engine failed to compile or render the template
    #[error("Template merge failed for {key} (data: {data}): {source}")]
    Merge {
        key: String,
        data: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The rendered body could not be parsed as HTML
    #[error("Cannot parse rendered template as HTML: {0}")]
    HtmlParse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for template operations
pub type Result<T> = std::result::Result<T, TemplateError>;
