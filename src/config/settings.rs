use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;

/// Resolution configuration for localized templates.
///
/// Immutable once constructed. Loaders sharing a registry should share one
/// separator configuration so their cache keys stay consistent.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateSettings {
    /// Language used when no candidate of the requested language matches
    #[serde(default = "default_language")]
    pub default_language: String,
    /// File extension appended when the caller does not supply one
    #[serde(default = "default_extension")]
    pub default_extension: String,
    /// Separator between template id and language in file names
    #[serde(default = "default_language_separator")]
    pub language_separator: String,
    /// Separator between language subparts (base language and region)
    #[serde(default = "default_sublanguage_separator")]
    pub sublanguage_separator: String,
    /// Non-standard requested codes mapped to substitutes; consulted once,
    /// by exact match, before fallback expansion
    #[serde(default)]
    pub language_aliases: HashMap<String, String>,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_extension() -> String {
    ".html".to_string()
}

fn default_language_separator() -> String {
    "_".to_string()
}

fn default_sublanguage_separator() -> String {
    "-".to_string()
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            default_extension: default_extension(),
            language_separator: default_language_separator(),
            sublanguage_separator: default_sublanguage_separator(),
            language_aliases: HashMap::new(),
        }
    }
}

impl TemplateSettings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            // Start with default values
            .set_default("default_language", "en-US")?
            .set_default("default_extension", ".html")?
            .set_default("language_separator", "_")?
            .set_default("sublanguage_separator", "-")?
            // Load config file if exists
            .add_source(File::with_name("config/templates").required(false))
            .add_source(File::with_name(&format!("config/templates.{}", run_mode)).required(false))
            // Load from environment variables
            // TEMPLATE_DEFAULT_LANGUAGE, TEMPLATE_DEFAULT_EXTENSION, etc.
            .add_source(Environment::with_prefix("TEMPLATE").try_parsing(true));

        builder.build()?.try_deserialize()
    }
}
