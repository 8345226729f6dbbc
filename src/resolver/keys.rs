//! Cache-key and template-path formatting

use std::path::{Path, PathBuf};

use crate::config::TemplateSettings;
use crate::language;

/// Build the canonical cache key for a (template id, language) pair.
///
/// Keys are case- and separator-insensitive by construction: `Zodiac` with
/// `en-US` and `zodiac` with `EN_us` collide on the same key.
pub fn cache_key(template_id: &str, language: &str, settings: &TemplateSettings) -> String {
    let language = language::normalize(language, settings);
    format!(
        "{}{}",
        compact(template_id, settings).to_uppercase(),
        compact(&language, settings).to_uppercase()
    )
}

/// Strip both configured separators out of a value.
fn compact(value: &str, settings: &TemplateSettings) -> String {
    let mut compacted = value.to_string();
    if !settings.language_separator.is_empty() {
        compacted = compacted.replace(&settings.language_separator, "");
    }
    if !settings.sublanguage_separator.is_empty() {
        compacted = compacted.replace(&settings.sublanguage_separator, "");
    }
    compacted
}

/// Build the file-system path for one candidate language.
///
/// File names follow `{template_id}{separator}{language}{extension}` with
/// the language lower-cased. The result is absolutized; existence is the
/// caller's concern.
pub fn template_path(
    folder: &str,
    template_id: &str,
    language: &str,
    extension: Option<&str>,
    settings: &TemplateSettings,
) -> PathBuf {
    let extension = extension.unwrap_or(&settings.default_extension);
    let file_name = format!(
        "{}{}{}{}",
        template_id,
        settings.language_separator,
        language.to_lowercase(),
        extension
    );

    let folder = folder.trim_end_matches(['/', '\\']);
    let joined = Path::new(folder).join(file_name);
    std::path::absolute(&joined).unwrap_or(joined)
}
