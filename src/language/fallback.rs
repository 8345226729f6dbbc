//! Language fallback expansion

use smallvec::SmallVec;

use crate::config::TemplateSettings;

use super::normalize;

/// Ordered fallback candidates for a requested language, most specific
/// first, ending with the configured default unless it already appears in
/// the chain.
///
/// Each step drops the last sub-language component (`es-mx` -> `es`). The
/// chain always holds at least one entry, even if that entry is empty.
pub fn fallback_chain(language: &str, settings: &TemplateSettings) -> SmallVec<[String; 4]> {
    let mut chain: SmallVec<[String; 4]> = SmallVec::new();

    let requested = normalize(language, settings);
    chain.push(requested.clone());

    if !settings.sublanguage_separator.is_empty() {
        let mut current = requested;
        while let Some(split) = current.rfind(&settings.sublanguage_separator) {
            current.truncate(split);
            chain.push(current.clone());
        }
    }

    let fallback = normalize(&settings.default_language, settings);
    if !chain.contains(&fallback) {
        chain.push(fallback);
    }

    chain
}
