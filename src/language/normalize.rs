//! Language-code spelling canonicalization

use crate::config::TemplateSettings;

/// Canonicalize a language code so codes compare equal regardless of input
/// style.
///
/// Empty or whitespace-only input falls back to the configured default
/// language; if that is empty too, an empty string comes back. The result
/// is lower-cased, with the file-name separator rewritten to the
/// sub-language separator (`en_US` -> `en-us`).
pub fn normalize(code: &str, settings: &TemplateSettings) -> String {
    let mut value = code.trim();
    if value.is_empty() {
        value = settings.default_language.trim();
    }
    if value.is_empty() {
        return String::new();
    }

    let mut normalized = value.to_lowercase();
    if !settings.language_separator.is_empty() && !settings.sublanguage_separator.is_empty() {
        normalized =
            normalized.replace(&settings.language_separator, &settings.sublanguage_separator);
    }
    normalized
}

/// Format a resolved language code for display: lower-cased base language,
/// upper-cased region, joined by `-` (`en-us` -> `en-US`).
pub fn display(code: &str, settings: &TemplateSettings) -> String {
    let conventional = if settings.sublanguage_separator.is_empty() {
        code.to_string()
    } else {
        code.replace(&settings.sublanguage_separator, "-")
    };

    let formatted = match conventional.find('-') {
        Some(split) => {
            let (base, region) = conventional.split_at(split);
            format!("{}{}", base.to_lowercase(), region.to_uppercase())
        }
        None => conventional.to_lowercase(),
    };

    // An empty base or region component leaves a dangling separator
    formatted.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lowercases_and_rewrites_separator() {
        let settings = TemplateSettings::default();
        assert_eq!(normalize("EN_us", &settings), "en-us");
        assert_eq!(normalize("en-US", &settings), "en-us");
        assert_eq!(normalize("ES", &settings), "es");
    }

    #[test]
    fn test_normalize_empty_falls_back_to_default() {
        let settings = TemplateSettings::default();
        assert_eq!(normalize("", &settings), "en-us");
        assert_eq!(normalize("   ", &settings), "en-us");
    }

    #[test]
    fn test_normalize_empty_default_yields_empty() {
        let settings = TemplateSettings {
            default_language: String::new(),
            ..TemplateSettings::default()
        };
        assert_eq!(normalize("", &settings), "");
    }

    #[test]
    fn test_normalize_keeps_separator_with_empty_config() {
        let settings = TemplateSettings {
            language_separator: String::new(),
            ..TemplateSettings::default()
        };
        assert_eq!(normalize("EN_us", &settings), "en_us");
    }

    #[test]
    fn test_display_formats_region() {
        let settings = TemplateSettings::default();
        assert_eq!(display("en-us", &settings), "en-US");
        assert_eq!(display("ru-ka", &settings), "ru-KA");
    }

    #[test]
    fn test_display_bare_language() {
        let settings = TemplateSettings::default();
        assert_eq!(display("es", &settings), "es");
        assert_eq!(display("ES", &settings), "es");
    }

    #[test]
    fn test_display_trims_dangling_separator() {
        let settings = TemplateSettings::default();
        assert_eq!(display("-us", &settings), "US");
        assert_eq!(display("en-", &settings), "en");
    }
}
