//! Concurrent loading tests
//!
//! Multiple threads, each with its own loader, share one registry and one
//! merge engine. These tests verify that racing first-time loads converge
//! on the same resolution and that later loads see the shared caches.

use std::fs;
use std::sync::Arc;
use std::thread;

use serde_json::json;
use tempfile::TempDir;

use email_template_loader::{
    create_template_registry, EmailTemplateLoader, TemplateRegistry, TemplateSettings,
};

const ZODIAC_EN_US: &str = "<html>\n\
<head><title>Your {{Zodiac}} Horoscope</title></head>\n\
<body><p>Hello {{Name}}, here is the {{Zodiac}} outlook for {{Year}}.</p></body>\n\
</html>\n";

const WELCOME_EN_US: &str = "<html>\n\
<head><title>Welcome {{Name}}!</title></head>\n\
<body><p>Glad to have you, {{Name}}.</p></body>\n\
</html>\n";

fn fixture_folder() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Zodiac_en-us.html"), ZODIAC_EN_US).unwrap();
    fs::write(dir.path().join("Welcome_en-us.html"), WELCOME_EN_US).unwrap();
    dir
}

fn load_once(
    registry: &Arc<TemplateRegistry>,
    folder: &str,
    template_id: &str,
    language: &str,
    name: &str,
) -> (String, String) {
    let mut loader =
        EmailTemplateLoader::with_registry(TemplateSettings::default(), registry.clone());
    loader
        .load(
            folder,
            template_id,
            language,
            None,
            Some(&json!({"Zodiac": "Leo", "Name": name, "Year": 2025})),
        )
        .unwrap();
    (
        loader.language().unwrap().to_string(),
        loader.body().unwrap().to_string(),
    )
}

// =============================================================================
// Shared Cache Tests
// =============================================================================

mod shared_cache_tests {
    use super::*;

    #[test]
    fn test_racing_first_loads_converge() {
        let dir = fixture_folder();
        let registry = create_template_registry();
        let folder = dir.path().to_str().unwrap().to_string();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                let folder = folder.clone();
                thread::spawn(move || {
                    load_once(&registry, &folder, "Zodiac", "en-CA", &format!("user-{}", i))
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let (language, body) = handle.join().unwrap();
            assert_eq!(language, "en-US");
            assert!(body.contains(&format!("user-{}", i)));
        }

        // The first wave populated every cache level; any further load
        // reuses the compiled artifact.
        let mut loader =
            EmailTemplateLoader::with_registry(TemplateSettings::default(), registry.clone());
        loader
            .load(
                &folder,
                "Zodiac",
                "en-CA",
                None,
                Some(&json!({"Zodiac": "Leo", "Name": "late", "Year": 2025})),
            )
            .unwrap();
        assert!(loader.cached());
    }

    #[test]
    fn test_distinct_templates_render_concurrently() {
        let dir = fixture_folder();
        let registry = create_template_registry();
        let folder = dir.path().to_str().unwrap().to_string();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                let folder = folder.clone();
                let template_id = if i % 2 == 0 { "Zodiac" } else { "Welcome" };
                thread::spawn(move || {
                    load_once(&registry, &folder, template_id, "en-US", "worker")
                })
            })
            .collect();

        for handle in handles {
            let (language, body) = handle.join().unwrap();
            assert_eq!(language, "en-US");
            assert!(body.contains("worker"));
        }
    }

    #[test]
    fn test_alias_recorded_by_one_loader_serves_another() {
        let dir = fixture_folder();
        let registry = create_template_registry();
        let folder = dir.path().to_str().unwrap().to_string();

        // First request records the en-CA -> en-US alias chain
        load_once(&registry, &folder, "Zodiac", "en-CA", "first");

        // A differently spelled request for the same language must land on
        // the same resolution without touching the disk again.
        fs::remove_file(dir.path().join("Zodiac_en-us.html")).unwrap();
        let (language, _) = load_once(&registry, &folder, "Zodiac", "EN_ca", "second");
        assert_eq!(language, "en-US");
    }
}
