mod settings;

pub use settings::TemplateSettings;
