use std::{collections::HashMap, fs};

#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    pub page_url: String,
    pub reload_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_url: "http://localhost:8080".into(),
            reload_timeout_secs: page_core::DEFAULT_RELOAD_TIMEOUT_SECS,
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("potarig.toml") {
        apply_file_config(&mut settings, &raw);
    }

    if let Ok(v) = std::env::var("POTARIG_PAGE_URL") {
        settings.page_url = v;
    }
    if let Ok(v) = std::env::var("POTARIG_RELOAD_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse::<u64>() {
            if parsed > 0 {
                settings.reload_timeout_secs = parsed;
            }
        }
    }

    settings
}

fn apply_file_config(settings: &mut Settings, raw: &str) {
    let Ok(file_cfg) = toml::from_str::<HashMap<String, toml::Value>>(raw) else {
        return;
    };
    if let Some(v) = file_cfg.get("page_url").and_then(toml::Value::as_str) {
        settings.page_url = v.to_string();
    }
    if let Some(v) = file_cfg
        .get("reload_timeout_secs")
        .and_then(toml::Value::as_integer)
    {
        if v > 0 {
            settings.reload_timeout_secs = v as u64;
        }
    }
}
