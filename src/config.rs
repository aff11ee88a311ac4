use anyhow::{bail, Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Locale resources
    pub locales_dir: PathBuf,
    pub log_locale_changes: bool,
    pub strict_localization: bool,
    pub default_locale: String,
    pub documentation_base_url: Option<String>,

    // Generated TypeScript imports
    pub proxy_module: String,
    pub app_extension_class: String,
    pub app_extension_module: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Locale resources
            locales_dir: std::env::var("LOCALES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("resources/locale")),
            log_locale_changes: env_flag("LOG_LOCALE_CHANGES", true)?,
            strict_localization: env_flag("STRICT_LOCALIZATION", false)?,
            default_locale: std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string()),
            documentation_base_url: std::env::var("DOCUMENTATION_BASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),

            // Generated TypeScript imports
            proxy_module: std::env::var("PROXY_MODULE")
                .unwrap_or_else(|_| "./proxies".to_string()),
            app_extension_class: std::env::var("APP_EXTENSION_CLASS")
                .unwrap_or_else(|_| "ExcelAppExtension".to_string()),
            app_extension_module: std::env::var("APP_EXTENSION_MODULE")
                .unwrap_or_else(|_| "./excel-app-extension".to_string()),
        })
    }
}

/// Read a boolean flag; unset means `default`, anything unparseable is an error.
fn env_flag(name: &str, default: bool) -> Result<bool> {
    match std::env::var(name) {
        Err(_) => Ok(default),
        Ok(value) => parse_flag(&value).with_context(|| format!("{} is not a boolean", name)),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("Invalid boolean value: '{}'", other),
    }
}
