//! End-to-end generation flow for a host platform.

use crate::config::Config;
use crate::driver::{GenerationSummary, GeneratorDriver, ProxyModule};
use crate::i18n::{
    synchronize_locales, Locale, LocaleCatalog, LocaleRegistry, LocaleSynchronizer, LookupPolicy,
};
use crate::microsoft::{MicrosoftGenerator, MicrosoftGeneratorOptions};
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// Synchronize the locale files, then generate the Excel bindings and
/// manifest from the same proxy modules.
pub async fn generate_microsoft(
    config: &Config,
    modules: Vec<ProxyModule>,
    source_file: &Path,
    config_file: &Path,
) -> Result<GenerationSummary> {
    let driver = GeneratorDriver::new(modules);

    info!("Synchronizing locale resources in {}", config.locales_dir.display());
    let mut synchronizer = LocaleSynchronizer::new(config.documentation_base_url.clone());
    driver
        .run(&mut synchronizer)
        .context("Failed to elaborate proxies for locale synchronization")?;
    let canonical = synchronizer
        .canonical_tree()
        .context("Locale synchronization produced no canonical tree")?;

    let default_locale: Locale = config
        .default_locale
        .parse()
        .with_context(|| format!("Invalid DEFAULT_LOCALE '{}'", config.default_locale))?;

    let registry = LocaleRegistry::discover(&config.locales_dir)
        .with_context(|| format!("Failed to read {}", config.locales_dir.display()))?;
    if registry.is_empty() {
        warn!("No locale resources found; functions will not be localized");
    }
    let results = synchronize_locales(&registry, canonical, config.log_locale_changes)
        .await
        .context("Failed to synchronize locale resources")?;

    for result in &results {
        for path in &result.completeness.blank {
            warn!("[{}] Empty translation: {}", result.locale, path);
        }
        if !result.completeness.untranslated.is_empty() {
            warn!(
                "[{}] {} entries still require localization",
                result.locale,
                result.completeness.untranslated.len()
            );
        }
    }

    let policy = if config.strict_localization {
        LookupPolicy::Strict
    } else {
        LookupPolicy::BestEffort
    };
    let catalog = LocaleCatalog::load(&registry, policy)
        .await
        .context("Failed to load locale resources")?;

    let mut generator = MicrosoftGenerator::new(MicrosoftGeneratorOptions {
        source_path: source_file.to_path_buf(),
        manifest_path: config_file.to_path_buf(),
        default_locale: default_locale.code(),
        proxy_module: config.proxy_module.clone(),
        app_extension_class: config.app_extension_class.clone(),
        app_extension_module: config.app_extension_module.clone(),
    });

    let summary = driver
        .with_catalog(&catalog)
        .run(&mut generator)
        .context("Failed to generate Excel bindings")?;

    Ok(summary)
}
