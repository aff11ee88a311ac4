//! Locale synchronization: derive the canonical tree from the emitted
//! descriptors and merge it into every locale resource file.

use crate::descriptor::{ClassDescriptor, MethodDescriptor};
use crate::driver::{Generator, ProxyFunction};
use crate::error::Result;
use crate::i18n::merge::{merge, MergeReport};
use crate::i18n::tree::CanonicalTreeBuilder;
use crate::i18n::validator::{check_completeness, CompletenessReport};
use crate::i18n::{Locale, LocaleRegistry, LocaleResource};
use serde_json::Value;
use tracing::{debug, error, info};

/// Generator that collects the canonical localization tree.
///
/// Hidden functions are not documented and therefore not collected.
#[derive(Debug)]
pub struct LocaleSynchronizer {
    documentation_base_url: Option<String>,
    builder: CanonicalTreeBuilder,
    canonical: Option<Value>,
}

impl LocaleSynchronizer {
    pub fn new(documentation_base_url: Option<String>) -> Self {
        Self {
            builder: CanonicalTreeBuilder::new(documentation_base_url.clone()),
            documentation_base_url,
            canonical: None,
        }
    }

    /// The canonical tree, available only after a successful run.
    pub fn canonical_tree(&self) -> Option<&Value> {
        self.canonical.as_ref()
    }
}

impl Generator for LocaleSynchronizer {
    fn initialize(&mut self) -> Result<()> {
        self.builder = CanonicalTreeBuilder::new(self.documentation_base_url.clone());
        self.canonical = None;
        Ok(())
    }

    fn create_proxy_object(&mut self, _class: &ClassDescriptor) -> Result<()> {
        Ok(())
    }

    fn create_proxy_function(
        &mut self,
        _class: &ClassDescriptor,
        method: &MethodDescriptor,
        function: &ProxyFunction,
    ) -> Result<()> {
        if method.is_hidden {
            return Ok(());
        }

        for parameter in &method.parameter_descriptors {
            self.builder.add_parameter(parameter)?;
        }
        self.builder
            .add_function(function.namespace.as_deref(), &function.name)
    }

    fn finalize(&mut self, success: bool) -> Result<()> {
        if success {
            self.canonical = Some(self.builder.build());
        }
        Ok(())
    }
}

/// Outcome of synchronizing one locale file.
#[derive(Debug, Clone)]
pub struct LocaleSyncResult {
    pub locale: Locale,
    pub report: MergeReport,
    pub completeness: CompletenessReport,
    pub written: bool,
}

/// Merge `canonical` into every registered locale file.
///
/// Locales are independent and merged concurrently; each file is read in
/// full before its merged form is written back. A failing locale never
/// interrupts the others: every merge settles before the first failure is
/// returned.
pub async fn synchronize_locales(
    registry: &LocaleRegistry,
    canonical: &Value,
    log_changes: bool,
) -> Result<Vec<LocaleSyncResult>> {
    let merges = registry
        .list_all()
        .iter()
        .map(|resource| synchronize_locale(resource, canonical, log_changes));

    let outcomes = futures::future::join_all(merges).await;

    let mut results = Vec::with_capacity(outcomes.len());
    let mut first_error = None;
    for (resource, outcome) in registry.list_all().iter().zip(outcomes) {
        match outcome {
            Ok(result) => results.push(result),
            Err(e) => {
                error!("Failed to synchronize {}: {}", resource.path.display(), e);
                first_error.get_or_insert(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(results),
    }
}

async fn synchronize_locale(
    resource: &LocaleResource,
    canonical: &Value,
    log_changes: bool,
) -> Result<LocaleSyncResult> {
    let content = tokio::fs::read_to_string(&resource.path).await?;
    let destination: Value = serde_json::from_str(&content)?;

    let label = resource.locale.code();
    let outcome = merge(
        log_changes,
        &label,
        canonical,
        &destination,
        resource.locale.is_base(),
    )?;

    let serialized = format!("{}\n", serde_json::to_string_pretty(&outcome.tree)?);
    let written = serialized != content;
    if written {
        tokio::fs::write(&resource.path, serialized).await?;
        info!(
            "Updated {} ({} added, {} removed)",
            resource.path.display(),
            outcome.report.added.len(),
            outcome.report.removed.len()
        );
    } else {
        debug!("{} is up to date", resource.path.display());
    }

    let completeness = check_completeness(&outcome.tree);
    Ok(LocaleSyncResult {
        locale: resource.locale.clone(),
        report: outcome.report,
        completeness,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{MethodOptions, Multiplicity, ParameterDescriptor, ValueType};
    use crate::i18n::LOCALIZATION_REQUIRED;
    use serde_json::json;
    use tempfile::TempDir;

    fn class() -> ClassDescriptor {
        ClassDescriptor {
            name: "CheckProxy".into(),
            base_class_name: None,
            namespace: Some("GS1".into()),
            method_infix: None,
            replace_parameter_descriptors: Vec::new(),
            method_descriptors: Vec::new(),
        }
    }

    fn method(name: &str, is_hidden: bool) -> MethodDescriptor {
        let mut options = MethodOptions::returns(ValueType::String, Multiplicity::Matrix);
        options.is_hidden = is_hidden;
        MethodDescriptor::new(
            name,
            options,
            vec![ParameterDescriptor::new(
                "s",
                ValueType::String,
                Multiplicity::Matrix,
                true,
            )],
        )
    }

    fn function(name: &str) -> ProxyFunction {
        ProxyFunction {
            name: name.into(),
            namespace: Some("GS1".into()),
            localizations: Default::default(),
        }
    }

    // ==================== Synchronizer Generator Tests ====================

    #[test]
    fn test_synchronizer_collects_visible_functions() {
        let mut synchronizer = LocaleSynchronizer::new(None);
        synchronizer.initialize().unwrap();
        synchronizer
            .create_proxy_function(&class(), &method("checkDigit", false), &function("checkDigit"))
            .unwrap();
        synchronizer
            .create_proxy_function(&class(), &method("internal", true), &function("internal"))
            .unwrap();
        synchronizer.finalize(true).unwrap();

        let tree = synchronizer.canonical_tree().expect("Should have tree");
        assert!(tree["Functions"]["GS1"].get("checkDigit").is_some());
        assert!(tree["Functions"]["GS1"].get("internal").is_none());
        assert_eq!(tree["Parameters"]["s"]["name"], LOCALIZATION_REQUIRED);
    }

    #[test]
    fn test_synchronizer_without_success_has_no_tree() {
        let mut synchronizer = LocaleSynchronizer::new(None);
        synchronizer.initialize().unwrap();
        synchronizer.finalize(false).unwrap();
        assert!(synchronizer.canonical_tree().is_none());
    }

    // ==================== File Synchronization Tests ====================

    #[tokio::test]
    async fn test_synchronize_base_and_regional_locales() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let canonical = json!({
            "Parameters": {},
            "Functions": {
                "checkDigit": { "name": LOCALIZATION_REQUIRED, "description": LOCALIZATION_REQUIRED }
            }
        });
        std::fs::write(
            temp_dir.path().join("fr.json"),
            r#"{ "Parameters": {}, "Functions": { "stale": { "name": "x", "description": "y" } } }"#,
        )
        .unwrap();
        std::fs::write(
            temp_dir.path().join("fr-CA.json"),
            r#"{ "Parameters": {}, "Functions": {} }"#,
        )
        .unwrap();

        let registry = LocaleRegistry::discover(temp_dir.path()).unwrap();
        let results = synchronize_locales(&registry, &canonical, false)
            .await
            .expect("Should synchronize");

        assert_eq!(results.len(), 2);
        let fr: Value =
            serde_json::from_str(&std::fs::read_to_string(temp_dir.path().join("fr.json")).unwrap())
                .unwrap();
        assert!(fr["Functions"].get("stale").is_none());
        assert_eq!(fr["Functions"]["checkDigit"]["name"], LOCALIZATION_REQUIRED);
        assert!(!results[0].completeness.untranslated.is_empty());

        let fr_ca: Value = serde_json::from_str(
            &std::fs::read_to_string(temp_dir.path().join("fr-CA.json")).unwrap(),
        )
        .unwrap();
        assert!(fr_ca["Functions"].get("checkDigit").is_none());
    }

    #[tokio::test]
    async fn test_synchronize_twice_writes_once() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let canonical = json!({ "Parameters": {}, "Functions": {} });
        std::fs::write(temp_dir.path().join("en.json"), "{}").unwrap();

        let registry = LocaleRegistry::discover(temp_dir.path()).unwrap();
        let first = synchronize_locales(&registry, &canonical, false).await.unwrap();
        let second = synchronize_locales(&registry, &canonical, false).await.unwrap();

        assert!(first[0].written);
        assert!(!second[0].written);
        assert!(second[0].report.is_unchanged());
    }

    #[tokio::test]
    async fn test_synchronize_schema_mismatch_fails() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let canonical = json!({ "Functions": { "checkDigit": { "name": "x" } } });
        std::fs::write(
            temp_dir.path().join("de.json"),
            r#"{ "Functions": { "checkDigit": "kaputt" } }"#,
        )
        .unwrap();

        let registry = LocaleRegistry::discover(temp_dir.path()).unwrap();
        let result = synchronize_locales(&registry, &canonical, false).await;
        assert!(matches!(
            result,
            Err(crate::error::GeneratorError::SchemaMismatch { .. })
        ));
    }

    #[tokio::test]
    async fn test_synchronize_failure_leaves_other_locales_synchronized() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let canonical = json!({
            "Parameters": {},
            "Functions": { "f": { "name": LOCALIZATION_REQUIRED, "description": LOCALIZATION_REQUIRED } }
        });
        std::fs::write(
            temp_dir.path().join("de.json"),
            r#"{ "Functions": { "f": "kaputt" } }"#,
        )
        .unwrap();
        let good = ["en", "es", "fr", "it", "ja", "nl", "pt", "sv"];
        for code in good {
            std::fs::write(temp_dir.path().join(format!("{}.json", code)), "{}").unwrap();
        }

        let registry = LocaleRegistry::discover(temp_dir.path()).unwrap();
        let result = synchronize_locales(&registry, &canonical, false).await;

        assert!(matches!(
            result,
            Err(crate::error::GeneratorError::SchemaMismatch { .. })
        ));
        for code in good {
            let tree: Value = serde_json::from_str(
                &std::fs::read_to_string(temp_dir.path().join(format!("{}.json", code))).unwrap(),
            )
            .unwrap();
            assert_eq!(
                tree["Functions"]["f"]["name"],
                LOCALIZATION_REQUIRED,
                "{} not synchronized",
                code
            );
        }
        let de = std::fs::read_to_string(temp_dir.path().join("de.json")).unwrap();
        assert!(de.contains("kaputt"));
    }
}
