//! Localization lookup over the loaded locale resource files.
//!
//! A strict lookup fails on any absent or untranslated entry. A best-effort
//! lookup substitutes the visible placeholder so generation can proceed and
//! the gap shows up in the generated output.

use crate::descriptor::ParameterDescriptor;
use crate::error::{GeneratorError, Result};
use crate::i18n::tree::{
    function_key, parameter_key, DESCRIPTION_KEY, DOCUMENTATION_URL_KEY, LOCALIZATION_REQUIRED,
    NAME_KEY,
};
use crate::i18n::{Locale, LocaleRegistry};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    Strict,
    #[default]
    BestEffort,
}

/// Localized name and description of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localization {
    pub name: String,
    pub description: String,
}

/// Everything a generator needs to document one function in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionLocalization {
    pub name: String,
    pub description: String,
    pub documentation_url: Option<String>,
    pub parameters: Vec<Localization>,
}

#[derive(Debug, Clone, Default)]
pub struct LocaleCatalog {
    trees: BTreeMap<Locale, Value>,
    policy: LookupPolicy,
}

impl LocaleCatalog {
    pub fn new(policy: LookupPolicy) -> Self {
        Self {
            trees: BTreeMap::new(),
            policy,
        }
    }

    /// Read every resource file in the registry.
    pub async fn load(registry: &LocaleRegistry, policy: LookupPolicy) -> Result<Self> {
        let mut catalog = Self::new(policy);
        for resource in registry.list_all() {
            let content = tokio::fs::read_to_string(&resource.path).await?;
            let tree: Value = serde_json::from_str(&content)?;
            debug!("Loaded locale {} from {}", resource.locale, resource.path.display());
            catalog.insert(resource.locale.clone(), tree);
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, locale: Locale, tree: Value) {
        self.trees.insert(locale, tree);
    }

    /// Find a translated string, falling back from a regional locale to its
    /// base locale.
    pub fn lookup(&self, locale: &Locale, key: &[String]) -> Result<String> {
        if let Some(value) = self.find_translated(locale, key) {
            return Ok(value.to_string());
        }

        match self.policy {
            LookupPolicy::Strict => Err(GeneratorError::MissingLocalization {
                locale: locale.code(),
                key: key.join("."),
            }),
            LookupPolicy::BestEffort => {
                debug!("No localization for {} in {}", key.join("."), locale);
                Ok(LOCALIZATION_REQUIRED.to_string())
            }
        }
    }

    /// Optional entries such as documentation URLs never fail.
    pub fn lookup_optional(&self, locale: &Locale, key: &[String]) -> Option<String> {
        self.find_translated(locale, key).map(str::to_string)
    }

    fn find_translated(&self, locale: &Locale, key: &[String]) -> Option<&str> {
        let mut candidates = vec![locale.clone()];
        if !locale.is_base() {
            candidates.push(locale.base());
        }

        candidates
            .iter()
            .filter_map(|candidate| self.trees.get(candidate))
            .filter_map(|tree| find(tree, key))
            .find(|value| *value != LOCALIZATION_REQUIRED)
    }

    /// Localize a function and its parameters for every loaded locale.
    pub fn localize_function(
        &self,
        namespace: Option<&str>,
        function_name: &str,
        parameters: &[ParameterDescriptor],
    ) -> Result<BTreeMap<String, FunctionLocalization>> {
        let function = function_key(namespace, function_name);
        let mut localizations = BTreeMap::new();

        for locale in self.trees.keys() {
            let mut parameter_localizations = Vec::with_capacity(parameters.len());
            for parameter in parameters {
                let key = parameter_key(parameter);
                parameter_localizations.push(Localization {
                    name: self.lookup(locale, &with_leaf(&key, NAME_KEY))?,
                    description: self.lookup(locale, &with_leaf(&key, DESCRIPTION_KEY))?,
                });
            }

            let localization = FunctionLocalization {
                name: self.lookup(locale, &with_leaf(&function, NAME_KEY))?,
                description: self.lookup(locale, &with_leaf(&function, DESCRIPTION_KEY))?,
                documentation_url: self
                    .lookup_optional(locale, &with_leaf(&function, DOCUMENTATION_URL_KEY)),
                parameters: parameter_localizations,
            };

            if localization.name == LOCALIZATION_REQUIRED {
                warn!("Function {} is not localized for {}", function_name, locale);
            }
            localizations.insert(locale.code(), localization);
        }

        Ok(localizations)
    }
}

fn with_leaf(key: &[String], leaf: &str) -> Vec<String> {
    let mut full = key.to_vec();
    full.push(leaf.to_string());
    full
}

fn find<'a>(tree: &'a Value, key: &[String]) -> Option<&'a str> {
    key.iter()
        .try_fold(tree, |node, segment| node.get(segment.as_str()))
        .and_then(Value::as_str)
}
