//! Canonical localization tree derived from the emitted descriptors.
//!
//! The tree only fixes the key structure; every leaf carries the
//! [`LOCALIZATION_REQUIRED`] placeholder and real text lives in the per-locale
//! resource files.

use crate::descriptor::ParameterDescriptor;
use crate::error::{GeneratorError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::HashSet;

pub const PARAMETERS_KEY: &str = "Parameters";
pub const FUNCTIONS_KEY: &str = "Functions";
pub const NAME_KEY: &str = "name";
pub const DESCRIPTION_KEY: &str = "description";
pub const DOCUMENTATION_URL_KEY: &str = "documentationURL";

/// Sentinel written wherever a translation is still needed.
pub const LOCALIZATION_REQUIRED: &str = "*** LOCALIZATION REQUIRED ***";

/// Key path of a function entry.
pub fn function_key(namespace: Option<&str>, function_name: &str) -> Vec<String> {
    let mut key = vec![FUNCTIONS_KEY.to_string()];
    key.extend(namespace.map(str::to_string));
    key.push(function_name.to_string());
    key
}

/// Key path of a parameter entry: its canonical identity under `Parameters`.
pub fn parameter_key(descriptor: &ParameterDescriptor) -> Vec<String> {
    let mut key = vec![PARAMETERS_KEY.to_string()];
    key.extend(descriptor.identity_path().into_iter().map(|(name, _)| name));
    key
}

#[derive(Debug, Default)]
struct ParameterNode {
    sort_order: Option<i32>,
    variants: IndexMap<String, ParameterNode>,
}

impl ParameterNode {
    fn to_value(&self) -> Value {
        let mut object = placeholder_entry();
        for (name, variant) in sorted(&self.variants) {
            object.insert(name.clone(), variant.to_value());
        }
        Value::Object(object)
    }
}

/// Siblings with a sort order come first, ascending; the rest keep
/// insertion order.
fn sorted(nodes: &IndexMap<String, ParameterNode>) -> Vec<(&String, &ParameterNode)> {
    let mut entries: Vec<_> = nodes.iter().collect();
    entries.sort_by_key(|(_, node)| (node.sort_order.is_none(), node.sort_order.unwrap_or(0)));
    entries
}

fn placeholder_entry() -> Map<String, Value> {
    let mut entry = Map::new();
    entry.insert(NAME_KEY.to_string(), Value::from(LOCALIZATION_REQUIRED));
    entry.insert(DESCRIPTION_KEY.to_string(), Value::from(LOCALIZATION_REQUIRED));
    entry
}

/// Accumulates functions and parameters in emission order.
#[derive(Debug, Default)]
pub struct CanonicalTreeBuilder {
    documentation_base_url: Option<String>,
    parameters: IndexMap<String, ParameterNode>,
    functions: Map<String, Value>,
    namespaces: HashSet<String>,
    root_functions: HashSet<String>,
}

impl CanonicalTreeBuilder {
    pub fn new(documentation_base_url: Option<String>) -> Self {
        Self {
            documentation_base_url: documentation_base_url
                .map(|url| url.trim_end_matches('/').to_string()),
            ..Self::default()
        }
    }

    /// Add a function entry. A namespace and a function without namespace
    /// share the `Functions` level, so their names must not collide.
    pub fn add_function(&mut self, namespace: Option<&str>, function_name: &str) -> Result<()> {
        let mut entry = placeholder_entry();
        if let Some(base_url) = &self.documentation_base_url {
            let url = match namespace {
                Some(namespace) => format!("{}/{}/{}", base_url, namespace, function_name),
                None => format!("{}/{}", base_url, function_name),
            };
            entry.insert(DOCUMENTATION_URL_KEY.to_string(), Value::from(url));
        }

        let container = match namespace {
            Some(namespace) => {
                if self.root_functions.contains(namespace) {
                    return Err(GeneratorError::DuplicateFunctionName(namespace.to_string()));
                }
                self.namespaces.insert(namespace.to_string());
                match self
                    .functions
                    .entry(namespace.to_string())
                    .or_insert_with(|| Value::Object(Map::new()))
                {
                    Value::Object(map) => map,
                    _ => return Err(GeneratorError::DuplicateFunctionName(namespace.to_string())),
                }
            }
            None => {
                if self.namespaces.contains(function_name) {
                    return Err(GeneratorError::DuplicateFunctionName(function_name.to_string()));
                }
                self.root_functions.insert(function_name.to_string());
                &mut self.functions
            }
        };

        container
            .entry(function_name.to_string())
            .or_insert(Value::Object(entry));
        Ok(())
    }

    /// Add a parameter under its canonical identity, creating the base
    /// entries of its extends-chain as needed.
    pub fn add_parameter(&mut self, descriptor: &ParameterDescriptor) -> Result<()> {
        let path = descriptor.identity_path();
        let mut level = &mut self.parameters;

        for (depth, (name, sort_order)) in path.into_iter().enumerate() {
            if depth > 0 && (name == NAME_KEY || name == DESCRIPTION_KEY) {
                return Err(GeneratorError::ReservedParameterName(name));
            }
            let node = level.entry(name).or_insert_with(|| ParameterNode {
                sort_order,
                variants: IndexMap::new(),
            });
            level = &mut node.variants;
        }

        Ok(())
    }

    pub fn build(&self) -> Value {
        let mut parameters = Map::new();
        for (name, node) in sorted(&self.parameters) {
            parameters.insert(name.clone(), node.to_value());
        }

        let mut root = Map::new();
        root.insert(PARAMETERS_KEY.to_string(), Value::Object(parameters));
        root.insert(FUNCTIONS_KEY.to_string(), Value::Object(self.functions.clone()));
        Value::Object(root)
    }
}
