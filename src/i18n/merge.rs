//! Schema-aware merge of a canonical tree into a translated locale tree.
//!
//! Translator strings in the destination are never overwritten. Keys the
//! source no longer has are dropped, except at the document root where
//! hand-authored sections are kept. Keys the destination lacks are added
//! only when `add_missing` is set, which is the case for base locales.

use crate::error::{GeneratorError, Result};
use serde_json::{Map, Value};
use tracing::info;

/// Keys added to and removed from a destination tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl MergeReport {
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub tree: Value,
    pub report: MergeReport,
}

/// Merge `source` into `destination`, producing a new tree.
///
/// `path` labels log output (usually the locale code or file name).
pub fn merge(
    log_changes: bool,
    path: &str,
    source: &Value,
    destination: &Value,
    add_missing: bool,
) -> Result<MergeOutcome> {
    let (Value::Object(source), Value::Object(destination)) = (source, destination) else {
        return Err(GeneratorError::SchemaMismatch {
            path: "<root>".to_string(),
            source_kind: kind(source),
            destination_kind: kind(destination),
        });
    };

    let mut merger = Merger {
        log_changes,
        label: path,
        add_missing,
        report: MergeReport::default(),
    };

    let tree = merger.merge_objects(None, source, destination)?;
    Ok(MergeOutcome {
        tree: Value::Object(tree),
        report: merger.report,
    })
}

struct Merger<'a> {
    log_changes: bool,
    label: &'a str,
    add_missing: bool,
    report: MergeReport,
}

impl Merger<'_> {
    /// `parent` is `None` at the document root.
    fn merge_objects(
        &mut self,
        parent: Option<&str>,
        source: &Map<String, Value>,
        destination: &Map<String, Value>,
    ) -> Result<Map<String, Value>> {
        let mut merged = Map::new();

        for (key, destination_value) in destination {
            let key_path = child_path(parent, key);
            match source.get(key) {
                Some(source_value) => {
                    let value = self.merge_values(&key_path, source_value, destination_value)?;
                    merged.insert(key.clone(), value);
                }
                None if parent.is_none() => {
                    merged.insert(key.clone(), destination_value.clone());
                }
                None => {
                    if self.log_changes {
                        info!("{}: removed {}", self.label, key_path);
                    }
                    self.report.removed.push(key_path);
                }
            }
        }

        if self.add_missing {
            for (key, source_value) in source {
                if destination.contains_key(key) {
                    continue;
                }
                let key_path = child_path(parent, key);
                if self.log_changes {
                    info!("{}: added {}", self.label, key_path);
                }
                self.report.added.push(key_path);
                merged.insert(key.clone(), source_value.clone());
            }
        }

        Ok(merged)
    }

    fn merge_values(&mut self, path: &str, source: &Value, destination: &Value) -> Result<Value> {
        match (source, destination) {
            (Value::Object(source), Value::Object(destination)) => Ok(Value::Object(
                self.merge_objects(Some(path), source, destination)?,
            )),
            // Translator content is authoritative.
            (Value::String(_), Value::String(_)) => Ok(destination.clone()),
            _ => Err(GeneratorError::SchemaMismatch {
                path: path.to_string(),
                source_kind: kind(source),
                destination_kind: kind(destination),
            }),
        }
    }
}

fn child_path(parent: Option<&str>, key: &str) -> String {
    match parent {
        Some(parent) => format!("{}.{}", parent, key),
        None => key.to_string(),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
