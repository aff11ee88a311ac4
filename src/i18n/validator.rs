//! Translation completeness checks for merged locale trees.
//!
//! Runs after synchronization so translators can see which entries still
//! hold the placeholder and which were left blank.

use crate::i18n::LOCALIZATION_REQUIRED;
use serde_json::Value;

/// Dotted key paths of the leaves that still need a translator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletenessReport {
    /// Leaves still holding [`LOCALIZATION_REQUIRED`].
    pub untranslated: Vec<String>,
    /// Leaves a translator emptied; these render as blank names in Excel.
    pub blank: Vec<String>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.untranslated.is_empty() && self.blank.is_empty()
    }
}

/// Walk every string leaf of a locale tree and collect the gaps.
pub fn check_completeness(tree: &Value) -> CompletenessReport {
    let mut report = CompletenessReport::default();
    collect_gaps(tree, &mut Vec::new(), &mut report);
    report
}

fn collect_gaps<'a>(node: &'a Value, path: &mut Vec<&'a str>, report: &mut CompletenessReport) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                path.push(key);
                collect_gaps(child, path, report);
                path.pop();
            }
        }
        Value::String(text) if text == LOCALIZATION_REQUIRED => {
            report.untranslated.push(path.join("."));
        }
        Value::String(text) if text.trim().is_empty() => {
            report.blank.push(path.join("."));
        }
        _ => {}
    }
}
