//! Error taxonomy for the generation pipeline.
//!
//! Authoring defects mean the proxy definitions themselves are malformed and
//! abort the run. Schema mismatches abort a single locale merge. Missing
//! localizations only surface under a strict lookup policy.

use thiserror::Error;

pub type Result<T, E = GeneratorError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("parameter descriptor missing at index {index} of method {class_name}.{method_name}")]
    MissingDescriptor {
        class_name: String,
        method_name: String,
        index: usize,
    },

    #[error(
        "required parameter {parameter} follows optional parameter {predecessor} in method {class_name}.{method_name}"
    )]
    OrderingViolation {
        class_name: String,
        method_name: String,
        parameter: String,
        predecessor: String,
    },

    #[error("duplicate parameter {parameter} in method {class_name}.{method_name}")]
    DuplicateParameterName {
        class_name: String,
        method_name: String,
        parameter: String,
    },

    #[error("module {module} registered {count} parameter(s) without a method")]
    DanglingParameters { module: String, count: usize },

    #[error("invalid class name {0:?}")]
    InvalidClassName(String),

    #[error("infix anchor {anchor:?} not found in method name {method_name}")]
    InfixAnchorNotFound { method_name: String, anchor: String },

    #[error("duplicate function name {0}")]
    DuplicateFunctionName(String),

    #[error("class {0} has not been declared")]
    UnknownClass(String),

    #[error("base class {base_class_name} of {class_name} has not been declared")]
    UnknownBaseClass {
        class_name: String,
        base_class_name: String,
    },

    #[error("class hierarchy of {0} is cyclic")]
    HierarchyCycle(String),

    #[error("parameter variant name {0:?} collides with a reserved localization key")]
    ReservedParameterName(String),

    #[error("schema mismatch at {path}: source is {source_kind}, destination is {destination_kind}")]
    SchemaMismatch {
        path: String,
        source_kind: &'static str,
        destination_kind: &'static str,
    },

    #[error("missing localization {key} for locale {locale}")]
    MissingLocalization { locale: String, key: String },

    #[error("invalid locale code {0:?}")]
    InvalidLocale(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// True for defects in the proxy definitions themselves.
    pub fn is_authoring_defect(&self) -> bool {
        matches!(
            self,
            Self::MissingDescriptor { .. }
                | Self::OrderingViolation { .. }
                | Self::DuplicateParameterName { .. }
                | Self::DanglingParameters { .. }
                | Self::InvalidClassName(_)
                | Self::InfixAnchorNotFound { .. }
                | Self::DuplicateFunctionName(_)
                | Self::UnknownClass(_)
                | Self::UnknownBaseClass { .. }
                | Self::HierarchyCycle(_)
                | Self::ReservedParameterName(_)
        )
    }
}
