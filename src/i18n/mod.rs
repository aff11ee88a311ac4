//! Internationalization: canonical localization trees, locale file
//! synchronization and localization lookup.
//!
//! # Architecture
//!
//! - `locale`: validated locale codes, base vs regional
//! - `registry`: locale resource files present on disk
//! - `tree`: canonical key tree derived from the descriptors
//! - `merge`: schema-aware merge of the canonical tree into a locale tree
//! - `sync`: the synchronizing generator and concurrent file merges
//! - `catalog`: strict and best-effort lookup of translated strings
//! - `validator`: completeness checks on merged locale trees
//!
//! # Example
//!
//! ```rust,ignore
//! use proxy_generator::i18n::{merge, Locale};
//!
//! let locale = Locale::from_code("fr-CA")?;
//! let outcome = merge(true, "fr-CA", &canonical, &existing, locale.is_base())?;
//! ```

mod catalog;
mod locale;
mod merge;
mod registry;
mod sync;
mod tree;
mod validator;

pub use catalog::{FunctionLocalization, LocaleCatalog, Localization, LookupPolicy};
pub use locale::Locale;
pub use merge::{merge, MergeOutcome, MergeReport};
pub use registry::{LocaleRegistry, LocaleResource};
pub use sync::{synchronize_locales, LocaleSyncResult, LocaleSynchronizer};
pub use tree::{
    function_key, parameter_key, CanonicalTreeBuilder, DESCRIPTION_KEY, DOCUMENTATION_URL_KEY,
    FUNCTIONS_KEY, LOCALIZATION_REQUIRED, NAME_KEY, PARAMETERS_KEY,
};
pub use validator::{check_completeness, CompletenessReport};
