//! Locale type: validated language code with an optional region.
//!
//! Base locales (`fr`) receive newly added keys during synchronization;
//! regional variants (`fr-CA`) only lose stale keys and otherwise fall back
//! to their base locale at lookup time.

use crate::error::{GeneratorError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

static LOCALE_REGEX: OnceLock<Regex> = OnceLock::new();

/// A validated locale code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    /// ISO 639 language code (e.g., "en", "fr")
    language: String,

    /// Region or script suffix (e.g., "CA"), absent for base locales
    region: Option<String>,
}

impl Locale {
    /// Create a Locale from a code such as `fr` or `fr-CA`.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is well formed
    /// * `Err(InvalidLocale)` otherwise
    pub fn from_code(code: &str) -> Result<Locale> {
        let regex = LOCALE_REGEX
            .get_or_init(|| Regex::new(r"^([a-z]{2,3})(?:-([A-Za-z0-9]{2,8}))?$").unwrap());

        let captures = regex
            .captures(code)
            .ok_or_else(|| GeneratorError::InvalidLocale(code.to_string()))?;

        Ok(Locale {
            language: captures[1].to_string(),
            region: captures.get(2).map(|m| m.as_str().to_string()),
        })
    }

    pub fn code(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.language, region),
            None => self.language.clone(),
        }
    }

    /// True when the locale carries no region suffix.
    pub fn is_base(&self) -> bool {
        self.region.is_none()
    }

    /// The language-only locale this one falls back to.
    pub fn base(&self) -> Locale {
        Locale {
            language: self.language.clone(),
            region: None,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl FromStr for Locale {
    type Err = GeneratorError;

    fn from_str(code: &str) -> Result<Self> {
        Locale::from_code(code)
    }
}
