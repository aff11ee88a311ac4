//! Locale registry: the set of locale resource files present on disk.
//!
//! Each locale is stored as `<locale>.json` in the locales directory. The
//! registry is discovered once per run and drives both synchronization and
//! catalog loading.

use crate::error::Result;
use crate::i18n::Locale;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const RESOURCE_EXTENSION: &str = "json";

/// A locale and the file holding its resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleResource {
    pub locale: Locale,
    pub path: PathBuf,
}

/// Locale resource files found in a directory, ordered by locale code.
#[derive(Debug, Clone, Default)]
pub struct LocaleRegistry {
    resources: Vec<LocaleResource>,
}

impl LocaleRegistry {
    /// Scan `dir` for locale resource files.
    ///
    /// A missing directory yields an empty registry. Files whose stem is not
    /// a locale code are skipped with a warning.
    pub fn discover(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            warn!("Locale directory {} not found", dir.display());
            return Ok(Self::default());
        }

        let mut resources = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RESOURCE_EXTENSION) {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            match Locale::from_code(stem) {
                Ok(locale) => {
                    debug!("Found locale {} at {}", locale, path.display());
                    resources.push(LocaleResource { locale, path });
                }
                Err(_) => warn!("Skipping {}: not a locale code", path.display()),
            }
        }

        resources.sort_by(|a, b| a.locale.cmp(&b.locale));
        Ok(Self { resources })
    }

    pub fn list_all(&self) -> &[LocaleResource] {
        &self.resources
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
