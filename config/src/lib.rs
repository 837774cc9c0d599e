//! Configuration loading for Motus.
//!
//! Two concerns live here: resolving runtime [`Settings`] from the process
//! environment, and loading the static exercise [`Catalog`] once at process
//! start. A missing or unparseable catalog is fatal — the pipeline must not
//! serve requests without one.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use motus_types::Catalog;
use thiserror::Error;

/// Overrides the catalog location.
pub const CATALOG_PATH_ENV: &str = "MOTUS_CATALOG_PATH";
/// API key for the remote plan-formatting service.
pub const API_KEY_ENV: &str = "MOTUS_API_KEY";
/// Alias honored for deployments configured against the provider directly.
pub const API_KEY_ENV_ALIAS: &str = "GROQ_API_KEY";
/// Overrides the formatting model.
pub const MODEL_ENV: &str = "MOTUS_MODEL";
/// Overrides the formatting service base URL.
pub const API_BASE_URL_ENV: &str = "MOTUS_API_BASE_URL";

/// Relative path used when [`CATALOG_PATH_ENV`] is not set.
pub const DEFAULT_CATALOG_PATH: &str = "data/catalog.json";
/// Model used when [`MODEL_ENV`] is not set.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
/// Endpoint used when [`API_BASE_URL_ENV`] is not set.
pub const DEFAULT_API_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Settings {
    pub catalog_path: PathBuf,
    /// Present only when an API key is configured; absence selects the
    /// offline formatter.
    pub api: Option<ApiSettings>,
}

/// Remote formatting service credentials and selection.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl Settings {
    /// Resolve settings from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(env_value)
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let catalog_path = lookup(CATALOG_PATH_ENV)
            .map_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH), PathBuf::from);

        let api = lookup(API_KEY_ENV)
            .or_else(|| lookup(API_KEY_ENV_ALIAS))
            .map(|api_key| ApiSettings {
                api_key,
                model: lookup(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: lookup(API_BASE_URL_ENV)
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            });

        Self { catalog_path, api }
    }
}

fn env_value(name: &str) -> Option<String> {
    match env::var(name) {
        Ok(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Err(_) => None,
    }
}

/// Fatal startup failures around the exercise catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog at '{path}'")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse catalog at '{path}'")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog at '{path}' contains no entries")]
    Empty { path: PathBuf },
}

/// Load the catalog from a JSON array of entries.
///
/// Called once at startup; the returned catalog is treated as immutable for
/// the process lifetime. An empty catalog is rejected the same way as a
/// missing one.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let bytes = fs::read(path).map_err(|source| CatalogError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog: Catalog = serde_json::from_slice(&bytes).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if catalog.is_empty() {
        return Err(CatalogError::Empty {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(entries = catalog.len(), path = %path.display(), "catalog parsed");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|&(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn settings_default_to_offline() {
        let settings = Settings::from_lookup(lookup_from(&[]));
        assert_eq!(settings.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert!(settings.api.is_none());
    }

    #[test]
    fn api_key_enables_the_remote_formatter_with_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[(API_KEY_ENV, "sk-motus")]));
        let api = settings.api.expect("api settings");
        assert_eq!(api.api_key, "sk-motus");
        assert_eq!(api.model, DEFAULT_MODEL);
        assert_eq!(api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn alias_key_is_honored_and_overrides_apply() {
        let settings = Settings::from_lookup(lookup_from(&[
            (API_KEY_ENV_ALIAS, "gsk-legacy"),
            (MODEL_ENV, "mixtral-8x7b"),
            (API_BASE_URL_ENV, "https://llm.internal/v1"),
            (CATALOG_PATH_ENV, "/srv/motus/catalog.json"),
        ]));
        assert_eq!(settings.catalog_path, PathBuf::from("/srv/motus/catalog.json"));
        let api = settings.api.expect("api settings");
        assert_eq!(api.api_key, "gsk-legacy");
        assert_eq!(api.model, "mixtral-8x7b");
        assert_eq!(api.base_url, "https://llm.internal/v1");
    }

    #[test]
    fn load_catalog_round_trips_a_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "sq-1", "name": "Box Squat", "category": "squat", "level": 4,
                 "tags": ["knee-tracking"], "description": "Sit back to a box."}}]"#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.iter().next().unwrap().level.get(), 4);
    }

    #[test]
    fn missing_catalog_is_a_read_error() {
        let error = load_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(error, CatalogError::Read { .. }));
    }

    #[test]
    fn malformed_catalog_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            load_catalog(file.path()).unwrap_err(),
            CatalogError::Parse { .. }
        ));
    }

    #[test]
    fn out_of_range_level_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": "x", "name": "X", "category": "squat", "level": 12}}]"#
        )
        .unwrap();
        assert!(matches!(
            load_catalog(file.path()).unwrap_err(),
            CatalogError::Parse { .. }
        ));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();
        assert!(matches!(
            load_catalog(file.path()).unwrap_err(),
            CatalogError::Empty { .. }
        ));
    }
}
