//! Creator export sources, loaded from `config/sources.yaml`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::platform::Platform;
use crate::ConfigError;

/// Per-field column candidate overrides for one source.
///
/// A field left as `None` keeps the built-in candidate list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnOverrides {
    pub id: Option<Vec<String>>,
    pub name: Option<Vec<String>>,
    pub handle: Option<Vec<String>>,
    pub followers: Option<Vec<String>>,
    pub location: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub image: Option<Vec<String>>,
    pub bio: Option<Vec<String>>,
}

/// One CSV export: where it lives and which platform its rows belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub platform: Platform,
    /// Local path or `http(s)://` URL.
    pub location: String,
    #[serde(default)]
    pub columns: ColumnOverrides,
}

impl SourceConfig {
    #[must_use]
    pub fn new(platform: Platform, location: impl Into<String>) -> Self {
        Self {
            platform,
            location: location.into(),
            columns: ColumnOverrides::default(),
        }
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        is_remote_location(&self.location)
    }
}

/// `true` for `http://` and `https://` locations.
#[must_use]
pub fn is_remote_location(location: &str) -> bool {
    let lower = location.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceConfig>,
}

impl Default for SourcesFile {
    /// The four per-platform exports shipped with the explore page.
    fn default() -> Self {
        let sources = [
            (Platform::Instagram, "instagram"),
            (Platform::Threads, "threads"),
            (Platform::TikTok, "tiktok"),
            (Platform::YouTube, "youtube"),
        ]
        .into_iter()
        .map(|(platform, stem)| {
            SourceConfig::new(platform, format!("./data/{stem}_data_all-countries.csv"))
        })
        .collect();
        Self { sources }
    }
}

/// Load and validate the sources configuration from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_sources(&content)
}

/// Like [`load_sources`], but falls back to [`SourcesFile::default`] when the
/// file does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if an existing file cannot be read, parsed, or fails
/// validation.
pub fn load_sources_or_default(path: &Path) -> Result<SourcesFile, ConfigError> {
    if path.exists() {
        load_sources(path)
    } else {
        Ok(SourcesFile::default())
    }
}

/// Parse and validate sources YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(content: &str) -> Result<SourcesFile, ConfigError> {
    let sources_file: SourcesFile =
        serde_yaml::from_str(content).map_err(ConfigError::SourcesFileParse)?;

    validate_sources(&sources_file)?;

    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    if sources_file.sources.is_empty() {
        return Err(ConfigError::Validation(
            "at least one source must be configured".to_string(),
        ));
    }

    let mut seen_platforms = HashSet::new();

    for source in &sources_file.sources {
        if source.location.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "source for platform '{}' has an empty location",
                source.platform
            )));
        }

        // Base ids restart at 1 in every file, so two files on one platform
        // would hand out the same identities.
        if !seen_platforms.insert(source.platform.slug()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source platform: '{}'",
                source.platform
            )));
        }

        let overrides = [
            ("id", &source.columns.id),
            ("name", &source.columns.name),
            ("handle", &source.columns.handle),
            ("followers", &source.columns.followers),
            ("location", &source.columns.location),
            ("tags", &source.columns.tags),
            ("image", &source.columns.image),
            ("bio", &source.columns.bio),
        ];
        for (field, columns) in overrides {
            if columns.as_ref().is_some_and(Vec::is_empty) {
                return Err(ConfigError::Validation(format!(
                    "source '{}' overrides '{field}' with an empty column list",
                    source.platform
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
