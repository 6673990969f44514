//! Resolver settings.
//!
//! [`ResolverConfig`] collects the knobs a host sets once: which mapping document to load,
//! whether lines of obfuscator-generated methods are dropped, whether intercepted log
//! records get resolved, and when a resolution call fans out over the thread pool. It is
//! stored as camelCase JSON so settings written by editor tooling can be read back.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::Result;

/// File name used for the mapping document when no explicit path is configured.
pub const DEFAULT_MAPPING_FILE: &str = "mapping.xml";

/// Line count from which [`crate::resolve_text`] resolves lines in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

/// Settings for a [`crate::SymbolResolver`] and its log hook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolverConfig {
    /// Mapping document to load; `None` leaves the resolver unloaded.
    pub mapping_file: Option<PathBuf>,

    /// Drop resolved lines starting with the `$Obfuz$` marker (default: false).
    pub filter_generated: bool,

    /// Install interception on handlers built with
    /// [`crate::hook::ResolvingHandler::from_config`] (default: false).
    pub hook_logs: bool,

    /// Minimum number of lines before resolution is spread across threads (default: 256).
    pub parallel_threshold: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            mapping_file: None,
            filter_generated: false,
            hook_logs: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ResolverConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads settings from a JSON file. Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns [`crate::Error::FileError`] if the file cannot be read and
    /// [`crate::Error::Config`] if it is not valid settings JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses settings from JSON text. Blank input yields the defaults.
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] if the text is not valid settings JSON.
    pub fn from_json(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(content)?)
    }

    /// Writes the settings as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns [`crate::Error::Config`] on serialization failure and
    /// [`crate::Error::FileError`] if the file cannot be written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Sets the mapping document to load.
    #[must_use]
    pub fn with_mapping_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.mapping_file = Some(path.into());
        self
    }

    /// Enables or disables dropping obfuscator-generated lines.
    #[must_use]
    pub fn with_filter_generated(mut self, enabled: bool) -> Self {
        self.filter_generated = enabled;
        self
    }

    /// Mapping document inside `directory` under the default file name.
    #[must_use]
    pub fn default_mapping_path(directory: &Path) -> PathBuf {
        directory.join(DEFAULT_MAPPING_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.mapping_file, None);
        assert!(!config.filter_generated);
        assert!(!config.hook_logs);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config =
            ResolverConfig::from_json(r#"{ "filterGenerated": true, "mappingFile": "out/map.xml" }"#)
                .unwrap();
        assert!(config.filter_generated);
        assert_eq!(config.mapping_file, Some(PathBuf::from("out/map.xml")));
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_blank_json() {
        assert_eq!(ResolverConfig::from_json("  ").unwrap(), ResolverConfig::default());
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ResolverConfig::from_json("{ filterGenerated: yes }"),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let config = ResolverConfig::new()
            .with_mapping_file("mapping.xml")
            .with_filter_generated(true);
        config.save(&path).unwrap();
        assert_eq!(ResolverConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_default_mapping_path() {
        assert_eq!(
            ResolverConfig::default_mapping_path(Path::new("data")),
            PathBuf::from("data").join("mapping.xml")
        );
    }
}
