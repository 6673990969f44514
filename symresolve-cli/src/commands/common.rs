use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use symresolve::{ResolveOptions, ResolverConfig, SymbolResolver};

use crate::app::GlobalOptions;

/// Settings from `--config`, or the defaults when none was given.
pub fn load_config(opts: &GlobalOptions) -> anyhow::Result<ResolverConfig> {
    match &opts.config {
        Some(path) => ResolverConfig::from_file(path)
            .with_context(|| format!("failed to read settings: {}", path.display())),
        None => Ok(ResolverConfig::default()),
    }
}

/// The mapping document named on the command line, else the one from the settings.
pub fn mapping_path(mapping: Option<&Path>, config: &ResolverConfig) -> anyhow::Result<PathBuf> {
    mapping
        .map(Path::to_path_buf)
        .or_else(|| config.mapping_file.clone())
        .ok_or_else(|| anyhow!("no mapping file given; pass --mapping or set mappingFile in --config"))
}

/// Build a resolver from the settings and load the selected mapping document.
pub fn load_resolver(
    mapping: Option<&Path>,
    opts: &GlobalOptions,
) -> anyhow::Result<(SymbolResolver, ResolverConfig)> {
    let config = load_config(opts)?;
    let path = mapping_path(mapping, &config)?;

    let resolver = SymbolResolver::with_options(ResolveOptions {
        filter_generated: config.filter_generated,
        parallel_threshold: config.parallel_threshold,
    });
    resolver
        .load_file(&path)
        .with_context(|| format!("failed to load mapping: {}", path.display()))?;

    Ok((resolver, config))
}

/// Extract a display-friendly filename from a path.
pub fn file_display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_mapping_wins_over_settings() {
        let config = ResolverConfig::new().with_mapping_file("settings.xml");
        assert_eq!(
            mapping_path(Some(Path::new("cli.xml")), &config).unwrap(),
            PathBuf::from("cli.xml")
        );
        assert_eq!(
            mapping_path(None, &config).unwrap(),
            PathBuf::from("settings.xml")
        );
        assert!(mapping_path(None, &ResolverConfig::default()).is_err());
    }

    #[test]
    fn settings_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        ResolverConfig::new()
            .with_filter_generated(true)
            .save(&path)
            .unwrap();

        let opts = GlobalOptions {
            json: false,
            verbose: false,
            config: Some(path),
        };
        assert!(load_config(&opts).unwrap().filter_generated);
    }

    #[test]
    fn display_name_is_file_name() {
        assert_eq!(file_display_name(Path::new("logs/player.log")), "player.log");
    }
}
