use anyhow::{Context, Result};

use chemsep_db::PipelineConfig;

use crate::cli::PipelineArgs;

/// Layers command-line overrides on top of the configuration file, if any.
pub fn build_pipeline_config(args: &PipelineArgs) -> Result<PipelineConfig> {
    let paths = &args.paths;

    let mut config = match &paths.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(components) = &paths.components {
        config.input.components = components.clone();
    }
    if let Some(interactions) = &paths.interactions {
        config.input.interactions = interactions.clone();
    }
    if let Some(dir) = &paths.out_dir {
        config = config.with_out_dir(dir);
    }
    config.strict |= args.strict;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PathOptions;
    use std::path::PathBuf;

    fn args(paths: PathOptions, strict: bool) -> PipelineArgs {
        PipelineArgs {
            paths,
            strict,
            quiet: true,
        }
    }

    fn no_paths() -> PathOptions {
        PathOptions {
            config: None,
            components: None,
            interactions: None,
            out_dir: None,
        }
    }

    #[test]
    fn defaults_without_overrides() {
        let config = build_pipeline_config(&args(no_paths(), false)).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("csdb.toml");
        std::fs::write(
            &file,
            "strict = false\n[input]\ncomponents = \"a.pct\"\ninteractions = \"a.ipd\"\n",
        )
        .unwrap();

        let paths = PathOptions {
            config: Some(file),
            components: Some(PathBuf::from("b.pct")),
            interactions: None,
            out_dir: Some(PathBuf::from("out")),
        };
        let config = build_pipeline_config(&args(paths, true)).unwrap();

        assert!(config.strict);
        assert_eq!(config.input.components, PathBuf::from("b.pct"));
        assert_eq!(config.input.interactions, PathBuf::from("a.ipd"));
        assert_eq!(config.output.names, PathBuf::from("out").join("namesdb.json"));
    }

    #[test]
    fn missing_config_file_is_reported() {
        let paths = PathOptions {
            config: Some(PathBuf::from("does/not/exist.toml")),
            ..no_paths()
        };
        let err = build_pipeline_config(&args(paths, false)).unwrap_err();
        assert!(err.to_string().contains("exist.toml"));
    }
}
