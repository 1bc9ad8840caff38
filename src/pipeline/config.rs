use super::error::Error;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File locations and policy for a pipeline run.
///
/// Loaded from TOML; every key is optional and falls back to the file names
/// the ChemSep export uses.
///
/// ```toml
/// strict = false
///
/// [input]
/// components = "chemsepdb.pct"
/// interactions = "pr.ipd"
///
/// [output]
/// components = "chemsepdb.json"
/// names = "namesdb.json"
/// interactions = "pripdb.json"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Fail the run if any component block is malformed.
    #[serde(default)]
    pub strict: bool,
    #[serde(default)]
    pub input: InputPaths,
    #[serde(default)]
    pub output: OutputPaths,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputPaths {
    #[serde(default = "default_component_db")]
    pub components: PathBuf,
    #[serde(default = "default_interaction_db")]
    pub interactions: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputPaths {
    #[serde(default = "default_components_json")]
    pub components: PathBuf,
    #[serde(default = "default_names_json")]
    pub names: PathBuf,
    #[serde(default = "default_interactions_json")]
    pub interactions: PathBuf,
}

fn default_component_db() -> PathBuf {
    PathBuf::from("chemsepdb.pct")
}
fn default_interaction_db() -> PathBuf {
    PathBuf::from("pr.ipd")
}
fn default_components_json() -> PathBuf {
    PathBuf::from("chemsepdb.json")
}
fn default_names_json() -> PathBuf {
    PathBuf::from("namesdb.json")
}
fn default_interactions_json() -> PathBuf {
    PathBuf::from("pripdb.json")
}

impl Default for InputPaths {
    fn default() -> Self {
        Self {
            components: default_component_db(),
            interactions: default_interaction_db(),
        }
    }
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            components: default_components_json(),
            names: default_names_json(),
            interactions: default_interactions_json(),
        }
    }
}

impl OutputPaths {
    /// Moves every output file name into `dir`.
    pub fn relocate(&mut self, dir: &Path) {
        for path in [&mut self.components, &mut self.names, &mut self.interactions] {
            if let Some(name) = path.file_name() {
                *path = dir.join(name);
            }
        }
    }
}

impl PipelineConfig {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn with_out_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output.relocate(dir.as_ref());
        self
    }
}
