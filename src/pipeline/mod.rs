//! Stage sequencing for the database conversion.
//!
//! The conversion runs in three stages, each consuming the output of the one
//! before it:
//!
//! 1. [`Stage::Components`] parses the component database into
//!    [`ComponentRecord`]s.
//! 2. [`Stage::Names`] projects those records onto a name index.
//! 3. [`Stage::Interactions`] parses the interaction parameter file and
//!    resolves CASNs through the name index.
//!
//! [`run_all`] keeps every intermediate result in memory and only writes the
//! three JSON files once all stages succeeded. The single-stage runners read
//! the previous stage's persisted JSON instead, so a stage can never run
//! against output that does not exist yet.

mod config;
mod error;
mod names;
mod persist;

pub use config::{InputPaths, OutputPaths, PipelineConfig};
pub use error::Error;
pub use names::build_name_index;
pub use persist::{read_json, write_json_atomic};

use persist::StagedJson;

use crate::io::{self, ParsedComponents, ParsedInteractions, ipd, pct};
use crate::model::component::ComponentRecord;
use crate::model::names::{NameIndex, NameIndexEntry};
use log::info;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Components,
    Names,
    Interactions,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Components, Stage::Names, Stage::Interactions];

    /// The stage whose persisted output this stage reads, if any.
    pub fn upstream(self) -> Option<Stage> {
        match self {
            Stage::Components => None,
            Stage::Names => Some(Stage::Components),
            Stage::Interactions => Some(Stage::Names),
        }
    }

    pub fn output_path(self, config: &PipelineConfig) -> &Path {
        match self {
            Stage::Components => &config.output.components,
            Stage::Names => &config.output.names,
            Stage::Interactions => &config.output.interactions,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Components => write!(f, "component parse"),
            Stage::Names => write!(f, "name-index build"),
            Stage::Interactions => write!(f, "interaction parse"),
        }
    }
}

/// Everything a full pipeline run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOutput {
    pub components: ParsedComponents,
    pub names: NameIndex,
    pub interactions: ParsedInteractions,
}

/// Runs all three stages and writes their outputs.
///
/// Nothing is written unless every stage succeeded.
pub fn run_all(config: &PipelineConfig) -> Result<PipelineOutput, Error> {
    let components = parse_components(config)?;
    let names = build_name_index(&components.records);
    let interactions = parse_interactions(config, &names.entries)?;

    let output = PipelineOutput {
        components,
        names,
        interactions,
    };
    write_outputs(config, &output)?;
    Ok(output)
}

/// Writes the three JSON outputs of a completed run.
///
/// All three files are written to temporary siblings before any of them is
/// renamed into place, so a failed write leaves every previous output as it
/// was.
pub fn write_outputs(config: &PipelineConfig, output: &PipelineOutput) -> Result<(), Error> {
    let staged = [
        stage_output(Stage::Components, config, &output.components.records)?,
        stage_output(Stage::Names, config, &output.names.entries)?,
        stage_output(Stage::Interactions, config, &output.interactions.records)?,
    ];
    for (stage, file) in staged {
        commit(stage, config, file)?;
    }
    Ok(())
}

/// Runs [`Stage::Components`] alone.
pub fn run_components(config: &PipelineConfig) -> Result<ParsedComponents, Error> {
    let components = parse_components(config)?;
    persist(Stage::Components, config, &components.records)?;
    Ok(components)
}

/// Runs [`Stage::Names`] from the persisted component records.
pub fn run_names(config: &PipelineConfig) -> Result<NameIndex, Error> {
    let records: Vec<ComponentRecord> = load_upstream(Stage::Names, config)?;
    let names = build_name_index(&records);
    persist(Stage::Names, config, &names.entries)?;
    Ok(names)
}

/// Runs [`Stage::Interactions`] from the persisted name index.
pub fn run_interactions(config: &PipelineConfig) -> Result<ParsedInteractions, Error> {
    let index: Vec<NameIndexEntry> = load_upstream(Stage::Interactions, config)?;
    let interactions = parse_interactions(config, &index)?;
    persist(Stage::Interactions, config, &interactions.records)?;
    Ok(interactions)
}

/// Reads and parses the component database without writing anything.
///
/// In strict mode any malformed block fails the stage.
pub fn parse_components(config: &PipelineConfig) -> Result<ParsedComponents, Error> {
    let stage = Stage::Components;
    let path = &config.input.components;
    let reader = open(stage, path)?;

    let parsed = pct::read(reader).map_err(|source| Error::Parse {
        stage,
        path: path.clone(),
        source,
    })?;

    if config.strict {
        if let Some(first) = parsed.failures.first() {
            return Err(Error::Strict {
                stage,
                count: parsed.failures.len(),
                first: first.clone(),
            });
        }
    }

    info!(
        "{stage}: {} records from {} blocks in '{}'",
        parsed.records.len(),
        parsed.block_count(),
        path.display()
    );
    Ok(parsed)
}

/// Reads and parses the interaction file against `index` without writing anything.
pub fn parse_interactions(
    config: &PipelineConfig,
    index: &[NameIndexEntry],
) -> Result<ParsedInteractions, Error> {
    let stage = Stage::Interactions;
    let path = &config.input.interactions;
    let reader = open(stage, path)?;

    let parsed = ipd::read(reader, index).map_err(|source| Error::Parse {
        stage,
        path: path.clone(),
        source,
    })?;

    info!(
        "{stage}: {} records, {} lines skipped in '{}'",
        parsed.records.len(),
        parsed.skipped_lines,
        path.display()
    );
    Ok(parsed)
}

fn open(stage: Stage, path: &Path) -> Result<BufReader<File>, Error> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| Error::Open {
            stage,
            path: path.to_path_buf(),
            source,
        })
}

fn load_upstream<T: serde::de::DeserializeOwned>(
    stage: Stage,
    config: &PipelineConfig,
) -> Result<Vec<T>, Error> {
    let upstream = stage.upstream().unwrap_or(stage);
    let path = upstream.output_path(config);

    read_json(path).map_err(|source| match source {
        io::Error::Io { source } => Error::Upstream {
            stage,
            upstream,
            path: path.to_path_buf(),
            source,
        },
        other => Error::Parse {
            stage,
            path: path.to_path_buf(),
            source: other,
        },
    })
}

fn persist<T: serde::Serialize>(
    stage: Stage,
    config: &PipelineConfig,
    records: &[T],
) -> Result<(), Error> {
    let (stage, file) = stage_output(stage, config, records)?;
    commit(stage, config, file)
}

fn stage_output<T: serde::Serialize>(
    stage: Stage,
    config: &PipelineConfig,
    records: &[T],
) -> Result<(Stage, StagedJson), Error> {
    let path = stage.output_path(config);
    StagedJson::write(path, records)
        .map(|file| (stage, file))
        .map_err(|source| Error::Persist {
            stage,
            path: path.to_path_buf(),
            source,
        })
}

fn commit(stage: Stage, config: &PipelineConfig, file: StagedJson) -> Result<(), Error> {
    let path = stage.output_path(config);
    let records = file.records();
    file.commit().map_err(|source| Error::Persist {
        stage,
        path: path.to_path_buf(),
        source,
    })?;
    info!("{stage}: wrote {records} records to '{}'", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    const COMPONENTS: &str = "\
ChemSep component library
[Component Text]
    1  Methane
Methane
CH4
  16.043  Molecular weight
  190.564  Critical temperature
  16  Ideal gas heat capacity
  33298  A
  79933  B
  2086.9  C
  41602  D
  74-82-8
[Component Text]
    2  Carbon dioxide
Carbon dioxide
CO2
  44.01  Molecular weight
  124-38-9
[Component Text]
    3  Water
Water
H2O
  18.015  Molecular weight
  7732-18-5
";

    const INTERACTIONS: &str = "\
CASN1 CASN2 k12 notes
74-82-8 124-38-9 0.0919 Knapp et al.
124-38-9 7732-18-5 0.12 some comment
74-82-8 64-17-5 0.03
";

    fn setup() -> (tempfile::TempDir, PipelineConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("chemsepdb.pct"), COMPONENTS).unwrap();
        fs::write(dir.path().join("pr.ipd"), INTERACTIONS).unwrap();

        let mut config = PipelineConfig::default().with_out_dir(dir.path().join("out"));
        config.input.components = dir.path().join("chemsepdb.pct");
        config.input.interactions = dir.path().join("pr.ipd");
        (dir, config)
    }

    fn read_outputs(config: &PipelineConfig) -> Vec<Vec<u8>> {
        Stage::ALL
            .iter()
            .map(|stage| fs::read(stage.output_path(config)).unwrap())
            .collect()
    }

    #[test]
    fn full_run_resolves_names_through_index() {
        let (_dir, config) = setup();
        let output = run_all(&config).unwrap();

        assert_eq!(output.components.records.len(), 3);
        assert_eq!(output.names.len(), 3);
        assert_eq!(output.interactions.records.len(), 3);
        assert_eq!(output.interactions.skipped_lines, 1);
        assert_eq!(output.interactions.unresolved, 1);

        let co2_water = &output.interactions.records[1];
        assert_eq!(co2_water.name_1.as_deref(), Some("Carbon dioxide"));
        assert_eq!(co2_water.name_2.as_deref(), Some("Water"));
        assert_eq!(co2_water.comments, "some comment");

        let methane = &output.components.records[0];
        assert_eq!(methane.coefficient("D"), Some("41602"));
    }

    #[test]
    fn rerun_produces_identical_bytes() {
        let (_dir, config) = setup();
        run_all(&config).unwrap();
        let first = read_outputs(&config);
        run_all(&config).unwrap();
        let second = read_outputs(&config);

        assert_eq!(first, second);
    }

    #[test]
    fn staged_runs_match_full_run() {
        let (_dir, config) = setup();
        run_all(&config).unwrap();
        let full = read_outputs(&config);

        run_components(&config).unwrap();
        run_names(&config).unwrap();
        run_interactions(&config).unwrap();

        assert_eq!(read_outputs(&config), full);
    }

    #[test]
    fn names_stage_requires_component_output() {
        let (_dir, config) = setup();
        let err = run_names(&config).unwrap_err();

        assert!(matches!(
            err,
            Error::Upstream {
                stage: Stage::Names,
                upstream: Stage::Components,
                ..
            }
        ));
        assert_eq!(err.stage(), Some(Stage::Names));
    }

    #[test]
    fn missing_interaction_file_writes_nothing() {
        let (dir, mut config) = setup();
        config.input.interactions = dir.path().join("missing.ipd");

        let err = run_all(&config).unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Interactions));
        for stage in Stage::ALL {
            assert!(!stage.output_path(&config).exists());
        }
    }

    #[test]
    fn failed_output_write_keeps_previous_outputs() {
        let (dir, mut config) = setup();
        run_all(&config).unwrap();
        let before = read_outputs(&config);

        let extra = format!("{COMPONENTS}[Component Text]\n    4  Ethane\nEthane\nC2H6\n  74-84-0\n");
        fs::write(dir.path().join("chemsepdb.pct"), extra).unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let previous_interactions = config.output.interactions.clone();
        config.output.interactions = blocker.join("pripdb.json");

        let err = run_all(&config).unwrap_err();
        assert!(matches!(
            err,
            Error::Persist {
                stage: Stage::Interactions,
                ..
            }
        ));

        config.output.interactions = previous_interactions;
        assert_eq!(read_outputs(&config), before);
        for stage in [Stage::Components, Stage::Names] {
            let path = stage.output_path(&config);
            assert!(!persist::temp_path(path).exists());
        }
    }

    #[test]
    fn strict_mode_rejects_malformed_blocks() {
        let (dir, mut config) = setup();
        let broken = format!("{COMPONENTS}[Component Text]\n 4 Broken\n");
        fs::write(dir.path().join("chemsepdb.pct"), broken).unwrap();

        let lenient = run_all(&config).unwrap();
        assert_eq!(lenient.components.failures.len(), 1);

        config.strict = true;
        let err = run_all(&config).unwrap_err();
        match err {
            Error::Strict { count, first, .. } => {
                assert_eq!(count, 1);
                assert_eq!(first.block, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn file_without_marker_fails_the_run() {
        let (dir, config) = setup();
        fs::write(dir.path().join("chemsepdb.pct"), "not a database\n").unwrap();

        let err = run_all(&config).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                stage: Stage::Components,
                source: io::Error::MissingDelimiter { .. },
                ..
            }
        ));
    }

    #[test]
    fn stage_outputs_follow_config() {
        let config = PipelineConfig::default();
        assert_eq!(
            Stage::Interactions.output_path(&config),
            PathBuf::from("pripdb.json")
        );
        assert_eq!(Stage::Interactions.upstream(), Some(Stage::Names));
        assert_eq!(Stage::Components.upstream(), None);
    }
}
