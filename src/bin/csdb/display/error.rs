use std::io::{self, Write};

use anyhow::Error;

use chemsep_db::io::{BlockError, BlockFault, COMPONENT_MARKER, Error as IoError};
use chemsep_db::{LookupError, PipelineError, Stage};

use crate::util::text::wrap;

const INNER_WIDTH: usize = 62;

pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();
    let rule = "─".repeat(INNER_WIDTH);

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔{}╗", "═".repeat(INNER_WIDTH));
    let _ = writeln!(stderr, "   ║  {:<60}║", "✗ Error");
    let _ = writeln!(stderr, "   ╟{rule}╢");
    write_wrapped(&mut stderr, "", "", &err.to_string());

    for cause in err.chain().skip(1) {
        let _ = writeln!(stderr, "   ╟{rule}╢");
        let _ = writeln!(stderr, "   ║  {:<60}║", "Caused by:");
        write_wrapped(&mut stderr, "  ", "  ", &cause.to_string());
    }

    let hints = HintCollector::collect(err);
    if !hints.is_empty() {
        let _ = writeln!(stderr, "   ╟{rule}╢");
        let _ = writeln!(stderr, "   ║  {:<60}║", "Hints:");
        for hint in hints {
            write_wrapped(&mut stderr, "  • ", "    ", &hint);
        }
    }

    let _ = writeln!(stderr, "   ╚{}╝", "═".repeat(INNER_WIDTH));
    let _ = writeln!(stderr);
}

fn write_wrapped(out: &mut impl Write, first_prefix: &str, rest_prefix: &str, text: &str) {
    let width = INNER_WIDTH - 3 - first_prefix.chars().count().max(rest_prefix.chars().count());
    for (i, line) in wrap(text, width).iter().enumerate() {
        let prefix = if i == 0 { first_prefix } else { rest_prefix };
        let body = format!("{prefix}{line}");
        let _ = writeln!(out, "   ║  {:<60}║", body);
    }
}

#[derive(Default)]
struct HintCollector {
    hints: Vec<String>,
}

impl HintCollector {
    fn collect(err: &Error) -> Vec<String> {
        let mut collector = Self::default();

        for cause in err.chain() {
            if let Some(e) = cause.downcast_ref::<PipelineError>() {
                collector.pipeline_hints(e);
            } else if let Some(e) = cause.downcast_ref::<LookupError>() {
                collector.lookup_hints(e);
            }
            if !collector.hints.is_empty() {
                return collector.hints;
            }
        }

        collector.fallback_hints(err);
        collector.hints
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn pipeline_hints(&mut self, err: &PipelineError) {
        match err {
            PipelineError::ConfigRead { source, .. } => {
                self.std_io_hints(source);
                self.add("Pass --config only with an existing TOML file");
            }

            PipelineError::ConfigParse(_) => {
                self.add("Known keys: strict, [input] components/interactions");
                self.add("and [output] components/names/interactions");
                self.add("Paths are TOML strings, strict is a boolean");
            }

            PipelineError::Open { stage, source, .. } => {
                self.std_io_hints(source);
                self.add(input_flag_hint(*stage));
            }

            PipelineError::Upstream { stage, upstream, .. } => {
                self.add(format!(
                    "The {stage} stage reads the output of the {upstream} stage"
                ));
                self.add(format!(
                    "Run `csdb {}` first, or `csdb run` for all stages",
                    command_name(*upstream)
                ));
            }

            PipelineError::Parse { stage, source, .. } => self.format_hints(*stage, source),

            PipelineError::Strict { first, .. } => {
                self.block_hints(first);
                self.add("Rerun without --strict to skip malformed blocks");
            }

            PipelineError::Persist { source, .. } => {
                if let IoError::Io { source } = source {
                    self.std_io_hints(source);
                }
                self.add("Choose a writable location with --out-dir");
            }
        }
    }

    fn format_hints(&mut self, stage: Stage, err: &IoError) {
        match err {
            IoError::Io { source } => self.std_io_hints(source),

            IoError::MissingDelimiter { .. } => {
                self.add(format!(
                    "Component blocks must start with a '{COMPONENT_MARKER}' line"
                ));
                self.add("Check that --components points at the .pct export, not the .ipd file");
            }

            IoError::Parse {
                format,
                line,
                details,
            } => {
                self.add(format!("Inspect the {format} data around line {line}"));
                if details.contains("UTF-8") {
                    self.add("Re-save the file as UTF-8 before converting it");
                }
            }

            IoError::Block(block) => self.block_hints(block),

            IoError::Json { .. } => {
                self.add("The JSON file is truncated or was not written by csdb");
                if let Some(upstream) = stage.upstream() {
                    self.add(format!(
                        "Rerun `csdb {}` to regenerate it",
                        command_name(upstream)
                    ));
                }
            }
        }
    }

    fn block_hints(&mut self, block: &BlockError) {
        self.add(format!(
            "Component block #{} starts near line {}",
            block.block, block.line
        ));
        match &block.fault {
            BlockFault::Empty => {
                self.add(format!("Remove the stray '{COMPONENT_MARKER}' marker"));
            }
            BlockFault::TooShort(_) => {
                self.add("A block needs index, name and formula lines before its properties");
            }
            BlockFault::MissingIndex => {
                self.add("The first line of a block must start with the library index");
            }
            BlockFault::DuplicateIndex { first_block, .. } => {
                self.add(format!(
                    "Library indices must be unique; compare with block #{first_block}"
                ));
            }
        }
    }

    fn lookup_hints(&mut self, err: &LookupError) {
        match err {
            LookupError::PairNotFound(_, _) => {
                self.add("Identifiers are matched exactly against CASNs first, then names");
                self.add("Names are only known for CASNs present in the name index");
                self.add("Check that --db points at the interactions output");
            }
        }
    }

    fn std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
            }
            ErrorKind::PermissionDenied => {
                self.add("Permission denied; check the file permissions");
            }
            ErrorKind::InvalidData => {
                self.add("The file is not valid UTF-8 text");
            }
            ErrorKind::StorageFull | ErrorKind::WriteZero => {
                self.add("Failed to write data; check available disk space");
            }
            _ => {
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn fallback_hints(&mut self, err: &Error) {
        let msg = err
            .chain()
            .map(|cause| cause.to_string().to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the file path is correct");
        } else if msg.contains("permission denied") {
            self.add("Ensure you have the required access rights");
        }
    }
}

fn command_name(stage: Stage) -> &'static str {
    match stage {
        Stage::Components => "components",
        Stage::Names => "names",
        Stage::Interactions => "interactions",
    }
}

fn input_flag_hint(stage: Stage) -> &'static str {
    match stage {
        Stage::Interactions => "Point --interactions at the interaction parameter file",
        _ => "Point --components at the component database",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn missing_upstream_suggests_earlier_stage() {
        let err = Error::new(PipelineError::Upstream {
            stage: Stage::Names,
            upstream: Stage::Components,
            path: PathBuf::from("chemsepdb.json"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })
        .context("name-index build failed");

        let hints = HintCollector::collect(&err);
        assert!(hints.iter().any(|h| h.contains("csdb components")));
    }

    #[test]
    fn strict_failure_names_the_block() {
        let err = Error::new(PipelineError::Strict {
            stage: Stage::Components,
            count: 2,
            first: BlockError {
                block: 7,
                line: 120,
                fault: BlockFault::MissingIndex,
                preview: "Methane".to_string(),
            },
        });

        let hints = HintCollector::collect(&err);
        assert!(hints[0].contains("#7"));
        assert!(hints.iter().any(|h| h.contains("--strict")));
    }

    #[test]
    fn non_utf8_input_suggests_re_encoding() {
        let err = Error::new(PipelineError::Parse {
            stage: Stage::Interactions,
            path: PathBuf::from("pr.ipd"),
            source: IoError::parse(chemsep_db::io::Format::Ipd, 12, "text is not valid UTF-8"),
        });

        let hints = HintCollector::collect(&err);
        assert_eq!(hints[0], "Inspect the IPD data around line 12");
        assert!(hints[1].contains("UTF-8"));
    }

    #[test]
    fn unknown_errors_fall_back_to_message() {
        let err = anyhow::anyhow!("No such file or directory");
        assert_eq!(HintCollector::collect(&err), vec!["Check that the file path is correct"]);
    }
}
