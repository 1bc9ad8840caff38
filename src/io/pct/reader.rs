use crate::io::{
    Format,
    error::{BlockError, BlockFault, Error},
    util,
};
use crate::model::component::{COEFFICIENT_SUFFIX, ComponentRecord};
use log::{debug, warn};
use std::collections::HashMap;
use std::io::BufRead;

/// Literal marker that opens every compound block.
pub const COMPONENT_MARKER: &str = "[Component Text]";

const HEAT_CAPACITY_HEADER: &str = "Ideal gas heat capacity";
const CLOSING_COEFFICIENT: &str = "D";
const BARE_COEFFICIENTS: [&str; 5] = ["A", "B", "C", "D", "E"];
const GROUP_CONTRIBUTION_SUFFIXES: [&str; 6] = [
    "UNIFAC",
    "UNIFAC-LLE",
    "ASOG",
    "PPR78",
    "UMR",
    "Modified UNIFAC",
];
const PREVIEW_LEN: usize = 60;

/// Outcome of parsing a component database.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComponents {
    /// Records in block order.
    pub records: Vec<ComponentRecord>,
    /// Blocks that could not be turned into records.
    pub failures: Vec<BlockError>,
    /// Coefficient lines (`A`..`E`) found outside a heat capacity section.
    pub orphan_coefficients: usize,
}

impl ParsedComponents {
    /// Total number of blocks seen, successful or not.
    pub fn block_count(&self) -> usize {
        self.records.len() + self.failures.len()
    }
}

pub fn read<R: BufRead>(reader: R) -> Result<ParsedComponents, Error> {
    let text = util::read_text(reader, Format::Pct)?;
    parse(&text)
}

/// Parses the full text of a component database.
///
/// Text before the first [`COMPONENT_MARKER`] is ignored. Malformed blocks
/// are collected in [`ParsedComponents::failures`] without stopping the
/// parse; only a text with no marker at all is rejected outright.
pub fn parse(text: &str) -> Result<ParsedComponents, Error> {
    let blocks = split_blocks(text);
    if blocks.is_empty() {
        return Err(Error::MissingDelimiter {
            format: Format::Pct,
            marker: COMPONENT_MARKER,
        });
    }

    let mut parsed = ParsedComponents::default();
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(blocks.len());

    for block in &blocks {
        let outcome = parse_block(block, &mut parsed.orphan_coefficients).and_then(|record| {
            match seen.get(&record.index) {
                Some(&first_block) => Err(block.fail(
                    block.first_line(),
                    BlockFault::DuplicateIndex {
                        index: record.index,
                        first_block,
                    },
                )),
                None => {
                    seen.insert(record.index.clone(), block.number);
                    Ok(record)
                }
            }
        });

        match outcome {
            Ok(record) => parsed.records.push(record),
            Err(failure) => {
                warn!("{failure}");
                parsed.failures.push(failure);
            }
        }
    }

    debug!(
        "parsed {} component blocks: {} records, {} failures, {} orphan coefficient lines",
        blocks.len(),
        parsed.records.len(),
        parsed.failures.len(),
        parsed.orphan_coefficients
    );

    Ok(parsed)
}

struct RawBlock<'a> {
    number: usize,
    marker_line: usize,
    lines: Vec<(usize, &'a str)>,
}

impl<'a> RawBlock<'a> {
    fn new(number: usize, body: &'a str, marker_line: usize) -> Self {
        let all: Vec<(usize, &str)> = body
            .split('\n')
            .enumerate()
            .map(|(i, line)| (marker_line + i, line.trim()))
            .collect();

        let start = all.iter().position(|(_, l)| !l.is_empty());
        let end = all.iter().rposition(|(_, l)| !l.is_empty());
        let lines = match (start, end) {
            (Some(s), Some(e)) => all[s..=e].to_vec(),
            _ => Vec::new(),
        };

        Self {
            number,
            marker_line,
            lines,
        }
    }

    fn first_line(&self) -> usize {
        self.lines
            .first()
            .map(|(ln, _)| *ln)
            .unwrap_or(self.marker_line)
    }

    fn preview(&self) -> String {
        let head: Vec<&str> = self.lines.iter().take(3).map(|(_, l)| *l).collect();
        util::truncate(&head.join(" | "), PREVIEW_LEN)
    }

    fn fail(&self, line: usize, fault: BlockFault) -> BlockError {
        BlockError {
            block: self.number,
            line,
            fault,
            preview: self.preview(),
        }
    }
}

fn split_blocks(text: &str) -> Vec<RawBlock<'_>> {
    let mut pieces = text.split(COMPONENT_MARKER);
    let preamble = pieces.next().unwrap_or_default();
    let mut line = preamble.matches('\n').count() + 1;

    pieces
        .enumerate()
        .map(|(i, body)| {
            let block = RawBlock::new(i + 1, body, line);
            line += body.matches('\n').count();
            block
        })
        .collect()
}

fn parse_block(block: &RawBlock<'_>, orphans: &mut usize) -> Result<ComponentRecord, BlockError> {
    let [(index_line, first), (_, name), (_, formula), properties @ ..] = block.lines.as_slice()
    else {
        return Err(match block.lines.last() {
            None => block.fail(block.marker_line, BlockFault::Empty),
            Some((ln, _)) => block.fail(*ln, BlockFault::TooShort(block.lines.len())),
        });
    };

    let index = first
        .split_whitespace()
        .next()
        .ok_or_else(|| block.fail(*index_line, BlockFault::MissingIndex))?;

    let mut record = ComponentRecord::new(index, *name, *formula);
    let mut in_coefficients = false;

    for &(line_no, line) in properties {
        let Some((value, label)) = util::split_value_label(line) else {
            continue;
        };

        if label.contains(HEAT_CAPACITY_HEADER) {
            in_coefficients = true;
            continue;
        }

        let captured = in_coefficients;
        if in_coefficients {
            record.set_field(&format!("{label}{COEFFICIENT_SUFFIX}"), value);
            if label == CLOSING_COEFFICIENT {
                in_coefficients = false;
            }
        }

        if !captured && is_bare_coefficient(&label) {
            *orphans += 1;
            debug!(
                "block #{} line {}: coefficient '{}' outside a heat capacity section is dropped",
                block.number, line_no, label
            );
        }

        if is_excluded(&label) {
            continue;
        }

        record.set_field(&label, value);
    }

    record.casn = extract_casn(&block.lines);
    record.properties.shift_remove("");

    Ok(record)
}

fn is_bare_coefficient(label: &str) -> bool {
    BARE_COEFFICIENTS.contains(&label)
}

fn is_excluded(label: &str) -> bool {
    label.starts_with("Family")
        || (label.starts_with("EqNo") && !label.contains(HEAT_CAPACITY_HEADER))
        || label.starts_with("Min.")
        || label.starts_with("Max.")
        || is_bare_coefficient(label)
        || GROUP_CONTRIBUTION_SUFFIXES
            .iter()
            .any(|suffix| label.ends_with(suffix))
}

/// The registry number is the last line of the block, or the one before it,
/// whichever first is a single token starting with a digit.
///
/// Property lines carry a label after their value, so a numeric property
/// ending the block never qualifies.
fn extract_casn(lines: &[(usize, &str)]) -> Option<String> {
    lines
        .iter()
        .rev()
        .take(2)
        .map(|(_, line)| *line)
        .find(|line| util::starts_with_digit(line) && line.split_whitespace().nth(1).is_none())
        .map(str::to_string)
}
