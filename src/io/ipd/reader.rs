use crate::io::{Format, error::Error, util};
use crate::model::interaction::BinaryInteractionRecord;
use crate::model::names::NameIndexEntry;
use log::debug;
use std::collections::HashMap;
use std::io::BufRead;

/// Outcome of parsing an interaction parameter file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedInteractions {
    /// Records in line order.
    pub records: Vec<BinaryInteractionRecord>,
    /// Header, comment, blank and short lines that were not data rows.
    pub skipped_lines: usize,
    /// Records with at least one name missing from the name index.
    pub unresolved: usize,
}

/// CASN → name map built once from the name index.
///
/// Later index entries win over earlier ones with the same CASN; entries
/// without a CASN can never match and are left out.
#[derive(Debug, Clone, Default)]
pub struct NameLookup<'a> {
    by_casn: HashMap<&'a str, &'a str>,
}

impl<'a> NameLookup<'a> {
    pub fn new(index: &'a [NameIndexEntry]) -> Self {
        let by_casn = index
            .iter()
            .filter_map(|entry| Some((entry.casn.as_deref()?, entry.name.as_str())))
            .collect();
        Self { by_casn }
    }

    pub fn name_of(&self, casn: &str) -> Option<&'a str> {
        self.by_casn.get(casn).copied()
    }

    /// Resolves both names of a pair.
    ///
    /// An index entry names at most one side of the pair, the first side
    /// taking precedence, so a pair of identical CASNs only resolves `Name_1`.
    pub fn resolve(&self, casn_1: &str, casn_2: &str) -> (Option<String>, Option<String>) {
        let name_1 = self.name_of(casn_1).map(str::to_string);
        let name_2 = if casn_1 == casn_2 {
            None
        } else {
            self.name_of(casn_2).map(str::to_string)
        };
        (name_1, name_2)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.by_casn.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_casn.is_empty()
    }
}

pub fn read<R: BufRead>(reader: R, index: &[NameIndexEntry]) -> Result<ParsedInteractions, Error> {
    let text = util::read_text(reader, Format::Ipd)?;
    Ok(parse(&text, index))
}

/// Parses interaction rows; lines that are not data rows are counted and skipped.
pub fn parse(text: &str, index: &[NameIndexEntry]) -> ParsedInteractions {
    let lookup = NameLookup::new(index);
    let mut parsed = ParsedInteractions::default();

    for line in text.lines() {
        match parse_row(line, &lookup) {
            Some(record) => {
                if !record.is_fully_resolved() {
                    parsed.unresolved += 1;
                }
                parsed.records.push(record);
            }
            None => parsed.skipped_lines += 1,
        }
    }

    debug!(
        "parsed {} interaction rows ({} lines skipped, {} with unresolved names) against {} named CASNs",
        parsed.records.len(),
        parsed.skipped_lines,
        parsed.unresolved,
        lookup.len()
    );

    parsed
}

/// Parses one line, returning `None` for anything that is not a data row.
fn parse_row(line: &str, lookup: &NameLookup<'_>) -> Option<BinaryInteractionRecord> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [casn_1, casn_2, k12, comments @ ..] = tokens.as_slice() else {
        return None;
    };

    if !util::has_numeric_head(casn_1) {
        return None;
    }

    let (name_1, name_2) = lookup.resolve(casn_1, casn_2);

    Some(BinaryInteractionRecord {
        casn_1: casn_1.to_string(),
        casn_2: casn_2.to_string(),
        name_1,
        name_2,
        k12: k12.to_string(),
        comments: comments.join(" "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn index() -> Vec<NameIndexEntry> {
        vec![
            NameIndexEntry::new("CO2", Some("124-38-9".into())),
            NameIndexEntry::new("Water", Some("7732-18-5".into())),
            NameIndexEntry::new("Air", None),
        ]
    }

    #[test]
    fn resolves_both_names() {
        let parsed = parse("124-38-9 7732-18-5 0.12 some comment", &index());
        let record = &parsed.records[0];
        assert_eq!(record.casn_1, "124-38-9");
        assert_eq!(record.casn_2, "7732-18-5");
        assert_eq!(record.name_1.as_deref(), Some("CO2"));
        assert_eq!(record.name_2.as_deref(), Some("Water"));
        assert_eq!(record.k12, "0.12");
        assert_eq!(record.comments, "some comment");
        assert_eq!(parsed.unresolved, 0);
    }

    #[test]
    fn header_line_is_skipped() {
        let parsed = parse("CASN1 CASN2 k12 notes", &index());
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped_lines, 1);
    }

    #[test]
    fn short_and_blank_lines_are_skipped() {
        let text = "\n124-38-9\n124-38-9 7732-18-5\n   \n";
        let parsed = parse(text, &index());
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped_lines, 4);
    }

    #[test]
    fn unknown_casn_leaves_name_absent() {
        let parsed = parse("74-82-8 7732-18-5 0.5", &index());
        let record = &parsed.records[0];
        assert_eq!(record.name_1, None);
        assert_eq!(record.name_2.as_deref(), Some("Water"));
        assert_eq!(record.comments, "");
        assert_eq!(parsed.unresolved, 1);
    }

    #[test]
    fn identical_pair_only_names_first_side() {
        let parsed = parse("124-38-9 124-38-9 0.0", &index());
        let record = &parsed.records[0];
        assert_eq!(record.name_1.as_deref(), Some("CO2"));
        assert_eq!(record.name_2, None);
    }

    #[test]
    fn later_index_entry_wins() {
        let mut idx = index();
        idx.push(NameIndexEntry::new("Carbon dioxide", Some("124-38-9".into())));
        let lookup = NameLookup::new(&idx);
        assert_eq!(lookup.name_of("124-38-9"), Some("Carbon dioxide"));
        assert_eq!(lookup.len(), 2);
    }

    #[test]
    fn plain_numeric_identifier_is_accepted() {
        let parsed = parse("630 7732-18-5 -0.07   from   fit", &index());
        let record = &parsed.records[0];
        assert_eq!(record.casn_1, "630");
        assert_eq!(record.comments, "from fit");
    }

    #[test]
    fn keeps_line_order() {
        let text = "\
; Peng-Robinson interaction parameters
CASN1 CASN2 k12 comment
7732-18-5 124-38-9 0.19
124-38-9 7732-18-5 0.12 second
";
        let parsed = read(Cursor::new(text), &index()).unwrap();
        let k12: Vec<&str> = parsed.records.iter().map(|r| r.k12.as_str()).collect();
        assert_eq!(k12, vec!["0.19", "0.12"]);
        assert_eq!(parsed.skipped_lines, 2);
    }

    #[test]
    fn invalid_utf8_is_a_located_parse_error() {
        let bytes: &[u8] = b"CASN1 CASN2 k12\n124-38-9 7732-18-5 0.12 Schr\xf6der\n";
        let err = read(Cursor::new(bytes), &index()).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse {
                format: Format::Ipd,
                line: 2,
                ..
            }
        ));
    }
}
