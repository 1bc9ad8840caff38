use crate::model::component::ComponentRecord;
use crate::model::names::{NameIndex, NameIndexEntry};
use log::{debug, warn};

/// Projects component records onto `(Name, CASN)` pairs.
///
/// Every record yields an entry, including those whose CASN is unknown.
/// Records with a blank name cannot be looked up by name and are skipped;
/// the number skipped is reported in [`NameIndex::omitted`].
pub fn build_name_index(records: &[ComponentRecord]) -> NameIndex {
    let mut index = NameIndex {
        entries: Vec::with_capacity(records.len()),
        omitted: 0,
    };

    for record in records {
        if record.name.trim().is_empty() {
            warn!(
                "component #{} has no name and is left out of the name index",
                record.index
            );
            index.omitted += 1;
            continue;
        }
        index
            .entries
            .push(NameIndexEntry::new(record.name.as_str(), record.casn.clone()));
    }

    debug!(
        "built name index with {} entries ({} without CASN, {} omitted)",
        index.len(),
        index.without_casn(),
        index.omitted
    );

    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(index: &str, name: &str, casn: Option<&str>) -> ComponentRecord {
        let mut r = ComponentRecord::new(index, name, "X");
        r.casn = casn.map(str::to_string);
        r
    }

    #[test]
    fn one_entry_per_record_in_order() {
        let records = vec![
            record("1", "Methane", Some("74-82-8")),
            record("2", "Air", None),
            record("3", "Water", Some("7732-18-5")),
        ];
        let index = build_name_index(&records);

        assert_eq!(index.len(), 3);
        assert_eq!(index.omitted, 0);
        let names: Vec<&str> = index.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Methane", "Air", "Water"]);
        assert_eq!(index.entries[1].casn, None);
    }

    #[test]
    fn blank_names_are_omitted_and_counted() {
        let records = vec![record("1", "Methane", Some("74-82-8")), record("2", "  ", None)];
        let index = build_name_index(&records);

        assert_eq!(index.len(), 1);
        assert_eq!(index.omitted, 1);
    }

    #[test]
    fn empty_input_gives_empty_index() {
        let index = build_name_index(&[]);
        assert!(index.is_empty());
    }
}
