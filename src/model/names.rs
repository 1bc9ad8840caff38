use serde::{Deserialize, Serialize};

/// One row of the name index: a compound name and its (possibly unknown) CASN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameIndexEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CASN")]
    pub casn: Option<String>,
}

impl NameIndexEntry {
    pub fn new(name: impl Into<String>, casn: Option<String>) -> Self {
        Self {
            name: name.into(),
            casn,
        }
    }
}

/// Name index produced from a component record set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    /// Entries in component record order.
    pub entries: Vec<NameIndexEntry>,
    /// Records skipped because they carried no usable name.
    pub omitted: usize,
}

impl NameIndex {
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries whose CASN is unknown.
    pub fn without_casn(&self) -> usize {
        self.entries.iter().filter(|e| e.casn.is_none()).count()
    }
}
