use std::num::ParseFloatError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A binary interaction parameter row from the Peng–Robinson database.
///
/// Names are only present when the CASN could be resolved against the name
/// index; unresolved names are omitted from the JSON output rather than
/// written as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryInteractionRecord {
    #[serde(rename = "CASN_1")]
    pub casn_1: String,
    #[serde(rename = "CASN_2")]
    pub casn_2: String,
    #[serde(rename = "Name_1", default, skip_serializing_if = "Option::is_none")]
    pub name_1: Option<String>,
    #[serde(rename = "Name_2", default, skip_serializing_if = "Option::is_none")]
    pub name_2: Option<String>,
    pub k12: String,
    #[serde(rename = "Comments", default)]
    pub comments: String,
}

impl BinaryInteractionRecord {
    /// Parses the textual `k12` coefficient.
    pub fn k12_value(&self) -> Result<f64, ParseFloatError> {
        self.k12.trim().parse()
    }

    #[inline]
    pub fn is_fully_resolved(&self) -> bool {
        self.name_1.is_some() && self.name_2.is_some()
    }

    fn has_casn(&self, id: &str) -> bool {
        self.casn_1 == id || self.casn_2 == id
    }

    fn has_name(&self, id: &str) -> bool {
        self.name_1.as_deref() == Some(id) || self.name_2.as_deref() == Some(id)
    }

    /// Returns `true` if this row describes the pair `(id_1, id_2)` in either order.
    ///
    /// Identifiers are matched as CASNs first. Only when `id_1` is not one of
    /// the row's CASNs are both identifiers matched against the names.
    pub fn matches_pair(&self, id_1: &str, id_2: &str) -> bool {
        if self.has_casn(id_1) {
            self.has_casn(id_2)
        } else if self.has_name(id_1) {
            self.has_name(id_2)
        } else {
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no binary interaction parameter found for the pair '{0}', '{1}'")]
    PairNotFound(String, String),
}

/// Read-only view over interaction records for pair queries.
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    records: Vec<BinaryInteractionRecord>,
}

impl InteractionTable {
    pub fn new(records: Vec<BinaryInteractionRecord>) -> Self {
        Self { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds the first record for the pair, identified by CASN or by name.
    pub fn find(&self, id_1: &str, id_2: &str) -> Result<&BinaryInteractionRecord, LookupError> {
        self.records
            .iter()
            .find(|record| record.matches_pair(id_1, id_2))
            .ok_or_else(|| LookupError::PairNotFound(id_1.to_string(), id_2.to_string()))
    }
}
