use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Key suffix for ideal-gas heat capacity coefficients (`A_coeff`, `B_coeff`, ...).
pub const COEFFICIENT_SUFFIX: &str = "_coeff";

/// A single compound from the ChemSep component database.
///
/// The four fixed fields are always present; everything else a block carries
/// lands in [`properties`](Self::properties) keyed by its label, in the order
/// the labels first appear. Values keep their original text, no numeric
/// coercion is applied.
///
/// Serialized with the original database key names: `Index`, `Name`,
/// `Formula`, the properties, then `CASN`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    #[serde(rename = "Index")]
    pub index: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Formula")]
    pub formula: String,
    #[serde(flatten)]
    pub properties: IndexMap<String, String>,
    #[serde(rename = "CASN")]
    pub casn: Option<String>,
}

impl ComponentRecord {
    pub fn new(
        index: impl Into<String>,
        name: impl Into<String>,
        formula: impl Into<String>,
    ) -> Self {
        Self {
            index: index.into(),
            name: name.into(),
            formula: formula.into(),
            properties: IndexMap::new(),
            casn: None,
        }
    }

    /// Stores `value` under `label`.
    ///
    /// Labels that collide with a fixed field overwrite that field instead of
    /// producing a duplicate JSON key. `CASN` is re-derived from the block
    /// tail after all fields are read, so a `CASN` label is dropped here.
    pub fn set_field(&mut self, label: &str, value: impl Into<String>) {
        let value = value.into();
        match label {
            "Index" => self.index = value,
            "Name" => self.name = value,
            "Formula" => self.formula = value,
            "CASN" => {}
            _ => {
                self.properties.insert(label.to_string(), value);
            }
        }
    }

    pub fn property(&self, label: &str) -> Option<&str> {
        self.properties.get(label).map(String::as_str)
    }

    /// Returns the heat capacity coefficient stored for `letter`, if any.
    pub fn coefficient(&self, letter: &str) -> Option<&str> {
        self.property(&format!("{letter}{COEFFICIENT_SUFFIX}"))
    }

    #[inline]
    pub fn has_casn(&self) -> bool {
        self.casn.is_some()
    }
}
