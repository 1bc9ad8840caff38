//! Readers and writers for the ChemSep database formats.
//!
//! - [`pct`] – component database (`chemsepdb.pct`), blocks of property lines.
//! - [`ipd`] – Peng–Robinson binary interaction parameters (`pr.ipd`), one row per line.
//! - [`json`] – the structured JSON record sets produced from both.

use std::fmt;

pub mod error;
pub mod ipd;
pub mod json;
pub mod pct;
pub mod util;

pub use error::{BlockError, BlockFault, Error};
pub use ipd::{NameLookup, ParsedInteractions};
pub use pct::{COMPONENT_MARKER, ParsedComponents};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Pct,
    Ipd,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Pct => write!(f, "ChemSep PCT"),
            Format::Ipd => write!(f, "IPD"),
        }
    }
}
