//! Converts the ChemSep flat-file databases into structured record sets.
//!
//! Two legacy text files are supported: the pure component database
//! (`chemsepdb.pct`, one `[Component Text]` block per compound) and the
//! Peng–Robinson binary interaction parameter file (`pr.ipd`, one pair per
//! line). The component records are projected onto a `(Name, CASN)` index
//! which is then used to attach compound names to every interaction pair.
//!
//! # Features
//!
//! - **Component parsing** — Fixed fields (`Index`, `Name`, `Formula`, `CASN`)
//!   plus every labelled property of a block, in file order and with the
//!   original text preserved, ideal gas heat capacity coefficients included
//! - **Name index** — Order-preserving `(Name, CASN)` projection
//! - **Interaction parsing** — Data rows filtered by their CASN column and
//!   resolved to names in constant time per row
//! - **Pipeline** — Configurable file locations, stage ordering, atomic JSON output
//! - **Lookup** — Find the `k12` of a pair by CASN or by name
//!
//! # Quick Start
//!
//! ```
//! use chemsep_db::io::{ipd, pct};
//! use chemsep_db::{InteractionTable, build_name_index};
//!
//! let components = pct::parse(
//!     "[Component Text]
//!        1  Carbon dioxide
//!      Carbon dioxide
//!      CO2
//!        44.01  Molecular weight
//!      124-38-9
//!      [Component Text]
//!        2  Water
//!      Water
//!      H2O
//!        18.015  Molecular weight
//!      7732-18-5",
//! )?;
//! assert_eq!(components.records.len(), 2);
//! assert_eq!(components.records[0].property("Molecular weight"), Some("44.01"));
//!
//! let names = build_name_index(&components.records);
//! let interactions = ipd::parse(
//!     "CASN1 CASN2 k12 notes\n124-38-9 7732-18-5 0.12 some comment",
//!     &names.entries,
//! );
//!
//! let table = InteractionTable::new(interactions.records);
//! let pair = table.find("Water", "Carbon dioxide")?;
//! assert_eq!(pair.k12_value()?, 0.12);
//! assert_eq!(pair.comments, "some comment");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Readers for the PCT and IPD formats, JSON persistence
//! - [`pipeline`] — Stage sequencing, configuration and file handling
//!
//! # Data Types
//!
//! - [`ComponentRecord`] — One compound with its open set of properties
//! - [`NameIndexEntry`] / [`NameIndex`] — `(Name, CASN)` projection
//! - [`BinaryInteractionRecord`] — One interaction pair with its `k12`
//! - [`InteractionTable`] — Pair lookup over interaction records

mod model;

pub mod io;
pub mod pipeline;

pub use model::component::{COEFFICIENT_SUFFIX, ComponentRecord};
pub use model::interaction::{BinaryInteractionRecord, InteractionTable, LookupError};
pub use model::names::{NameIndex, NameIndexEntry};

pub use pipeline::{PipelineConfig, PipelineOutput, Stage, build_name_index};

pub use pipeline::Error as PipelineError;
