//! Record types produced by the database conversion.
//!
//! - [`component`] – One compound from the component database, fixed fields plus an ordered property map.
//! - [`names`] – The `(Name, CASN)` index derived from component records.
//! - [`interaction`] – Binary interaction pairs and the lookup table over them.

pub mod component;
pub mod interaction;
pub mod names;
