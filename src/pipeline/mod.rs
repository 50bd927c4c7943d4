//! Derivation steps between the fetched issue list and what is shown:
//! filter, sort, group and export.

pub mod export;
pub mod filter;
pub mod group;
pub mod sort;
