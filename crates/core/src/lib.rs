//! Core business logic for CapexView.
//!
//! This crate contains the report pipeline with no web or database
//! dependencies. Sources and export destinations are reached through traits
//! implemented by the outer crates.
//!
//! # Modules
//!
//! - `capex` - Aggregation, filter reconciliation, roll-ups and rendering
//! - `export` - Spreadsheet export of the detail table

pub mod capex;
pub mod export;
