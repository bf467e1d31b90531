//! Tabular input and export formats.

pub mod csv;
