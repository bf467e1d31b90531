//! Application layer containing the orchestration of calculations,
//! saved records and analytics.
//!
//! This module defines the `LoanService` which acts as the primary entry point
//! for every operation a client can request. The numeric work is delegated to
//! the pure engine in [`crate::domain::loan`]; storage and telemetry are
//! reached only through the domain ports.

pub mod service;
