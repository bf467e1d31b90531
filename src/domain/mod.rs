//! Domain types and the amortization engine.
//!
//! Everything here is synchronous and free of I/O except the port traits,
//! which describe the collaborators the application layer talks to.

pub mod analytics;
pub mod calculation;
pub mod history;
pub mod loan;
pub mod ports;
pub mod validation;
