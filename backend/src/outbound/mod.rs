//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL repositories and credential lookup via Diesel
//! - **memory**: in-process store used when no database is configured and by
//!   the contract test suites

pub mod memory;
pub mod persistence;
