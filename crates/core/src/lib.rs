//! Domain logic for the aquareport civic-issue reporting platform.
//!
//! This crate is persistence- and transport-agnostic: it owns the report
//! lifecycle rules (statuses, categories, severities, tracking numbers),
//! steward account validation (departments, contact formats, employee IDs),
//! credential generation, and the shared [`error::CoreError`] taxonomy.

pub mod credentials;
pub mod error;
pub mod report;
pub mod steward;
pub mod types;
