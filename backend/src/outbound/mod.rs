//! Outbound adapters implementing domain ports.
//!
//! Adapters translate between domain types and storage representations;
//! they hold no business rules.

pub mod persistence;
