//! Startup wiring for seed data.

mod startup;

pub use startup::{StartupSeedingError, load_seed_document, seed_on_startup};
