//! Homeworks backend library.
//!
//! Layers, inside out:
//! - [`domain`]: entities, the repository and context ports, and the
//!   exercise and session use-cases.
//! - [`outbound`]: in-memory and PostgreSQL persistence adapters.
//! - [`inbound`]: Actix HTTP handlers.
//! - [`seed`]: optional seed file applied at startup.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod seed;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
