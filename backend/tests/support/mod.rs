//! Shared helpers for the Homeworks HTTP integration tests.
//!
//! Each test gets its own uniquely named in-memory database seeded from
//! [`SEED`], so tests can run in parallel without seeing each other's rows.

use std::io::Write;
use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use homeworks::Trace;
use homeworks::inbound::http::configure_api;
use homeworks::inbound::http::health::{HealthState, live, ready};
use homeworks::inbound::http::state::HttpState;
use homeworks::outbound::persistence::ContextFactory;
use homeworks::seed::seed_on_startup;
use tempfile::NamedTempFile;
use uuid::Uuid;

pub const FIZZBUZZ_ID: &str = "7f9f2c1e-8d54-4a59-93a5-3e6c2f1d9b10";
pub const PALINDROME_ID: &str = "0c6a4d38-52b1-4f0e-8f8e-6a1d7b2e9c44";

pub const SEED: &str = r#"{
    "users": [
        {"id": "5b0d8f4e-3c43-4a8e-9df3-0b7c1b3fb0a1", "username": "ada", "password": "lovelace"}
    ],
    "exercises": [
        {"id": "7f9f2c1e-8d54-4a59-93a5-3e6c2f1d9b10", "problemDescription": "FizzBuzz", "score": 10},
        {"id": "0c6a4d38-52b1-4f0e-8f8e-6a1d7b2e9c44", "problemDescription": "Detect a palindrome", "score": 25}
    ]
}"#;

/// Context factory over a fresh in-memory database loaded with [`SEED`].
pub async fn seeded_contexts() -> ContextFactory {
    let mut file = NamedTempFile::new().expect("temp seed file");
    file.write_all(SEED.as_bytes()).expect("write seed file");

    let contexts = ContextFactory::in_memory(&format!("it-{}", Uuid::new_v4()));
    seed_on_startup(Some(file.path()), &contexts)
        .await
        .expect("seeding succeeds");
    contexts
}

/// Initialise the full application around `contexts`.
pub async fn init_app(
    contexts: ContextFactory,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let http_state = HttpState::new(Arc::new(contexts), Arc::new(mockable::DefaultClock));
    let health_state = HealthState::new();
    health_state.mark_ready();
    test::init_service(
        App::new()
            .app_data(web::Data::new(http_state))
            .app_data(web::Data::new(health_state))
            .wrap(Trace)
            .configure(configure_api)
            .service(ready)
            .service(live),
    )
    .await
}
