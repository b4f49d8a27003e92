//! Backend entry-point: loads settings, prepares persistence, seeds, and serves.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use homeworks::inbound::http::health::HealthState;
use homeworks::seed::seed_on_startup;
use server::{AppSettings, ServerConfig, build_context_factory, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;

    let contexts = build_context_factory(&settings)
        .await
        .map_err(std::io::Error::other)?;

    if let Some(outcome) = seed_on_startup(settings.seed_path.as_deref(), &contexts)
        .await
        .map_err(std::io::Error::other)?
    {
        info!(
            users = outcome.users_added,
            exercises = outcome.exercises_added,
            "seed data applied"
        );
    }

    let bind_addr = settings.bind_addr();
    info!(host = %bind_addr.0, port = bind_addr.1, context = %contexts.context_type(), "starting server");

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, Arc::new(contexts));
    create_server(health_state, config)?.await
}
