//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod auth;
pub mod error;
pub mod exercises;
pub mod health;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Register the `/api` resources on an application or scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use homeworks::inbound::http::configure_api;
///
/// let _app = App::new().configure(configure_api);
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(exercises::list_exercises)
            .service(exercises::get_exercise)
            .service(session::login)
            .service(session::current_session),
    );
}
