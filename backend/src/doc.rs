//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects every HTTP endpoint and the schemas they exchange.
//! Swagger UI serves it in debug builds; `cargo run --bin openapi-dump`
//! prints it for external tooling.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode, Exercise};
use crate::inbound::http::session::{LoginRequest, SessionUser};

/// Adds the bearer token scheme used by `GET /api/session`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Homeworks API",
        description = "Exercises catalogue and session login."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::exercises::list_exercises,
        crate::inbound::http::exercises::get_exercise,
        crate::inbound::http::session::login,
        crate::inbound::http::session::current_session,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Exercise, LoginRequest, SessionUser, Error, ErrorCode)),
    tags(
        (name = "exercises", description = "Read-only exercise catalogue"),
        (name = "session", description = "Login and session lookup"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/exercises")]
    #[case("/api/exercises/{id}")]
    #[case("/api/session/login")]
    #[case("/api/session")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn document_lists_every_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("BearerToken"));
    }

    #[rstest]
    fn exercise_schema_uses_wire_field_names() {
        let json = ApiDoc::openapi().to_json().expect("serialise document");
        assert!(json.contains("problemDescription"));
    }
}
