//! Session endpoints.
//!
//! ```text
//! POST /api/session/login {"UserName":"ada","Password":"lovelace"}
//! GET  /api/session       Authorization: Bearer <token>
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::BearerToken;
use crate::inbound::http::state::HttpState;

/// Login payload.
///
/// Field names follow `UserName`/`Password`; camel and lower-case spellings
/// are accepted too. Missing fields count as blank.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginRequest {
    #[serde(rename = "UserName", alias = "userName", alias = "username", default)]
    pub user_name: String,
    #[serde(rename = "Password", alias = "password", default)]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.user_name, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "UserName", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "Password", "code": "empty_password" })),
    }
}

/// Caller identity resolved from a session token.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[schema(example = "ada")]
    pub user_name: String,
}

/// Exchange credentials for a session token.
///
/// The token is returned as a bare JSON string.
#[utoipa::path(
    post,
    path = "/api/session/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token as a JSON string", body = String),
        (status = 400, description = "Invalid credentials or blank field", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "login"
)]
#[post("/session/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<String>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let logic = state.sessions_logic();
    let token = logic.login(&credentials).await?;
    Ok(web::Json(token.to_string()))
}

/// Resolve the bearer token back to its user.
#[utoipa::path(
    get,
    path = "/api/session",
    responses(
        (status = 200, description = "Session owner", body = SessionUser),
        (status = 401, description = "Missing or unknown token", body = Error)
    ),
    tags = ["session"],
    operation_id = "currentSession",
    security(("BearerToken" = []))
)]
#[get("/session")]
pub async fn current_session(
    state: web::Data<HttpState>,
    BearerToken(token): BearerToken,
) -> ApiResult<web::Json<SessionUser>> {
    let logic = state.sessions_logic();
    let user = logic.user_for(&token).await?;
    Ok(web::Json(SessionUser {
        user_name: user.username().to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::INVALID_CREDENTIALS_MESSAGE;
    use crate::inbound::http::test_utils::{insert_user, memory_state};
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;
    use uuid::Uuid;

    fn app(
        state: web::Data<HttpState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .service(web::scope("/api").service(login).service(current_session))
    }

    #[rstest]
    #[case(json!({"UserName": "ada", "Password": "lovelace"}))]
    #[case(json!({"userName": "ada", "password": "lovelace"}))]
    #[case(json!({"username": "ada", "password": "lovelace"}))]
    #[actix_web::test]
    async fn valid_credentials_yield_a_token(#[case] body: Value) {
        let (state, factory) = memory_state();
        insert_user(&factory, "ada", "lovelace").await;
        let app = test::init_service(app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/session/login")
            .set_json(&body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let token: String = test::read_body_json(res).await;
        let token = Uuid::parse_str(&token).expect("token is a UUID");
        assert!(!token.is_nil());
    }

    #[rstest]
    #[case("ada", "wrong")]
    #[case("grace", "lovelace")]
    #[case("Ada", "lovelace")]
    #[actix_web::test]
    async fn mismatched_credentials_are_rejected(#[case] username: &str, #[case] password: &str) {
        let (state, factory) = memory_state();
        insert_user(&factory, "ada", "lovelace").await;
        let app = test::init_service(app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/session/login")
            .set_json(json!({"UserName": username, "Password": password}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(body["code"], "invalid_credentials");
    }

    #[rstest]
    #[case(json!({"UserName": "  ", "Password": "pw"}), "UserName")]
    #[case(json!({"UserName": "ada"}), "Password")]
    #[actix_web::test]
    async fn blank_fields_are_invalid_requests(#[case] body: Value, #[case] field: &str) {
        let (state, _factory) = memory_state();
        let app = test::init_service(app(state)).await;

        let req = test::TestRequest::post()
            .uri("/api/session/login")
            .set_json(&body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
    }

    #[rstest]
    #[actix_web::test]
    async fn issued_token_identifies_the_user() {
        let (state, factory) = memory_state();
        insert_user(&factory, "ada", "lovelace").await;
        let app = test::init_service(app(state)).await;

        let login_req = test::TestRequest::post()
            .uri("/api/session/login")
            .set_json(json!({"UserName": "ada", "Password": "lovelace"}))
            .to_request();
        let token: String = test::call_and_read_body_json(&app, login_req).await;

        let whoami = test::TestRequest::get()
            .uri("/api/session")
            .insert_header((AUTHORIZATION, format!("Bearer {token}")))
            .to_request();
        let res = test::call_service(&app, whoami).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({"userName": "ada"}));
    }

    #[rstest]
    #[case(Some(format!("Bearer {}", Uuid::new_v4())))]
    #[case(None)]
    #[actix_web::test]
    async fn unknown_or_missing_tokens_are_unauthorized(#[case] header: Option<String>) {
        let (state, _factory) = memory_state();
        let app = test::init_service(app(state)).await;

        let mut req = test::TestRequest::get().uri("/api/session");
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let res = test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
