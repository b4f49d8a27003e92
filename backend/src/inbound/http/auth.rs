//! Bearer token extraction.
//!
//! Handlers that need a logged-in caller take [`BearerToken`] as an
//! argument; a missing or malformed `Authorization` header short-circuits
//! with `401 Unauthorized`.

use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::domain::{Error, SessionToken};

const BEARER_PREFIX: &str = "Bearer ";

/// Session token presented in `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BearerToken(pub SessionToken);

fn parse_bearer(req: &HttpRequest) -> Result<BearerToken, Error> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("login required"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("authorization header is not valid text"))?;
    let raw = value
        .get(..BEARER_PREFIX.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(BEARER_PREFIX))
        .and_then(|_| value.get(BEARER_PREFIX.len()..))
        .ok_or_else(|| Error::unauthorized("expected a bearer token"))?;
    let raw = raw.trim().trim_matches('"');
    raw.parse::<SessionToken>()
        .map(BearerToken)
        .map_err(|_| Error::unauthorized("malformed session token"))
}

impl FromRequest for BearerToken {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(parse_bearer(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    const TOKEN: &str = "8d7a3f0e-4b1c-4f5a-9e2d-6c3b1a0f9e87";

    #[rstest]
    #[case(format!("Bearer {TOKEN}"))]
    #[case(format!("bearer {TOKEN}"))]
    #[case(format!("Bearer \"{TOKEN}\""))]
    fn accepts_bearer_tokens(#[case] header: String) {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, header))
            .to_http_request();
        let BearerToken(token) = parse_bearer(&req).expect("valid bearer header");
        assert_eq!(token.to_string(), TOKEN);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(format!("Basic {TOKEN}")))]
    #[case(Some("Bearer not-a-token".to_owned()))]
    #[case(Some("Bearer".to_owned()))]
    fn rejects_missing_or_malformed_headers(#[case] header: Option<String>) {
        let mut req = TestRequest::default();
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        let err = parse_bearer(&req.to_http_request()).expect_err("must be rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }
}
