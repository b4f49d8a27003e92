//! End-to-end behaviour of the exercise endpoints over a seeded memory store.

use actix_web::http::StatusCode;
use actix_web::test;
use homeworks::domain::TRACE_ID_HEADER;
use rstest::rstest;
use serde_json::Value;

mod support;

use support::{FIZZBUZZ_ID, PALINDROME_ID, init_app, seeded_contexts};

#[rstest]
#[actix_rt::test]
async fn lists_every_seeded_exercise() {
    let app = init_app(seeded_contexts().await).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/exercises").to_request())
        .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));

    let body: Value = test::read_body_json(res).await;
    let items = body.as_array().expect("array body");
    assert_eq!(items.len(), 2);

    let mut ids: Vec<&str> = items
        .iter()
        .filter_map(|item| item.get("id").and_then(Value::as_str))
        .collect();
    ids.sort_unstable();
    let mut expected = vec![FIZZBUZZ_ID, PALINDROME_ID];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[rstest]
#[actix_rt::test]
async fn fetches_a_single_exercise_by_id() {
    let app = init_app(seeded_contexts().await).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/exercises/{FIZZBUZZ_ID}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body.get("id").and_then(Value::as_str), Some(FIZZBUZZ_ID));
    assert_eq!(
        body.get("problemDescription").and_then(Value::as_str),
        Some("FizzBuzz")
    );
    assert_eq!(body.get("score").and_then(Value::as_i64), Some(10));
}

#[rstest]
#[case::unknown_id("/api/exercises/3d8e1f0a-0000-4000-8000-000000000000")]
#[case::malformed_id("/api/exercises/not-a-uuid")]
#[actix_rt::test]
async fn missing_exercise_is_not_found(#[case] uri: &str) {
    let app = init_app(seeded_contexts().await).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(res).await;
    assert!(body.is_empty());
}

#[rstest]
#[actix_rt::test]
async fn empty_store_lists_no_exercises() {
    let contexts = homeworks::outbound::persistence::ContextFactory::in_memory(&format!(
        "it-empty-{}",
        uuid::Uuid::new_v4()
    ));
    let app = init_app(contexts).await;

    let req = test::TestRequest::get().uri("/api/exercises").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, Value::Array(Vec::new()));
}

#[rstest]
#[actix_rt::test]
async fn health_probes_report_ready() {
    let app = init_app(seeded_contexts().await).await;

    for uri in ["/health/ready", "/health/live"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK, "{uri}");
    }
}
