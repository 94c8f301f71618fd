//! End-to-end tests for the /workouts surface, driven through the router
//! with `tower::ServiceExt::oneshot` against an in-memory database.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> Router {
    let pool = db::pool::create_pool("sqlite::memory:", 1).await.unwrap();
    db::pool::run_migrations(&pool).await.unwrap();
    api::router(pool)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn create_body(entries: Value) -> Value {
    json!({ "workout": { "entries": entries } })
}

#[tokio::test]
async fn post_then_get_round_trips() {
    let app = app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/workouts",
        Some(create_body(json!([
            { "exercise": "Squat", "weight": 100.0, "reps": 5 },
            { "exercise": "Bench Press", "weight": 80.0, "reps": 8 },
        ]))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["exercises"].as_array().unwrap().len(), 2);
    assert_eq!(created["exercises"][0]["sets"].as_array().unwrap().len(), 1);
    // Dates cross the wire as ISO-8601 strings.
    assert!(created["date"].as_str().unwrap().contains('T'));

    let (status, fetched) = send(&app, Method::GET, &format!("/workouts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn post_without_entries_is_rejected() {
    let app = app().await;

    let (status, body) =
        send(&app, Method::POST, "/workouts", Some(create_body(json!([])))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid workout data" }));

    let (status, body) = send(&app, Method::POST, "/workouts", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid workout data" }));
}

#[tokio::test]
async fn post_with_negative_entry_values_is_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/workouts",
        Some(create_body(json!([
            { "exercise": "Squat", "weight": -1.0, "reps": 5 },
        ]))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid workout data" }));

    let (status, body) = send(
        &app,
        Method::POST,
        "/workouts",
        Some(create_body(json!([
            { "exercise": "Squat", "weight": 100.0, "reps": -5 },
        ]))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid workout data" }));

    // Nothing was created.
    let (status, listed) = send(&app, Method::GET, "/workouts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn malformed_id_is_a_bad_request() {
    let app = app().await;

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&app, method, "/workouts/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid workout ID" }));
    }

    let (status, body) = send(&app, Method::PUT, "/workouts/-3", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid workout ID" }));
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/workouts/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Workout not found" }));

    let (status, _) = send(&app, Method::PUT, "/workouts/999999", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/workouts/999999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_merges_without_deleting_omitted_exercises() {
    let app = app().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/workouts",
        Some(create_body(json!([
            { "exercise": "Sqaut", "weight": 100.0, "reps": 5 },
            { "exercise": "Bench Press", "weight": 80.0, "reps": 8 },
        ]))),
    )
    .await;
    let id = created["id"].as_i64().unwrap();
    let exercise_id = created["exercises"][0]["id"].as_i64().unwrap();
    let set_id = created["exercises"][0]["sets"][0]["id"].as_i64().unwrap();

    // Rename the first exercise in place; say nothing about the second.
    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/workouts/{id}"),
        Some(json!({
            "exercises": [{
                "id": exercise_id,
                "name": "Squat",
                "sets": [{ "id": set_id, "reps": 6, "weight": 102.5 }],
            }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let exercises = updated["exercises"].as_array().unwrap();
    assert_eq!(exercises.len(), 2);
    assert_eq!(exercises[0]["id"].as_i64().unwrap(), exercise_id);
    assert_eq!(exercises[0]["name"], "Squat");
    assert_eq!(exercises[0]["sets"][0]["reps"], 6);
    assert_eq!(exercises[1]["name"], "Bench Press");
}

#[tokio::test]
async fn put_can_change_the_date() {
    let app = app().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/workouts",
        Some(create_body(json!([{ "exercise": "Row", "weight": 60.0, "reps": 10 }]))),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/workouts/{id}"),
        Some(json!({ "date": "2026-01-02T10:30:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(updated["date"].as_str().unwrap().starts_with("2026-01-02T10:30:00"));
}

#[tokio::test]
async fn delete_cascades_and_reports_success() {
    let app = app().await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/workouts",
        Some(create_body(json!([{ "exercise": "Squat", "weight": 100.0, "reps": 5 }]))),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&app, Method::DELETE, &format!("/workouts/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Workout deleted successfully." }));

    let (status, _) = send(&app, Method::GET, &format!("/workouts/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = app().await;

    let (_, first) = send(
        &app,
        Method::POST,
        "/workouts",
        Some(create_body(json!([{ "exercise": "Row", "weight": 60.0, "reps": 10 }]))),
    )
    .await;
    let (_, second) = send(
        &app,
        Method::POST,
        "/workouts",
        Some(create_body(json!([{ "exercise": "Press", "weight": 50.0, "reps": 8 }]))),
    )
    .await;

    // Push the second workout's date firmly into the future.
    send(
        &app,
        Method::PUT,
        &format!("/workouts/{}", second["id"].as_i64().unwrap()),
        Some(json!({ "date": "2030-01-01T00:00:00Z" })),
    )
    .await;

    let (status, listed) = send(&app, Method::GET, "/workouts", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], second["id"]);
    assert_eq!(listed[1]["id"], first["id"]);
}
