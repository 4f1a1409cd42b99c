mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode},
    response::Response,
};
use common::TempDb;
use itembox::server::routes::items::MutatedItem;
use itembox::server::{ItemboxState, itembox_router};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn app(db: &TempDb) -> Router {
    itembox_router(ItemboxState::new(db.store().await))
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

async fn body_json(resp: Response) -> Value {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    serde_json::from_slice(&body).expect("response body was not json")
}

#[tokio::test]
async fn book_scenario_round_trip() {
    let db = TempDb::new("route-book");
    let app = app(&db).await;

    // create
    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/items",
            json!({ "name": "Book", "description": "A novel" }),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(resp).await,
        json!({ "id": 1, "name": "Book", "description": "A novel" })
    );

    // list shows it
    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/api/items"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!([{ "id": 1, "name": "Book", "description": "A novel" }])
    );

    // update
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/items/1",
            json!({ "name": "Book", "description": "A great novel" }),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "message": "Item updated successfully" })
    );

    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/api/items"))
        .await
        .expect("request failed");
    assert_eq!(
        body_json(resp).await,
        json!([{ "id": 1, "name": "Book", "description": "A great novel" }])
    );

    // delete
    let resp = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/items/1"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await,
        json!({ "message": "Item deleted successfully" })
    );

    // delete again
    let resp = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/items/1"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({ "message": "Item not found" }));

    let resp = app
        .oneshot(empty_request("GET", "/api/items"))
        .await
        .expect("request failed");
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn update_of_missing_or_malformed_id_is_404() {
    let db = TempDb::new("route-missing");
    let app = app(&db).await;

    for uri in ["/api/items/999", "/api/items/abc"] {
        let resp = app
            .clone()
            .oneshot(json_request("PUT", uri, json!({ "name": "x" })))
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "PUT {uri}");
        assert_eq!(body_json(resp).await, json!({ "message": "Item not found" }));

        let resp = app
            .clone()
            .oneshot(empty_request("DELETE", uri))
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "DELETE {uri}");
    }
}

#[tokio::test]
async fn missing_name_surfaces_storage_error_as_500() {
    let db = TempDb::new("route-null-name");
    let app = app(&db).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/items",
            json!({ "description": "no name" }),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    let error = body["error"].as_str().expect("error field");
    assert!(error.contains("NOT NULL"), "unexpected error text: {error}");

    let resp = app
        .oneshot(empty_request("GET", "/api/items"))
        .await
        .expect("request failed");
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn description_is_optional() {
    let db = TempDb::new("route-no-description");
    let app = app(&db).await;

    let resp = app
        .oneshot(json_request("POST", "/api/items", json!({ "name": "Pen" })))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "Pen");
    assert_eq!(body["description"], Value::Null);
}

#[tokio::test]
async fn non_json_body_is_rejected() {
    let db = TempDb::new("route-bad-json");
    let app = app(&db).await;

    let resp = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/items")
                .header("content-type", "application/json")
                .body(Body::from("not-json"))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(resp).await["error"].is_string());

    // Without a JSON content type the body reads as `{}`, so `name` is NULL.
    let resp = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/items")
                .body(Body::from(r#"{"name":"ignored"}"#))
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(resp).await["error"].as_str().unwrap().contains("NOT NULL"));
}

#[tokio::test]
async fn wrong_typed_fields_are_written_as_text() {
    let db = TempDb::new("route-lenient");
    let app = app(&db).await;

    let resp = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/items",
            json!({ "name": 5, "description": ["x"] }),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "5");
    assert_eq!(body["description"], Value::Null);

    let id = body["id"].as_i64().unwrap();
    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/items/{id}"),
            json!({ "name": true, "description": 2.5 }),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(empty_request("GET", "/api/items"))
        .await
        .expect("request failed");
    assert_eq!(
        body_json(resp).await,
        json!([{ "id": id, "name": "true", "description": "2.5" }])
    );
}

#[tokio::test]
async fn array_body_writes_nulls_and_fails_in_store() {
    let db = TempDb::new("route-array");
    let app = app(&db).await;

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/items", json!([1])))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_json(resp).await["error"].as_str().unwrap().contains("NOT NULL"));

    let resp = app
        .oneshot(empty_request("GET", "/api/items"))
        .await
        .expect("request failed");
    assert_eq!(body_json(resp).await, json!([]));
}

#[tokio::test]
async fn numeric_looking_ids_match_their_row() {
    let db = TempDb::new("route-id-forms");
    let app = app(&db).await;

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/items", json!({ "name": "Cup" })))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/items/1.0",
            json!({ "name": "Cup", "description": "tea" }),
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .oneshot(empty_request("DELETE", "/api/items/%201"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn mutations_tag_response_with_item_id() {
    let db = TempDb::new("route-mutated-item");
    let app = app(&db).await;

    let resp = app
        .clone()
        .oneshot(json_request("POST", "/api/items", json!({ "name": "Fan" })))
        .await
        .expect("request failed");
    assert_eq!(
        resp.extensions().get::<MutatedItem>(),
        Some(&MutatedItem(1))
    );

    let resp = app
        .clone()
        .oneshot(empty_request("DELETE", "/api/items/1"))
        .await
        .expect("request failed");
    assert_eq!(
        resp.extensions().get::<MutatedItem>(),
        Some(&MutatedItem(1))
    );

    let resp = app
        .oneshot(empty_request("DELETE", "/api/items/1"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.extensions().get::<MutatedItem>().is_none());
}

#[tokio::test]
async fn unknown_routes_are_404_and_request_id_is_echoed() {
    let db = TempDb::new("route-fallback");
    let app = app(&db).await;

    let resp = app
        .clone()
        .oneshot(empty_request("GET", "/api/unknown"))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(resp.headers().contains_key("x-request-id"));

    let resp = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/items")
                .header("x-request-id", "trace-me")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("trace-me")
    );
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let db = TempDb::new("route-cors");
    let app = app(&db).await;

    let resp = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/items")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(
        resp.headers()
            .contains_key("access-control-allow-origin")
    );
}
