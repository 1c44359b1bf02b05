#![cfg(feature = "server")]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use neuq_free_classroom::model::structs::ClassroomDataResponse;
use neuq_free_classroom::server::{routes, AppState};
use tower::util::ServiceExt;

fn app() -> Router {
    routes(AppState::default())
}

async fn get(uri: &str) -> axum::response::Response {
    app()
        .oneshot(Request::builder().uri(uri).method("GET").body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn pages_are_served_as_html() {
    for uri in ["/", "/visualization-preview"] {
        let response = get(uri).await;
        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}

#[tokio::test]
async fn data_endpoint_returns_mock_rooms() {
    let response = get("/api/classroom-data/3").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let data: ClassroomDataResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(data.period, 3);
    assert_eq!(data.building, "工学馆");
    assert_eq!(data.classrooms.len(), 15);
    assert_eq!(data.date.len(), 10);
}

#[tokio::test]
async fn data_endpoint_rejects_bad_period() {
    for uri in ["/api/classroom-data/0", "/api/classroom-data/13", "/api/classroom-data/abc"] {
        let response = get(uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Invalid period");
    }
}

#[tokio::test]
async fn image_endpoint_returns_cacheable_png() {
    let response = get("/api/classroom-image/10").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=300");

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test]
async fn image_endpoint_rejects_bad_period() {
    let response = get("/api/classroom-image/99").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], b"Invalid period");
}
