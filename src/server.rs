//! Preview web server.
//!
//! Serves two static pages and two endpoints that render mock data for a
//! period: `/api/classroom-image/{period}` (PNG) and
//! `/api/classroom-data/{period}` (JSON). Nothing here talks to the portal.

use crate::config::{RenderConfig, ServerConfig};
use crate::date;
use crate::error::Result;
use crate::mock::{self, MOCK_BUILDING};
use crate::model::dtos::{FIRST_PERIOD, LAST_PERIOD};
use crate::model::structs::ClassroomDataResponse;
use crate::render::{self, RenderMeta, Renderer};
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

const HOME_PAGE: &str = include_str!("../static/home.html");
const PREVIEW_PAGE: &str = include_str!("../static/preview.html");

#[derive(Clone)]
pub struct AppState {
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(renderer: Renderer) -> Self {
        Self {
            renderer: Arc::new(renderer),
        }
    }
}

impl Default for AppState {
    /// Default layout; falls back to text-less images when font lookup fails.
    fn default() -> Self {
        let renderer = Renderer::new(RenderConfig::default()).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "font lookup failed, rendering without text");
            Renderer::with_font(RenderConfig::default(), None)
        });
        Self::new(renderer)
    }
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/visualization-preview", get(preview))
        .route("/api/classroom-image/{period}", get(classroom_image))
        .route("/api/classroom-data/{period}", get(classroom_data))
        .with_state(state)
}

fn parse_period(raw: &str) -> Option<u8> {
    raw.trim()
        .parse::<u8>()
        .ok()
        .filter(|p| (FIRST_PERIOD..=LAST_PERIOD).contains(p))
}

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

async fn preview() -> Html<&'static str> {
    Html(PREVIEW_PAGE)
}

async fn classroom_image(State(state): State<AppState>, Path(raw): Path<String>) -> Response {
    let Some(period) = parse_period(&raw) else {
        return (StatusCode::BAD_REQUEST, "Invalid period").into_response();
    };

    let meta = RenderMeta::new(MOCK_BUILDING, date::today(), period);
    let image = state
        .renderer
        .render_classroom_info(&mock::mock_classrooms(period), &meta);

    match render::encode_png(&image) {
        Ok(png) => (
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, "public, max-age=300"),
            ],
            png,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(period, error = %e, "failed to render classroom image");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn classroom_data(Path(raw): Path<String>) -> Response {
    let Some(period) = parse_period(&raw) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid period" })),
        )
            .into_response();
    };

    Json(ClassroomDataResponse {
        date: date::today(),
        period,
        building: MOCK_BUILDING.label().to_string(),
        classrooms: mock::mock_classrooms(period),
    })
    .into_response()
}

/// Resolves once `signal` fires. A signal that cannot be installed never resolves.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down preview server");
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await
}

pub async fn serve(config: ServerConfig, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(config.addr()).await?;
    tracing::info!("preview server listening on http://{}", config.addr());
    tracing::info!("visualization preview: http://{}/visualization-preview", config.addr());

    axum::serve(listener, routes(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_outside_the_day_are_rejected() {
        assert_eq!(parse_period("1"), Some(1));
        assert_eq!(parse_period("12"), Some(12));
        assert_eq!(parse_period("0"), None);
        assert_eq!(parse_period("13"), None);
        assert_eq!(parse_period("abc"), None);
        assert_eq!(parse_period("-1"), None);
    }

    #[tokio::test]
    async fn broken_signal_handler_keeps_serving() {
        let pending = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            wait_for_shutdown(async { Err(std::io::Error::other("no signal driver")) }),
        )
        .await;
        assert!(pending.is_err());
    }

    #[tokio::test]
    async fn signal_triggers_shutdown() {
        wait_for_shutdown(async { Ok(()) }).await;
    }
}
