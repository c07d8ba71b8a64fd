//! HTTP surface for the north node service.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use north_node::ephemeris::{HouseSystem, NodeKind, SwissEphemerisAdapter};
use north_node::time::TimezoneResolver;
use north_node::{NodeChart, NodeChartService, NodeError, NodeQuery};
use north_node_config::ServerSettings;
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

pub struct AppState {
    pub service: NodeChartService,
}

/// Build the shared state from settings. Fails on bad configuration.
pub fn build_state(settings: &ServerSettings) -> anyhow::Result<Arc<AppState>> {
    let house_system: HouseSystem = settings
        .house_system
        .parse()
        .map_err(|e| anyhow::anyhow!("house_system: {e}"))?;
    let node_kind: NodeKind = settings
        .node
        .parse()
        .map_err(|e| anyhow::anyhow!("node: {e}"))?;
    let adapter = SwissEphemerisAdapter::new(settings.ephemeris_path.clone())?;

    log::info!(
        "house system {}, {:?} node, zone database {}",
        house_system,
        node_kind,
        if settings.use_zone_database { "on" } else { "off" }
    );

    let service = NodeChartService::new(
        Arc::new(adapter),
        TimezoneResolver::new(settings.use_zone_database),
        house_system,
        node_kind,
    );
    Ok(Arc::new(AppState { service }))
}

pub fn router(state: Arc<AppState>, cors_origins: &[String]) -> Router {
    let router = Router::new()
        .route("/north-node", get(north_node))
        .route("/health", get(health))
        .with_state(state);

    match cors_layer(cors_origins) {
        Some(layer) => router.layer(layer),
        None => router,
    }
}

fn cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();
    if allowed.is_empty() {
        return None;
    }
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed))
            .allow_methods([Method::GET]),
    )
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn north_node(
    State(state): State<Arc<AppState>>,
    query: Result<Query<NodeQuery>, QueryRejection>,
) -> Result<Json<NodeChart>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError {
        status: StatusCode::BAD_REQUEST,
        kind: "InputValidationError",
        message: e.body_text(),
    })?;
    let request = query.validate()?;

    let service = state.service.clone();
    let chart = tokio::task::spawn_blocking(move || service.compute(&request))
        .await
        .map_err(|e| ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "EphemerisFailure",
            message: format!("ephemeris worker failed: {e}"),
        })??;

    Ok(Json(chart))
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub kind: &'static str,
    pub message: String,
}

impl From<NodeError> for ApiError {
    fn from(err: NodeError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            log::error!("{}: {}", self.kind, self.message);
        } else {
            log::debug!("rejected request: {}: {}", self.kind, self.message);
        }
        (
            self.status,
            Json(json!({ "error": self.kind, "message": self.message })),
        )
            .into_response()
    }
}
