// HTTP request handlers
use crate::domain::error::DashboardError;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::page::{dashboard_page, error_page};
use crate::presentation::params::{active_tab, criteria_from_params, source_from_params};
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;

type Params = Query<Vec<(String, String)>>;

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            DashboardError::Fetch(_) | DashboardError::Decode(_) => StatusCode::BAD_GATEWAY,
            DashboardError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Render the dashboard page for the submitted controls
pub async fn dashboard_page_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Response {
    let result = match criteria_from_params(&params, state.dashboard_service.default_top_n()) {
        Ok(criteria) => state.dashboard_service.get_dashboard(&criteria).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(dashboard) => dashboard_page(&dashboard, active_tab(&params)).into_response(),
        Err(e) => {
            tracing::error!("Error building dashboard page: {}", e);
            let title = match &e {
                DashboardError::InvalidFilter(_) => "Invalid filter",
                _ => "Sales source unavailable",
            };
            (e.status_code(), error_page(title, &e.to_string())).into_response()
        }
    }
}

/// Dashboard as JSON, Brotli-compressed when the client accepts it
pub async fn dashboard_json(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Response {
    let criteria = match criteria_from_params(&params, state.dashboard_service.default_top_n()) {
        Ok(criteria) => criteria,
        Err(e) => return e.into_response(),
    };

    match state.dashboard_service.get_dashboard(&criteria).await {
        Ok(dashboard) => match json_response(&dashboard, accepts_brotli(&headers)).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => {
            tracing::error!("Error building dashboard: {}", e);
            e.into_response()
        }
    }
}

/// Salesperson names for the multi-select of the given region/year
pub async fn list_salespeople(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Response {
    let query = match source_from_params(&params) {
        Ok(query) => query,
        Err(e) => return e.into_response(),
    };

    match state.dashboard_service.list_salespeople(query).await {
        Ok(names) => match json_response(&names, accepts_brotli(&headers)).await {
            Ok(response) => response,
            Err(status) => status.into_response(),
        },
        Err(e) => {
            tracing::error!("Error listing salespeople: {}", e);
            e.into_response()
        }
    }
}

/// Stream the dashboard progressively (skeleton, tabs, completion)
pub async fn stream_dashboard(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Response {
    let criteria = match criteria_from_params(&params, state.dashboard_service.default_top_n()) {
        Ok(criteria) => criteria,
        Err(e) => return e.into_response(),
    };

    let rx = state.streaming_service.stream_dashboard(criteria).await;
    stream_from_receiver(rx, accepts_brotli(&headers)).into_response()
}
