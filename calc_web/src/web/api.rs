//! JSON endpoints.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use calc_core::{BraidPattern, CalcError, CalculationRequest, CalculationSummary, CatalogInfo};

use super::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current health status (e.g., "healthy").
    pub status: String,
    /// Application version.
    pub version: String,
    /// Catalog source and size.
    pub catalog: CatalogInfo,
}

/// Braid list response.
#[derive(Debug, Serialize)]
pub struct BraidListResponse {
    /// Patterns in catalog order.
    pub braids: Vec<BraidPattern>,
    /// Number of patterns.
    pub total: usize,
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Error message.
    pub error: String,
    /// Stable error code (e.g., "PATTERN_NOT_FOUND").
    pub code: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    fn with_details(error: impl Into<String>, code: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: Some(details.into()),
        }
    }
}

impl From<&CalcError> for ApiError {
    fn from(err: &CalcError) -> Self {
        Self {
            error: err.to_string(),
            code: err.error_code().to_string(),
            details: err.field().map(|f| format!("field: {f}")),
        }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

fn error_status(err: &CalcError) -> StatusCode {
    match err {
        CalcError::PatternNotFound { .. } => StatusCode::NOT_FOUND,
        CalcError::InvalidInput { .. } | CalcError::MissingField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /health - Health check endpoint.
pub(super) async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog: state.catalog_info().clone(),
    })
}

/// GET /api/braids - List catalog patterns.
pub(super) async fn list_braids(State(state): State<AppState>) -> Json<BraidListResponse> {
    let braids = state.catalog().patterns().to_vec();
    let total = braids.len();
    Json(BraidListResponse { braids, total })
}

/// GET /api/braids/{name} - Get one pattern by exact name.
pub(super) async fn get_braid(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<BraidPattern> {
    state.catalog().get(&name).cloned().map(Json).ok_or_else(|| {
        let err = CalcError::pattern_not_found(name);
        (StatusCode::NOT_FOUND, Json(ApiError::from(&err)))
    })
}

/// POST /api/calculate - Calculate cord lengths.
pub(super) async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> ApiResult<CalculationSummary> {
    let Json(request) = payload.map_err(|rejection| {
        (
            rejection.status(),
            Json(ApiError::with_details(
                "Invalid request body",
                "INVALID_REQUEST",
                rejection.body_text(),
            )),
        )
    })?;

    let summary = calc_core::try_calculate(state.catalog(), &request).map_err(|err| {
        debug!("Rejected calculation for '{}': {}", request.braid_name, err);
        (error_status(&err), Json(ApiError::from(&err)))
    })?;

    debug!(
        "Calculated {} cords for '{}' at {} cm",
        summary.cords.len(),
        summary.braid_name,
        summary.wrist_cm
    );

    Ok(Json(summary))
}
