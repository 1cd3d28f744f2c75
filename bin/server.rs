// Salary Insights - Web Server
// JSON API exposing gated cohort statistics to presentation layers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use salary_insights::config::default_comparison_regions;
use salary_insights::{
    compare_regions, fetch_cohort_statistics, project_series, telemetry, AppConfig, CohortKey,
    IntakeError, NewSubmission, SqliteStore,
};

/// Shared application state
#[derive(Clone)]
struct AppState {
    store: SqliteStore,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

#[derive(Serialize)]
struct Created {
    id: String,
}

#[derive(Deserialize)]
struct CompareQuery {
    /// Comma-separated region codes
    regions: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/stats/:region/:category - Gated statistics for one cohort
async fn get_stats(
    State(state): State<AppState>,
    Path((region, category)): Path<(String, String)>,
) -> impl IntoResponse {
    let key = CohortKey::new(&region, &category);
    let stats = fetch_cohort_statistics(&state.store, &key).await;
    Json(ApiResponse::ok(stats))
}

/// GET /api/series/:region/:category - Growth series for one cohort
async fn get_series(
    State(state): State<AppState>,
    Path((region, category)): Path<(String, String)>,
) -> impl IntoResponse {
    let key = CohortKey::new(&region, &category);
    let stats = fetch_cohort_statistics(&state.store, &key).await;
    Json(ApiResponse::ok(project_series(&stats)))
}

/// GET /api/compare/:category?regions=MD,DC,VA - Comparison matrix
async fn get_comparison(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<CompareQuery>,
) -> impl IntoResponse {
    let regions: Vec<String> = match query.regions {
        Some(list) => list
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect(),
        None => default_comparison_regions(),
    };

    let matrix = compare_regions(&state.store, &category, &regions).await;
    Json(ApiResponse::ok(matrix))
}

/// POST /api/submissions - Store one anonymous submission
async fn create_submission(
    State(state): State<AppState>,
    Json(submission): Json<NewSubmission>,
) -> impl IntoResponse {
    match state.store.submit(submission) {
        Ok(id) => (StatusCode::CREATED, Json(ApiResponse::ok(Created { id }))).into_response(),
        Err(e) => {
            if let Some(intake) = e.downcast_ref::<IntakeError>() {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<Created>::err(intake.to_string())),
                )
                    .into_response();
            }
            error!(error = %e, "failed to store submission");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<Created>::err("submission could not be stored")),
            )
                .into_response()
        }
    }
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let config = AppConfig::from_env();
    let store = SqliteStore::open(&config.database_path)?;
    info!(path = ?config.database_path, submissions = store.count()?, "database opened");

    let state = AppState { store };

    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/stats/:region/:category", get(get_stats))
        .route("/series/:region/:category", get(get_series))
        .route("/compare/:category", get(get_comparison))
        .route("/submissions", post(create_submission))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
