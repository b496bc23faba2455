//! # API REST
//!
//! HTTP surface of the disaster response dashboard.
//!
//! Handles:
//! - The HTML landing page (`/`, `/index`) and results page (`/go`)
//! - A JSON mirror of both (`/api/graphs`, `/api/classify`) with OpenAPI/Swagger documentation
//! - Health checks
//!
//! All request state lives in a [`DashboardContext`] loaded once at startup.

#![warn(rust_2018_idioms)]

pub mod pages;

use api_shared::{
    Axis, BarMode, BarTrace, CategoryLabel, ClassifyRes, Graph, GraphsRes, HealthRes,
    HealthService, Layout,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, Json},
    routing::get,
    Router,
};
use dr_core::DashboardContext;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{IntoParams, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

type HandlerError = (StatusCode, &'static str);

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    ctx: Arc<DashboardContext>,
}

impl AppState {
    pub fn new(ctx: DashboardContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }
}

/// Query string of the classification routes.
///
/// Only the first `query` pair counts; a missing `query` is the empty string and any other keys
/// are ignored.
#[derive(Debug, Default, PartialEq, Eq, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ClassifyParams {
    /// Free-text message to classify
    pub query: String,
}

impl From<Vec<(String, String)>> for ClassifyParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let query = pairs
            .into_iter()
            .find(|(key, _)| key == "query")
            .map(|(_, value)| value)
            .unwrap_or_default();
        Self { query }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, api_graphs, api_classify),
    components(schemas(
        HealthRes,
        GraphsRes,
        Graph,
        BarTrace,
        Layout,
        Axis,
        BarMode,
        ClassifyRes,
        CategoryLabel,
    ))
)]
struct ApiDoc;

/// Build the dashboard router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/index", get(index))
        .route("/go", get(go))
        .route("/health", get(health))
        .route("/api/graphs", get(api_graphs))
        .route("/api/classify", get(api_classify))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve the dashboard until the process exits.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails while running.
pub async fn serve(addr: &str, ctx: DashboardContext) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("-- Serving disaster response dashboard on {}", listener.local_addr()?);

    axum::serve(listener, router(AppState::new(ctx))).await?;
    Ok(())
}

fn internal_error(context: &str, err: impl std::fmt::Display) -> HandlerError {
    tracing::error!("{context}: {err}");
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
}

/// Landing page with the genre and top-category charts.
#[axum::debug_handler]
async fn index(State(state): State<AppState>) -> Result<Html<String>, HandlerError> {
    let graphs = state.ctx.graphs();
    pages::render_index(&graphs)
        .map(Html)
        .map_err(|e| internal_error("Render index error", e))
}

/// Classify `query` and render the results page.
#[axum::debug_handler]
async fn go(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Html<String>, HandlerError> {
    let params = ClassifyParams::from(pairs);
    tracing::debug!("classifying query of {} bytes", params.query.len());
    let result = state
        .ctx
        .classify(&params.query)
        .map_err(|e| internal_error("Classify error", e))?;
    Ok(Html(pages::render_go(&result)))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// # Returns
/// * `Json<HealthRes>` - Health status response containing service status
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    get,
    path = "/api/graphs",
    responses(
        (status = 200, description = "Landing page chart definitions", body = GraphsRes)
    )
)]
/// Chart definitions embedded in the landing page
///
/// Recomputed from the loaded dataset on every request.
#[axum::debug_handler]
async fn api_graphs(State(state): State<AppState>) -> Json<GraphsRes> {
    Json(state.ctx.graphs())
}

#[utoipa::path(
    get,
    path = "/api/classify",
    params(ClassifyParams),
    responses(
        (status = 200, description = "Predicted label per category", body = ClassifyRes),
        (status = 500, description = "Internal server error")
    )
)]
/// Classify a single message
///
/// # Errors
/// Returns `500 Internal Server Error` if the classifier fails.
#[axum::debug_handler]
async fn api_classify(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ClassifyRes>, HandlerError> {
    let params = ClassifyParams::from(pairs);
    state
        .ctx
        .classify(&params.query)
        .map(Json)
        .map_err(|e| internal_error("Classify error", e))
}
