use axum::{
    extract::Query,
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Extension, Router,
};
use hyper::Server;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::analysis::Insight;
use crate::dashboard::{CompanyFilter, DashboardState, DashboardView, Span};
use crate::domain::SizeTier;

/// Query string accepted by `/api/companies`. Absent values fall back to
/// the reset selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterQuery {
    /// Comma-separated sector names
    pub sectors: Option<String>,
    pub revenue_min: Option<f64>,
    pub revenue_max: Option<f64>,
    pub employees_min: Option<u64>,
    pub employees_max: Option<u64>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    /// Comma-separated tier labels
    pub tiers: Option<String>,
    pub top_n: Option<usize>,
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl FilterQuery {
    pub fn into_filter(self, state: &DashboardState) -> Result<CompanyFilter, String> {
        let mut filter = CompanyFilter::reset(&state.params);

        if let Some(sectors) = self.sectors.as_deref() {
            filter.sectors = split_list(sectors);
        }
        if let Some(tiers) = self.tiers.as_deref() {
            filter.tiers = split_list(tiers)
                .iter()
                .map(|label| SizeTier::from_label(label).ok_or_else(|| format!("unknown tier '{label}'")))
                .collect::<Result<_, _>>()?;
        }
        if let Some(span) = filter.revenue_millions.as_mut() {
            *span = Span::new(
                self.revenue_min.unwrap_or(span.min),
                self.revenue_max.unwrap_or(span.max),
            );
        }
        if let Some(span) = filter.employees.as_mut() {
            *span = Span::new(
                self.employees_min.unwrap_or(span.min),
                self.employees_max.unwrap_or(span.max),
            );
        }
        if let Some(span) = filter.founding_years.as_mut() {
            *span = Span::new(self.year_min.unwrap_or(span.min), self.year_max.unwrap_or(span.max));
        }
        if let Some(top_n) = self.top_n {
            filter.top_n = top_n;
        }
        Ok(filter)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
}

/// Health check endpoint
async fn health(Extension(state): Extension<Arc<DashboardState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "company-insights",
        "version": env!("CARGO_PKG_VERSION"),
        "companies": state.table.len(),
    }))
}

async fn dashboard_params(Extension(state): Extension<Arc<DashboardState>>) -> impl IntoResponse {
    Json(state.params.clone())
}

async fn companies(
    Extension(state): Extension<Arc<DashboardState>>,
    Query(query): Query<FilterQuery>,
) -> Response {
    debug!("Company query: {:?}", query);
    match query.into_filter(&state) {
        Ok(filter) => Json(DashboardView::build(&state.table, &filter)).into_response(),
        Err(message) => bad_request(message),
    }
}

async fn insights(Extension(state): Extension<Arc<DashboardState>>) -> Json<Vec<Insight>> {
    Json(state.report.insights.clone())
}

async fn report(Extension(state): Extension<Arc<DashboardState>>) -> impl IntoResponse {
    Json(state.report.clone())
}

/// Create the HTTP router with all dashboard routes
pub fn create_server(state: Arc<DashboardState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/dashboard", get(dashboard_params))
        .route("/api/companies", get(companies))
        .route("/api/insights", get(insights))
        .route("/api/report", get(report))
        .layer(Extension(state))
        .layer(ServiceBuilder::new().layer(cors))
}

/// Start the HTTP server on the specified port
pub async fn start_server(state: Arc<DashboardState>, port: u16) -> anyhow::Result<()> {
    let app = create_server(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("Dashboard API running on http://localhost:{port}");
    info!("Health check: http://localhost:{port}/health");

    Server::bind(&addr).serve(app.into_make_service()).await?;

    Ok(())
}
