//! Presentation layer: rendering glue between HTTP and the dashboard
//! engine. The whole pipeline re-runs per request, as the original
//! dashboard re-ran per interaction; only the engine's TTL cache is
//! shared.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use dashboard_core::{AnalysisKind, DashboardError, DateRange};
use dashboard_engine::{DashboardEngine, DashboardRequest};
use news_sentiment::GoogleNewsClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use yahoo_client::YahooClient;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<DashboardEngine>,
}

/// Query parameters for the dashboard endpoint. The ticker is
/// required and never defaulted; dates default to the original
/// dashboard's range.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub ticker: String,
    #[serde(default = "default_start")]
    pub start: NaiveDate,
    #[serde(default = "default_end")]
    pub end: NaiveDate,
    #[serde(default = "default_analysis")]
    pub analysis: AnalysisKind,
    pub query: Option<String>,
}

fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).expect("valid literal date")
}

fn default_end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, 31).expect("valid literal date")
}

fn default_analysis() -> AnalysisKind {
    AnalysisKind::Technical
}

impl DashboardQuery {
    pub fn into_request(self) -> Result<DashboardRequest, DashboardError> {
        let ticker = self.ticker.trim().to_string();
        if ticker.is_empty() {
            return Err(DashboardError::InvalidRequest(
                "ticker must not be empty".to_string(),
            ));
        }

        Ok(DashboardRequest {
            ticker,
            range: DateRange::new(self.start, self.end)?,
            analysis: self.analysis,
            query: self.query,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

pub struct AppError(pub DashboardError);

impl AppError {
    fn kind(&self) -> &'static str {
        match self.0 {
            DashboardError::NoData(_) => "no_data",
            DashboardError::MalformedData(_) => "malformed_data",
            DashboardError::Network(_) => "network",
            DashboardError::Indicator(_) => "indicator",
            DashboardError::InvalidRequest(_) => "invalid_request",
            DashboardError::Snapshot(_) => "snapshot",
        }
    }

    fn status(&self) -> StatusCode {
        match self.0 {
            DashboardError::NoData(_) => StatusCode::NOT_FOUND,
            DashboardError::MalformedData(_) => StatusCode::BAD_GATEWAY,
            DashboardError::Network(_) => StatusCode::BAD_GATEWAY,
            DashboardError::Indicator(_) => StatusCode::INTERNAL_SERVER_ERROR,
            DashboardError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DashboardError::Snapshot(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.kind(),
            message: self.0.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<DashboardError> for AppError {
    fn from(e: DashboardError) -> Self {
        Self(e)
    }
}

async fn get_dashboard(
    State(state): State<AppState>,
    Query(params): Query<DashboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let request = params.into_request()?;
    tracing::info!(
        "dashboard request: {} {}..{} ({:?})",
        request.ticker,
        request.range.start,
        request.range.end,
        request.analysis
    );

    let view = state.engine.render(&request).await?;
    Ok(Json(view))
}

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let provider = Arc::new(YahooClient::new());
    let news = Arc::new(GoogleNewsClient::new());
    let engine = Arc::new(DashboardEngine::new(provider, news));

    let addr = std::env::var("DASH_BIND").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("dashboard server listening on {}", addr);

    axum::serve(listener, router(AppState { engine })).await?;
    Ok(())
}
