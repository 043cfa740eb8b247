//! HTTP service surface.
//!
//! Thin I/O glue over the core modules: canned tasks, the model pipeline,
//! and the GitHub passthrough. Pipeline failures never become HTTP errors;
//! only caller-side mistakes (bad secret, missing fields) do, using the
//! `{"detail": ...}` body shape throughout.

use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::github::{AuthReport, GistReport, GithubClient};
use crate::llm::ModelPipeline;
use crate::storage::Workspace;
use crate::tasks;

/// Agent identifier stamped on task responses.
pub const AGENT_NAME: &str = "taskforge";

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    pipeline: ModelPipeline,
    github: GithubClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_components(config, ModelPipeline::new(), GithubClient::from_env())
    }

    /// Assemble from pre-built components (tests swap in mocks here).
    pub fn with_components(config: Config, pipeline: ModelPipeline, github: GithubClient) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pipeline,
                github,
            }),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("invalid secret")]
    InvalidSecret,
    #[error("task/brief is required")]
    MissingTask,
    #[error("{0}")]
    GistRejected(String),
    #[error("{0}")]
    Storage(String),
}

impl GatewayError {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidSecret => StatusCode::UNAUTHORIZED,
            Self::MissingTask | Self::GistRejected(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (self.status(), body).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskQuery {
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskIn {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub secret: Option<String>,
    pub task: String,
    #[serde(default = "default_round")]
    pub round: u32,
    #[serde(default)]
    pub nonce: Option<String>,
    #[serde(default)]
    pub brief: Option<String>,
    #[serde(default)]
    pub checks: Option<Vec<String>>,
    #[serde(default)]
    pub evaluation_url: Option<String>,
    #[serde(default)]
    pub attachments: Option<Vec<String>>,
}

fn default_round() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub task: String,
    pub agent: String,
    pub output: String,
    pub files_created: Vec<String>,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct GistIn {
    pub filename: String,
    pub content: String,
    #[serde(default = "default_gist_description")]
    pub description: String,
    #[serde(default)]
    pub public: bool,
}

fn default_gist_description() -> String {
    "taskforge gist".to_string()
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .route("/task", get(task_get).post(task_post))
        .route("/github/auth-check", get(github_auth_check))
        .route("/github/gist", post(github_gist))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Bind and serve until ctrl-c.
pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(%addr, "gateway listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "taskforge is live. Use /task?q=Describe+your+app"
    }))
}

async fn health_check() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

async fn task_get(
    State(state): State<AppState>,
    Query(query): Query<TaskQuery>,
) -> Result<Json<TaskResponse>, GatewayError> {
    let workspace = Workspace::new(state.inner.config.data_dir.clone());
    let outcome = tasks::run_canned_task(&query.q, &workspace)
        .map_err(|err| GatewayError::Storage(err.to_string()))?;

    Ok(Json(TaskResponse {
        task: query.q,
        agent: AGENT_NAME.to_string(),
        output: outcome.output,
        files_created: outcome.files_created,
        email: state.inner.config.user_email.clone(),
    }))
}

async fn task_post(
    State(state): State<AppState>,
    Json(body): Json<TaskIn>,
) -> Result<Json<TaskResponse>, GatewayError> {
    if let Some(expected) = state.inner.config.secret.as_deref() {
        if body.secret.as_deref() != Some(expected) {
            return Err(GatewayError::InvalidSecret);
        }
    }

    let prompt = body
        .brief
        .as_deref()
        .filter(|brief| !brief.is_empty())
        .unwrap_or(&body.task);
    if prompt.is_empty() {
        return Err(GatewayError::MissingTask);
    }

    let outcome = state.inner.pipeline.invoke(prompt).await;
    info!(degraded = outcome.degraded, "model invocation answered");

    let email = body
        .email
        .filter(|email| !email.is_empty())
        .unwrap_or_else(|| state.inner.config.user_email.clone());
    Ok(Json(TaskResponse {
        task: body.task,
        agent: AGENT_NAME.to_string(),
        output: outcome.text,
        files_created: Vec::new(),
        email,
    }))
}

async fn github_auth_check(State(state): State<AppState>) -> Json<AuthReport> {
    Json(state.inner.github.auth_check().await)
}

async fn github_gist(
    State(state): State<AppState>,
    Json(body): Json<GistIn>,
) -> Result<Json<GistReport>, GatewayError> {
    let report = state
        .inner
        .github
        .create_gist(&body.filename, &body.content, &body.description, body.public)
        .await;
    if !report.ok {
        let reason = report
            .reason
            .unwrap_or_else(|| "failed to create gist".to_string());
        return Err(GatewayError::GistRejected(reason));
    }
    Ok(Json(report))
}
