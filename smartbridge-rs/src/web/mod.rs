// smartbridge-rs/src/web/mod.rs
// HTTP surface: the HTML page, a small JSON API and a health probe

pub mod render;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

use crate::bridge::SmartBridge;
use crate::prompts::is_blank;
use render::{render_page, CritiqueOutcome, PageView, BLANK_REPLY_WARNING};

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Largest accepted request body
pub const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

/// Shared application state
pub struct AppState {
    pub bridge: SmartBridge,
    pub service_name: String,
}

impl AppState {
    pub fn new(bridge: SmartBridge, service_name: impl Into<String>) -> Self {
        Self {
            bridge,
            service_name: service_name.into(),
        }
    }
}

/// Form posted by the page
#[derive(Debug, Default, Deserialize)]
pub struct BridgeForm {
    #[serde(default)]
    pub received: String,
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub action: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub translated_text: String,
}

#[derive(Debug, Deserialize)]
pub struct CritiqueRequest {
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub context: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub healthy: bool,
    pub service_name: String,
    pub uptime_seconds: i64,
    pub status: String,
    pub model_candidates: Vec<String>,
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let _ = *START_TIME;

    Router::new()
        .route("/", get(index_handler).post(submit_handler))
        .route("/api/translate", post(translate_handler))
        .route("/api/critique", post(critique_handler))
        .route("/health", get(health_handler))
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(access_log_middleware))
                .layer(RequestBodyLimitLayer::new(MAX_PAYLOAD_SIZE)),
        )
        .with_state(state)
}

async fn access_log_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} -> {} ({} ms)",
        method,
        path,
        response.status().as_u16(),
        started.elapsed().as_millis()
    );
    response
}

/// GET / - empty page
async fn index_handler() -> Html<String> {
    Html(render_page(&PageView::default()))
}

/// POST / - translate the received message and, on "check", critique the reply
async fn submit_handler(State(state): State<Arc<AppState>>, Form(form): Form<BridgeForm>) -> Html<String> {
    let translation = state.bridge.translate(&form.received).await;

    let outcome = match form.action.as_deref() {
        Some("check") if is_blank(&form.reply) => CritiqueOutcome::BlankReply,
        Some("check") => match state.bridge.critique(&form.reply, &form.received).await {
            Some(result) => CritiqueOutcome::Ready(result),
            None => CritiqueOutcome::Failed,
        },
        _ => CritiqueOutcome::NotRequested,
    };

    Html(render_page(&PageView {
        received: form.received,
        translation,
        reply: form.reply,
        outcome,
    }))
}

/// POST /api/translate
async fn translate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TranslateRequest>,
) -> Json<TranslateResponse> {
    Json(TranslateResponse {
        translated_text: state.bridge.translate(&request.text).await,
    })
}

/// POST /api/critique
async fn critique_handler(State(state): State<Arc<AppState>>, Json(request): Json<CritiqueRequest>) -> Response {
    if is_blank(&request.reply) {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: BLANK_REPLY_WARNING.to_string(),
            }),
        )
            .into_response();
    }

    match state.bridge.try_critique(&request.reply, &request.context).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            log::error!("Critique request failed: {}", err);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let uptime = START_TIME.elapsed().as_secs() as i64;

    Json(HealthResponse {
        healthy: true,
        service_name: state.service_name.clone(),
        uptime_seconds: uptime,
        status: "SERVING".to_string(),
        model_candidates: state
            .bridge
            .candidates()
            .iter()
            .map(|candidate| candidate.to_string())
            .collect(),
    })
}
