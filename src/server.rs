use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};

use crate::app::{App, GenerateRequest};
use crate::character::CharacterRecord;
use crate::error::AppError;
use crate::questions::{Question, QUESTIONS};
use crate::{pdf, sheet};

// Server-side state: the assembler plus the single-slot "last generated
// character". The slot is explicit state passed to the handlers that need it
// (PDF export, portrait regeneration), not a process global.
pub struct ServerState {
    pub app: App,
    pub last_character: RwLock<Option<CharacterRecord>>,
}

impl ServerState {
    pub fn new(app: App) -> Self {
        Self {
            app,
            last_character: RwLock::new(None),
        }
    }
}

pub type SharedState = Arc<ServerState>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Engine(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NoCharacter => StatusCode::NOT_FOUND,
            AppError::Network(_)
            | AppError::OpenAI(_)
            | AppError::TextGeneration(_)
            | AppError::Portrait(_)
            | AppError::Timeout => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error!("[server] request failed: {self}");
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/questions", get(questions))
        .route("/api/rules/*path", get(rules_proxy))
        .route("/api/character", post(generate_character).get(current_character))
        .route("/api/portrait", post(regenerate_portrait))
        .route("/api/sheet", get(sheet_text))
        .route("/api/pdf", get(sheet_pdf))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn serve(state: SharedState, port: u16) -> Result<(), AppError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("[server] listening on http://{addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn questions() -> Json<&'static [Question]> {
    Json(QUESTIONS)
}

// Caching pass-through to the rules-data API, keyed by endpoint path.
async fn rules_proxy(
    State(state): State<SharedState>,
    Path(path): Path<String>,
) -> Result<Json<Value>, AppError> {
    let value = state.app.rules.fetch(&path).await?;
    Ok(Json(value))
}

// The main wizard submission. The record is stored in the session slot even
// when the portrait step fails, so the PDF and regeneration endpoints keep
// working; the failure itself still surfaces to the caller.
async fn generate_character(
    State(state): State<SharedState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<CharacterRecord>, AppError> {
    info!("[server] generating character at level {}", request.level);
    let mut record = state.app.generate_character(&request).await?;
    let portrait_result = state.app.attach_portrait(&mut record).await;
    *state.last_character.write().await = Some(record.clone());
    portrait_result?;
    Ok(Json(record))
}

async fn current_character(
    State(state): State<SharedState>,
) -> Result<Json<CharacterRecord>, AppError> {
    let record = state
        .last_character
        .read()
        .await
        .clone()
        .ok_or(AppError::NoCharacter)?;
    Ok(Json(record))
}

async fn regenerate_portrait(
    State(state): State<SharedState>,
) -> Result<Json<CharacterRecord>, AppError> {
    let mut record = state
        .last_character
        .read()
        .await
        .clone()
        .ok_or(AppError::NoCharacter)?;
    state.app.attach_portrait(&mut record).await?;
    *state.last_character.write().await = Some(record.clone());
    Ok(Json(record))
}

async fn sheet_text(State(state): State<SharedState>) -> Result<Response, AppError> {
    let record = state
        .last_character
        .read()
        .await
        .clone()
        .ok_or(AppError::NoCharacter)?;
    let body = sheet::render_sheet(&record);
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response())
}

async fn sheet_pdf(State(state): State<SharedState>) -> Result<Response, AppError> {
    let record = state
        .last_character
        .read()
        .await
        .clone()
        .ok_or(AppError::NoCharacter)?;
    let filename: String = record
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    // Pdfium handles are not Send, so the rendering runs on a blocking thread.
    let bytes = tokio::task::spawn_blocking(move || pdf::render_pdf(&record))
        .await
        .map_err(|err| AppError::Pdf(err.to_string()))??;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}_character.pdf\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
