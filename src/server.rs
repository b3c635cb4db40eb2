use std::sync::Arc;
use axum::{routing::post, Router, Json};
use tower_http::cors::{CorsLayer, Any};
use serde::{Deserialize, Serialize};
use axum::http::StatusCode;
use tracing::{info, warn};
use crate::completion::EnumResolver;
use crate::element::EditOutcome;
use crate::error::{Result, SentenceError};
use crate::render::{ElementView, RowLayout};
use crate::sentence::{DslSentence, SentenceEditor};

pub type SharedResolver = Arc<dyn EnumResolver + Send + Sync>;

#[derive(Deserialize)]
pub struct RenderRequest {
    pub definition: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Serialize)]
pub struct RenderResponse {
    pub status: String,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Vec<Vec<ElementView>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Edit {
    Text(String),
    Select(String),
    Checked(bool),
    Date(String),
}

#[derive(Deserialize)]
pub struct EditRequest {
    pub definition: String,
    #[serde(default)]
    pub values: Vec<String>,
    pub slot: usize,
    pub edit: Edit,
    #[serde(default)]
    pub read_only: bool,
}

#[derive(Serialize)]
pub struct EditResponse {
    pub status: String,
    pub elapsed_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accepted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dirty: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Builds an editor for the request and lays its elements out in rows.
pub fn render_sentence(resolver: &dyn EnumResolver, req: &RenderRequest) -> Result<(Vec<Vec<ElementView>>, Vec<String>)> {
    let sentence = DslSentence::new(&req.definition, req.values.clone()).shared();
    let editor = SentenceEditor::with_read_only(&sentence, resolver, req.read_only)?;
    let mut layout = RowLayout::new();
    editor.render(&mut layout);
    let values = sentence.borrow().values().to_vec();
    Ok((layout.into_rows(), values))
}

/// Applies one edit and returns its outcome, the sentence values afterwards and the dirty flag.
pub fn edit_sentence(resolver: &dyn EnumResolver, req: &EditRequest) -> Result<(EditOutcome, Vec<String>, bool)> {
    let sentence = DslSentence::new(&req.definition, req.values.clone()).shared();
    let mut editor = SentenceEditor::with_read_only(&sentence, resolver, req.read_only)?;
    let outcome = match &req.edit {
        Edit::Text(text) => editor.set_text(req.slot, text)?,
        Edit::Select(stored) => editor.select(req.slot, stored)?,
        Edit::Checked(checked) => editor.set_checked(req.slot, *checked)?,
        Edit::Date(text) => editor.set_date_text(req.slot, text)?,
    };
    let values = sentence.borrow().values().to_vec();
    Ok((outcome, values, editor.is_dirty()))
}

fn status_for(e: &SentenceError) -> StatusCode {
    if e.is_parse() || matches!(e, SentenceError::Edit(_)) { StatusCode::BAD_REQUEST } else { StatusCode::INTERNAL_SERVER_ERROR }
}

pub fn router(resolver: SharedResolver) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::POST])
        .allow_headers(Any);
    let render_resolver = Arc::clone(&resolver);
    Router::new()
        .route("/v1/render", post(move |Json(req): Json<RenderRequest>| {
        let resolver = Arc::clone(&render_resolver);
        async move {
            let started = std::time::Instant::now();
            let result = tokio::task::spawn_blocking(move || render_sentence(resolver.as_ref(), &req))
                .await
                .map_err(|e| {
                    warn!(error=%e, "Join error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Join error")
                })?;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            match result {
                Ok((rows, values)) => {
                    info!(ms=elapsed_ms, rows=rows.len(), values=values.len(), "render complete");
                    let body = RenderResponse { status: "ok".into(), elapsed_ms, rows: Some(rows), values: Some(values), error: None };
                    Ok::<_, (StatusCode, &'static str)>((StatusCode::OK, Json(body)))
                }
                Err(e) => {
                    let status = status_for(&e);
                    let msg = format!("{e}");
                    warn!(%msg, code=%status.as_u16(), "render error");
                    let body = RenderResponse { status: "error".into(), elapsed_ms, rows: None, values: None, error: Some(msg) };
                    Ok::<_, (StatusCode, &'static str)>((status, Json(body)))
                }
            }
        }
    }))
        .route("/v1/edit", post(move |Json(req): Json<EditRequest>| {
        let resolver = Arc::clone(&resolver);
        async move {
            let started = std::time::Instant::now();
            let result = tokio::task::spawn_blocking(move || edit_sentence(resolver.as_ref(), &req))
                .await
                .map_err(|e| {
                    warn!(error=%e, "Join error");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Join error")
                })?;
            let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
            match result {
                Ok((outcome, values, dirty)) => {
                    let (accepted, message) = match outcome {
                        EditOutcome::Accepted => (true, None),
                        EditOutcome::Rejected { message } => (false, Some(message)),
                        EditOutcome::Ignored => (false, None),
                    };
                    info!(ms=elapsed_ms, accepted, dirty, "edit complete");
                    let body = EditResponse { status: "ok".into(), elapsed_ms, accepted: Some(accepted), message, values: Some(values), dirty: Some(dirty), error: None };
                    Ok::<_, (StatusCode, &'static str)>((StatusCode::OK, Json(body)))
                }
                Err(e) => {
                    let status = status_for(&e);
                    let msg = format!("{e}");
                    warn!(%msg, code=%status.as_u16(), "edit error");
                    let body = EditResponse { status: "error".into(), elapsed_ms, accepted: None, message: None, values: None, dirty: None, error: Some(msg) };
                    Ok::<_, (StatusCode, &'static str)>((status, Json(body)))
                }
            }
        }
    }))
    .layer(cors)
}
