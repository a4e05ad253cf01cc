use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::config::sentiment_config::ServerConfig;
use crate::sentiment::InferenceContext;
use crate::server::pages;
use crate::storage::dataset;

/// Shared read-only state of the dashboard service.
pub struct DashboardState {
    pub context: Arc<InferenceContext>,
    pub default_reviews_path: String,
    pub top_words: usize,
    pub preview_rows: usize,
}

impl DashboardState {
    pub fn new(context: Arc<InferenceContext>, server: &ServerConfig) -> Self {
        DashboardState {
            context,
            default_reviews_path: server.default_reviews_path.clone(),
            top_words: server.top_words,
            preview_rows: server.preview_rows,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct LabelSummary {
    pub label: String,
    pub count: usize,
    pub top_words: Vec<WordCount>,
}

#[derive(Debug, Serialize)]
pub struct PreviewRow {
    pub body: String,
    pub sentiment: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    pub labels: Vec<LabelSummary>,
    pub preview: Vec<PreviewRow>,
}

pub fn dashboard_router(state: Arc<DashboardState>) -> Router {
    Router::new()
        .route("/dashboard", get(dashboard_page))
        .route("/dashboard/summary", get(default_summary))
        .route("/dashboard/upload", post(upload_summary))
        .with_state(state)
}

async fn dashboard_page() -> Html<&'static str> {
    Html(pages::DASHBOARD_PAGE)
}

async fn default_summary(
    State(state): State<Arc<DashboardState>>,
) -> Result<Json<DashboardSummary>, (StatusCode, String)> {
    let bodies = dataset::load_review_bodies(&state.default_reviews_path)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;
    let summary = summarize(&state, &bodies)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;
    Ok(Json(summary))
}

async fn upload_summary(
    State(state): State<Arc<DashboardState>>,
    mut multipart: Multipart,
) -> Result<Json<DashboardSummary>, (StatusCode, String)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
        let bodies = dataset::load_review_bodies_from_bytes(&bytes)
            .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}")))?;
        let summary = summarize(&state, &bodies)
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")))?;
        return Ok(Json(summary));
    }

    Err((
        StatusCode::BAD_REQUEST,
        "Upload must contain a 'file' field".to_string(),
    ))
}

/// Predict every body and aggregate per-label counts, word frequencies
/// and a bounded preview.
pub fn summarize(state: &DashboardState, bodies: &[String]) -> anyhow::Result<DashboardSummary> {
    let mut per_label: Vec<Vec<&str>> = vec![Vec::new(); state.context.classes().len()];
    let mut preview = Vec::new();

    for body in bodies {
        let sentiment = state.context.predict(body)?;
        if let Some(index) = state
            .context
            .classes()
            .iter()
            .position(|class| *class == sentiment)
        {
            per_label[index].push(body.as_str());
        }
        if preview.len() < state.preview_rows {
            preview.push(PreviewRow {
                body: body.clone(),
                sentiment,
            });
        }
    }

    let labels = state
        .context
        .classes()
        .iter()
        .zip(&per_label)
        .map(|(label, texts)| LabelSummary {
            label: label.clone(),
            count: texts.len(),
            top_words: state
                .context
                .normalizer()
                .word_frequencies(texts.iter().copied(), state.top_words)
                .into_iter()
                .map(|(word, count)| WordCount { word, count })
                .collect(),
        })
        .collect();

    info!("Summarized {} review bodies", bodies.len());
    Ok(DashboardSummary {
        total: bodies.len(),
        labels,
        preview,
    })
}
