use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::sentiment::InferenceContext;
use crate::server::pages;

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub review: String,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub sentiment: String,
}

/// Routes shared by both services: the static entry page and the
/// single-text prediction endpoint.
pub fn predict_router(context: Arc<InferenceContext>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/predict", post(predict))
        .with_state(context)
}

async fn index() -> Html<&'static str> {
    Html(pages::INDEX_PAGE)
}

async fn predict(
    State(context): State<Arc<InferenceContext>>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, (StatusCode, String)> {
    match context.predict(&request.review) {
        Ok(sentiment) => {
            info!("Predicted {} for {} chars of input", sentiment, request.review.len());
            Ok(Json(PredictResponse { sentiment }))
        }
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}"))),
    }
}
