//! News generation endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::errors::AppError;
use crate::models::{NewsGenerationRequest, NewsGenerationResponse};
use crate::AppState;

/// POST /api/news-generator - Generate an article from a source URL and
/// publish it.
pub async fn generate_news(
    State(state): State<AppState>,
    payload: Result<Json<NewsGenerationRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return AppError::BadRequest(rejection.body_text()).into_response(),
    };

    let run = state.pipeline().run(&request.url).await;
    tracing::debug!(run_id = %run.run_id, steps = ?run.steps, "Pipeline finished");

    match run.result {
        Ok(published) => {
            tracing::info!(
                article_id = %published.article_id,
                image_file_id = ?published.image_file_id,
                warnings = published.warnings.len(),
                "Article published"
            );
            let body = NewsGenerationResponse::from(published);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => e.into_response(),
    }
}
