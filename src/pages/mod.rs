//! Server-rendered HTML pages.

pub mod components;
pub mod detail;
pub mod generator;
pub mod home;
pub mod layout;
pub mod listing;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::cms::CmsError;
use crate::errors::AppError;
use layout::{error_body, not_found_body, page, PageMeta};

/// Error raised by a page handler, rendered as an HTML page.
#[derive(Debug)]
pub struct PageError(pub AppError);

impl PageError {
    pub fn not_found(message: impl Into<String>) -> Self {
        PageError(AppError::NotFound(message.into()))
    }
}

impl From<AppError> for PageError {
    fn from(err: AppError) -> Self {
        PageError(err)
    }
}

impl From<CmsError> for PageError {
    fn from(err: CmsError) -> Self {
        PageError(err.into())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self.0 {
            AppError::NotFound(msg) => {
                tracing::debug!("Page not found: {}", msg);
                not_found_page()
            }
            AppError::Upstream { message, .. } => {
                tracing::error!("CMS unavailable: {}", message);
                (
                    StatusCode::BAD_GATEWAY,
                    page(
                        &PageMeta::titled("Erro"),
                        error_body("Não foi possível carregar as notícias no momento."),
                    ),
                )
                    .into_response()
            }
            other => {
                tracing::error!("Page error: {}", other);
                (
                    other.status_code(),
                    page(&PageMeta::titled("Erro"), error_body(&other.message())),
                )
                    .into_response()
            }
        }
    }
}

fn not_found_page() -> Response {
    (
        StatusCode::NOT_FOUND,
        page(&PageMeta::titled("Página não encontrada"), not_found_body()),
    )
        .into_response()
}

/// Fallback for unknown routes.
pub async fn not_found() -> Response {
    not_found_page()
}
