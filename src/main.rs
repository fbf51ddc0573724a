//! Rota 67 web service
//!
//! News portal that turns a source-article link into a published article
//! (generation webhook, image model, headless CMS) and renders the public
//! pages from the CMS.

mod api;
mod cms;
mod config;
mod errors;
mod generation;
mod imagegen;
mod models;
mod pages;
mod pipeline;
mod render;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cms::CmsClient;
use config::Config;
use errors::AppError;
use pipeline::NewsPipeline;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let http = config.http_client()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// CMS client for the configured base URL.
    pub fn cms(&self) -> Result<CmsClient, AppError> {
        let base_url = self.config.require_cms_url()?;
        Ok(CmsClient::new(
            self.http.clone(),
            base_url,
            self.config.cms_api_token.clone(),
        ))
    }

    pub fn pipeline(&self) -> NewsPipeline {
        NewsPipeline::new(self.config.clone(), self.http.clone())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if config.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting Rota 67 web service");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Image model: {}", config.image_model);

    match &config.cms_url {
        Some(url) => tracing::info!("CMS: {}", url),
        None => tracing::warn!("STRAPI_URL is not set. Pages and publishing will fail!"),
    }
    if config.webhook_url.is_none() {
        tracing::warn!("N8N_WEBHOOK is not set. Article generation is disabled!");
    }
    if config.cms_api_token.is_none() {
        tracing::warn!("STRAPI_API_KEY is not set. CMS requests are unauthenticated");
    }
    if config.image_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set. Articles will be published without images");
    }

    let bind_addr = config.bind_addr;
    let state = AppState::new(config)?;

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API routes
    let api_routes = Router::new()
        .route("/news-generator", post(api::generate_news))
        .layer(cors);

    // HTML pages
    let page_routes = Router::new()
        .route("/", get(pages::home::home))
        .route("/noticias", get(pages::listing::list))
        .route("/noticias/{slug}", get(pages::detail::show))
        .route(
            "/gerador-de-noticia",
            get(pages::generator::form).post(pages::generator::submit),
        );

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .merge(health_routes)
        .fallback(pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
