//! Article submission form.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use maud::{html, Markup};
use serde::Deserialize;

use super::layout::{page, PageMeta};
use crate::errors::AppError;
use crate::generation::{validate_source_url, INVALID_URL_MESSAGE};
use crate::AppState;

const GENERIC_FAILURE: &str = "Erro ao gerar notícia";

#[derive(Debug, Deserialize)]
pub struct GeneratorForm {
    #[serde(default)]
    pub url: String,
}

/// GET /gerador-de-noticia - Submission form.
pub async fn form() -> Markup {
    render("", None)
}

/// POST /gerador-de-noticia - Generate and publish, then redirect to the
/// new article.
pub async fn submit(State(state): State<AppState>, Form(input): Form<GeneratorForm>) -> Response {
    if validate_source_url(&input.url).is_err() {
        return (
            StatusCode::BAD_REQUEST,
            render(&input.url, Some(INVALID_URL_MESSAGE)),
        )
            .into_response();
    }

    let run = state.pipeline().run(&input.url).await;
    match run.result {
        Ok(published) => {
            tracing::info!(
                run_id = %run.run_id,
                slug = %published.draft.slug,
                warnings = published.warnings.len(),
                "Article published from form"
            );
            Redirect::to(&format!("/noticias/{}", published.draft.slug)).into_response()
        }
        Err(e) => {
            let message = match &e {
                AppError::Validation(msg) => msg.clone(),
                other if other.message().is_empty() => GENERIC_FAILURE.to_string(),
                other => other.message(),
            };
            (e.status_code(), render(&input.url, Some(&message))).into_response()
        }
    }
}

fn render(url: &str, error: Option<&str>) -> Markup {
    page(
        &PageMeta::titled("Gerador de Notícia"),
        html! {
            div class="flex items-center justify-center px-4 py-16" {
                div class="w-full max-w-md space-y-8" {
                    div {
                        h1 class="text-center text-3xl font-bold" { "Gerador de Notícia" }
                        p class="mt-2 text-center text-gray-600" {
                            "Cole o link de uma notícia para gerar conteúdo adaptado com IA"
                        }
                    }
                    form method="post" action="/gerador-de-noticia" class="mt-8 space-y-6" {
                        div {
                            label for="url" class="sr-only" { "URL da Notícia" }
                            input id="url" name="url" type="url" required value=(url)
                                class="block w-full rounded-lg border border-gray-300 px-3 py-3"
                                placeholder="Insira aqui o link da notícia";
                        }
                        @if let Some(message) = error {
                            div class="rounded-md bg-red-50 p-4" role="alert" {
                                p class="text-sm text-red-800" { (message) }
                            }
                        }
                        button type="submit" class="flex w-full justify-center rounded-lg bg-blue-600 px-4 py-3 text-sm font-medium text-white" {
                            "Gerar Notícia"
                        }
                    }
                    div class="text-center text-sm text-gray-600" {
                        p { "Isso pode levar até 60 segundos..." }
                        ul class="mt-2 space-y-1 text-xs" {
                            li { "Analisando conteúdo original" }
                            li { "Gerando texto adaptado com IA" }
                            li { "Criando imagem personalizada" }
                            li { "Publicando artigo" }
                        }
                    }
                }
            }
        },
    )
}
