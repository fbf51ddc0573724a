//! Shared page shell.

use maud::{html, Markup, DOCTYPE};

pub const SITE_NAME: &str = "Rota 67";
const DEFAULT_TITLE: &str = "Rota 67 - Notícias com IA";
const DEFAULT_DESCRIPTION: &str =
    "Plataforma de geração automatizada de notícias com inteligência artificial";

/// Head metadata for one page.
#[derive(Debug, Default, Clone)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Absolute Open Graph image URL
    pub image: Option<String>,
}

impl PageMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    fn full_title(&self) -> String {
        match &self.title {
            Some(title) => format!("{} | {}", title, SITE_NAME),
            None => DEFAULT_TITLE.to_string(),
        }
    }
}

pub fn page(meta: &PageMeta, body: Markup) -> Markup {
    let description = meta.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION);
    html! {
        (DOCTYPE)
        html lang="pt-BR" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (meta.full_title()) }
                meta name="description" content=(description);
                @if let Some(title) = &meta.title {
                    meta property="og:title" content=(title);
                    meta property="og:description" content=(description);
                }
                @if let Some(image) = &meta.image {
                    meta property="og:image" content=(image);
                }
            }
            body class="min-h-screen bg-gray-50 text-gray-900 antialiased" {
                header class="bg-white shadow-sm" {
                    nav class="mx-auto flex max-w-7xl items-center justify-between px-4 py-4" {
                        a href="/" class="text-xl font-bold" { (SITE_NAME) }
                        div class="flex gap-6" {
                            a href="/noticias" class="text-gray-600 hover:text-gray-900" { "Notícias" }
                            a href="/gerador-de-noticia" class="text-gray-600 hover:text-gray-900" { "Gerar Notícia" }
                        }
                    }
                }
                main { (body) }
            }
        }
    }
}

/// Body of the 404 page.
pub fn not_found_body() -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-4 py-24" {
            h1 class="text-6xl font-bold text-gray-300" { "404" }
            p class="mt-4 text-xl text-gray-600" { "Página não encontrada" }
            a href="/" class="mt-6 rounded-lg bg-blue-600 px-6 py-3 font-medium text-white" { "Voltar ao início" }
        }
    }
}

/// Body of the generic error page.
pub fn error_body(message: &str) -> Markup {
    html! {
        div class="flex flex-col items-center justify-center px-4 py-24" {
            h1 class="text-3xl font-bold text-gray-700" { "Algo deu errado" }
            p class="mt-4 text-gray-600" { (message) }
            a href="/" class="mt-6 rounded-lg bg-blue-600 px-6 py-3 font-medium text-white" { "Voltar ao início" }
        }
    }
}
