//! Paginated article listing.

use axum::extract::{Query, State};
use maud::{html, Markup};
use serde::Deserialize;

use super::layout::{page, PageMeta};
use super::PageError;
use crate::cms::CmsClient;
use crate::models::ArticlePage;
use crate::render::{format_short_date, parse_page};
use crate::AppState;

pub const PAGE_SIZE: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    #[serde(default)]
    pub page: Option<String>,
}

/// GET /noticias - Article listing.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListingQuery>,
) -> Result<Markup, PageError> {
    let cms = state.cms()?;
    let current = parse_page(query.page.as_deref());

    let listing = cms.list_articles(current, PAGE_SIZE).await?;
    if let Some(p) = listing.pagination.filter(|p| !p.is_consistent()) {
        tracing::warn!(?p, "CMS pagination metadata is inconsistent");
    }

    Ok(page(&PageMeta::titled("Notícias"), view(&cms, &listing, current)))
}

fn view(cms: &CmsClient, listing: &ArticlePage, current: u32) -> Markup {
    let page_count = listing.pagination.map(|p| p.page_count).unwrap_or(0);
    html! {
        div class="min-h-screen px-4 py-12" {
            div class="mx-auto max-w-7xl" {
                h1 class="mb-8 text-4xl font-bold" { "Notícias" }
                @if listing.articles.is_empty() {
                    div class="py-12 text-center" {
                        p class="text-gray-600" { "Nenhuma notícia publicada ainda." }
                        a href="/gerador-de-noticia" class="mt-4 inline-block text-blue-600 hover:underline" {
                            "Gerar primeira notícia"
                        }
                    }
                } @else {
                    div class="grid grid-cols-1 gap-6 md:grid-cols-2 lg:grid-cols-3" {
                        @for article in &listing.articles {
                            a href=(article.href()) class="overflow-hidden rounded-lg bg-white shadow-md" {
                                @if let Some(img) = &article.featured_image {
                                    div class="relative h-48 w-full" {
                                        img src=(cms.image_url(&img.url)) alt=(article.image_alt()) class="h-full w-full object-cover";
                                    }
                                }
                                div class="p-4" {
                                    h2 class="mb-2 line-clamp-2 text-xl font-semibold" { (article.title) }
                                    p class="line-clamp-3 text-sm text-gray-600" { (article.excerpt) }
                                    @if let Some(date) = &article.published_at {
                                        p class="mt-2 text-xs text-gray-400" { (format_short_date(date)) }
                                    }
                                }
                            }
                        }
                    }
                    @if page_count > 1 {
                        nav class="mt-8 flex justify-center gap-2" {
                            @for n in 1..=page_count {
                                @if n == current {
                                    a href={ "/noticias?page=" (n) } class="rounded px-4 py-2 bg-blue-600 text-white" aria-current="page" { (n) }
                                } @else {
                                    a href={ "/noticias?page=" (n) } class="rounded px-4 py-2 bg-white text-gray-700" { (n) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
