//! Article detail page.

use axum::extract::{Path, State};
use maud::{html, Markup};

use super::components::{article_card, markdown, CardVariant};
use super::layout::{page, PageMeta};
use super::PageError;
use crate::cms::CmsClient;
use crate::models::Article;
use crate::render::{format_date, reading_time, source_hostname, strip_leading_title};
use crate::AppState;

const RELATED_FETCH: u32 = 6;
const RELATED_SHOWN: usize = 4;

/// GET /noticias/{slug} - Article detail.
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Markup, PageError> {
    let cms = state.cms()?;

    let Some(article) = cms.get_by_slug(&slug).await? else {
        return Err(PageError::not_found(format!("Article {} not found", slug)));
    };

    let related = match cms.list_articles(1, RELATED_FETCH).await {
        Ok(listing) => related_articles(listing.articles, &article),
        Err(e) => {
            tracing::warn!("Related articles unavailable: {}", e);
            Vec::new()
        }
    };

    let meta = PageMeta {
        title: Some(article.title.clone()),
        description: Some(article.excerpt.clone()).filter(|e| !e.is_empty()),
        image: article
            .featured_image
            .as_ref()
            .map(|img| cms.image_url(&img.url)),
    };

    Ok(page(&meta, view(&cms, &article, &related)))
}

/// Related articles, without the one being shown.
pub fn related_articles(candidates: Vec<Article>, current: &Article) -> Vec<Article> {
    candidates
        .into_iter()
        .filter(|a| a.document_id != current.document_id)
        .take(RELATED_SHOWN)
        .collect()
}

fn view(cms: &CmsClient, article: &Article, related: &[Article]) -> Markup {
    let body = strip_leading_title(&article.content, &article.title);
    let date = article
        .published_at
        .or(article.created_at)
        .map(|d| format_date(&d))
        .unwrap_or_default();
    let source = article
        .source_url
        .as_deref()
        .and_then(|url| source_hostname(url).map(|host| (url, host)));

    html! {
        div class="max-w-7xl mx-auto px-4 pt-8 pb-16" {
            div class="max-w-4xl mx-auto text-center mb-10" {
                h1 class="font-black text-3xl md:text-4xl lg:text-5xl leading-tight mb-4" { (article.title) }
                @if !article.excerpt.is_empty() {
                    (markdown(&article.excerpt, "excerpt"))
                }
            }
            div class="max-w-3xl mx-auto flex items-center justify-between border-y py-4 mb-8" {
                span class="text-sm" {
                    (date) " • " (reading_time(&article.content)) " min de leitura"
                }
            }
            div class="grid grid-cols-1 lg:grid-cols-12 gap-12" {
                article class="lg:col-span-8" {
                    @if let Some(img) = &article.featured_image {
                        figure class="mb-10" {
                            img src=(cms.image_url(&img.url)) alt=(article.image_alt()) class="w-full aspect-video object-cover rounded";
                        }
                    }
                    (markdown(&body, ""))
                    @if let Some((url, host)) = &source {
                        div class="mt-10 p-6 border-y-2 border-gray-200" {
                            p class="text-sm" {
                                "Fonte original: "
                                a href=(url) target="_blank" rel="noopener noreferrer" class="hover:underline font-semibold" { (host) }
                            }
                        }
                    }
                }
                aside class="lg:col-span-4 space-y-8" {
                    div class="bg-white p-5 rounded-lg border shadow-sm" {
                        h3 class="font-black text-sm uppercase tracking-wide mb-4" { "Mais Notícias" }
                        div class="space-y-5" {
                            @for item in related {
                                div class="border-b pb-4 last:border-0 last:pb-0" {
                                    (article_card(cms, item, CardVariant::Compact))
                                }
                            }
                        }
                    }
                }
            }
            @if !related.is_empty() {
                div class="mt-16 pt-10 border-t" {
                    h3 class="text-2xl font-black mb-6 border-l-4 pl-3 uppercase tracking-tight" { "Mais Notícias" }
                    div class="grid grid-cols-1 md:grid-cols-4 gap-6" {
                        @for item in related {
                            (article_card(cms, item, CardVariant::Default))
                        }
                    }
                }
            }
        }
    }
}
