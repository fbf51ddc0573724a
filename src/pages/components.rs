//! Article widgets reused across pages.

use maud::{html, Markup, PreEscaped};

use crate::cms::CmsClient;
use crate::models::Article;
use crate::render::{format_date, markdown_to_html, reading_time};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    Default,
    Horizontal,
    Compact,
}

/// Markdown block rendered to sanitized HTML.
pub fn markdown(content: &str, class: &str) -> Markup {
    html! {
        div class={ "article-body " (class) } {
            (PreEscaped(markdown_to_html(content)))
        }
    }
}

fn published(article: &Article) -> String {
    article
        .published_at
        .or(article.created_at)
        .map(|d| format_date(&d))
        .unwrap_or_default()
}

pub fn article_card(cms: &CmsClient, article: &Article, variant: CardVariant) -> Markup {
    let image = article
        .featured_image
        .as_ref()
        .map(|img| cms.image_url(&img.url));

    match variant {
        CardVariant::Compact => html! {
            a href=(article.href()) class="group flex gap-3 items-start" {
                @if let Some(src) = &image {
                    div class="w-24 h-16 shrink-0 overflow-hidden rounded" {
                        img src=(src) alt=(article.image_alt()) width="96" height="64" class="w-full h-full object-cover";
                    }
                }
                h4 class="text-sm font-bold leading-tight" { (article.title) }
            }
        },
        CardVariant::Horizontal => html! {
            a href=(article.href()) class="group flex flex-col sm:flex-row gap-4 items-start" {
                @if let Some(src) = &image {
                    div class="w-full sm:w-1/2 overflow-hidden rounded-lg" {
                        img src=(src) alt=(article.image_alt()) width="400" height="240" class="w-full h-48 object-cover";
                    }
                }
                div class="w-full sm:w-1/2" {
                    h2 class="text-xl md:text-2xl font-bold leading-tight mb-2" { (article.title) }
                    @if !article.excerpt.is_empty() {
                        p class="text-sm line-clamp-3" { (article.excerpt) }
                    }
                }
            }
        },
        CardVariant::Default => html! {
            a href=(article.href()) class="group flex flex-col h-full" {
                @if let Some(src) = &image {
                    div class="overflow-hidden rounded-lg mb-3" {
                        img src=(src) alt=(article.image_alt()) width="400" height="240" class="w-full h-40 object-cover";
                    }
                }
                h3 class="font-bold text-lg leading-snug mb-2" { (article.title) }
                @if !article.excerpt.is_empty() {
                    p class="text-sm line-clamp-2 mb-2" { (article.excerpt) }
                }
                p class="text-xs mt-auto" {
                    (published(article)) " • " (reading_time(&article.content)) " min de leitura"
                }
            }
        },
    }
}

pub fn featured_hero(cms: &CmsClient, article: &Article) -> Markup {
    html! {
        a href=(article.href()) class="group relative block rounded-lg overflow-hidden h-112 md:h-128" {
            @if let Some(img) = &article.featured_image {
                img src=(cms.image_url(&img.url)) alt=(article.image_alt()) class="absolute inset-0 w-full h-full object-cover";
            } @else {
                div class="absolute inset-0 bg-linear-to-br from-gray-700 to-gray-900" {}
            }
            div class="absolute inset-0 bg-linear-to-t from-black/90 via-black/40 to-transparent" {}
            div class="absolute bottom-0 left-0 p-6 md:p-8 max-w-2xl" {
                @if article.is_featured() {
                    span class="inline-block px-2.5 py-1 text-xs font-bold uppercase rounded mb-3" { "Destaque" }
                }
                h2 class="text-white text-2xl md:text-4xl font-bold leading-tight mb-3" { (article.title) }
                @if !article.excerpt.is_empty() {
                    (markdown(&article.excerpt, "text-gray-300 text-sm md:text-base line-clamp-2 mb-2"))
                }
                span class="text-gray-400 text-xs font-medium" {
                    (reading_time(&article.content)) " min de leitura"
                }
            }
        }
    }
}

/// "Mais Lidas" box with up to five numbered links.
pub fn sidebar(articles: &[Article]) -> Markup {
    html! {
        div class="space-y-8" {
            div class="bg-white p-5 rounded-lg border shadow-sm" {
                h4 class="font-black text-sm uppercase tracking-wide mb-4" { "Mais Lidas" }
                ol class="flex flex-col gap-4" {
                    @for (index, article) in articles.iter().take(5).enumerate() {
                        li class="group" {
                            a href=(article.href()) class="flex gap-3 items-start" {
                                span class="text-3xl font-black text-gray-200 leading-none min-w-8 text-center" { (index + 1) }
                                h4 class="text-sm font-bold leading-snug" { (article.title) }
                            }
                        }
                    }
                }
            }
        }
    }
}
