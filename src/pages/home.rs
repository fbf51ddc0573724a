//! Home page: hero, secondary featured stories, latest grid and sidebar.

use std::collections::HashSet;

use axum::extract::State;
use maud::{html, Markup};

use super::components::{article_card, featured_hero, sidebar, CardVariant};
use super::layout::{page, PageMeta};
use super::PageError;
use crate::cms::CmsClient;
use crate::models::Article;
use crate::AppState;

pub const FEATURED_LIMIT: u32 = 5;
pub const SECONDARY_COUNT: usize = 2;
pub const GRID_COUNT: usize = 9;
pub const MOST_READ_COUNT: usize = 5;
pub const LATEST_LIMIT: u32 = (GRID_COUNT + MOST_READ_COUNT) as u32;

/// Articles placed on the home page. No article appears twice across hero,
/// secondary, grid and sidebar.
#[derive(Debug, Default)]
pub struct HomeLayout {
    pub hero: Option<Article>,
    pub secondary: Vec<Article>,
    pub grid: Vec<Article>,
    pub most_read: Vec<Article>,
}

/// Arrange featured and latest articles into home page slots.
///
/// The hero is the first featured article, or the newest one when nothing is
/// featured. Remaining featured articles fill the secondary slots and the
/// grid takes the newest articles not already shown. The sidebar gets
/// whatever latest articles are left after the grid.
pub fn compose_home(featured: Vec<Article>, latest: Vec<Article>) -> HomeLayout {
    let mut seen = HashSet::new();

    let mut featured = featured
        .into_iter()
        .filter(|a| seen.insert(a.document_id.clone()));
    let mut hero = featured.next();
    let secondary: Vec<Article> = featured.take(SECONDARY_COUNT).collect();

    let mut latest = latest.into_iter();
    if hero.is_none() {
        hero = latest.by_ref().find(|a| seen.insert(a.document_id.clone()));
    }
    let mut unseen = latest.filter(|a| seen.insert(a.document_id.clone()));
    let grid = unseen.by_ref().take(GRID_COUNT).collect();
    let most_read = unseen.take(MOST_READ_COUNT).collect();

    HomeLayout {
        hero,
        secondary,
        grid,
        most_read,
    }
}

/// GET / - Home page.
pub async fn home(State(state): State<AppState>) -> Result<Markup, PageError> {
    let cms = state.cms()?;

    let featured = cms.get_featured(FEATURED_LIMIT).await?;
    let shown: Vec<String> = featured
        .iter()
        .take(1 + SECONDARY_COUNT)
        .map(|a| a.document_id.clone())
        .collect();
    let latest = cms.list_latest(LATEST_LIMIT, &shown).await?;

    let layout = compose_home(featured, latest);
    Ok(page(&PageMeta::default(), view(&cms, &layout)))
}

fn view(cms: &CmsClient, layout: &HomeLayout) -> Markup {
    html! {
        @if let Some(hero) = &layout.hero {
            div class="max-w-7xl mx-auto px-4 py-8" {
                div class="grid grid-cols-1 lg:grid-cols-12 gap-8" {
                    section class="lg:col-span-8 space-y-8" {
                        (featured_hero(cms, hero))
                        @if !layout.secondary.is_empty() {
                            div class="grid grid-cols-1 md:grid-cols-2 gap-6" {
                                @for article in &layout.secondary {
                                    (article_card(cms, article, CardVariant::Horizontal))
                                }
                            }
                        }
                    }
                    aside class="lg:col-span-4" {
                        @if !layout.most_read.is_empty() {
                            (sidebar(&layout.most_read))
                        }
                    }
                }
                @if !layout.grid.is_empty() {
                    section class="mt-12" {
                        h3 class="text-2xl font-black mb-6 uppercase tracking-tight" { "Últimas Notícias" }
                        div class="grid grid-cols-1 md:grid-cols-3 gap-6" {
                            @for article in &layout.grid {
                                (article_card(cms, article, CardVariant::Default))
                            }
                        }
                    }
                }
            }
        } @else {
            div class="flex flex-col items-center justify-center px-4 py-24" {
                div class="max-w-2xl space-y-6 text-center" {
                    h1 class="text-5xl font-bold tracking-tight" { "Rota 67" }
                    p class="text-xl text-gray-600" {
                        "Plataforma de geração automatizada de notícias com inteligência artificial. "
                        "Cole o link de uma notícia e receba conteúdo adaptado em segundos."
                    }
                    div class="flex justify-center gap-4" {
                        a href="/gerador-de-noticia" class="rounded-lg bg-blue-600 px-6 py-3 font-medium text-white" { "Gerar Notícia" }
                        a href="/noticias" class="rounded-lg border border-gray-300 px-6 py-3 font-medium text-gray-700" { "Ver Notícias" }
                    }
                }
            }
        }
    }
}
