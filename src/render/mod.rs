//! Text helpers shared by the HTML pages.

use chrono::{DateTime, Datelike, Utc};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag};
use regex::RegexBuilder;
use url::Url;

/// Words per minute used for reading-time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

const MONTHS_PT_BR: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Estimated reading time in whole minutes, never less than one.
pub fn reading_time(content: &str) -> usize {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1)
}

/// Remove a leading `# <title>` heading when the body repeats the title.
/// Matching is case-insensitive.
pub fn strip_leading_title(content: &str, title: &str) -> String {
    let pattern = format!(r"^#\s*{}\s*\n?", regex::escape(title));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(re) => re.replace(content, "").into_owned(),
        Err(e) => {
            tracing::warn!("Title pattern rejected: {}", e);
            content.to_string()
        }
    }
}

/// Render Markdown (with GFM tables, strikethrough, task lists and
/// footnotes) to HTML. Raw HTML in the source is escaped, and `javascript:`
/// link targets are neutralised.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let events = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_href(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_href(dest_url),
            title,
            id,
        }),
        other => other,
    });

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, events);
    html
}

fn safe_href(dest: CowStr<'_>) -> CowStr<'_> {
    let scheme = dest
        .trim_start()
        .split(':')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    if dest.contains(':') && matches!(scheme.as_str(), "javascript" | "vbscript" | "data") {
        CowStr::Borrowed("#")
    } else {
        dest
    }
}

/// Long Brazilian Portuguese date, e.g. `14 de outubro de 2026`.
pub fn format_date(date: &DateTime<Utc>) -> String {
    let month = MONTHS_PT_BR[date.month0() as usize];
    format!("{} de {} de {}", date.day(), month, date.year())
}

/// Short Brazilian date, e.g. `14/10/2026`.
pub fn format_short_date(date: &DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Host name of a source link, if it parses.
pub fn source_hostname(source_url: &str) -> Option<String> {
    Url::parse(source_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
}

/// Listing page number from the `page` query value. Missing, non-numeric and
/// zero values fall back to page 1.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p > 0)
        .unwrap_or(1)
}
