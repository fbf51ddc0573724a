//! Article and media models matching the CMS REST responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::null_as_default;

/// One size variant of an uploaded image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageFormat {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Size variants generated by the CMS for an upload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageFormats {
    #[serde(default)]
    pub thumbnail: Option<ImageFormat>,
    #[serde(default)]
    pub small: Option<ImageFormat>,
    #[serde(default)]
    pub medium: Option<ImageFormat>,
    #[serde(default)]
    pub large: Option<ImageFormat>,
}

/// Media asset stored by the CMS upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    pub id: i64,
    #[serde(default)]
    pub document_id: Option<String>,
    pub url: String,
    #[serde(default)]
    pub alternative_text: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub formats: Option<ImageFormats>,
}

/// A published news article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: i64,
    pub document_id: String,
    pub title: String,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(default)]
    pub featured_image: Option<ImageAsset>,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_featured: Option<bool>,
}

impl Article {
    pub fn is_featured(&self) -> bool {
        self.is_featured.unwrap_or(false)
    }

    /// Alt text for the featured image, falling back to the title.
    pub fn image_alt(&self) -> &str {
        self.featured_image
            .as_ref()
            .and_then(|img| img.alternative_text.as_deref())
            .filter(|alt| !alt.is_empty())
            .unwrap_or(&self.title)
    }

    /// Public link of the detail page.
    pub fn href(&self) -> String {
        format!("/noticias/{}", self.slug)
    }
}

/// Pagination metadata returned with list queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

impl Pagination {
    /// Whether `page_count` agrees with `total` and `page_size`.
    pub fn is_consistent(&self) -> bool {
        if self.page_size == 0 {
            return self.page_count == 0;
        }
        let expected = self.total.div_ceil(u64::from(self.page_size));
        expected == u64::from(self.page_count)
    }
}

/// Envelope metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Standard CMS response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub meta: Meta,
}

/// A page of articles.
#[derive(Debug, Clone, Default)]
pub struct ArticlePage {
    pub articles: Vec<Article>,
    pub pagination: Option<Pagination>,
}

/// File record returned by the CMS upload endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedFile {
    pub id: i64,
}

/// Identifier of an article freshly created in the CMS.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedArticle {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub document_id: Option<String>,
}
