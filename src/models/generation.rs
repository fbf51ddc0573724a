//! Generation request/response models. Nothing here is persisted.

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Body of `POST /api/news-generator` and of the webhook call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsGenerationRequest {
    pub url: String,
}

/// Article fields produced by the automation workflow.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub excerpt: String,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_prompt: String,
}

/// Fields written to the CMS when an article is created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArticle<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub excerpt: &'a str,
    pub slug: &'a str,
    pub source_url: &'a str,
}

impl<'a> From<&'a ArticleDraft> for NewArticle<'a> {
    fn from(draft: &'a ArticleDraft) -> Self {
        Self {
            title: &draft.title,
            content: &draft.content,
            excerpt: &draft.excerpt,
            slug: &draft.slug,
            source_url: &draft.source_url,
        }
    }
}

/// Response of `POST /api/news-generator`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsGenerationResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
