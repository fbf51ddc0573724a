//! Headless CMS (Strapi) REST client.
//!
//! Reads articles for the public pages and writes generated articles. The CMS
//! owns all article state; nothing is cached here.

use reqwest::{multipart, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::json;
use thiserror::Error;

use crate::errors::AppError;
use crate::models::{
    Article, ArticlePage, CmsEnvelope, CreatedArticle, NewArticle, UploadedFile,
};

/// Sort applied to every listing query.
const SORT_NEWEST: &str = "publishedAt:desc";

/// CMS client errors.
#[derive(Debug, Error)]
pub enum CmsError {
    /// CMS answered with a non-2xx status
    #[error("CMS returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Request failed in transport or the body could not be decoded
    #[error("CMS request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A write succeeded but the response carried no identifier
    #[error("CMS response missing {0}")]
    MissingId(&'static str),
}

impl CmsError {
    pub fn status(&self) -> Option<u16> {
        match self {
            CmsError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<CmsError> for AppError {
    fn from(err: CmsError) -> Self {
        AppError::Upstream {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

/// Thin wrapper over the CMS REST API.
#[derive(Clone)]
pub struct CmsClient {
    http: Client,
    base_url: String,
    api_token: Option<String>,
}

impl CmsClient {
    pub fn new(http: Client, base_url: impl Into<String>, api_token: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
        }
    }

    /// Absolute URL for an uploaded asset path.
    pub fn image_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.api_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn check(resp: Response) -> Result<Response, CmsError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(CmsError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        query: &[(String, String)],
    ) -> Result<T, CmsError> {
        let resp = self
            .request(Method::GET, "/api/articles")
            .query(query)
            .send()
            .await?;
        let resp = Self::check(resp).await?;
        Ok(resp.json().await?)
    }

    /// Create an article. Returns the CMS document id.
    pub async fn create_article(&self, fields: &NewArticle<'_>) -> Result<String, CmsError> {
        tracing::info!(slug = fields.slug, title = fields.title, "Creating article in CMS");

        let resp = self
            .request(Method::POST, "/api/articles")
            .json(&json!({ "data": fields }))
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let created: CmsEnvelope<CreatedArticle> = resp.json().await?;
        let article_id = created
            .data
            .document_id
            .filter(|id| !id.is_empty())
            .or_else(|| created.data.id.map(|id| id.to_string()))
            .ok_or(CmsError::MissingId("article id"))?;

        tracing::info!(article_id = %article_id, "Article created");
        Ok(article_id)
    }

    /// Upload image bytes as a PNG media file. Returns the file id.
    pub async fn upload_image(&self, bytes: Vec<u8>, filename: &str) -> Result<i64, CmsError> {
        tracing::info!(filename, size = bytes.len(), "Uploading image");

        let part = multipart::Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str("image/png")?;
        let form = multipart::Form::new().part("files", part);

        let resp = self
            .request(Method::POST, "/api/upload")
            .multipart(form)
            .send()
            .await?;
        let resp = Self::check(resp).await?;

        let files: Vec<UploadedFile> = resp.json().await?;
        let file = files.first().ok_or(CmsError::MissingId("uploaded file id"))?;

        tracing::info!(file_id = file.id, "Image uploaded");
        Ok(file.id)
    }

    /// Point an article's featured image at an uploaded file.
    pub async fn link_image(&self, article_id: &str, file_id: i64) -> Result<(), CmsError> {
        let resp = self
            .request(Method::PUT, &format!("/api/articles/{}", article_id))
            .json(&json!({ "data": { "featuredImage": file_id } }))
            .send()
            .await?;
        Self::check(resp).await?;

        tracing::info!(article_id, file_id, "Image linked to article");
        Ok(())
    }

    /// One page of articles, newest first.
    pub async fn list_articles(&self, page: u32, page_size: u32) -> Result<ArticlePage, CmsError> {
        let query = vec![
            q("populate", "*"),
            q("sort", SORT_NEWEST),
            q("pagination[page]", page),
            q("pagination[pageSize]", page_size),
        ];
        let envelope: CmsEnvelope<Vec<Article>> = self.get_json(&query).await.inspect_err(|e| {
            tracing::error!(page, page_size, "Failed to fetch articles: {}", e);
        })?;

        Ok(ArticlePage {
            articles: envelope.data,
            pagination: envelope.meta.pagination,
        })
    }

    /// Articles flagged as featured, newest first.
    pub async fn get_featured(&self, limit: u32) -> Result<Vec<Article>, CmsError> {
        let query = vec![
            q("populate", "*"),
            q("filters[isFeatured][$eq]", "true"),
            q("sort", SORT_NEWEST),
            q("pagination[pageSize]", limit),
        ];
        let envelope: CmsEnvelope<Vec<Article>> = self.get_json(&query).await.inspect_err(|e| {
            tracing::error!(limit, "Failed to fetch featured articles: {}", e);
        })?;
        Ok(envelope.data)
    }

    /// Newest articles, skipping the given document ids.
    pub async fn list_latest(
        &self,
        limit: u32,
        exclude_ids: &[String],
    ) -> Result<Vec<Article>, CmsError> {
        let mut query = vec![
            q("populate", "*"),
            q("sort", SORT_NEWEST),
            q("pagination[pageSize]", limit),
        ];
        for (i, id) in exclude_ids.iter().enumerate() {
            query.push(q(format!("filters[documentId][$ne][{}]", i), id));
        }
        let envelope: CmsEnvelope<Vec<Article>> = self.get_json(&query).await.inspect_err(|e| {
            tracing::error!(limit, "Failed to fetch latest articles: {}", e);
        })?;
        Ok(envelope.data)
    }

    /// Look an article up by slug. Returns the first match, if any.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Article>, CmsError> {
        let query = vec![q("filters[slug][$eq]", slug), q("populate", "*")];
        let envelope: CmsEnvelope<Vec<Article>> = self.get_json(&query).await.inspect_err(|e| {
            tracing::error!(slug, "Failed to fetch article: {}", e);
        })?;
        Ok(envelope.data.into_iter().next())
    }
}

fn q(key: impl Into<String>, value: impl ToString) -> (String, String) {
    (key.into(), value.to_string())
}
