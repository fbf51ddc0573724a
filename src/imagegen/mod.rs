//! Generative image adapter.
//!
//! Builds a photographic prompt from the draft's content, calls the image
//! model's `generateContent` endpoint once and pulls the base64 image out of
//! the returned parts.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::models::ArticleDraft;

const PROMPT_TEMPLATE: &str = "\
IMPORTANT: The image MUST be generated in HORIZONTAL orientation (landscape), with width greater than height.
The image should look like a real photo captured by a professional DSLR camera, with natural lighting, realistic depth of field, precise focus and careful photographic composition.
Portray the scene, environment or visual elements that best represent the meaning of the news in a subtle and symbolic way, without graphic metaphors.
Do not include text, letters, captions, typography, icons, logos, illustrations or graphic elements.
CRITICAL: The image must NOT contain charts, diagrams, infographics or visual overlays.
CRITICAL: If the scene naturally contains readable text (signs, newspapers, billboards, storefronts, documents), it must have NO spelling errors. Prefer to keep such text blurred, out of focus or at an angle where it is not fully readable.
Style: journalistic or documentary photography, highly realistic.
Framing: horizontal (16:9 or 5:4, landscape).
Appearance: natural colors, authentic photographic texture, slight realistic camera grain, no illustration or digital art look.
Generate a realistic and cinematic photograph inspired by the context and atmosphere of the following news article: {content}
Please respond in Portuguese (Brazilian).";

/// Image adapter errors. All of them are soft failures for the pipeline.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image API key is not configured")]
    NotConfigured,

    #[error("image API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("image API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image data is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("image API response contained no image")]
    NoImage,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One response part: either text or inline binary data.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    #[serde(default)]
    pub mime_type: Option<String>,
    pub data: String,
}

/// Fill the photographic prompt template with the article content.
pub fn build_prompt(content: &str) -> String {
    PROMPT_TEMPLATE.replace("{content}", content)
}

/// Decode the image carried by the first candidate. Text parts are logged
/// and dropped.
pub fn extract_image(response: GenerateContentResponse) -> Result<Vec<u8>, ImageError> {
    let parts = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts)
        .unwrap_or_default();

    for part in parts {
        if let Some(text) = part.text.filter(|t| !t.is_empty()) {
            tracing::debug!(text = %text, "Image model returned text");
        } else if let Some(inline) = part.inline_data {
            let bytes = STANDARD.decode(inline.data.trim())?;
            tracing::info!(
                size = bytes.len(),
                mime_type = inline.mime_type.as_deref().unwrap_or("unknown"),
                "Image generated successfully"
            );
            return Ok(bytes);
        }
    }

    Err(ImageError::NoImage)
}

/// Calls the generative image API.
#[derive(Clone)]
pub struct ImageGenerator {
    http: Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl ImageGenerator {
    pub fn new(
        http: Client,
        api_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config, http: Client) -> Self {
        Self::new(
            http,
            config.image_api_url.clone(),
            config.image_model.clone(),
            config.image_api_key.clone(),
        )
    }

    /// Generate an illustration for the draft.
    pub async fn generate_image(&self, draft: &ArticleDraft) -> Result<Vec<u8>, ImageError> {
        let api_key = self.api_key.as_deref().ok_or(ImageError::NotConfigured)?;
        let prompt = build_prompt(&draft.content);
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart { text: &prompt }],
            }],
        };

        tracing::info!(model = %self.model, slug = %draft.slug, "Requesting article image");

        let resp = self
            .http
            .post(format!(
                "{}/v1beta/models/{}:generateContent",
                self.api_url, self.model
            ))
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ImageError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let response: GenerateContentResponse = resp.json().await?;
        extract_image(response)
    }
}
