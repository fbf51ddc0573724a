//! News publishing pipeline.
//!
//! Runs webhook generation, image generation and the CMS writes in sequence.
//! The source URL is validated before any step runs. Configuration, generation and article creation are fatal gates; image
//! generation, upload and linking degrade to warnings. Nothing is rolled back:
//! once the article exists it stays published, with or without an image.

use std::fmt;
use std::sync::Arc;

use reqwest::Client;
use tracing::Instrument;
use uuid::Uuid;

use crate::cms::CmsClient;
use crate::config::Config;
use crate::errors::AppError;
use crate::generation::{validate_source_url, WebhookClient};
use crate::imagegen::ImageGenerator;
use crate::models::{ArticleDraft, NewArticle, NewsGenerationResponse};

/// Message returned when the CMS rejects the new article.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create article in Strapi";

/// Pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Configuration,
    Generation,
    ImageGeneration,
    ArticleCreate,
    ImageUpload,
    ImageLink,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Configuration => "configuration",
            Step::Generation => "generation",
            Step::ImageGeneration => "image_generation",
            Step::ArticleCreate => "article_create",
            Step::ImageUpload => "image_upload",
            Step::ImageLink => "image_link",
        };
        f.write_str(name)
    }
}

/// Recorded result of one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Skipped,
    /// Soft failure; the run continued
    Degraded(String),
    /// Fatal failure; the run stopped here
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub step: Step,
    pub status: StepStatus,
}

/// Outcome of a best-effort step.
#[derive(Debug)]
pub enum StepOutcome<T> {
    Done(T),
    Degraded(String),
}

impl<T, E: fmt::Display> From<Result<T, E>> for StepOutcome<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => StepOutcome::Done(value),
            Err(e) => StepOutcome::Degraded(e.to_string()),
        }
    }
}

/// A successfully published article.
#[derive(Debug, Clone)]
pub struct PublishedArticle {
    pub article_id: String,
    pub draft: ArticleDraft,
    pub image_file_id: Option<i64>,
    pub warnings: Vec<String>,
}

impl From<PublishedArticle> for NewsGenerationResponse {
    fn from(published: PublishedArticle) -> Self {
        let draft = published.draft;
        NewsGenerationResponse {
            success: true,
            title: Some(draft.title),
            content: Some(draft.content),
            excerpt: Some(draft.excerpt),
            slug: Some(draft.slug),
            source_url: Some(draft.source_url),
            article_id: Some(published.article_id),
            error: None,
            warnings: published.warnings,
        }
    }
}

/// Full record of one pipeline run.
#[derive(Debug)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub steps: Vec<StepRecord>,
    pub result: Result<PublishedArticle, AppError>,
}

impl PipelineRun {
    pub fn status_of(&self, step: Step) -> Option<&StepStatus> {
        self.steps.iter().find(|r| r.step == step).map(|r| &r.status)
    }
}

#[derive(Default)]
struct Recorder {
    steps: Vec<StepRecord>,
    warnings: Vec<String>,
}

impl Recorder {
    fn record(&mut self, step: Step, status: StepStatus) {
        match &status {
            StepStatus::Succeeded => tracing::info!(%step, "Step succeeded"),
            StepStatus::Skipped => tracing::debug!(%step, "Step skipped"),
            StepStatus::Degraded(warning) => tracing::warn!(%step, %warning, "Step degraded"),
            StepStatus::Failed(error) => tracing::error!(%step, %error, "Step failed"),
        }
        self.steps.push(StepRecord { step, status });
    }

    fn gate<T>(&mut self, step: Step, result: Result<T, AppError>) -> Result<T, AppError> {
        match &result {
            Ok(_) => self.record(step, StepStatus::Succeeded),
            Err(e) => self.record(step, StepStatus::Failed(e.message())),
        }
        result
    }

    fn soft<T>(&mut self, step: Step, outcome: StepOutcome<T>) -> Option<T> {
        match outcome {
            StepOutcome::Done(value) => {
                self.record(step, StepStatus::Succeeded);
                Some(value)
            }
            StepOutcome::Degraded(warning) => {
                self.warnings.push(format!("{}: {}", step, warning));
                self.record(step, StepStatus::Degraded(warning));
                None
            }
        }
    }
}

/// Sequences the external calls for one submission.
#[derive(Clone)]
pub struct NewsPipeline {
    config: Arc<Config>,
    http: Client,
}

impl NewsPipeline {
    pub fn new(config: Arc<Config>, http: Client) -> Self {
        Self { config, http }
    }

    /// Run the pipeline for a source URL. Never panics; every failure ends
    /// up in `PipelineRun::result`.
    pub async fn run(&self, url: &str) -> PipelineRun {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("news_pipeline", %run_id);
        let mut recorder = Recorder::default();

        let result = self.execute(url, &mut recorder).instrument(span).await;

        PipelineRun {
            run_id,
            steps: recorder.steps,
            result,
        }
    }

    async fn execute(
        &self,
        url: &str,
        recorder: &mut Recorder,
    ) -> Result<PublishedArticle, AppError> {
        if let Err(e) = validate_source_url(url) {
            tracing::warn!(%url, "Rejected source URL");
            return Err(e.into());
        }

        let (webhook, cms) = recorder.gate(Step::Configuration, self.clients())?;

        let draft = recorder.gate(
            Step::Generation,
            webhook.generate(url).await.map_err(AppError::from),
        )?;

        let images = ImageGenerator::from_config(&self.config, self.http.clone());
        let image = recorder.soft(
            Step::ImageGeneration,
            StepOutcome::from(images.generate_image(&draft).await),
        );

        let created = cms
            .create_article(&NewArticle::from(&draft))
            .await
            .map_err(|e| {
                tracing::error!("CMS create article error: {}", e);
                AppError::Upstream {
                    status: e.status(),
                    message: CREATE_FAILED_MESSAGE.to_string(),
                }
            });
        let article_id = recorder.gate(Step::ArticleCreate, created)?;

        let mut image_file_id = None;
        match image {
            Some(bytes) => {
                let filename = format!("{}.png", draft.slug);
                let uploaded = recorder.soft(
                    Step::ImageUpload,
                    StepOutcome::from(cms.upload_image(bytes, &filename).await),
                );
                match uploaded {
                    Some(file_id) => {
                        let linked = recorder.soft(
                            Step::ImageLink,
                            StepOutcome::from(cms.link_image(&article_id, file_id).await),
                        );
                        if linked.is_some() {
                            image_file_id = Some(file_id);
                        }
                    }
                    None => recorder.record(Step::ImageLink, StepStatus::Skipped),
                }
            }
            None => {
                recorder.record(Step::ImageUpload, StepStatus::Skipped);
                recorder.record(Step::ImageLink, StepStatus::Skipped);
            }
        }

        Ok(PublishedArticle {
            article_id,
            draft,
            image_file_id,
            warnings: std::mem::take(&mut recorder.warnings),
        })
    }

    fn clients(&self) -> Result<(WebhookClient, CmsClient), AppError> {
        let webhook_url = self.config.require_webhook_url()?;
        let cms_url = self.config.require_cms_url()?;
        Ok((
            WebhookClient::new(self.http.clone(), webhook_url),
            CmsClient::new(
                self.http.clone(),
                cms_url,
                self.config.cms_api_token.clone(),
            ),
        ))
    }
}
