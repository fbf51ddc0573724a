//! Integration tests for the Rota 67 web service.
//!
//! A single fake upstream plays the generation webhook, the image API and
//! the CMS. It records every call so tests can assert on what was (and was
//! not) contacted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{Path, Query, State},
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use base64::Engine;
use reqwest::Client;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::cms::CmsClient;
use crate::config::Config;
use crate::pipeline::{NewsPipeline, Step, StepStatus};
use crate::{create_router, AppState};

const SLUG: &str = "chuva-forte-atinge-campo-grande";
const TITLE: &str = "Chuva forte atinge Campo Grande";
const SOURCE: &str = "https://www.example.com.br/cidades/chuva";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageMode {
    Png,
    TextOnly,
    Error,
}

#[derive(Debug, Clone)]
struct Behavior {
    webhook_status: u16,
    image: ImageMode,
    create_status: u16,
    upload_status: u16,
    link_status: u16,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            webhook_status: 200,
            image: ImageMode::Png,
            create_status: 200,
            upload_status: 200,
            link_status: 200,
        }
    }
}

#[derive(Debug, Clone)]
struct Call {
    name: String,
    auth: Option<String>,
    body: String,
}

#[derive(Clone)]
struct Fake {
    behavior: Behavior,
    articles: Arc<Vec<Value>>,
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Fake {
    fn record(&self, name: impl Into<String>, headers: &HeaderMap, body: &[u8]) {
        let auth = headers
            .get(header::AUTHORIZATION)
            .or_else(|| headers.get("x-goog-api-key"))
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        self.calls.lock().unwrap().push(Call {
            name: name.into(),
            auth,
            body: String::from_utf8_lossy(body).into_owned(),
        });
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

fn draft_json() -> Value {
    json!({
        "title": TITLE,
        "content": format!("# {}\nA chuva de ontem alagou ruas do centro.", TITLE),
        "excerpt": "Temporal alagou ruas e derrubou árvores.",
        "slug": SLUG,
        "sourceUrl": SOURCE,
        "imagePrompt": "rua alagada"
    })
}

fn article_json(n: u32, featured: bool) -> Value {
    json!({
        "id": n,
        "documentId": format!("doc-{}", n),
        "title": format!("Notícia número {}", n),
        "slug": format!("noticia-{}", n),
        "content": format!("# Notícia número {}\nConteúdo da notícia {}.", n, n),
        "excerpt": format!("Resumo {}", n),
        "featuredImage": if n % 2 == 0 {
            json!({ "id": n, "url": format!("/uploads/img-{}.png", n), "alternativeText": null })
        } else {
            Value::Null
        },
        "sourceUrl": "https://www.campograndenews.com.br/materia",
        "publishedAt": format!("2026-10-{:02}T10:00:00.000Z", 28 - n),
        "createdAt": "2026-10-01T10:00:00.000Z",
        "updatedAt": "2026-10-01T10:00:00.000Z",
        "isFeatured": featured
    })
}

async fn webhook(State(fake): State<Fake>, headers: HeaderMap, body: Bytes) -> Response {
    fake.record("webhook", &headers, &body);
    let code = status(fake.behavior.webhook_status);
    if code.is_success() {
        (code, Json(draft_json())).into_response()
    } else {
        (code, "workflow offline").into_response()
    }
}

async fn image_api(
    State(fake): State<Fake>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    fake.record(format!("image:{}", model_action), &headers, &body);
    match fake.behavior.image {
        ImageMode::Png => Json(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "Segue a imagem." },
                { "inlineData": {
                    "mimeType": "image/png",
                    "data": base64::engine::general_purpose::STANDARD.encode(b"\x89PNG-fake")
                } }
            ] } }]
        }))
        .into_response(),
        ImageMode::TextOnly => Json(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Não consigo gerar." }] } }]
        }))
        .into_response(),
        ImageMode::Error => (StatusCode::TOO_MANY_REQUESTS, "quota").into_response(),
    }
}

async fn create_article(State(fake): State<Fake>, headers: HeaderMap, body: Bytes) -> Response {
    fake.record("create", &headers, &body);
    let code = status(fake.behavior.create_status);
    if code.is_success() {
        (
            code,
            Json(json!({ "data": { "id": 1, "documentId": "doc-new", "slug": SLUG }, "meta": {} })),
        )
            .into_response()
    } else {
        (
            code,
            Json(json!({ "data": null, "error": { "status": code.as_u16(), "message": "slug must be unique" } })),
        )
            .into_response()
    }
}

async fn upload(State(fake): State<Fake>, headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    fake.record(format!("upload:{}", content_type), &headers, &body);
    let code = status(fake.behavior.upload_status);
    if code.is_success() {
        (code, Json(json!([{ "id": 42, "url": format!("/uploads/{}.png", SLUG) }]))).into_response()
    } else {
        (code, Json(json!({ "error": { "message": "upload failed" } }))).into_response()
    }
}

async fn link_image(
    State(fake): State<Fake>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    fake.record(format!("link:{}", id), &headers, &body);
    let code = status(fake.behavior.link_status);
    (code, Json(json!({ "data": { "documentId": id } }))).into_response()
}

/// Minimal emulation of the CMS list filters, sort and pagination.
async fn list_articles(
    State(fake): State<Fake>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut items: Vec<Value> = fake.articles.iter().cloned().collect();

    if let Some(slug) = params.get("filters[slug][$eq]") {
        items.retain(|a| a["slug"] == slug.as_str());
    }
    if params.get("filters[isFeatured][$eq]").map(String::as_str) == Some("true") {
        items.retain(|a| a["isFeatured"] == true);
    }
    let excluded: Vec<&String> = params
        .iter()
        .filter(|(k, _)| k.starts_with("filters[documentId][$ne]"))
        .map(|(_, v)| v)
        .collect();
    items.retain(|a| !excluded.iter().any(|id| a["documentId"] == id.as_str()));

    if params.get("sort").map(String::as_str) == Some("publishedAt:desc") {
        items.sort_by(|a, b| {
            b["publishedAt"]
                .as_str()
                .unwrap_or_default()
                .cmp(a["publishedAt"].as_str().unwrap_or_default())
        });
    }

    let page: usize = params
        .get("pagination[page]")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    let page_size: usize = params
        .get("pagination[pageSize]")
        .and_then(|p| p.parse().ok())
        .unwrap_or(25);
    let total = items.len();
    let page_count = total.div_ceil(page_size);
    let data: Vec<Value> = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Json(json!({
        "data": data,
        "meta": { "pagination": {
            "page": page, "pageSize": page_size, "pageCount": page_count, "total": total
        } }
    }))
    .into_response()
}

/// Test fixture: fake upstream plus the service under test.
struct TestFixture {
    client: Client,
    base_url: String,
    upstream_url: String,
    state: AppState,
    calls: Arc<Mutex<Vec<Call>>>,
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn test_config(upstream_url: &str) -> Config {
    Config {
        webhook_url: Some(format!("{}/webhook/news-generator", upstream_url)),
        cms_url: Some(upstream_url.to_string()),
        cms_api_token: Some("cms-token".to_string()),
        image_api_key: Some("image-key".to_string()),
        image_model: "test-model".to_string(),
        image_api_url: upstream_url.to_string(),
        upstream_timeout: Some(Duration::from_secs(10)),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        log_level: "warn".to_string(),
        log_json: false,
    }
}

impl TestFixture {
    async fn new() -> Self {
        Self::with(Behavior::default(), Vec::new(), |_| {}).await
    }

    async fn with_behavior(behavior: Behavior) -> Self {
        Self::with(behavior, Vec::new(), |_| {}).await
    }

    async fn with_articles(articles: Vec<Value>) -> Self {
        Self::with(Behavior::default(), articles, |_| {}).await
    }

    async fn with(
        behavior: Behavior,
        articles: Vec<Value>,
        adjust: impl FnOnce(&mut Config),
    ) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let fake = Fake {
            behavior,
            articles: Arc::new(articles),
            calls: calls.clone(),
        };

        let upstream = Router::new()
            .route("/webhook/news-generator", post(webhook))
            .route("/v1beta/models/{model_action}", post(image_api))
            .route("/api/articles", get(list_articles).post(create_article))
            .route("/api/articles/{id}", put(link_image))
            .route("/api/upload", post(upload))
            .with_state(fake);
        let upstream_url = spawn(upstream).await;

        let mut config = test_config(&upstream_url);
        adjust(&mut config);
        let state = AppState::new(config).expect("Failed to build state");
        let base_url = spawn(create_router(state.clone())).await;

        TestFixture {
            client: Client::new(),
            base_url,
            upstream_url,
            state,
            calls,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn call_names(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    fn call(&self, prefix: &str) -> Option<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.name.starts_with(prefix))
            .cloned()
    }

    async fn generate(&self, body: Value) -> (StatusCode, Value) {
        let resp = self
            .client
            .post(self.url("/api/news-generator"))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = StatusCode::from_u16(resp.status().as_u16()).unwrap();
        (status, resp.json().await.unwrap())
    }

    async fn get_page(&self, path: &str) -> (StatusCode, String) {
        let resp = create_router(self.state.clone())
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_invalid_url_rejected_without_network_calls() {
    let fixture = TestFixture::new().await;

    for url in ["not a url", "ftp://example.com/x", "", "www.example.com/noticia"] {
        let (status, body) = fixture.generate(json!({ "url": url })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "url {url:?}");
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Por favor, insira uma URL válida");
    }

    assert!(fixture.call_names().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/news-generator"))
        .header("content-type", "application/json")
        .body("{\"link\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert!(fixture.call_names().is_empty());
}

#[tokio::test]
async fn test_full_success_publishes_with_image() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["articleId"], "doc-new");
    let draft = draft_json();
    for field in ["title", "content", "excerpt", "slug", "sourceUrl"] {
        assert_eq!(body[field], draft[field], "field {field}");
    }
    assert!(body.get("warnings").is_none());
    assert!(body.get("error").is_none());

    let names = fixture.call_names();
    assert_eq!(names.len(), 5, "calls: {names:?}");
    assert_eq!(names[0], "webhook");
    assert_eq!(names[1], "image:test-model:generateContent");
    assert_eq!(names[2], "create");
    assert!(names[3].starts_with("upload:multipart/form-data"));
    assert_eq!(names[4], "link:doc-new");

    let hook = fixture.call("webhook").unwrap();
    let hook_body: Value = serde_json::from_str(&hook.body).unwrap();
    assert_eq!(hook_body, json!({ "url": SOURCE }));

    let image = fixture.call("image:").unwrap();
    assert_eq!(image.auth.as_deref(), Some("image-key"));
    assert!(image.body.contains("A chuva de ontem alagou ruas do centro."));

    let create = fixture.call("create").unwrap();
    assert_eq!(create.auth.as_deref(), Some("Bearer cms-token"));
    let create_body: Value = serde_json::from_str(&create.body).unwrap();
    assert_eq!(create_body["data"]["slug"], SLUG);
    assert_eq!(create_body["data"]["sourceUrl"], SOURCE);
    assert!(create_body["data"].get("imagePrompt").is_none());

    let upload = fixture.call("upload:").unwrap();
    assert!(upload.body.contains(&format!("filename=\"{}.png\"", SLUG)));
    assert!(upload.body.contains("name=\"files\""));
    assert!(upload.body.contains("image/png"));

    let link = fixture.call("link:").unwrap();
    let link_body: Value = serde_json::from_str(&link.body).unwrap();
    assert_eq!(link_body, json!({ "data": { "featuredImage": 42 } }));
}

#[tokio::test]
async fn test_missing_image_still_publishes() {
    let fixture = TestFixture::with_behavior(Behavior {
        image: ImageMode::TextOnly,
        ..Behavior::default()
    })
    .await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["articleId"], "doc-new");
    assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
    assert_eq!(
        fixture.call_names(),
        vec!["webhook", "image:test-model:generateContent", "create"]
    );
}

#[tokio::test]
async fn test_image_api_error_still_publishes() {
    let fixture = TestFixture::with_behavior(Behavior {
        image: ImageMode::Error,
        ..Behavior::default()
    })
    .await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articleId"], "doc-new");
    let warning = body["warnings"][0].as_str().unwrap();
    assert!(warning.starts_with("image_generation:"));
    assert!(warning.contains("429"));
}

#[tokio::test]
async fn test_missing_image_key_skips_image_call() {
    let fixture =
        TestFixture::with(Behavior::default(), Vec::new(), |c| c.image_api_key = None).await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articleId"], "doc-new");
    assert_eq!(fixture.call_names(), vec!["webhook", "create"]);
}

#[tokio::test]
async fn test_webhook_failure_propagates_status() {
    let fixture = TestFixture::with_behavior(Behavior {
        webhook_status: 503,
        ..Behavior::default()
    })
    .await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("503"));
    assert_eq!(fixture.call_names(), vec!["webhook"]);
}

#[tokio::test]
async fn test_unreachable_webhook_is_unknown_error() {
    let fixture = TestFixture::with(Behavior::default(), Vec::new(), |c| {
        c.webhook_url = Some("http://127.0.0.1:9/webhook".to_string());
    })
    .await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Unknown error"));
    assert!(fixture.call_names().is_empty());
}

#[tokio::test]
async fn test_missing_webhook_config_is_fatal() {
    let fixture =
        TestFixture::with(Behavior::default(), Vec::new(), |c| c.webhook_url = None).await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "N8N_WEBHOOK is not defined");
    assert!(fixture.call_names().is_empty());
}

#[tokio::test]
async fn test_invalid_url_wins_over_missing_config() {
    let fixture = TestFixture::with(Behavior::default(), Vec::new(), |c| {
        c.webhook_url = None;
        c.cms_url = None;
    })
    .await;

    let (status, body) = fixture.generate(json!({ "url": "not a url" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Por favor, insira uma URL válida");
    assert!(fixture.call_names().is_empty());
}

#[tokio::test]
async fn test_cms_create_failure_is_fatal() {
    let fixture = TestFixture::with_behavior(Behavior {
        create_status: 400,
        ..Behavior::default()
    })
    .await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to create article in Strapi");
    assert!(body.get("articleId").is_none());
    let names = fixture.call_names();
    assert_eq!(names.last().map(String::as_str), Some("create"));
}

#[tokio::test]
async fn test_upload_failure_is_soft() {
    let fixture = TestFixture::with_behavior(Behavior {
        upload_status: 500,
        ..Behavior::default()
    })
    .await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articleId"], "doc-new");
    assert!(body["warnings"][0].as_str().unwrap().starts_with("image_upload:"));
    assert!(fixture.call("link:").is_none());
}

#[tokio::test]
async fn test_link_failure_is_soft() {
    let fixture = TestFixture::with_behavior(Behavior {
        link_status: 500,
        ..Behavior::default()
    })
    .await;

    let (status, body) = fixture.generate(json!({ "url": SOURCE })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articleId"], "doc-new");
    assert!(body["warnings"][0].as_str().unwrap().starts_with("image_link:"));
}

#[tokio::test]
async fn test_pipeline_records_step_outcomes() {
    let fixture = TestFixture::with_behavior(Behavior {
        upload_status: 502,
        ..Behavior::default()
    })
    .await;

    let pipeline = NewsPipeline::new(fixture.state.config.clone(), fixture.state.http.clone());
    let run = pipeline.run(SOURCE).await;

    let published = run.result.as_ref().unwrap();
    assert_eq!(published.article_id, "doc-new");
    assert_eq!(published.image_file_id, None);
    assert_eq!(run.status_of(Step::Configuration), Some(&StepStatus::Succeeded));
    assert_eq!(run.status_of(Step::Generation), Some(&StepStatus::Succeeded));
    assert_eq!(run.status_of(Step::ImageGeneration), Some(&StepStatus::Succeeded));
    assert_eq!(run.status_of(Step::ArticleCreate), Some(&StepStatus::Succeeded));
    assert!(matches!(run.status_of(Step::ImageUpload), Some(StepStatus::Degraded(_))));
    assert_eq!(run.status_of(Step::ImageLink), Some(&StepStatus::Skipped));
}

#[tokio::test]
async fn test_pipeline_links_uploaded_image() {
    let fixture = TestFixture::new().await;

    let run = fixture.state.pipeline().run(SOURCE).await;

    let published = run.result.unwrap();
    assert_eq!(published.image_file_id, Some(42));
    assert!(published.warnings.is_empty());
    assert_eq!(run.steps.len(), 6);
}

#[tokio::test]
async fn test_cms_client_reads() {
    let articles = (1..=5).map(|n| article_json(n, n <= 2)).collect();
    let fixture = TestFixture::with_articles(articles).await;
    let cms = CmsClient::new(Client::new(), fixture.upstream_url.clone(), None);

    let page = cms.list_articles(1, 2).await.unwrap();
    assert_eq!(page.articles.len(), 2);
    assert_eq!(page.articles[0].document_id, "doc-1");
    let pagination = page.pagination.unwrap();
    assert_eq!(pagination.page_count, 3);
    assert_eq!(pagination.total, 5);
    assert!(pagination.is_consistent());

    // Past the last page: empty, not an error.
    let beyond = cms.list_articles(9, 2).await.unwrap();
    assert!(beyond.articles.is_empty());

    let featured = cms.get_featured(5).await.unwrap();
    assert_eq!(featured.len(), 2);
    assert!(featured.iter().all(|a| a.is_featured()));

    let latest = cms
        .list_latest(10, &["doc-1".to_string(), "doc-3".to_string()])
        .await
        .unwrap();
    let ids: Vec<_> = latest.iter().map(|a| a.document_id.as_str()).collect();
    assert_eq!(ids, vec!["doc-2", "doc-4", "doc-5"]);

    let found = cms.get_by_slug("noticia-4").await.unwrap().unwrap();
    assert_eq!(found.title, "Notícia número 4");
    assert!(cms.get_by_slug("nao-existe").await.unwrap().is_none());
}

#[tokio::test]
async fn test_listing_page_beyond_last_is_empty() {
    let articles = (1..=3).map(|n| article_json(n, false)).collect();
    let fixture = TestFixture::with_articles(articles).await;

    let (status, html) = fixture.get_page("/noticias?page=7").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Nenhuma notícia publicada ainda."));

    let (status, html) = fixture.get_page("/noticias?page=abc").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Notícia número 1"));
    assert!(html.contains("/noticias/noticia-3"));
}

#[tokio::test]
async fn test_listing_shows_page_links() {
    let articles = (1..=12).map(|n| article_json(n, false)).collect();
    let fixture = TestFixture::with_articles(articles).await;

    let (status, html) = fixture.get_page("/noticias?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Notícia número 11"));
    assert!(!html.contains("Notícia número 1<"));
    assert!(html.contains("href=\"/noticias?page=1\""));
    assert!(html.contains("aria-current=\"page\""));
}

#[tokio::test]
async fn test_detail_page() {
    let articles = (1..=6).map(|n| article_json(n, false)).collect();
    let fixture = TestFixture::with_articles(articles).await;

    let (status, html) = fixture.get_page("/noticias/noticia-2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<title>Notícia número 2 | Rota 67</title>"));
    // The duplicated leading heading is stripped from the body.
    assert!(!html.contains("<h1>Notícia número 2</h1>"));
    assert!(html.contains("<p>Conteúdo da notícia 2.</p>"));
    assert!(html.contains("1 min de leitura"));
    assert!(html.contains("26 de outubro de 2026"));
    assert!(html.contains("www.campograndenews.com.br"));
    assert!(html.contains(&format!("{}/uploads/img-2.png", fixture.upstream_url)));
    assert!(html.contains("og:image"));
    assert!(html.contains("/noticias/noticia-1"));
    assert!(!html.contains("href=\"/noticias/noticia-2\""));
}

#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let fixture = TestFixture::with_articles(vec![article_json(1, false)]).await;

    let (status, html) = fixture.get_page("/noticias/nao-existe").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Página não encontrada"));

    let (status, _) = fixture.get_page("/rota/desconhecida").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_home_page_composition() {
    let articles = (1..=16).map(|n| article_json(n, n == 3 || n == 5)).collect();
    let fixture = TestFixture::with_articles(articles).await;

    let (status, html) = fixture.get_page("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Destaque"));
    assert!(html.contains("Mais Lidas"));
    // Every story is linked exactly once across hero, secondary, grid and sidebar.
    for n in 1..=16 {
        let href = format!("href=\"/noticias/noticia-{}\"", n);
        assert_eq!(html.matches(href.as_str()).count(), 1, "noticia-{}", n);
    }
}

#[tokio::test]
async fn test_home_page_hides_empty_sidebar() {
    let articles = (1..=8).map(|n| article_json(n, n == 3)).collect();
    let fixture = TestFixture::with_articles(articles).await;

    let (status, html) = fixture.get_page("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(!html.contains("Mais Lidas"));
    assert_eq!(html.matches("href=\"/noticias/noticia-3\"").count(), 1);
    assert!(html.contains("href=\"/noticias/noticia-8\""));
}

#[tokio::test]
async fn test_home_page_without_articles() {
    let fixture = TestFixture::new().await;

    let (status, html) = fixture.get_page("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Ver Notícias"));
}

#[tokio::test]
async fn test_pages_without_cms_config() {
    let fixture = TestFixture::with(Behavior::default(), Vec::new(), |c| c.cms_url = None).await;

    let (status, html) = fixture.get_page("/noticias").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(html.contains("STRAPI_URL is not defined"));
}

#[tokio::test]
async fn test_generator_form() {
    let fixture = TestFixture::new().await;

    let (status, html) = fixture.get_page("/gerador-de-noticia").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("name=\"url\""));
    assert!(html.contains("method=\"post\""));
}

#[tokio::test]
async fn test_generator_form_submission() {
    let fixture = TestFixture::new().await;
    let client = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    let resp = client
        .post(fixture.url("/gerador-de-noticia"))
        .form(&[("url", "isso não é link")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    assert!(resp.text().await.unwrap().contains("Por favor, insira uma URL válida"));
    assert!(fixture.call_names().is_empty());

    let resp = client
        .post(fixture.url("/gerador-de-noticia"))
        .form(&[("url", SOURCE)])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(
        resp.headers()["location"].to_str().unwrap(),
        format!("/noticias/{}", SLUG)
    );
}

#[tokio::test]
async fn test_generator_form_shows_pipeline_error() {
    let fixture = TestFixture::with_behavior(Behavior {
        webhook_status: 503,
        ..Behavior::default()
    })
    .await;

    let resp = fixture
        .client
        .post(fixture.url("/gerador-de-noticia"))
        .form(&[("url", SOURCE)])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 503);
    let html = resp.text().await.unwrap();
    assert!(html.contains("HTTP 503"));
    assert!(html.contains(&format!("value=\"{}\"", SOURCE)));
}
