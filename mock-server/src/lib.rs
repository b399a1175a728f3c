//! Deterministic stand-in for the Praxis generation backend.
//!
//! Serves the same routes, form fields and status codes as the real
//! service, but derives its "generated" artifacts directly from the submitted
//! text. Every request is recorded so tests can assert on exactly what the
//! client sent.

mod generate;
mod pdf;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub use generate::{announcement, questions, slides, topics, QuizItem, Slide};

/// One form field as received by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedField {
    pub name: String,
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

impl RecordedField {
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.data).ok()
    }
}

/// A request as received by the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    pub fields: Vec<RecordedField>,
}

impl RecordedRequest {
    pub fn field(&self, name: &str) -> Option<&RecordedField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Serialize, Deserialize)]
pub struct SlideDeck {
    pub slides: Vec<Slide>,
}

#[derive(Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

struct Inner {
    ready: bool,
    error_message: String,
    requests: RwLock<Vec<RecordedRequest>>,
}

/// Shared server state: readiness plus the request log.
#[derive(Clone)]
pub struct Backend {
    inner: Arc<Inner>,
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend {
    pub fn new() -> Self {
        Self::with_readiness(true, String::new())
    }

    /// A backend whose model never finished loading: generation answers 503.
    pub fn not_ready(error_message: &str) -> Self {
        Self::with_readiness(false, error_message.to_string())
    }

    fn with_readiness(ready: bool, error_message: String) -> Self {
        Self {
            inner: Arc::new(Inner {
                ready,
                error_message,
                requests: RwLock::new(Vec::new()),
            }),
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.requests.read().await.clone()
    }

    fn ensure_ready(&self) -> Result<(), Failure> {
        if self.inner.ready {
            return Ok(());
        }
        Err(fail(
            StatusCode::SERVICE_UNAVAILABLE,
            format!("AI model is not ready. Error: {}", self.inner.error_message),
        ))
    }
}

/// Uploaded documents can be much larger than axum's 2 MB default.
const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

type Failure = (StatusCode, Json<Detail>);

fn fail(status: StatusCode, detail: impl Into<String>) -> Failure {
    (status, Json(Detail { detail: detail.into() }))
}

pub fn app() -> Router {
    app_with(Backend::new())
}

pub fn app_with(backend: Backend) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/status", get(status))
        .route("/process-content/", post(process_content))
        .route("/generate-detailed-slides/", post(generate_slides))
        .route("/download-slides-pdf/", post(download_slides_pdf))
        .route("/generate-quiz/", post(generate_quiz))
        .route("/generate-exam/", post(generate_exam))
        .route("/generate-announcement/", post(generate_announcement))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(backend)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with(listener, Backend::new()).await
}

pub async fn run_with(listener: TcpListener, backend: Backend) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(backend)).await
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Praxis AI Backend is running!" }))
}

async fn status(State(backend): State<Backend>) -> Json<Value> {
    Json(json!({
        "is_ready": backend.inner.ready,
        "error_message": backend.inner.error_message,
    }))
}

/// Drain the form and append it to the request log.
async fn record(backend: &Backend, path: &str, mut multipart: Multipart) -> Result<RecordedRequest, Failure> {
    let mut fields = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| fail(StatusCode::BAD_REQUEST, e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| fail(StatusCode::BAD_REQUEST, e.body_text()))?;
        fields.push(RecordedField {
            name,
            file_name,
            data: data.to_vec(),
        });
    }
    info!(path, fields = fields.len(), "request");
    let request = RecordedRequest {
        path: path.to_string(),
        fields,
    };
    backend.inner.requests.write().await.push(request.clone());
    Ok(request)
}

fn required<'a>(request: &'a RecordedRequest, name: &str) -> Result<&'a RecordedField, Failure> {
    request
        .field(name)
        .ok_or_else(|| fail(StatusCode::UNPROCESSABLE_ENTITY, format!("Field required: {name}")))
}

fn required_text(request: &RecordedRequest, name: &str) -> Result<String, Failure> {
    let field = required(request, name)?;
    field
        .text()
        .map(str::to_string)
        .ok_or_else(|| fail(StatusCode::UNPROCESSABLE_ENTITY, format!("Field {name} must be text")))
}

async fn process_content(State(backend): State<Backend>, multipart: Multipart) -> Result<Json<Value>, Failure> {
    let request = record(&backend, "/process-content/", multipart).await?;
    let file = required(&request, "file")?;
    backend.ensure_ready()?;
    let file_name = file.file_name.clone().unwrap_or_default();
    let lower = file_name.to_ascii_lowercase();

    let text = if lower.ends_with(".txt") || lower.ends_with(".md") {
        String::from_utf8(file.data.clone())
            .map_err(|_| fail(StatusCode::BAD_REQUEST, "Error reading text file: not valid UTF-8"))?
    } else if lower.ends_with(".pdf") {
        String::from_utf8_lossy(&file.data).into_owned()
    } else {
        return Err(fail(StatusCode::BAD_REQUEST, "Unsupported file type."));
    };

    Ok(Json(json!({
        "status": "success",
        "summary": format!("Processed '{file_name}'"),
        "slide_topics": topics(&text),
        "full_content": text,
    })))
}

async fn generate_slides(State(backend): State<Backend>, multipart: Multipart) -> Result<Json<Value>, Failure> {
    let request = record(&backend, "/generate-detailed-slides/", multipart).await?;
    let content = required_text(&request, "content")?;
    backend.ensure_ready()?;
    Ok(Json(json!({ "slides": slides(&content) })))
}

async fn download_slides_pdf(
    State(backend): State<Backend>,
    multipart: Multipart,
) -> Result<impl IntoResponse, Failure> {
    let request = record(&backend, "/download-slides-pdf/", multipart).await?;
    let raw = required_text(&request, "slides_json")?;
    let deck: SlideDeck = serde_json::from_str(&raw)
        .map_err(|e| fail(StatusCode::BAD_REQUEST, format!("Invalid slides_json: {e}")))?;
    let titles: Vec<String> = deck.slides.into_iter().map(|s| s.title).collect();
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"slides.pdf\""),
        ],
        pdf::render(&titles),
    ))
}

async fn generate_quiz(State(backend): State<Backend>, multipart: Multipart) -> Result<Json<Value>, Failure> {
    let request = record(&backend, "/generate-quiz/", multipart).await?;
    let content = required_text(&request, "content")?;
    backend.ensure_ready()?;
    Ok(Json(json!({ "quiz": questions(&content, 5) })))
}

async fn generate_exam(State(backend): State<Backend>, multipart: Multipart) -> Result<Json<Value>, Failure> {
    let request = record(&backend, "/generate-exam/", multipart).await?;
    let content = required_text(&request, "content")?;
    backend.ensure_ready()?;
    Ok(Json(json!({ "quiz": questions(&content, 10) })))
}

async fn generate_announcement(
    State(backend): State<Backend>,
    multipart: Multipart,
) -> Result<Json<Value>, Failure> {
    let request = record(&backend, "/generate-announcement/", multipart).await?;
    let content = required_text(&request, "content")?;
    backend.ensure_ready()?;
    Ok(Json(json!({ "announcement_text": announcement(&content) })))
}
