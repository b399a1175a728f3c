//! Domain DTOs for the Praxis backend.
//!
//! # Design
//! These types mirror the mock-server's JSON but are defined independently;
//! integration tests catch any schema drift between the two crates. Every
//! value is transient and owned by whichever view requested it.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Filename used when saving an exported slide deck.
pub const SLIDES_PDF_FILENAME: &str = "slides.pdf";

/// A user-selected document, consumed once by the content-processing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedDocument {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedDocument {
    /// Wrap in-memory bytes, guessing the media type from the file name.
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            media_type: media_type_for(file_name).to_string(),
            bytes,
        }
    }

    /// Read a document from disk. No type or size checks happen here; the
    /// backend decides what it accepts.
    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(&file_name, bytes))
    }
}

fn media_type_for(file_name: &str) -> &'static str {
    let ext = file_name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("md") => "text/markdown",
        _ => "application/octet-stream",
    }
}

/// Result of `/process-content/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractedContent {
    #[serde(default)]
    pub slide_topics: Vec<String>,
    pub full_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

/// One generated presentation slide.
///
/// The deck is sent back verbatim for PDF export, so absent fields stay
/// absent and keys this client doesn't know about are carried in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slide {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub bullet_points: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Slide {
    /// `data:` URI for the embedded PNG preview, if the slide carries one.
    pub fn image_data_uri(&self) -> Option<String> {
        self.image_base64
            .as_deref()
            .filter(|data| !data.is_empty())
            .map(|data| format!("data:image/png;base64,{data}"))
    }
}

/// Ordered slides, as returned by slide generation and sent back for export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SlideDeck {
    pub slides: Vec<Slide>,
}

/// One multiple-choice question with its answer and explanation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizItem {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub explanation: String,
}

/// Result of `/generate-quiz/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizSet {
    pub quiz: Vec<QuizItem>,
}

/// Result of `/generate-exam/`. Backends have been seen answering with
/// either an `exam` or a `quiz` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExamSet {
    #[serde(alias = "quiz")]
    pub exam: Vec<QuizItem>,
}

/// Result of `/generate-announcement/`, passed through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Announcement(pub serde_json::Value);

impl Announcement {
    /// The `announcement_text` field, when the backend provides one.
    pub fn text(&self) -> Option<&str> {
        self.0.get("announcement_text").and_then(|v| v.as_str())
    }
}

/// Binary PDF export. The bytes are exactly what the backend sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidesPdf {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl SlidesPdf {
    pub fn file_name(&self) -> &'static str {
        SLIDES_PDF_FILENAME
    }
}

/// Result of `GET /status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BackendStatus {
    pub is_ready: bool,
    #[serde(default)]
    pub error_message: String,
}
