//! Stateless HTTP request builder and response parser for the Praxis backend.
//!
//! # Design
//! `PraxisClient` holds only a `base_url` and carries no mutable state between
//! calls. Each backend operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The one-shot methods (`process_content`, `generate_slides`,
//! ...) glue the two together around exactly one `Transport::execute` call.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::multipart::MultipartForm;
use crate::types::{
    Announcement, BackendStatus, ExamSet, ExtractedContent, QuizSet, SlideDeck, SlidesPdf, UploadedDocument,
};

pub const PROCESS_CONTENT_PATH: &str = "/process-content/";
pub const GENERATE_SLIDES_PATH: &str = "/generate-detailed-slides/";
pub const DOWNLOAD_SLIDES_PDF_PATH: &str = "/download-slides-pdf/";
pub const GENERATE_QUIZ_PATH: &str = "/generate-quiz/";
pub const GENERATE_EXAM_PATH: &str = "/generate-exam/";
pub const GENERATE_ANNOUNCEMENT_PATH: &str = "/generate-announcement/";
pub const STATUS_PATH: &str = "/status";

/// Synchronous, stateless client for the Praxis backend.
#[derive(Debug, Clone)]
pub struct PraxisClient {
    base_url: String,
}

impl PraxisClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.backend_base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // -----------------------------------------------------------------------
    // Build
    // -----------------------------------------------------------------------

    pub fn build_process_content(&self, document: &UploadedDocument) -> HttpRequest {
        let form = MultipartForm::new().file(
            "file",
            &document.file_name,
            &document.media_type,
            document.bytes.clone(),
        );
        self.post(PROCESS_CONTENT_PATH, form)
    }

    pub fn build_generate_slides(&self, content: &str) -> HttpRequest {
        self.post_content(GENERATE_SLIDES_PATH, content)
    }

    pub fn build_download_slides_pdf(&self, deck: &SlideDeck) -> Result<HttpRequest, ApiError> {
        let slides_json = serde_json::to_string(deck).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        let form = MultipartForm::new().text("slides_json", &slides_json);
        Ok(self.post(DOWNLOAD_SLIDES_PDF_PATH, form))
    }

    pub fn build_generate_quiz(&self, content: &str) -> HttpRequest {
        self.post_content(GENERATE_QUIZ_PATH, content)
    }

    pub fn build_generate_exam(&self, content: &str) -> HttpRequest {
        self.post_content(GENERATE_EXAM_PATH, content)
    }

    pub fn build_generate_announcement(&self, content: &str) -> HttpRequest {
        self.post_content(GENERATE_ANNOUNCEMENT_PATH, content)
    }

    pub fn build_backend_status(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{STATUS_PATH}", self.base_url),
            headers: Vec::new(),
            form: None,
        }
    }

    // -----------------------------------------------------------------------
    // Parse
    // -----------------------------------------------------------------------

    pub fn parse_process_content(&self, response: HttpResponse) -> Result<ExtractedContent, ApiError> {
        parse_json(response)
    }

    pub fn parse_generate_slides(&self, response: HttpResponse) -> Result<SlideDeck, ApiError> {
        parse_json(response)
    }

    pub fn parse_download_slides_pdf(&self, response: HttpResponse) -> Result<SlidesPdf, ApiError> {
        check_status(&response)?;
        let content_type = response.header("content-type").map(str::to_string);
        Ok(SlidesPdf {
            bytes: response.body,
            content_type,
        })
    }

    pub fn parse_generate_quiz(&self, response: HttpResponse) -> Result<QuizSet, ApiError> {
        parse_json(response)
    }

    pub fn parse_generate_exam(&self, response: HttpResponse) -> Result<ExamSet, ApiError> {
        parse_json(response)
    }

    pub fn parse_generate_announcement(&self, response: HttpResponse) -> Result<Announcement, ApiError> {
        parse_json(response)
    }

    pub fn parse_backend_status(&self, response: HttpResponse) -> Result<BackendStatus, ApiError> {
        parse_json(response)
    }

    // -----------------------------------------------------------------------
    // One-shot
    // -----------------------------------------------------------------------

    pub fn process_content(
        &self,
        transport: &impl Transport,
        document: &UploadedDocument,
    ) -> Result<ExtractedContent, ApiError> {
        self.parse_process_content(transport.execute(self.build_process_content(document))?)
    }

    pub fn generate_slides(&self, transport: &impl Transport, content: &str) -> Result<SlideDeck, ApiError> {
        self.parse_generate_slides(transport.execute(self.build_generate_slides(content))?)
    }

    pub fn download_slides_pdf(&self, transport: &impl Transport, deck: &SlideDeck) -> Result<SlidesPdf, ApiError> {
        self.parse_download_slides_pdf(transport.execute(self.build_download_slides_pdf(deck)?)?)
    }

    pub fn generate_quiz(&self, transport: &impl Transport, content: &str) -> Result<QuizSet, ApiError> {
        self.parse_generate_quiz(transport.execute(self.build_generate_quiz(content))?)
    }

    pub fn generate_exam(&self, transport: &impl Transport, content: &str) -> Result<ExamSet, ApiError> {
        self.parse_generate_exam(transport.execute(self.build_generate_exam(content))?)
    }

    pub fn generate_announcement(&self, transport: &impl Transport, content: &str) -> Result<Announcement, ApiError> {
        self.parse_generate_announcement(transport.execute(self.build_generate_announcement(content))?)
    }

    pub fn backend_status(&self, transport: &impl Transport) -> Result<BackendStatus, ApiError> {
        self.parse_backend_status(transport.execute(self.build_backend_status())?)
    }

    fn post_content(&self, path: &str, content: &str) -> HttpRequest {
        self.post(path, MultipartForm::new().text("content", content))
    }

    fn post(&self, path: &str, form: MultipartForm) -> HttpRequest {
        debug!(path, fields = form.parts().len(), "built request");
        HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), form.content_type())],
            form: Some(form),
        }
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    if response.status == 503 {
        return Err(ApiError::ServiceUnavailable {
            body: response.body_text(),
        });
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body_text(),
    })
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_slice(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{json_response, RecordingTransport};
    use crate::types::Slide;

    fn client() -> PraxisClient {
        PraxisClient::new("http://localhost:8000")
    }

    fn slide(title: &str) -> Slide {
        Slide {
            title: title.to_string(),
            subtitle: Some(format!("{title} subtitle")),
            bullet_points: vec!["a".to_string(), "b".to_string()],
            image_base64: None,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn build_process_content_sends_file_field() {
        let doc = UploadedDocument::new("lesson.pdf", vec![0x25, 0x50, 0x44, 0x46]);
        let req = client().build_process_content(&doc);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:8000/process-content/");
        let form = req.form.as_ref().unwrap();
        assert_eq!(form.parts().len(), 1);
        let part = form.field("file").unwrap();
        assert_eq!(part.data, doc.bytes);
        assert_eq!(part.file_name.as_deref(), Some("lesson.pdf"));
        assert_eq!(part.content_type.as_deref(), Some("application/pdf"));
    }

    #[test]
    fn content_endpoints_use_their_fixed_paths() {
        let c = client();
        let cases = [
            (c.build_generate_slides("text"), "/generate-detailed-slides/"),
            (c.build_generate_quiz("text"), "/generate-quiz/"),
            (c.build_generate_exam("text"), "/generate-exam/"),
            (c.build_generate_announcement("text"), "/generate-announcement/"),
        ];
        for (req, path) in cases {
            assert_eq!(req.method, HttpMethod::Post);
            assert_eq!(req.path, format!("http://localhost:8000{path}"));
            let form = req.form.as_ref().unwrap();
            assert_eq!(form.parts().len(), 1, "{path}");
            assert_eq!(form.field("content").and_then(|p| p.text()), Some("text"), "{path}");
        }
    }

    #[test]
    fn content_header_matches_form_boundary() {
        let req = client().build_generate_slides("x");
        let form = req.form.as_ref().unwrap();
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), format!("multipart/form-data; boundary={}", form.boundary()))]
        );
        assert_eq!(req.content_type(), Some(form.content_type()));
    }

    #[test]
    fn download_pdf_serializes_deck_once() {
        let deck = SlideDeck {
            slides: vec![slide("One"), slide("Two")],
        };
        let req = client().build_download_slides_pdf(&deck).unwrap();
        assert_eq!(req.path, "http://localhost:8000/download-slides-pdf/");
        let form = req.form.as_ref().unwrap();
        assert_eq!(form.parts().len(), 1);
        let raw = form.field("slides_json").and_then(|p| p.text()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed, serde_json::to_value(&deck).unwrap());
        assert_eq!(parsed["slides"][1]["title"], "Two");
    }

    #[test]
    fn download_pdf_sends_deck_exactly_as_received() {
        let original = serde_json::json!({"slides":[
            {"title":"T1","bullet_points":["a"],"speaker_notes":"say hi"},
            {"title":"T2","subtitle":"S2","bullet_points":[],"image_base64":"QUJD","layout":{"columns":2}}
        ]});
        let response = json_response(200, &original.to_string());
        let deck = client().parse_generate_slides(response).unwrap();

        let req = client().build_download_slides_pdf(&deck).unwrap();
        let raw = req.form.as_ref().unwrap().field("slides_json").and_then(|p| p.text()).unwrap();
        let sent: serde_json::Value = serde_json::from_str(raw).unwrap();
        assert_eq!(sent, original);
    }

    #[test]
    fn build_backend_status_is_bodiless_get() {
        let req = client().build_backend_status();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:8000/status");
        assert!(req.form.is_none());
        assert!(req.body_bytes().is_none());
    }

    #[test]
    fn parse_process_content_returns_fields_untransformed() {
        let response = json_response(200, r#"{"slide_topics":["Intro","Summary"],"full_content":"Hello world"}"#);
        let content = client().parse_process_content(response).unwrap();
        assert_eq!(content.slide_topics, vec!["Intro", "Summary"]);
        assert_eq!(content.full_content, "Hello world");
    }

    #[test]
    fn parse_generate_slides_keeps_order_and_images() {
        let response = json_response(
            200,
            r#"{"slides":[{"title":"A","subtitle":"","bullet_points":[]},{"title":"B","subtitle":"s","bullet_points":["x"],"image_base64":"AAAA"}]}"#,
        );
        let deck = client().parse_generate_slides(response).unwrap();
        assert_eq!(deck.slides.len(), 2);
        assert_eq!(deck.slides[0].title, "A");
        assert_eq!(deck.slides[1].image_base64.as_deref(), Some("AAAA"));
    }

    #[test]
    fn parse_download_returns_bytes_unmodified() {
        let bytes = b"%PDF-1.4\n\x00\xff binary".to_vec();
        let response = HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/pdf".to_string())],
            body: bytes.clone(),
        };
        let pdf = client().parse_download_slides_pdf(response).unwrap();
        assert_eq!(pdf.bytes, bytes);
        assert_eq!(pdf.content_type.as_deref(), Some("application/pdf"));
        assert_eq!(pdf.file_name(), "slides.pdf");
    }

    #[test]
    fn parse_quiz_success() {
        let response = json_response(
            200,
            r#"{"quiz":[{"question":"Q1","options":["A","B"],"answer":"A","explanation":"because"}]}"#,
        );
        let quiz = client().parse_generate_quiz(response).unwrap();
        assert_eq!(quiz.quiz[0].question, "Q1");
        assert_eq!(quiz.quiz[0].options, vec!["A", "B"]);
    }

    #[test]
    fn parse_announcement_passes_json_through() {
        let response = json_response(200, r#"{"announcement_text":"Big news","tone":"excited"}"#);
        let announcement = client().parse_generate_announcement(response).unwrap();
        assert_eq!(announcement.text(), Some("Big news"));
        assert_eq!(announcement.0["tone"], "excited");
    }

    #[test]
    fn non_success_status_is_http_error() {
        let response = json_response(500, r#"{"detail":"Failed to process AI response"}"#);
        let err = client().parse_generate_quiz(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, ref body } if body.contains("Failed")));
    }

    #[test]
    fn service_unavailable_has_own_variant() {
        let response = json_response(503, r#"{"detail":"AI model is not ready"}"#);
        let err = client().parse_generate_slides(response).unwrap_err();
        assert!(matches!(err, ApiError::ServiceUnavailable { .. }));
    }

    #[test]
    fn pdf_error_status_is_not_returned_as_blob() {
        let response = json_response(400, r#"{"detail":"Invalid slides_json"}"#);
        let err = client().parse_download_slides_pdf(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
    }

    #[test]
    fn shape_mismatch_is_deserialization_error() {
        let response = json_response(200, r#"{"slides":"not a list"}"#);
        let err = client().parse_generate_slides(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PraxisClient::new("http://localhost:8000/");
        assert_eq!(client.build_backend_status().path, "http://localhost:8000/status");
    }

    #[test]
    fn repeated_trailing_slashes_are_stripped() {
        let client = PraxisClient::new("http://localhost:8000//");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.build_generate_quiz("x").path, "http://localhost:8000/generate-quiz/");
    }

    #[test]
    fn one_shot_issues_exactly_one_request() {
        let transport = RecordingTransport::new(json_response(200, r#"{"quiz":[]}"#));
        let quiz = client().generate_quiz(&transport, "some text").unwrap();
        assert!(quiz.quiz.is_empty());
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "http://localhost:8000/generate-quiz/");
    }

    #[test]
    fn transport_failure_propagates() {
        let transport = RecordingTransport::failing("connection refused");
        let err = client().generate_slides(&transport, "x").unwrap_err();
        assert!(matches!(err, ApiError::Transport(ref msg) if msg == "connection refused"));
    }
}
