//! Upload screen: pick a document, send it for processing, show the
//! suggested topics. The extracted text goes back to the router.

use crate::client::PraxisClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::render::Block;
use crate::types::UploadedDocument;

use super::ViewStatus;

/// File selection and content processing.
#[derive(Debug, Clone, Default)]
pub struct UploadView {
    selected: Option<UploadedDocument>,
    topics: Vec<String>,
    status: ViewStatus,
}

impl UploadView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, document: UploadedDocument) {
        self.selected = Some(document);
    }

    pub fn selected(&self) -> Option<&UploadedDocument> {
        self.selected.as_ref()
    }

    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Consume the selected document into a processing request.
    pub fn begin(&mut self, client: &PraxisClient) -> Option<HttpRequest> {
        if self.status.is_busy() {
            return None;
        }
        let document = self.selected.take()?;
        self.status = ViewStatus::Busy;
        Some(client.build_process_content(&document))
    }

    /// Apply the processing outcome. Returns the extracted text for the
    /// router to hold.
    pub fn finish(&mut self, client: &PraxisClient, result: Result<HttpResponse, ApiError>) -> Option<String> {
        match result.and_then(|response| client.parse_process_content(response)) {
            Ok(content) => {
                self.topics = content.slide_topics;
                self.status = ViewStatus::Idle;
                Some(content.full_content)
            }
            Err(e) => {
                self.status = ViewStatus::failed("upload", e);
                None
            }
        }
    }

    pub fn render(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        match &self.selected {
            Some(document) => blocks.push(Block::Text(format!("Selected: {}", document.file_name))),
            None => blocks.push(Block::Text("Upload PDF or TXT".to_string())),
        }
        blocks.push(Block::Action {
            label: "Process Content".to_string(),
            enabled: self.selected.is_some() && !self.status.is_busy(),
        });
        if !self.topics.is_empty() {
            blocks.push(Block::Heading("Suggested Slide Topics:".to_string()));
            blocks.push(Block::List(self.topics.clone()));
        }
        blocks.extend(self.status.error_block());
        blocks
    }
}
