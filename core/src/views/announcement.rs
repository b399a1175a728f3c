//! Class announcement generated from the held content. Not a screen of its
//! own; the CLI shows it on demand.

use crate::client::PraxisClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::render::Block;
use crate::types::Announcement;

use super::ViewStatus;

/// Holds the most recent generated announcement.
#[derive(Debug, Clone, Default)]
pub struct AnnouncementView {
    announcement: Option<Announcement>,
    status: ViewStatus,
}

impl AnnouncementView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn announcement(&self) -> Option<&Announcement> {
        self.announcement.as_ref()
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub(crate) fn fail(&mut self, error: impl std::fmt::Display) {
        self.status = ViewStatus::failed("announcement", error);
    }

    pub fn begin(&mut self, client: &PraxisClient, content: &str) -> Option<HttpRequest> {
        if self.status.is_busy() {
            return None;
        }
        self.status = ViewStatus::Busy;
        Some(client.build_generate_announcement(content))
    }

    pub fn finish(&mut self, client: &PraxisClient, result: Result<HttpResponse, ApiError>) {
        match result.and_then(|response| client.parse_generate_announcement(response)) {
            Ok(announcement) => {
                self.announcement = Some(announcement);
                self.status = ViewStatus::Idle;
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn render(&self) -> Vec<Block> {
        let mut blocks = Vec::new();
        if let Some(announcement) = &self.announcement {
            blocks.push(Block::Heading("Announcement:".to_string()));
            // Unknown shapes are shown as raw JSON.
            let text = match announcement.text() {
                Some(text) => text.to_string(),
                None => announcement.0.to_string(),
            };
            blocks.push(Block::Text(text));
        }
        blocks.extend(self.status.error_block());
        blocks
    }
}
