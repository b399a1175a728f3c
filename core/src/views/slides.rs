//! Slide screen.
//!
//! # Design
//! Generation and export share one `ViewStatus`. Only generation sets
//! `Busy`; an export finishing never clears a generation still in flight.

use crate::client::PraxisClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::render::{Block, Card};
use crate::types::{SlideDeck, SlidesPdf};

use super::ViewStatus;

/// Slide generation, display and PDF export.
#[derive(Debug, Clone, Default)]
pub struct SlideView {
    deck: SlideDeck,
    status: ViewStatus,
}

impl SlideView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub(crate) fn fail(&mut self, error: impl std::fmt::Display) {
        self.status = ViewStatus::failed("slides", error);
    }

    /// Returns `None` while a generation is already in flight.
    pub fn begin_generate(&mut self, client: &PraxisClient, content: &str) -> Option<HttpRequest> {
        if self.status.is_busy() {
            return None;
        }
        self.status = ViewStatus::Busy;
        Some(client.build_generate_slides(content))
    }

    pub fn finish_generate(&mut self, client: &PraxisClient, result: Result<HttpResponse, ApiError>) {
        match result.and_then(|response| client.parse_generate_slides(response)) {
            Ok(deck) => {
                self.deck = deck;
                self.status = ViewStatus::Idle;
            }
            Err(e) => self.fail(e),
        }
    }

    /// Export request for the slides currently shown; `None` with no slides.
    pub fn begin_download(&self, client: &PraxisClient) -> Result<Option<HttpRequest>, ApiError> {
        if self.deck.slides.is_empty() {
            return Ok(None);
        }
        client.build_download_slides_pdf(&self.deck).map(Some)
    }

    pub fn finish_download(
        &mut self,
        client: &PraxisClient,
        result: Result<HttpResponse, ApiError>,
    ) -> Option<SlidesPdf> {
        match result.and_then(|response| client.parse_download_slides_pdf(response)) {
            Ok(pdf) => {
                if !self.status.is_busy() {
                    self.status = ViewStatus::Idle;
                }
                Some(pdf)
            }
            Err(e) => {
                self.fail(e);
                None
            }
        }
    }

    pub fn render(&self) -> Vec<Block> {
        let busy = self.status.is_busy();
        let mut blocks = vec![Block::Action {
            label: "Generate Slide Deck".to_string(),
            enabled: !busy,
        }];
        if busy {
            blocks.push(Block::Text("Generating slides...".to_string()));
        }
        if !self.deck.slides.is_empty() {
            blocks.push(Block::Heading("Generated Slides:".to_string()));
            blocks.extend(self.deck.slides.iter().map(|slide| {
                Block::Card(Card {
                    title: slide.title.clone(),
                    subtitle: slide.subtitle.clone(),
                    items: slide.bullet_points.clone(),
                    footer: Vec::new(),
                    image: slide.image_data_uri(),
                })
            }));
            blocks.push(Block::Action {
                label: "Download PDF".to_string(),
                enabled: true,
            });
        }
        blocks.extend(self.status.error_block());
        blocks
    }
}
