//! Synchronous API client core for the Praxis content-generation backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). The host executes the actual
//! HTTP round-trip through a `Transport`, keeping the core deterministic and
//! testable against a mock backend.
//!
//! # Design
//! - `PraxisClient` is stateless: it holds only `base_url`.
//! - Each backend operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Views (`views`) and the router (`App`) hold the transient UI state and
//!   render to host-agnostic `Block`s.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod multipart;
pub mod render;
pub mod router;
pub mod types;
pub mod views;

#[cfg(test)]
mod test_support;

pub use client::PraxisClient;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use multipart::{FormPart, MultipartForm};
pub use render::{Block, Card};
pub use router::{App, Screen};
pub use types::{
    Announcement, BackendStatus, ExamSet, ExtractedContent, QuizItem, QuizSet, Slide, SlideDeck, SlidesPdf,
    UploadedDocument, SLIDES_PDF_FILENAME,
};
pub use views::{AnnouncementView, AssessmentKind, QuizView, SlideView, UploadView, ViewStatus};
