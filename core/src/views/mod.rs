//! Per-screen view state.
//!
//! # Design
//! Each view owns its transient state and follows the same host-does-IO
//! split as `PraxisClient`: `begin*` returns the request to execute (or
//! `None` when the action is disabled) and `finish*` takes the outcome.
//! Failures never escape a view. They are recorded in `ViewStatus` and
//! rendered, and whatever the view showed before stays in place.

mod announcement;
mod quiz;
mod slides;
mod upload;

pub use announcement::AnnouncementView;
pub use quiz::{AssessmentKind, QuizView};
pub use slides::SlideView;
pub use upload::UploadView;

use std::fmt;

use tracing::warn;

use crate::render::Block;

/// Lifecycle of a view's most recent action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewStatus {
    #[default]
    Idle,
    /// A request is in flight. Advisory only: it disables the action, it
    /// does not stop a host from sending overlapping requests.
    Busy,
    Failed(String),
}

impl ViewStatus {
    pub fn is_busy(&self) -> bool {
        matches!(self, ViewStatus::Busy)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    fn failed(view: &str, error: impl fmt::Display) -> Self {
        let message = error.to_string();
        warn!(view, error = %message, "view action failed");
        ViewStatus::Failed(message)
    }

    fn error_block(&self) -> Option<Block> {
        self.error().map(|message| Block::Error(message.to_string()))
    }
}
