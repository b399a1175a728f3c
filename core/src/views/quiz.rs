//! Quiz and exam screens.
//!
//! # Design
//! Both screens render the same question cards, so one `QuizView` serves
//! both. `AssessmentKind` keeps the endpoints and response types apart;
//! nothing here assumes the two backends behave alike.

use crate::client::PraxisClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::render::{Block, Card};
use crate::types::QuizItem;

use super::ViewStatus;

/// Which generation endpoint a `QuizView` drives. The two share a display
/// but are separate backend operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentKind {
    Quiz,
    Exam,
}

impl AssessmentKind {
    pub fn label(self) -> &'static str {
        match self {
            AssessmentKind::Quiz => "Quiz",
            AssessmentKind::Exam => "Exam",
        }
    }

    fn build(self, client: &PraxisClient, content: &str) -> HttpRequest {
        match self {
            AssessmentKind::Quiz => client.build_generate_quiz(content),
            AssessmentKind::Exam => client.build_generate_exam(content),
        }
    }

    fn parse(self, client: &PraxisClient, response: HttpResponse) -> Result<Vec<QuizItem>, ApiError> {
        match self {
            AssessmentKind::Quiz => client.parse_generate_quiz(response).map(|set| set.quiz),
            AssessmentKind::Exam => client.parse_generate_exam(response).map(|set| set.exam),
        }
    }
}

/// Question list for a generated quiz or exam. Display only: no scoring,
/// no answer submission.
#[derive(Debug, Clone)]
pub struct QuizView {
    kind: AssessmentKind,
    items: Option<Vec<QuizItem>>,
    status: ViewStatus,
}

impl QuizView {
    pub fn new(kind: AssessmentKind) -> Self {
        Self {
            kind,
            items: None,
            status: ViewStatus::Idle,
        }
    }

    pub fn kind(&self) -> AssessmentKind {
        self.kind
    }

    pub fn items(&self) -> Option<&[QuizItem]> {
        self.items.as_deref()
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    pub(crate) fn fail(&mut self, error: impl std::fmt::Display) {
        self.status = ViewStatus::failed(self.kind.label(), error);
    }

    pub fn begin(&mut self, client: &PraxisClient, content: &str) -> Option<HttpRequest> {
        if self.status.is_busy() {
            return None;
        }
        self.status = ViewStatus::Busy;
        Some(self.kind.build(client, content))
    }

    pub fn finish(&mut self, client: &PraxisClient, result: Result<HttpResponse, ApiError>) {
        match result.and_then(|response| self.kind.parse(client, response)) {
            Ok(items) => {
                self.items = Some(items);
                self.status = ViewStatus::Idle;
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn render(&self) -> Vec<Block> {
        let mut blocks = vec![Block::Action {
            label: format!("Generate {}", self.kind.label()),
            enabled: !self.status.is_busy(),
        }];
        for item in self.items.iter().flatten() {
            blocks.push(Block::Card(Card {
                title: item.question.clone(),
                subtitle: None,
                items: item.options.clone(),
                footer: vec![format!("Answer: {}", item.answer), item.explanation.clone()],
                image: None,
            }));
        }
        blocks.extend(self.status.error_block());
        blocks
    }
}
