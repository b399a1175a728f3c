//! Top-level screen switcher and holder of the extracted content.
//!
//! # Design
//! `App` owns one instance of every view plus the single piece of shared
//! state: the text extracted from the last processed document. Generation
//! actions hand that text to the view explicitly; views never reach back
//! into the router. Every action issues at most one request through the
//! supplied `Transport`.

use tracing::info;

use crate::client::PraxisClient;
use crate::http::Transport;
use crate::render::Block;
use crate::types::{SlidesPdf, UploadedDocument};
use crate::views::{AnnouncementView, AssessmentKind, QuizView, SlideView, UploadView};

const NO_CONTENT: &str = "no extracted content; process a document first";

/// The visible screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    #[default]
    Upload,
    Slides,
    Quiz,
    Exam,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Upload, Screen::Slides, Screen::Quiz, Screen::Exam];

    pub fn label(self) -> &'static str {
        match self {
            Screen::Upload => "Home",
            Screen::Slides => "Slides",
            Screen::Quiz => "Quiz",
            Screen::Exam => "Exam",
        }
    }
}

#[derive(Debug, Clone)]
pub struct App {
    client: PraxisClient,
    screen: Screen,
    content: Option<String>,
    upload: UploadView,
    slides: SlideView,
    quiz: QuizView,
    exam: QuizView,
    announcement: AnnouncementView,
}

impl App {
    pub fn new(client: PraxisClient) -> Self {
        Self {
            client,
            screen: Screen::default(),
            content: None,
            upload: UploadView::new(),
            slides: SlideView::new(),
            quiz: QuizView::new(AssessmentKind::Quiz),
            exam: QuizView::new(AssessmentKind::Exam),
            announcement: AnnouncementView::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Use text obtained elsewhere (e.g. read from a file) as the content.
    pub fn set_content(&mut self, content: String) {
        self.content = Some(content);
    }

    pub fn upload(&self) -> &UploadView {
        &self.upload
    }

    pub fn slides(&self) -> &SlideView {
        &self.slides
    }

    pub fn quiz(&self) -> &QuizView {
        &self.quiz
    }

    pub fn exam(&self) -> &QuizView {
        &self.exam
    }

    pub fn announcement(&self) -> &AnnouncementView {
        &self.announcement
    }

    pub fn process_document(&mut self, transport: &impl Transport, document: UploadedDocument) {
        self.upload.select(document);
        let Some(request) = self.upload.begin(&self.client) else {
            return;
        };
        if let Some(content) = self.upload.finish(&self.client, transport.execute(request)) {
            info!(chars = content.len(), "content extracted");
            self.content = Some(content);
        }
    }

    pub fn generate_slides(&mut self, transport: &impl Transport) {
        let Some(content) = self.content.as_deref() else {
            self.slides.fail(NO_CONTENT);
            return;
        };
        if let Some(request) = self.slides.begin_generate(&self.client, content) {
            self.slides.finish_generate(&self.client, transport.execute(request));
        }
    }

    pub fn download_slides_pdf(&mut self, transport: &impl Transport) -> Option<SlidesPdf> {
        match self.slides.begin_download(&self.client) {
            Ok(Some(request)) => self.slides.finish_download(&self.client, transport.execute(request)),
            Ok(None) => None,
            Err(e) => {
                self.slides.fail(e);
                None
            }
        }
    }

    pub fn generate_quiz(&mut self, transport: &impl Transport) {
        let Some(content) = self.content.as_deref() else {
            self.quiz.fail(NO_CONTENT);
            return;
        };
        if let Some(request) = self.quiz.begin(&self.client, content) {
            self.quiz.finish(&self.client, transport.execute(request));
        }
    }

    pub fn generate_exam(&mut self, transport: &impl Transport) {
        let Some(content) = self.content.as_deref() else {
            self.exam.fail(NO_CONTENT);
            return;
        };
        if let Some(request) = self.exam.begin(&self.client, content) {
            self.exam.finish(&self.client, transport.execute(request));
        }
    }

    pub fn generate_announcement(&mut self, transport: &impl Transport) {
        let Some(content) = self.content.as_deref() else {
            self.announcement.fail(NO_CONTENT);
            return;
        };
        if let Some(request) = self.announcement.begin(&self.client, content) {
            self.announcement.finish(&self.client, transport.execute(request));
        }
    }

    /// Navigation bar followed by the visible screen.
    pub fn render(&self) -> Vec<Block> {
        let mut blocks = vec![
            Block::Heading("Praxis AI".to_string()),
            Block::Tabs {
                labels: Screen::ALL.iter().map(|s| s.label().to_string()).collect(),
                active: Screen::ALL.iter().position(|s| *s == self.screen).unwrap_or(0),
            },
        ];
        blocks.extend(match self.screen {
            Screen::Upload => self.upload.render(),
            Screen::Slides => self.slides.render(),
            Screen::Quiz => self.quiz.render(),
            Screen::Exam => self.exam.render(),
        });
        blocks
    }
}
