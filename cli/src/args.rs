use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use praxis_core::config::{DEFAULT_BACKEND_URL, DEFAULT_TIMEOUT_SECS};
use praxis_core::{ClientConfig, SLIDES_PDF_FILENAME};

#[derive(Parser, Debug)]
#[command(name = "praxis")]
#[command(version)]
#[command(about = "Turn a document into slides, quizzes, exams and announcements", long_about = None)]
pub struct Cli {
    /// Base URL of the generation backend
    #[arg(long, env = "PRAXIS_BACKEND_URL", default_value = DEFAULT_BACKEND_URL, global = true)]
    pub backend_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "PRAXIS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    pub timeout_secs: u64,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            backend_base_url: self.backend_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether the backend's model is loaded
    Status,
    /// Extract text and suggested topics from a document
    Process {
        /// PDF or text document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the extracted text to this file
        #[arg(long, value_name = "PATH")]
        save_content: Option<PathBuf>,
    },
    /// Generate a slide deck
    Slides {
        #[command(flatten)]
        source: ContentSource,

        /// Also export the deck as PDF
        #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = SLIDES_PDF_FILENAME)]
        pdf: Option<PathBuf>,
    },
    /// Generate a multiple-choice quiz
    Quiz {
        #[command(flatten)]
        source: ContentSource,
    },
    /// Generate an exam
    Exam {
        #[command(flatten)]
        source: ContentSource,
    },
    /// Generate a class announcement
    Announce {
        #[command(flatten)]
        source: ContentSource,
    },
    /// Process a document and show every screen
    Run {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Also export the deck as PDF
        #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = SLIDES_PDF_FILENAME)]
        pdf: Option<PathBuf>,
    },
}

/// Where generation input comes from.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ContentSource {
    /// Document to send through content processing first
    #[arg(long, value_name = "FILE")]
    pub document: Option<PathBuf>,

    /// Plain text file used as the content as-is
    #[arg(long, value_name = "FILE")]
    pub content_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered screens
    Text,
    /// Parsed result as JSON. Exam output always uses the `exam` key
    Json,
}
