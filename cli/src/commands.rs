//! Subcommand execution.
//!
//! Each command drives the core `App` the way a user would click through
//! the screens, then prints the visible screen. A view that ends in a
//! failed state still gets printed (so its error block is visible) before
//! the command returns an error.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use praxis_core::render::to_text;
use praxis_core::{App, ExamSet, PraxisClient, QuizSet, Screen, Transport, UploadedDocument, ViewStatus};
use serde_json::json;
use tracing::info;

use crate::args::{Cli, Commands, ContentSource, OutputFormat};
use crate::transport::UreqTransport;

pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let config = cli.client_config();
    let transport = UreqTransport::new(&config);
    let client = PraxisClient::from_config(&config);
    info!(backend = %client.base_url(), "using backend");
    execute(cli, client, &transport, out)
}

/// Run a command over any transport.
pub fn execute(cli: &Cli, client: PraxisClient, transport: &impl Transport, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Commands::Status => {
            let status = client.backend_status(transport).context("status check failed")?;
            match cli.format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&status)?)?,
                OutputFormat::Text if status.is_ready => writeln!(out, "backend ready")?,
                OutputFormat::Text => writeln!(out, "backend not ready: {}", status.error_message)?,
            }
        }
        Commands::Process { file, save_content } => {
            let mut app = App::new(client);
            process(&mut app, transport, file)?;
            match cli.format {
                OutputFormat::Json => {
                    let value = json!({
                        "slide_topics": app.upload().topics(),
                        "full_content": app.content(),
                    });
                    writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
                }
                OutputFormat::Text => write!(out, "{}", to_text(&app.render()))?,
            }
            if let (Some(path), Some(content)) = (save_content, app.content()) {
                fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), "saved extracted content");
            }
        }
        Commands::Slides { source, pdf } => {
            let mut app = load(client, transport, source)?;
            app.navigate(Screen::Slides);
            app.generate_slides(transport);
            match cli.format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(app.slides().deck())?)?,
                OutputFormat::Text => write!(out, "{}", to_text(&app.render()))?,
            }
            ensure_ok(app.slides().status(), "slide generation")?;
            if let Some(path) = pdf {
                export_pdf(&mut app, transport, path)?;
            }
        }
        Commands::Quiz { source } => {
            let mut app = load(client, transport, source)?;
            app.navigate(Screen::Quiz);
            app.generate_quiz(transport);
            if cli.format == OutputFormat::Json {
                let quiz = QuizSet {
                    quiz: app.quiz().items().unwrap_or_default().to_vec(),
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&quiz)?)?;
            } else {
                write!(out, "{}", to_text(&app.render()))?;
            }
            ensure_ok(app.quiz().status(), "quiz generation")?;
        }
        Commands::Exam { source } => {
            let mut app = load(client, transport, source)?;
            app.navigate(Screen::Exam);
            app.generate_exam(transport);
            if cli.format == OutputFormat::Json {
                let exam = ExamSet {
                    exam: app.exam().items().unwrap_or_default().to_vec(),
                };
                writeln!(out, "{}", serde_json::to_string_pretty(&exam)?)?;
            } else {
                write!(out, "{}", to_text(&app.render()))?;
            }
            ensure_ok(app.exam().status(), "exam generation")?;
        }
        Commands::Announce { source } => {
            let mut app = load(client, transport, source)?;
            app.generate_announcement(transport);
            let view = app.announcement();
            match (cli.format, view.announcement()) {
                (OutputFormat::Json, Some(announcement)) => {
                    writeln!(out, "{}", serde_json::to_string_pretty(announcement)?)?
                }
                _ => write!(out, "{}", to_text(&view.render()))?,
            }
            ensure_ok(view.status(), "announcement generation")?;
        }
        Commands::Run { file, pdf } => {
            let mut app = App::new(client);
            process(&mut app, transport, file)?;
            app.generate_slides(transport);
            app.generate_quiz(transport);
            app.generate_exam(transport);

            for screen in Screen::ALL {
                app.navigate(screen);
                write!(out, "{}", to_text(&app.render()))?;
            }
            ensure_ok(app.slides().status(), "slide generation")?;
            ensure_ok(app.quiz().status(), "quiz generation")?;
            ensure_ok(app.exam().status(), "exam generation")?;
            if let Some(path) = pdf {
                export_pdf(&mut app, transport, path)?;
            }
        }
    }
    Ok(())
}

/// Router with content from the requested source.
fn load(client: PraxisClient, transport: &impl Transport, source: &ContentSource) -> Result<App> {
    let mut app = App::new(client);
    match (&source.document, &source.content_file) {
        (Some(document), _) => process(&mut app, transport, document)?,
        (None, Some(path)) => {
            let content =
                fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
            app.set_content(content);
        }
        (None, None) => bail!("either --document or --content-file is required"),
    }
    Ok(app)
}

fn process(app: &mut App, transport: &impl Transport, file: &Path) -> Result<()> {
    let document =
        UploadedDocument::from_path(file).with_context(|| format!("failed to read {}", file.display()))?;
    app.process_document(transport, document);
    ensure_ok(app.upload().status(), "content processing")
}

fn export_pdf(app: &mut App, transport: &impl Transport, path: &Path) -> Result<()> {
    let Some(pdf) = app.download_slides_pdf(transport) else {
        ensure_ok(app.slides().status(), "PDF export")?;
        bail!("no slides to export");
    };
    fs::write(path, &pdf.bytes).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = pdf.bytes.len(), "saved PDF");
    Ok(())
}

fn ensure_ok(status: &ViewStatus, action: &str) -> Result<()> {
    match status.error() {
        Some(message) => bail!("{action} failed: {message}"),
        None => Ok(()),
    }
}
