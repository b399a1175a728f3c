//! Terminal host for the Praxis client core: real HTTP via ureq, clap
//! arguments, tracing setup and text/JSON output.

pub mod args;
pub mod commands;
pub mod logging;
pub mod transport;

pub use args::{Cli, Commands, ContentSource, OutputFormat};
pub use transport::UreqTransport;
