use std::io;

use anyhow::Result;
use clap::Parser;
use praxis_cli::{commands, logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);
    commands::run(&cli, &mut io::stdout().lock())
}
