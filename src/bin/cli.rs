// src/bin/cli.rs
use bout_scrape::cli::{self, Args};
use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // -v wins over RUST_LOG; neither → warnings only
    let filter = match args.log_directive() {
        Some(d) => EnvFilter::new(d),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    cli::run(args)
}
