//! # Fresco Publisher CLI
//!
//! Reads a persisted document and writes the published markup.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fresco_core::Document;
use fresco_publish::publish;

/// Publish a Fresco document to markup.
#[derive(Debug, Parser)]
#[command(name = "fresco", version, about)]
struct Args {
    /// Path to the persisted document JSON.
    input: PathBuf,

    /// Write markup to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Initialize structured tracing.
///
/// Set `RUST_LOG` to control log levels (default: info).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let json = std::fs::read_to_string(&args.input)?;
    let document = Document::from_json(&json)?;
    tracing::info!(
        "Publishing {} node(s) from {}",
        document.nodes.len(),
        args.input.display()
    );

    let markup = publish(&document);

    match args.output {
        Some(path) => {
            std::fs::write(&path, markup)?;
            tracing::info!("Wrote markup to {}", path.display());
        }
        None => println!("{markup}"),
    }

    Ok(())
}
