//! ECG report batch fixer binary.
//!
//! Rebuilds the second page of every report PDF in a directory from its own
//! extracted text, embedding the configured signature image.

use clap::Parser;
use ecg_pdf::{process_directory, BatchConfig};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "report-fix")]
#[command(
    version,
    about = "Rebuild the report page of ECG PDFs from their extracted text"
)]
struct Args {
    /// Directory containing the report PDFs to rewrite in place
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Signature image embedded at the bottom of every rebuilt page
    #[arg(short, long)]
    signature: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = BatchConfig {
        input_dir: args.input_dir,
        signature_path: args.signature,
    };
    let report = process_directory(&config)?;

    tracing::info!(
        processed = report.processed.len(),
        failed = report.failed.len(),
        "batch finished"
    );
    for failure in &report.failed {
        tracing::error!(
            path = %failure.path.display(),
            reason = %failure.reason,
            "document failed"
        );
    }

    if !report.all_succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
