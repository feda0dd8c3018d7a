//! tifftags - Dump the metadata tags of every page of a TIFF, BigTIFF or SVS file.
//!
//! This binary parses the command line, writes the report and optionally
//! opens it in an editor.

use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tiff_tag_dump::{
    config::Config,
    launcher::{open_report, EditorLauncher},
    report::dump_tags,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let output = config.output_path();
    debug!(
        input = %config.input.display(),
        output = %output.display(),
        format = ?config.format,
        max_pages = config.max_pages,
        "starting dump"
    );

    let pages = match dump_tags(
        &config.input,
        &output,
        config.format,
        &config.extract_options(),
    )
    .await
    {
        Ok(pages) => pages,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("Wrote {} pages of tags to {}", pages, output.display());

    if config.open {
        let launcher = EditorLauncher::from_env(config.editor.clone());
        open_report(&launcher, &output);
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
///
/// Logs go to stderr so that stdout carries only the summary line.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "tiff_tag_dump=debug"
    } else {
        "tiff_tag_dump=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
