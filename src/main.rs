//! CLI entry point for the vidfetch tool.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use vidfetch_core::{BrowserUaGenerator, DownloadEngine, PageFetcher, RunStats, UserAgentPool};

mod cli;
mod logging;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    let end_page = args.last_page();
    if end_page < args.start_page {
        anyhow::bail!(
            "--end-page ({end_page}) must not be below the first page ({})",
            args.start_page
        );
    }

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    logging::init(&args.log_file, default_level);

    debug!(?args, "CLI arguments parsed");
    info!(
        start_page = args.start_page,
        end_page,
        output_dir = %args.output_dir.display(),
        "vidfetch starting"
    );

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            args.output_dir.display()
        )
    })?;

    let pool =
        UserAgentPool::new(BrowserUaGenerator).context("failed to initialize the user agent pool")?;
    let fetcher = PageFetcher::new(args.endpoint.clone(), pool);
    let mut engine = DownloadEngine::new(fetcher, &args.output_dir);

    let mut stats = RunStats::default();
    for page in args.start_page..=end_page {
        let outcome = engine.process(page).await;
        stats.record(&outcome);
    }

    info!(
        pages = stats.pages,
        saved = stats.saved,
        no_data = stats.no_data,
        failed = stats.failed,
        "run complete"
    );

    Ok(())
}
