//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Default metadata endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.4kvm.net/seasons/wczt9";

/// Default directory media files are saved into.
pub const DEFAULT_OUTPUT_DIR: &str = "video";

/// Default log file path.
pub const DEFAULT_LOG_FILE: &str = "video_downloader.log";

/// Fetch paginated episode metadata and download the referenced videos.
///
/// Pages are processed strictly in order, one at a time. Each page's
/// failures are logged and skipped without aborting the run.
#[derive(Parser, Debug)]
#[command(name = "vidfetch")]
#[command(author, version, about)]
pub struct Args {
    /// First page to download
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub start_page: u32,

    /// Last page to download (inclusive); defaults to the first page
    #[arg(short = 'e', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub end_page: Option<u32>,

    /// Directory media files are saved into
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Metadata endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Log file path
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Last page of the run; defaults to the first page.
    #[must_use]
    pub fn last_page(&self) -> u32 {
        self.end_page.unwrap_or(self.start_page)
    }
}
