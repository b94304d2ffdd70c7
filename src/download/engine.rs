//! Per-page orchestration: fetch metadata, download media, persist.

use std::path::{Path, PathBuf};

use tracing::{error, info};

use super::error::PageError;
use super::filename::sanitize_title;
use crate::fetch::{FetchOutcome, NoDataReason, PageFetcher};
use crate::http::{HttpError, save_body};

/// Result of processing one page.
#[derive(Debug)]
pub enum PageOutcome {
    /// A media file was written.
    Saved {
        /// Where the file landed.
        path: PathBuf,
    },
    /// The page yielded no data; nothing was written.
    NoData {
        /// Why the page was skipped.
        reason: NoDataReason,
    },
    /// The page failed; the error was already logged.
    Failed(PageError),
}

/// Counters for a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Pages processed.
    pub pages: u64,
    /// Media files written.
    pub saved: u64,
    /// Pages that yielded no data.
    pub no_data: u64,
    /// Pages that failed.
    pub failed: u64,
}

impl RunStats {
    /// Records one page outcome.
    pub fn record(&mut self, outcome: &PageOutcome) {
        self.pages += 1;
        match outcome {
            PageOutcome::Saved { .. } => self.saved += 1,
            PageOutcome::NoData { .. } => self.no_data += 1,
            PageOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Drives the per-page pipeline over one shared session.
///
/// Pages are processed strictly one at a time; every failure is scoped to
/// its page, so the caller can always continue with the next one.
#[derive(Debug)]
pub struct DownloadEngine {
    fetcher: PageFetcher,
    output_dir: PathBuf,
}

impl DownloadEngine {
    /// Creates an engine saving media files into `output_dir`.
    #[must_use]
    pub fn new(fetcher: PageFetcher, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            fetcher,
            output_dir: output_dir.into(),
        }
    }

    /// Where media files are written.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Processes one page end to end: metadata fetch, media download,
    /// persistence as `<title>_<page>.mp4`.
    ///
    /// Failures are logged here with page context and returned as
    /// [`PageOutcome::Failed`]; nothing is fatal to the run.
    pub async fn process(&mut self, page: u32) -> PageOutcome {
        info!(page, "downloading page");

        let episode = match self.fetcher.fetch(page).await {
            Ok(FetchOutcome::Episode(episode)) => episode,
            Ok(FetchOutcome::NoData(reason)) => {
                info!(page, ?reason, "page yielded no data");
                return PageOutcome::NoData { reason };
            }
            Err(error) => return fail(PageError::fetch(page, error)),
        };

        let Some(title) = episode.title().map(ToString::to_string) else {
            return fail(PageError::missing_title(page));
        };

        let response = match self.fetcher.client().get_media(&episode.photo_url).await {
            Ok(response) => response,
            Err(error) => return fail(PageError::media(page, error)),
        };
        let status = response.status();
        if !status.is_success() {
            let error = HttpError::status(&episode.photo_url, status.as_u16());
            return fail(PageError::media(page, error));
        }

        let filename = format!("{}_{page}.mp4", sanitize_title(&title));
        let path = self.output_dir.join(filename);
        match save_body(response, &path).await {
            Ok(bytes) => {
                info!(page, path = %path.display(), bytes, "page downloaded");
                PageOutcome::Saved { path }
            }
            Err(error) => fail(PageError::save(page, error)),
        }
    }
}

fn fail(error: PageError) -> PageOutcome {
    error!(page = error.page(), %error, "page failed");
    PageOutcome::Failed(error)
}
