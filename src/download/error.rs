//! Error types for per-page processing.

use thiserror::Error;

use crate::http::HttpError;

/// Errors that fail a single page. Never fatal to the run: the caller
/// logs, counts, and moves on to the next page.
#[derive(Debug, Error)]
pub enum PageError {
    /// The metadata request failed at the transport level or answered an
    /// unexpected status.
    #[error("page {page}: metadata request failed: {source}")]
    Fetch {
        /// The page being fetched.
        page: u32,
        /// The underlying transport error.
        #[source]
        source: HttpError,
    },

    /// The validated episode's third tag carries no usable title.
    #[error("page {page}: episode tags carry no title")]
    MissingTitle {
        /// The page being processed.
        page: u32,
    },

    /// The media request failed or answered an unexpected status.
    #[error("page {page}: media download failed: {source}")]
    Media {
        /// The page being processed.
        page: u32,
        /// The underlying transport error.
        #[source]
        source: HttpError,
    },

    /// Writing the media file failed.
    #[error("page {page}: saving media failed: {source}")]
    Save {
        /// The page being processed.
        page: u32,
        /// The underlying persistence error.
        #[source]
        source: HttpError,
    },
}

impl PageError {
    /// Creates a metadata fetch error for `page`.
    #[must_use]
    pub fn fetch(page: u32, source: HttpError) -> Self {
        Self::Fetch { page, source }
    }

    /// Creates a missing-title error for `page`.
    #[must_use]
    pub fn missing_title(page: u32) -> Self {
        Self::MissingTitle { page }
    }

    /// Creates a media download error for `page`.
    #[must_use]
    pub fn media(page: u32, source: HttpError) -> Self {
        Self::Media { page, source }
    }

    /// Creates a save error for `page`.
    #[must_use]
    pub fn save(page: u32, source: HttpError) -> Self {
        Self::Save { page, source }
    }

    /// The page this error belongs to.
    #[must_use]
    pub fn page(&self) -> u32 {
        match self {
            Self::Fetch { page, .. }
            | Self::MissingTitle { page }
            | Self::Media { page, .. }
            | Self::Save { page, .. } => *page,
        }
    }
}
