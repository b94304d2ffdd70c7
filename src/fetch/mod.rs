//! Metadata fetching: request payloads, response schema, page fetch flow.

mod page;
mod schema;

pub use page::{FetchOutcome, NoDataReason, PageFetcher};
pub use schema::{
    Episode, EpisodeQuery, EpisodeResponse, Photo, ResponseData, Tag, ValidatedEpisode,
    ValidationFailure,
};
