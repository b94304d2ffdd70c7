//! Wire types for the episode metadata endpoint.
//!
//! The request is a GraphQL-style operation selecting one episode by
//! number. Responses deserialize leniently (every field optional) and are
//! then checked by [`EpisodeResponse::into_episode`], which reports a typed
//! [`ValidationFailure`] instead of erroring inside deserialization.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const EPISODE_QUERY: &str = "\
query visionTubeEpisode($episodeNumber: Int!) {
  visionTubeEpisode(episodeNumber: $episodeNumber) {
    photo {
      photoUrl
    }
    tags {
      name
    }
  }
}";

// ==================== Request Payload ====================

/// Request payload for one episode page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeQuery {
    operation_name: &'static str,
    variables: EpisodeVariables,
    query: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct EpisodeVariables {
    episode_number: u32,
}

impl EpisodeQuery {
    /// Builds the payload requesting episode `page`.
    #[must_use]
    pub fn new(page: u32) -> Self {
        Self {
            operation_name: "visionTubeEpisode",
            variables: EpisodeVariables {
                episode_number: page,
            },
            query: EPISODE_QUERY,
        }
    }

    /// The episode number this payload requests.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.variables.episode_number
    }
}

// ==================== Response Types ====================

/// Top-level endpoint response.
#[derive(Debug, Deserialize)]
pub struct EpisodeResponse {
    /// The `data` envelope; absent on malformed answers.
    pub data: Option<ResponseData>,
}

/// The `data` envelope.
#[derive(Debug, Deserialize)]
pub struct ResponseData {
    /// The episode object, keyed by the backend operation name.
    #[serde(rename = "visionTubeEpisode")]
    pub episode: Option<Episode>,
}

/// One episode as returned by the endpoint. All fields are optional so
/// shape problems surface in validation, not deserialization.
#[derive(Debug, Deserialize)]
pub struct Episode {
    /// Media location for the episode.
    pub photo: Option<Photo>,
    /// Tag list; the third entry names the episode.
    pub tags: Option<Vec<Tag>>,
}

/// Media location for an episode.
#[derive(Debug, Deserialize)]
pub struct Photo {
    /// Direct URL of the episode's video.
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
}

/// A tag attached to an episode.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tag {
    /// Human-readable tag text.
    pub name: Option<String>,
}

// ==================== Validation ====================

/// Why a decoded response failed shape validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    /// `data.visionTubeEpisode` is missing entirely.
    #[error("response carries no episode object")]
    MissingEpisode,
    /// The episode has no `photo` object.
    #[error("episode carries no photo object")]
    MissingPhoto,
    /// The episode has no `tags` array.
    #[error("episode carries no tags array")]
    MissingTags,
    /// Fewer than three tags were present.
    #[error("episode carries {found} tags, need at least 3")]
    TooFewTags {
        /// How many tags the episode actually had.
        found: usize,
    },
    /// The photo object has no `photoUrl`.
    #[error("episode photo carries no photoUrl")]
    MissingPhotoUrl,
}

/// An episode that passed shape validation.
#[derive(Debug, Clone)]
pub struct ValidatedEpisode {
    /// Direct URL of the episode's video.
    pub photo_url: String,
    /// Tag list, guaranteed to hold at least three entries.
    pub tags: Vec<Tag>,
}

impl ValidatedEpisode {
    /// The title drawn from the third tag, when that tag carries a name.
    ///
    /// Positional on purpose: the endpoint orders tags so the third entry
    /// is the episode title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.tags.get(2).and_then(|tag| tag.name.as_deref())
    }
}

impl EpisodeResponse {
    /// Checks the expected shape and extracts the episode.
    ///
    /// Required: `data.visionTubeEpisode` present with both `photo` and
    /// `tags`, at least three tags, and a `photoUrl` inside the photo. The
    /// third tag's name is not required here; title extraction reports
    /// that separately.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationFailure`] encountered.
    pub fn into_episode(self) -> Result<ValidatedEpisode, ValidationFailure> {
        let episode = self
            .data
            .and_then(|data| data.episode)
            .ok_or(ValidationFailure::MissingEpisode)?;
        let photo = episode.photo.ok_or(ValidationFailure::MissingPhoto)?;
        let tags = episode.tags.ok_or(ValidationFailure::MissingTags)?;
        if tags.len() < 3 {
            return Err(ValidationFailure::TooFewTags { found: tags.len() });
        }
        let photo_url = photo.photo_url.ok_or(ValidationFailure::MissingPhotoUrl)?;
        Ok(ValidatedEpisode { photo_url, tags })
    }
}
