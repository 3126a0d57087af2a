/*!
 * Error types for the ytscribe library.
 *
 * Every failure the retrieval pipeline can hit is classified into one
 * variant of `TranscriptError`, using the thiserror crate for ergonomic
 * error definitions. Callers are expected to match on the variant to
 * decide whether to retry (e.g. back off on `TooManyRequests`) or give
 * up (e.g. `InvalidVideoId`).
 */

use thiserror::Error;

/// Errors that can occur while fetching or translating transcripts
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// The request to YouTube failed at the transport level or returned
    /// a status >= 400
    #[error("YouTube request failed for video {video_id}: {reason}")]
    RequestFailed {
        /// Video the request was made for
        video_id: String,
        /// Reason phrase from the response, or the transport error message
        reason: String,
    },

    /// The supplied video id looks like a URL instead of a plain id
    #[error("invalid video id \"{video_id}\": pass the plain video id, not a URL")]
    InvalidVideoId {
        /// The offending identifier
        video_id: String,
    },

    /// YouTube answered with a CAPTCHA challenge page
    #[error("too many requests for video {video_id}: YouTube is requiring a captcha")]
    TooManyRequests {
        /// Video the request was made for
        video_id: String,
    },

    /// The watch page has no player status at all
    #[error("video {video_id} is unavailable")]
    VideoUnavailable {
        /// Video the request was made for
        video_id: String,
    },

    /// The watch page has a player but no captions renderer
    #[error("transcripts are disabled for video {video_id}")]
    TranscriptsDisabled {
        /// Video the request was made for
        video_id: String,
    },

    /// The captions renderer lists no caption tracks
    #[error("no transcript is available for video {video_id}")]
    NoTranscriptAvailable {
        /// Video the request was made for
        video_id: String,
    },

    /// The consent redirect could not be resolved with a consent cookie
    #[error("failed to create a consent cookie for video {video_id}")]
    FailedToCreateConsentCookie {
        /// Video the request was made for
        video_id: String,
    },

    /// No track matched any of the requested language codes
    #[error("no transcript found for video {video_id} in any of the requested languages {requested:?}")]
    NoTranscriptFound {
        /// Video the lookup ran against
        video_id: String,
        /// Language codes the caller asked for, in preference order
        requested: Vec<String>,
    },

    /// `translate` was called on a track with no translation targets
    #[error("transcript for video {video_id} is not translatable")]
    NotTranslatable {
        /// Video the track belongs to
        video_id: String,
    },

    /// The requested translation language is not offered for this track
    #[error("translation language \"{language_code}\" is not available for video {video_id}")]
    TranslationLanguageNotAvailable {
        /// Video the track belongs to
        video_id: String,
        /// The rejected language code
        language_code: String,
    },
}

impl TranscriptError {
    /// The video id the error was raised for
    pub fn video_id(&self) -> &str {
        match self {
            TranscriptError::RequestFailed { video_id, .. }
            | TranscriptError::InvalidVideoId { video_id }
            | TranscriptError::TooManyRequests { video_id }
            | TranscriptError::VideoUnavailable { video_id }
            | TranscriptError::TranscriptsDisabled { video_id }
            | TranscriptError::NoTranscriptAvailable { video_id }
            | TranscriptError::FailedToCreateConsentCookie { video_id }
            | TranscriptError::NoTranscriptFound { video_id, .. }
            | TranscriptError::NotTranslatable { video_id }
            | TranscriptError::TranslationLanguageNotAvailable { video_id, .. } => video_id,
        }
    }
}
