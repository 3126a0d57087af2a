/*!
 * A single fetchable caption track.
 *
 * `Transcript` values are handed out by [`TranscriptList`](crate::transcript_list::TranscriptList);
 * they carry everything needed to fetch the track body on demand and to
 * derive machine-translated variants. A transcript is immutable after
 * construction: `translate` returns a new handle, it never mutates.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::TranscriptError;
use crate::transcript_parser::{self, Segment};
use crate::transport::Transport;

/// A language a caption track can be machine-translated into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationLanguage {
    /// Human-readable display name
    pub language: String,
    /// Platform language code
    pub language_code: String,
}

/// One caption track of a video, fetchable and possibly translatable
#[derive(Debug, Clone)]
pub struct Transcript {
    transport: Arc<dyn Transport>,
    video_id: String,
    url: String,
    language: String,
    language_code: String,
    is_generated: bool,
    translation_languages: Vec<TranslationLanguage>,
    // Display name by language code, computed once at construction
    translation_languages_dict: HashMap<String, String>,
}

impl Transcript {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        video_id: String,
        url: String,
        language: String,
        language_code: String,
        is_generated: bool,
        translation_languages: Vec<TranslationLanguage>,
    ) -> Self {
        let translation_languages_dict = translation_languages
            .iter()
            .map(|t| (t.language_code.clone(), t.language.clone()))
            .collect();

        Transcript {
            transport,
            video_id,
            url,
            language,
            language_code,
            is_generated,
            translation_languages,
            translation_languages_dict,
        }
    }

    /// Fetch the track body and parse it into timed segments.
    ///
    /// Any transport failure or status >= 400 surfaces as
    /// [`TranscriptError::RequestFailed`]; the transport's own error type
    /// never reaches the caller.
    pub async fn fetch(&self, preserve_formatting: bool) -> Result<Vec<Segment>, TranscriptError> {
        debug!(
            "Fetching transcript for video {} in language {}",
            self.video_id, self.language_code
        );

        let response = self
            .transport
            .send("GET", &self.url, &[("Accept-Language", "en-US")])
            .await
            .map_err(|e| TranscriptError::RequestFailed {
                video_id: self.video_id.clone(),
                reason: e.to_string(),
            })?;

        if response.is_error() {
            return Err(TranscriptError::RequestFailed {
                video_id: self.video_id.clone(),
                reason: response.reason_phrase,
            });
        }

        Ok(transcript_parser::parse(&response.body, preserve_formatting))
    }

    /// Derive a handle for a machine-translated variant of this track.
    ///
    /// The result fetches the same track with a translation target
    /// parameter appended; it counts as generated and cannot be translated
    /// further.
    pub fn translate(&self, language_code: &str) -> Result<Transcript, TranscriptError> {
        if !self.is_translatable() {
            return Err(TranscriptError::NotTranslatable {
                video_id: self.video_id.clone(),
            });
        }

        let language = self
            .translation_languages_dict
            .get(language_code)
            .ok_or_else(|| TranscriptError::TranslationLanguageNotAvailable {
                video_id: self.video_id.clone(),
                language_code: language_code.to_string(),
            })?;

        Ok(Transcript::new(
            self.transport.clone(),
            self.video_id.clone(),
            format!("{}&tlang={}", self.url, language_code),
            language.clone(),
            language_code.to_string(),
            true,
            Vec::new(),
        ))
    }

    /// True if this track offers translation targets
    pub fn is_translatable(&self) -> bool {
        !self.translation_languages.is_empty()
    }

    /// Id of the video this track belongs to
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Fetch URL of the raw track body
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Human-readable language name
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Platform language code
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    /// True if the track was produced by automatic speech recognition
    pub fn is_generated(&self) -> bool {
        self.is_generated
    }

    /// Translation targets offered for this track
    pub fn translation_languages(&self) -> &[TranslationLanguage] {
        &self.translation_languages
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (\"{}\"){}",
            self.language_code,
            self.language,
            if self.is_translatable() {
                "[TRANSLATABLE]"
            } else {
                ""
            }
        )
    }
}
