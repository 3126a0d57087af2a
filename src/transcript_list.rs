/*!
 * The catalog of caption tracks available for one video.
 *
 * Built once from the captions metadata embedded in the watch page,
 * immutable afterwards. Tracks are partitioned into manually created and
 * auto-generated (ASR) ones, keyed by language code within each
 * partition, and looked up in caller preference order.
 */

use std::fmt;
use std::slice;
use std::sync::Arc;

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::TranscriptError;
use crate::transcript::{Transcript, TranslationLanguage};
use crate::transport::Transport;

/// Value of the `kind` field marking a track as speech-recognition output
const ASR_CAPTION_KIND: &str = "asr";

/// Caption metadata as embedded in the watch page
#[derive(Debug, Deserialize)]
struct CaptionsJson {
    #[serde(rename = "captionTracks", default)]
    caption_tracks: Vec<CaptionTrack>,
    #[serde(rename = "translationLanguages", default)]
    translation_languages: Vec<RawTranslationLanguage>,
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    name: DisplayName,
    #[serde(rename = "languageCode")]
    language_code: String,
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTranslationLanguage {
    #[serde(rename = "languageName")]
    language_name: DisplayName,
    #[serde(rename = "languageCode")]
    language_code: String,
}

/// Display names come in two shapes depending on the page variant:
/// `{"simpleText": "English"}` or `{"runs": [{"text": "English"}]}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DisplayName {
    Simple {
        #[serde(rename = "simpleText")]
        simple_text: String,
    },
    Runs {
        runs: Vec<NameRun>,
    },
}

#[derive(Debug, Deserialize)]
struct NameRun {
    text: String,
}

impl DisplayName {
    fn text(&self) -> String {
        match self {
            DisplayName::Simple { simple_text } => simple_text.clone(),
            DisplayName::Runs { runs } => runs.iter().map(|run| run.text.as_str()).collect(),
        }
    }
}

/// All caption tracks YouTube lists for one video
#[derive(Debug, Clone)]
pub struct TranscriptList {
    video_id: String,
    manually_created: Vec<Transcript>,
    generated: Vec<Transcript>,
    translation_languages: Vec<TranslationLanguage>,
    video_title: String,
}

impl TranscriptList {
    /// Build the catalog from the extracted captions metadata.
    ///
    /// Tracks with `kind == "asr"` land in the generated partition,
    /// everything else in the manually created one. A duplicate language
    /// code within a partition replaces the earlier entry in place, so
    /// platform order defines precedence. Metadata that does not
    /// deserialize at all surfaces as [`TranscriptError::RequestFailed`].
    pub(crate) fn build(
        transport: Arc<dyn Transport>,
        video_id: &str,
        captions_json: &Value,
        video_title: String,
    ) -> Result<TranscriptList, TranscriptError> {
        let captions: CaptionsJson = serde_json::from_value(captions_json.clone()).map_err(|e| {
            TranscriptError::RequestFailed {
                video_id: video_id.to_string(),
                reason: format!("unrecognized caption metadata: {}", e),
            }
        })?;

        let translation_languages: Vec<TranslationLanguage> = captions
            .translation_languages
            .iter()
            .map(|t| TranslationLanguage {
                language: t.language_name.text(),
                language_code: t.language_code.clone(),
            })
            .collect();

        let mut manually_created: Vec<Transcript> = Vec::new();
        let mut generated: Vec<Transcript> = Vec::new();

        for track in &captions.caption_tracks {
            let is_generated = track.kind.as_deref() == Some(ASR_CAPTION_KIND);
            // Translation targets are offered for authored tracks only;
            // ASR tracks are not translatable
            let track_translations = if is_generated {
                Vec::new()
            } else {
                translation_languages.clone()
            };
            let transcript = Transcript::new(
                transport.clone(),
                video_id.to_string(),
                track.base_url.clone(),
                track.name.text(),
                track.language_code.clone(),
                is_generated,
                track_translations,
            );

            if is_generated {
                upsert(&mut generated, transcript);
            } else {
                upsert(&mut manually_created, transcript);
            }
        }

        debug!(
            "Built transcript list for video {}: {} manually created, {} generated, {} translation languages",
            video_id,
            manually_created.len(),
            generated.len(),
            translation_languages.len()
        );

        Ok(TranscriptList {
            video_id: video_id.to_string(),
            manually_created,
            generated,
            translation_languages,
            video_title,
        })
    }

    /// Iterate all tracks, manually created first, then generated, each in
    /// platform-returned order
    pub fn iter(&self) -> impl Iterator<Item = &Transcript> {
        self.manually_created.iter().chain(self.generated.iter())
    }

    /// Language codes of all tracks, in iteration order; a code present in
    /// both partitions appears twice
    pub fn available_language_codes(&self) -> Vec<String> {
        self.iter().map(|t| t.language_code().to_string()).collect()
    }

    /// Find a track by caller preference, searching manually created
    /// tracks before generated ones for each requested code
    pub fn find_transcript(
        &self,
        language_codes: &[&str],
    ) -> Result<&Transcript, TranscriptError> {
        self.find_in(language_codes, &[&self.manually_created, &self.generated])
    }

    /// Find a track by caller preference among the generated tracks only
    pub fn find_generated_transcript(
        &self,
        language_codes: &[&str],
    ) -> Result<&Transcript, TranscriptError> {
        self.find_in(language_codes, &[&self.generated])
    }

    /// Find a track by caller preference among the manually created
    /// tracks only
    pub fn find_manually_created_transcript(
        &self,
        language_codes: &[&str],
    ) -> Result<&Transcript, TranscriptError> {
        self.find_in(language_codes, &[&self.manually_created])
    }

    // Caller preference order dominates: a later-ranked partition hit for
    // an earlier-ranked code wins over the reverse
    fn find_in<'a>(
        &'a self,
        language_codes: &[&str],
        partitions: &[&'a Vec<Transcript>],
    ) -> Result<&'a Transcript, TranscriptError> {
        for language_code in language_codes {
            for partition in partitions {
                if let Some(transcript) = partition
                    .iter()
                    .find(|t| t.language_code() == *language_code)
                {
                    return Ok(transcript);
                }
            }
        }

        Err(TranscriptError::NoTranscriptFound {
            video_id: self.video_id.clone(),
            requested: language_codes.iter().map(|c| c.to_string()).collect(),
        })
    }

    /// Id of the video the catalog was built for
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Best-effort video title, empty if the page did not expose one
    pub fn video_title(&self) -> &str {
        &self.video_title
    }

    /// Translation targets the platform offers for this video
    pub fn translation_languages(&self) -> &[TranslationLanguage] {
        &self.translation_languages
    }
}

impl<'a> IntoIterator for &'a TranscriptList {
    type Item = &'a Transcript;
    type IntoIter = std::iter::Chain<slice::Iter<'a, Transcript>, slice::Iter<'a, Transcript>>;

    fn into_iter(self) -> Self::IntoIter {
        self.manually_created.iter().chain(self.generated.iter())
    }
}

impl fmt::Display for TranscriptList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "For this video ({}) transcripts are available in the following languages:\n\n\
             (MANUALLY CREATED)\n{}\n\n\
             (GENERATED)\n{}\n\n\
             (TRANSLATION LANGUAGES)\n{}",
            self.video_id,
            language_description(self.manually_created.iter().map(|t| t.to_string())),
            language_description(self.generated.iter().map(|t| t.to_string())),
            language_description(
                self.translation_languages
                    .iter()
                    .map(|t| format!("{} (\"{}\")", t.language_code, t.language))
            ),
        )
    }
}

fn language_description(lines: impl Iterator<Item = String>) -> String {
    let description = lines
        .map(|line| format!(" - {}", line))
        .collect::<Vec<_>>()
        .join("\n");

    if description.is_empty() {
        "None".to_string()
    } else {
        description
    }
}

// Replace an existing entry for the same language code in place, keeping
// its position, otherwise append
fn upsert(partition: &mut Vec<Transcript>, transcript: Transcript) {
    match partition
        .iter_mut()
        .find(|t| t.language_code() == transcript.language_code())
    {
        Some(existing) => *existing = transcript,
        None => partition.push(transcript),
    }
}
