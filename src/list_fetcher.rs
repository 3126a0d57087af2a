/*!
 * Watch-page retrieval and caption metadata extraction.
 *
 * YouTube has no documented captions API; the metadata is scraped out of
 * the watch page with delimiter search and regexes. Every wire-level
 * marker the extraction relies on is a named constant below, because the
 * upstream format drifts and each marker is a point of breakage. When the
 * captions delimiter is missing, the page is inspected for secondary
 * signals to tell apart the four conditions that produce the same blank
 * result: a URL passed as a video id, a CAPTCHA challenge, an
 * unavailable video, and disabled transcripts. That classification order
 * is inherited from observed upstream behavior and is not assumed
 * exhaustive.
 */

use std::sync::Arc;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::errors::TranscriptError;
use crate::transcript_list::TranscriptList;
use crate::transport::Transport;

/// Watch page URL prefix; the video id is appended
pub const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// JSON key opening the captions object inside the watch page
pub const CAPTIONS_DELIMITER: &str = "\"captions\":";

/// JSON key following the captions object, used as its end boundary
pub const CAPTIONS_END_DELIMITER: &str = ",\"videoDetails";

/// Top-level node of the captions object holding the track list
pub const CAPTIONS_RENDERER_KEY: &str = "playerCaptionsTracklistRenderer";

/// Field of the renderer listing the caption tracks
pub const CAPTION_TRACKS_KEY: &str = "captionTracks";

/// Form action present on consent-redirect pages
pub const CONSENT_FORM_MARKER: &str = "action=\"https://consent.youtube.com/s\"";

/// Marker of a CAPTCHA challenge page
pub const RECAPTCHA_MARKER: &str = "class=\"g-recaptcha\"";

/// Marker every playable watch page carries
pub const PLAYABILITY_STATUS_MARKER: &str = "\"playabilityStatus\":";

// Hidden form value carried into the consent cookie
static CONSENT_VALUE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name="v" value="([^"]*)""#).unwrap());

static VIDEO_TITLE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<meta name="title" content="([^"]*)""#).unwrap());

/// Fetches the caption track catalog for a video
#[derive(Debug)]
pub struct TranscriptListFetcher {
    transport: Arc<dyn Transport>,
}

impl TranscriptListFetcher {
    /// Create a fetcher on top of the given transport
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        TranscriptListFetcher { transport }
    }

    /// Retrieve the catalog of caption tracks for `video_id`.
    ///
    /// Performs one watch-page fetch, at most one consent-cookie retry,
    /// and no other retries; transient network failures are the
    /// transport's business.
    pub async fn fetch(&self, video_id: &str) -> Result<TranscriptList, TranscriptError> {
        debug!("Fetching transcript list for video {}", video_id);

        let html = self.fetch_video_html(video_id).await?;
        let captions_json = self.extract_captions_json(&html, video_id)?;
        let video_title = extract_video_title(&html);

        TranscriptList::build(self.transport.clone(), video_id, &captions_json, video_title)
    }

    /// Fetch the watch page, negotiating a consent cookie if YouTube
    /// answers with a consent-redirect page
    async fn fetch_video_html(&self, video_id: &str) -> Result<String, TranscriptError> {
        let html = self.fetch_html(video_id, None).await?;
        if !html.contains(CONSENT_FORM_MARKER) {
            return Ok(html);
        }

        debug!("Consent redirect detected for video {}, retrying with consent cookie", video_id);
        let consent_value = CONSENT_VALUE_REGEX
            .captures(&html)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| TranscriptError::FailedToCreateConsentCookie {
                video_id: video_id.to_string(),
            })?
            .as_str()
            .to_string();

        let html = self.fetch_html(video_id, Some(&consent_value)).await?;
        if html.contains(CONSENT_FORM_MARKER) {
            warn!("Consent redirect persisted for video {} after retry", video_id);
            return Err(TranscriptError::FailedToCreateConsentCookie {
                video_id: video_id.to_string(),
            });
        }

        Ok(html)
    }

    async fn fetch_html(
        &self,
        video_id: &str,
        consent_value: Option<&str>,
    ) -> Result<String, TranscriptError> {
        let url = format!("{}{}", WATCH_URL, video_id);
        let cookie;
        let mut headers: Vec<(&str, &str)> = vec![("Accept-Language", "en-US")];

        if let Some(value) = consent_value {
            cookie = format!("CONSENT=YES+{}; Domain=.youtube.com; Path=/; HttpOnly", value);
            headers.push(("Set-Cookie", &cookie));
        }

        let response = self
            .transport
            .send("GET", &url, &headers)
            .await
            .map_err(|e| TranscriptError::RequestFailed {
                video_id: video_id.to_string(),
                reason: e.to_string(),
            })?;

        if response.is_error() {
            return Err(TranscriptError::RequestFailed {
                video_id: video_id.to_string(),
                reason: response.reason_phrase,
            });
        }

        Ok(html_escape::decode_html_entities(&response.body).into_owned())
    }

    /// Cut the captions JSON island out of the page and return its
    /// renderer node
    fn extract_captions_json(&self, html: &str, video_id: &str) -> Result<Value, TranscriptError> {
        let Some(index) = html.find(CAPTIONS_DELIMITER) else {
            return Err(self.classify_missing_captions(html, video_id));
        };

        let after_delimiter = &html[index + CAPTIONS_DELIMITER.len()..];
        let island = after_delimiter
            .split(CAPTIONS_END_DELIMITER)
            .next()
            .unwrap_or(after_delimiter)
            .replace('\n', "");

        let renderer = serde_json::from_str::<Value>(&island)
            .ok()
            .and_then(|mut value| match value.get_mut(CAPTIONS_RENDERER_KEY) {
                Some(renderer) if !renderer.is_null() => Some(renderer.take()),
                _ => None,
            });

        let Some(renderer) = renderer else {
            warn!("Captions object for video {} has no usable renderer", video_id);
            return Err(TranscriptError::TranscriptsDisabled {
                video_id: video_id.to_string(),
            });
        };

        // A null track list means the same as a missing one
        if renderer.get(CAPTION_TRACKS_KEY).map_or(true, |tracks| tracks.is_null()) {
            return Err(TranscriptError::NoTranscriptAvailable {
                video_id: video_id.to_string(),
            });
        }

        Ok(renderer)
    }

    // Ordered diagnosis of a page without the captions delimiter; the
    // order matters because the later signals also appear on the pages the
    // earlier ones describe
    fn classify_missing_captions(&self, html: &str, video_id: &str) -> TranscriptError {
        if video_id.starts_with("http://") || video_id.starts_with("https://") {
            return TranscriptError::InvalidVideoId {
                video_id: video_id.to_string(),
            };
        }
        if html.contains(RECAPTCHA_MARKER) {
            return TranscriptError::TooManyRequests {
                video_id: video_id.to_string(),
            };
        }
        if !html.contains(PLAYABILITY_STATUS_MARKER) {
            return TranscriptError::VideoUnavailable {
                video_id: video_id.to_string(),
            };
        }

        TranscriptError::TranscriptsDisabled {
            video_id: video_id.to_string(),
        }
    }
}

/// Best-effort title extraction; an empty string when the meta tag is
/// missing, never an error
fn extract_video_title(html: &str) -> String {
    VIDEO_TITLE_REGEX
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
