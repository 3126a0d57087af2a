/*!
 * # ytscribe
 *
 * A Rust library for fetching and parsing YouTube caption tracks without
 * an API key, by scraping the caption metadata embedded in the watch
 * page.
 *
 * ## Features
 *
 * - List all caption tracks of a video, manually created and
 *   auto-generated (ASR) ones
 * - Fetch a track as timed text segments, with optional preservation of
 *   inline formatting tags
 * - Derive machine-translated variants of translatable tracks
 * - Transparent consent-cookie negotiation for regions that gate the
 *   watch page behind a consent redirect
 * - A precise error taxonomy instead of a generic scrape failure, so
 *   callers can tell a CAPTCHA challenge from a deleted video from
 *   disabled captions
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `list_fetcher`: watch-page retrieval and caption metadata extraction
 * - `transcript_list`: the catalog of tracks available for one video
 * - `transcript`: a single fetchable, possibly translatable track
 * - `transcript_parser`: caption XML to timed segments
 * - `transport`: the HTTP seam, pluggable for testing and embedding
 * - `errors`: the error taxonomy
 *
 * ## Example
 *
 * ```no_run
 * use ytscribe::fetch_transcript_list;
 *
 * # async fn run() -> Result<(), ytscribe::TranscriptError> {
 * let list = fetch_transcript_list("dQw4w9WgXcQ").await?;
 * let transcript = list.find_transcript(&["en"])?;
 * for segment in transcript.fetch(false).await? {
 *     println!("[{:>8.2}] {}", segment.start, segment.text);
 * }
 * # Ok(())
 * # }
 * ```
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Public modules
pub mod errors;
pub mod list_fetcher;
pub mod transcript;
pub mod transcript_list;
pub mod transcript_parser;
pub mod transport;

use std::sync::Arc;

// Re-export main types for easier usage
pub use errors::TranscriptError;
pub use list_fetcher::TranscriptListFetcher;
pub use transcript::{Transcript, TranslationLanguage};
pub use transcript_list::TranscriptList;
pub use transcript_parser::{FORMATTING_TAGS, Segment, parse};
pub use transport::{HttpTransport, Transport, TransportResponse};

/// Fetch the caption track catalog for a video with the default HTTP
/// transport. Shorthand for wiring up [`TranscriptListFetcher`] by hand.
pub async fn fetch_transcript_list(video_id: &str) -> Result<TranscriptList, TranscriptError> {
    TranscriptListFetcher::new(Arc::new(HttpTransport::new()))
        .fetch(video_id)
        .await
}
