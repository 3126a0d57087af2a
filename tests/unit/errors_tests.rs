/*!
 * Tests for the error taxonomy
 */

use ytscribe::TranscriptError;

/// Test that every variant reports the video id it was raised for
#[test]
fn test_video_id_withEveryVariant_shouldReturnAttachedId() {
    let errors = vec![
        TranscriptError::RequestFailed {
            video_id: "vid".to_string(),
            reason: "Bad Request".to_string(),
        },
        TranscriptError::InvalidVideoId {
            video_id: "vid".to_string(),
        },
        TranscriptError::TooManyRequests {
            video_id: "vid".to_string(),
        },
        TranscriptError::VideoUnavailable {
            video_id: "vid".to_string(),
        },
        TranscriptError::TranscriptsDisabled {
            video_id: "vid".to_string(),
        },
        TranscriptError::NoTranscriptAvailable {
            video_id: "vid".to_string(),
        },
        TranscriptError::FailedToCreateConsentCookie {
            video_id: "vid".to_string(),
        },
        TranscriptError::NoTranscriptFound {
            video_id: "vid".to_string(),
            requested: vec!["en".to_string()],
        },
        TranscriptError::NotTranslatable {
            video_id: "vid".to_string(),
        },
        TranscriptError::TranslationLanguageNotAvailable {
            video_id: "vid".to_string(),
            language_code: "fr".to_string(),
        },
    ];

    for error in errors {
        assert_eq!(error.video_id(), "vid", "wrong video id for {}", error);
    }
}

/// Test a few display messages carry their context
#[test]
fn test_display_withContextFields_shouldIncludeThem() {
    let error = TranscriptError::RequestFailed {
        video_id: "abc123".to_string(),
        reason: "Service Unavailable".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "YouTube request failed for video abc123: Service Unavailable"
    );

    let error = TranscriptError::NoTranscriptFound {
        video_id: "abc123".to_string(),
        requested: vec!["de".to_string(), "pt".to_string()],
    };
    let message = error.to_string();
    assert!(message.contains("abc123"));
    assert!(message.contains("de"));
    assert!(message.contains("pt"));

    let error = TranscriptError::TranslationLanguageNotAvailable {
        video_id: "abc123".to_string(),
        language_code: "fr".to_string(),
    };
    assert!(error.to_string().contains("\"fr\""));
}
