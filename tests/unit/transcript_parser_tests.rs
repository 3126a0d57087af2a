/*!
 * Tests for caption XML parsing
 */

use ytscribe::transcript_parser::{FORMATTING_TAGS, parse};

/// Test parsing a well-formed track body without formatting preservation
#[test]
fn test_parse_withValidXml_shouldReturnSegmentsInOrder() {
    let xml = r#"<transcript>
    <text start="0.0" dur="1.5">Hello, world!</text>
    <text start="1.5" dur="2.0">Welcome to testing.</text>
</transcript>"#;

    let segments = parse(xml, false);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "Hello, world!");
    assert_eq!(segments[0].start, 0.0);
    assert_eq!(segments[0].duration, 1.5);
    assert_eq!(segments[1].text, "Welcome to testing.");
    assert_eq!(segments[1].start, 1.5);
    assert_eq!(segments[1].duration, 2.0);
}

/// Test that formatting preservation keeps the allow-listed tags
#[test]
fn test_parse_withPreserveFormatting_shouldKeepAllowListedTags() {
    let xml = r#"<transcript>
    <text start="0.0" dur="1.5">Hello, <b>world</b>!</text>
    <text start="1.5" dur="2.0">Welcome to <i>testing</i>.</text>
</transcript>"#;

    let segments = parse(xml, true);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "Hello, <b>world</b>!");
    assert_eq!(segments[1].text, "Welcome to <i>testing</i>.");
}

/// Test that all markup disappears without formatting preservation
#[test]
fn test_parse_withoutPreserveFormatting_shouldStripEveryTag() {
    let xml = r#"<transcript><text start="0.0" dur="1.0"><font color="red">Hey</font> <b>you</b> <unknown attr="1"/>there</text></transcript>"#;

    let segments = parse(xml, false);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, "Hey you there");
    assert!(!segments[0].text.contains('<'));
}

/// Test that unknown tags are stripped even when preserving formatting
#[test]
fn test_parse_withPreserveFormatting_shouldStripUnknownTags() {
    let xml = r##"<transcript><text start="0.0" dur="1.0"><font color="#fff">styled</font> <br/> <b>bold</b> <c.colorE5E5E5>timed</c.colorE5E5E5></text></transcript>"##;

    let segments = parse(xml, true);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, "styled  <b>bold</b> timed");
}

/// Test that the allow-list matches case-insensitively
#[test]
fn test_parse_withUppercaseFormattingTags_shouldKeepThem() {
    let xml = r#"<transcript><text start="0.0" dur="1.0"><B>loud</B> and <EM>emphatic</EM> but not <FONT>this</FONT></text></transcript>"#;

    let segments = parse(xml, true);

    assert_eq!(segments[0].text, "<B>loud</B> and <EM>emphatic</EM> but not this");
}

/// Test every tag in the allow-list survives preservation
#[test]
fn test_parse_withEveryAllowListedTag_shouldPreserveEach() {
    for tag in FORMATTING_TAGS {
        let xml = format!(
            r#"<transcript><text start="0.0" dur="1.0"><{tag}>x</{tag}></text></transcript>"#
        );

        let segments = parse(&xml, true);

        assert_eq!(segments[0].text, format!("<{tag}>x</{tag}>"), "tag {tag} was not preserved");
    }
}

/// Test empty and whitespace-only input
#[test]
fn test_parse_withEmptyInput_shouldReturnNoSegments() {
    assert!(parse("", false).is_empty());
    assert!(parse("   \n\t  ", false).is_empty());
    assert!(parse("", true).is_empty());
}

/// Test that a malformed document degrades to an empty sequence
#[test]
fn test_parse_withMalformedXml_shouldReturnNoSegments() {
    assert!(parse("<transcript><text start=\"1.0\"", false).is_empty());
    assert!(parse("not xml at all", false).is_empty());
    assert!(parse("<transcript></transcript>", false).is_empty());
}

/// Test attribute defaults when start/dur are missing
#[test]
fn test_parse_withMissingAttributes_shouldDefaultToZero() {
    let xml = "<transcript><text>no timing</text></transcript>";

    let segments = parse(xml, false);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].text, "no timing");
    assert_eq!(segments[0].start, 0.0);
    assert_eq!(segments[0].duration, 0.0);
}

/// Test that non-numeric attribute values do not crash the parser
#[test]
fn test_parse_withNonNumericAttributes_shouldDefaultToZero() {
    let xml = r#"<transcript><text start="abc" dur="--">garbled timing</text></transcript>"#;

    let segments = parse(xml, false);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].start, 0.0);
    assert_eq!(segments[0].duration, 0.0);
}

/// Test HTML entity decoding of segment text
#[test]
fn test_parse_withHtmlEntities_shouldDecodeThem() {
    let xml = r#"<transcript><text start="0.0" dur="1.0">Tom &amp; Jerry&#39;s &quot;show&quot;</text></transcript>"#;

    let segments = parse(xml, false);

    assert_eq!(segments[0].text, "Tom & Jerry's \"show\"");
}

/// Test that entity-encoded markup is decoded first and then filtered
#[test]
fn test_parse_withEncodedMarkup_shouldFilterAfterDecoding() {
    let xml = r#"<transcript><text start="0.0" dur="1.0">&lt;font&gt;hidden&lt;/font&gt; text</text></transcript>"#;

    let segments = parse(xml, false);

    assert_eq!(segments[0].text, "hidden text");
}

/// Test that a self-closing text node counts as an empty segment
#[test]
fn test_parse_withSelfClosingTextNode_shouldYieldEmptySegment() {
    let xml = r#"<transcript><text start="3.2" dur="0.8"/><text start="4.0" dur="1.0">after</text></transcript>"#;

    let segments = parse(xml, false);

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].text, "");
    assert_eq!(segments[0].start, 3.2);
    assert_eq!(segments[1].text, "after");
}

/// Test segment count and order over a longer document
#[test]
fn test_parse_withManySegments_shouldPreserveDocumentOrder() {
    let mut xml = String::from("<transcript>");
    for i in 0..25 {
        xml.push_str(&format!(r#"<text start="{}.0" dur="1.0">line {}</text>"#, i, i));
    }
    xml.push_str("</transcript>");

    let segments = parse(&xml, false);

    assert_eq!(segments.len(), 25);
    for (i, segment) in segments.iter().enumerate() {
        assert_eq!(segment.text, format!("line {}", i));
        assert_eq!(segment.start, i as f64);
    }
}
