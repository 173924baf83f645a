use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::TranscriptError;

/// One timed caption line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Start time in seconds
    pub start: f64,

    /// Caption text, internal newlines collapsed to spaces
    pub text: String,
}

/// Caption document formats served by the various sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptionFormat {
    /// WebVTT cue blocks
    Vtt,
    /// Flat XML with `start`-attributed text elements (also the timedtext endpoint)
    Srv1,
    /// XML variant with millisecond `t` attributes
    Srv3,
}

impl CaptionFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptionFormat::Vtt => "vtt",
            CaptionFormat::Srv1 => "srv1",
            CaptionFormat::Srv3 => "srv3",
        }
    }

    pub fn from_ext(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "vtt" => Some(CaptionFormat::Vtt),
            "srv1" => Some(CaptionFormat::Srv1),
            "srv3" => Some(CaptionFormat::Srv3),
            _ => None,
        }
    }
}

/// Parse a raw caption document into entries, dispatching on the format tag
pub fn parse_captions(raw: &str, format: CaptionFormat) -> Result<Vec<CaptionEntry>, TranscriptError> {
    match format {
        CaptionFormat::Vtt => parse_vtt(raw),
        CaptionFormat::Srv1 => parse_plain_xml(raw),
        CaptionFormat::Srv3 => parse_timed_xml(raw),
    }
}

fn text_element_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<text([^>]*)>(.*?)</text>").unwrap())
}

fn attr_value(attrs: &str, name: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"([\w:-]+)="([^"]*)""#).unwrap());
    re.captures_iter(attrs)
        .find(|caps| &caps[1] == name)
        .map(|caps| caps[2].to_string())
}

fn decode_body(body: &str) -> String {
    html_escape::decode_html_entities(body).replace('\n', " ")
}

/// Plain-cue XML: repeated text elements whose `start` attribute is seconds
fn parse_plain_xml(raw: &str) -> Result<Vec<CaptionEntry>, TranscriptError> {
    let mut entries = Vec::new();
    for caps in text_element_re().captures_iter(raw) {
        let attrs = &caps[1];
        let start_attr = attr_value(attrs, "start")
            .ok_or_else(|| TranscriptError::ParseFailed("text element missing start attribute".into()))?;
        let start: f64 = start_attr
            .parse()
            .map_err(|_| TranscriptError::ParseFailed(format!("bad start value: {start_attr}")))?;
        entries.push(CaptionEntry {
            start,
            text: decode_body(&caps[2]),
        });
    }
    Ok(entries)
}

/// Timed XML variant: text elements carrying either a millisecond `t`
/// attribute or a seconds `start` attribute
fn parse_timed_xml(raw: &str) -> Result<Vec<CaptionEntry>, TranscriptError> {
    let mut entries = Vec::new();
    for caps in text_element_re().captures_iter(raw) {
        let attrs = &caps[1];
        let start = if let Some(t) = attr_value(attrs, "t") {
            let millis: f64 = t
                .parse()
                .map_err(|_| TranscriptError::ParseFailed(format!("bad t value: {t}")))?;
            millis / 1000.0
        } else if let Some(s) = attr_value(attrs, "start") {
            s.parse()
                .map_err(|_| TranscriptError::ParseFailed(format!("bad start value: {s}")))?
        } else {
            return Err(TranscriptError::ParseFailed(
                "text element missing t/start attribute".into(),
            ));
        };
        entries.push(CaptionEntry {
            start,
            text: decode_body(&caps[2]),
        });
    }
    Ok(entries)
}

/// WebVTT cue blocks: blank-line separated, each timed block's first line is
/// an `HH:MM:SS.mmm --> ...` range
fn parse_vtt(raw: &str) -> Result<Vec<CaptionEntry>, TranscriptError> {
    static STRIP_RE: OnceLock<Regex> = OnceLock::new();
    let strip_re = STRIP_RE.get_or_init(|| Regex::new(r"[^0-9:.]").unwrap());

    let normalized = raw.replace("\r\n", "\n");
    let mut entries = Vec::new();
    for block in normalized.split("\n\n") {
        if !block.contains("-->") {
            continue;
        }
        let mut lines = block.trim().lines();
        let timestr = lines.next().unwrap_or_default();
        // Only the start side of the range is the cue time; stripping the
        // whole line would glue both timestamps together.
        let start_str = timestr.split("-->").next().unwrap_or_default();
        let cleaned = strip_re.replace_all(start_str, "");
        let parts: Vec<&str> = cleaned.split(':').collect();
        if parts.len() != 3 {
            return Err(TranscriptError::ParseFailed(format!(
                "bad cue timestamp: {timestr}"
            )));
        }
        let mut hms = [0.0f64; 3];
        for (slot, part) in hms.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| TranscriptError::ParseFailed(format!("bad cue timestamp: {timestr}")))?;
        }
        let start = hms[0] * 3600.0 + hms[1] * 60.0 + hms[2];
        let text = lines.collect::<Vec<_>>().join(" ");
        entries.push(CaptionEntry { start, text });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_ext() {
        assert_eq!(CaptionFormat::from_ext("vtt"), Some(CaptionFormat::Vtt));
        assert_eq!(CaptionFormat::from_ext("SRV3"), Some(CaptionFormat::Srv3));
        assert_eq!(CaptionFormat::from_ext("srt"), None);
    }

    #[test]
    fn test_plain_xml() {
        let xml = r#"<?xml version="1.0"?><transcript>
<text start="0.5" dur="2.1">hello &amp; welcome</text>
<text start="3.2" dur="1.0">second
line</text>
</transcript>"#;
        let entries = parse_captions(xml, CaptionFormat::Srv1).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start, 0.5);
        assert_eq!(entries[0].text, "hello & welcome");
        assert_eq!(entries[1].text, "second line");
    }

    #[test]
    fn test_plain_xml_missing_start_fails() {
        let xml = r#"<transcript><text dur="2.1">hi</text></transcript>"#;
        assert!(parse_captions(xml, CaptionFormat::Srv1).is_err());
    }

    #[test]
    fn test_timed_xml_millis() {
        let xml = r#"<timedtext><body><text t="1500" d="2000">cue one</text></body></timedtext>"#;
        let entries = parse_captions(xml, CaptionFormat::Srv3).unwrap();
        assert_eq!(entries[0].start, 1.5);
    }

    #[test]
    fn test_timed_xml_start_fallback() {
        let xml = r#"<timedtext><text start="4.25">cue</text></timedtext>"#;
        let entries = parse_captions(xml, CaptionFormat::Srv3).unwrap();
        assert_eq!(entries[0].start, 4.25);
    }

    #[test]
    fn test_vtt_blocks() {
        let vtt = "WEBVTT\n\n00:00:01.000 --> 00:00:03.000\nfirst cue\n\n00:01:05.500 --> 00:01:07.000\nsecond\ncue\n";
        let entries = parse_captions(vtt, CaptionFormat::Vtt).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].start, 1.0);
        assert_eq!(entries[0].text, "first cue");
        assert_eq!(entries[1].start, 65.5);
        assert_eq!(entries[1].text, "second cue");
    }

    #[test]
    fn test_vtt_range_line_parses_start_only() {
        let vtt = "WEBVTT\n\n00:01:02.500 --> 00:01:04.000 align:start position:0%\ncue text\n";
        let entries = parse_captions(vtt, CaptionFormat::Vtt).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].start, 62.5);
        assert_eq!(entries[0].text, "cue text");
    }

    #[test]
    fn test_vtt_bad_timestamp_fails() {
        let vtt = "00:01.000 --> 00:03.000\ncue without hours\n";
        assert!(parse_captions(vtt, CaptionFormat::Vtt).is_err());
    }

    #[test]
    fn test_vtt_skips_headers() {
        let vtt = "WEBVTT\nKind: captions\n\nNOTE comment\n\n00:00:00.000 --> 00:00:02.000\nhello\n";
        let entries = parse_captions(vtt, CaptionFormat::Vtt).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].text, "hello");
    }
}
