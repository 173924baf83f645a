use async_trait::async_trait;
use serde_json::Value;
use std::process::Stdio;
use tokio::process::Command;

use super::{CaptionStrategy, TranscriptRequest};
use crate::parsers::{parse_captions, CaptionEntry, CaptionFormat};
use crate::Result;

/// Caption lookup through yt-dlp's video info extraction
pub struct YtDlpStrategy {
    client: reqwest::Client,
    yt_dlp_path: String,
}

impl YtDlpStrategy {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            yt_dlp_path: "yt-dlp".to_string(),
        }
    }

    /// Get video information using yt-dlp
    pub async fn get_video_info(&self, url: &str) -> Result<Value> {
        tracing::debug!("Extracting video info for: {}", url);

        let output = Command::new(&self.yt_dlp_path)
            .args(["--dump-json", "--no-playlist", url])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("yt-dlp failed: {}", error);
        }

        let json_str = String::from_utf8(output.stdout)?;
        let info: Value = serde_json::from_str(&json_str)?;

        Ok(info)
    }

    /// Pick the first fetchable track matching the preferred language.
    /// Manually authored subtitles win over auto captions.
    fn select_track<'a>(info: &'a Value, lang: &str) -> Option<(&'a str, CaptionFormat)> {
        for source in ["subtitles", "automatic_captions"] {
            let tracks = match info.get(source).and_then(Value::as_object) {
                Some(map) if !map.is_empty() => map,
                _ => continue,
            };
            for (code, track_list) in tracks {
                if !code.starts_with(lang) {
                    continue;
                }
                let track_list = match track_list.as_array() {
                    Some(list) => list,
                    None => continue,
                };
                for track in track_list {
                    let format = track
                        .get("ext")
                        .and_then(Value::as_str)
                        .and_then(CaptionFormat::from_ext);
                    let url = track.get("url").and_then(Value::as_str);
                    if let (Some(format), Some(url)) = (format, url) {
                        return Some((url, format));
                    }
                }
            }
        }
        None
    }

    async fn fetch_track(&self, url: &str, format: CaptionFormat) -> Result<Vec<CaptionEntry>> {
        tracing::debug!(format = format.as_str(), "fetching caption track");
        let raw = self.client.get(url).send().await?.text().await?;
        Ok(parse_captions(&raw, format)?)
    }
}

#[async_trait]
impl CaptionStrategy for YtDlpStrategy {
    async fn fetch_captions(&self, request: &TranscriptRequest) -> Result<Vec<CaptionEntry>> {
        // Reuse the info from the up-front metadata lookup when present
        let fetched;
        let info = match &request.video_info {
            Some(info) => info,
            None => {
                fetched = self.get_video_info(&request.url).await?;
                &fetched
            }
        };

        let lang = request.primary_language();
        let (track_url, format) = Self::select_track(info, lang)
            .ok_or_else(|| anyhow::anyhow!("yt-dlp found no captions for language {lang}"))?;

        self.fetch_track(track_url, format).await
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_select_track_prefers_subtitles_over_auto() {
        let info = json!({
            "subtitles": {
                "en": [{"ext": "vtt", "url": "https://example.com/manual.vtt"}]
            },
            "automatic_captions": {
                "en": [{"ext": "vtt", "url": "https://example.com/auto.vtt"}]
            }
        });
        let (url, format) = YtDlpStrategy::select_track(&info, "en").unwrap();
        assert_eq!(url, "https://example.com/manual.vtt");
        assert_eq!(format, CaptionFormat::Vtt);
    }

    #[test]
    fn test_select_track_matches_language_prefix() {
        let info = json!({
            "subtitles": {},
            "automatic_captions": {
                "en-orig": [{"ext": "srv3", "url": "https://example.com/auto.srv3"}]
            }
        });
        let (url, format) = YtDlpStrategy::select_track(&info, "en").unwrap();
        assert_eq!(url, "https://example.com/auto.srv3");
        assert_eq!(format, CaptionFormat::Srv3);
    }

    #[test]
    fn test_select_track_skips_unsupported_formats() {
        let info = json!({
            "subtitles": {
                "en": [
                    {"ext": "json3", "url": "https://example.com/a.json3"},
                    {"ext": "srv1", "url": "https://example.com/a.srv1"}
                ]
            }
        });
        let (url, format) = YtDlpStrategy::select_track(&info, "en").unwrap();
        assert_eq!(url, "https://example.com/a.srv1");
        assert_eq!(format, CaptionFormat::Srv1);
    }

    #[test]
    fn test_select_track_none_for_missing_language() {
        let info = json!({
            "subtitles": {
                "fr": [{"ext": "vtt", "url": "https://example.com/fr.vtt"}]
            }
        });
        assert!(YtDlpStrategy::select_track(&info, "en").is_none());
    }
}
