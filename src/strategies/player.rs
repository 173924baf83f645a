use async_trait::async_trait;
use serde_json::Value;

use super::{CaptionStrategy, TranscriptRequest};
use crate::parsers::{parse_captions, CaptionEntry, CaptionFormat};
use crate::{Result, TranscriptError};

/// One fetchable caption track advertised by the player response
#[derive(Debug, Clone)]
struct CaptionTrack {
    base_url: String,
    language_code: String,
}

/// Transcript fallback that scrapes the watch page's player response.
/// Tries each preferred language in order, then makes one unfiltered
/// attempt whose failure is the strategy's failure.
pub struct PlayerResponseStrategy {
    client: reqwest::Client,
    user_agent: String,
}

impl PlayerResponseStrategy {
    pub fn new(client: reqwest::Client, user_agent: String) -> Self {
        Self { client, user_agent }
    }

    async fn fetch_watch_page(&self, video_id: &str) -> Result<String> {
        let url = format!("https://www.youtube.com/watch?v={video_id}");
        let response = self
            .client
            .get(&url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;
        if !response.status().is_success() {
            anyhow::bail!("watch page returned HTTP {}", response.status());
        }
        Ok(response.text().await?)
    }

    /// Slice the ytInitialPlayerResponse JSON object out of the page HTML
    fn extract_player_json(html: &str) -> Option<&str> {
        let start_marker = "ytInitialPlayerResponse = ";
        let end_marker = ";</script>";

        html.find(start_marker).map(|start_idx| {
            let start_pos = start_idx + start_marker.len();
            let sub_str = &html[start_pos..];
            let end_pos = sub_str.find(end_marker).unwrap_or(sub_str.len());
            &sub_str[..end_pos]
        })
    }

    /// List the advertised caption tracks; absence of the tracklist is the
    /// captions-disabled signal.
    fn list_tracks(html: &str) -> std::result::Result<Vec<CaptionTrack>, TranscriptError> {
        let json_str = Self::extract_player_json(html)
            .ok_or_else(|| TranscriptError::ParseFailed("player response not found".into()))?;
        let parsed: Value = serde_json::from_str(json_str)
            .map_err(|e| TranscriptError::ParseFailed(e.to_string()))?;

        let tracks = parsed
            .get("captions")
            .and_then(|c| c.get("playerCaptionsTracklistRenderer"))
            .and_then(|p| p.get("captionTracks"))
            .and_then(Value::as_array)
            .ok_or(TranscriptError::CaptionsDisabled)?;

        Ok(tracks
            .iter()
            .filter_map(|track| {
                let base_url = track.get("baseUrl")?.as_str()?.to_string();
                let language_code = track
                    .get("languageCode")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Some(CaptionTrack {
                    base_url,
                    language_code,
                })
            })
            .collect())
    }

    /// First track matching a preferred language, in declared language order
    fn select_for_languages<'a>(
        tracks: &'a [CaptionTrack],
        languages: &[String],
    ) -> Option<&'a CaptionTrack> {
        for lang in languages {
            match tracks.iter().find(|t| &t.language_code == lang) {
                Some(track) => return Some(track),
                None => tracing::debug!(%lang, "no caption track for language"),
            }
        }
        None
    }

    async fn fetch_track(&self, track: &CaptionTrack) -> Result<Vec<CaptionEntry>> {
        tracing::debug!(lang = %track.language_code, "downloading caption track");
        let raw = self.client.get(&track.base_url).send().await?.text().await?;
        let entries = parse_captions(&raw, CaptionFormat::Srv1)?;
        if entries.is_empty() {
            anyhow::bail!("caption track was empty");
        }
        Ok(entries)
    }
}

#[async_trait]
impl CaptionStrategy for PlayerResponseStrategy {
    async fn fetch_captions(&self, request: &TranscriptRequest) -> Result<Vec<CaptionEntry>> {
        let html = self.fetch_watch_page(&request.video_id).await?;
        // Parse the player response once; disabled captions read the same
        // for every language, so the error propagates directly.
        let tracks = Self::list_tracks(&html)?;

        if let Some(track) = Self::select_for_languages(&tracks, &request.languages) {
            return self.fetch_track(track).await;
        }

        // Final unfiltered attempt: first advertised track, errors propagate
        let track = tracks
            .first()
            .ok_or_else(|| anyhow::anyhow!("no caption tracks available"))?;
        self.fetch_track(track).await
    }

    fn name(&self) -> &'static str {
        "player-response"
    }
}
