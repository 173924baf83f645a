use async_trait::async_trait;

use super::{CaptionStrategy, TranscriptRequest};
use crate::parsers::{parse_captions, CaptionEntry, CaptionFormat};
use crate::Result;

/// Manual-track scrape against the timedtext endpoint
pub struct TimedtextStrategy {
    client: reqwest::Client,
}

impl TimedtextStrategy {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn endpoint_url(video_id: &str, lang: &str) -> String {
        format!(
            "https://video.google.com/timedtext?lang={}&v={}",
            urlencoding::encode(lang),
            urlencoding::encode(video_id)
        )
    }
}

#[async_trait]
impl CaptionStrategy for TimedtextStrategy {
    async fn fetch_captions(&self, request: &TranscriptRequest) -> Result<Vec<CaptionEntry>> {
        let lang = request.primary_language();
        let url = Self::endpoint_url(&request.video_id, lang);
        tracing::debug!(%url, "fetching manual caption track");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            anyhow::bail!("timedtext returned HTTP {}", response.status());
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            anyhow::bail!("no manual captions for language {lang}");
        }

        let entries = parse_captions(&body, CaptionFormat::Srv1)?;
        if entries.is_empty() {
            anyhow::bail!("empty manual track for language {lang}");
        }
        Ok(entries)
    }

    fn name(&self) -> &'static str {
        "timedtext"
    }
}
