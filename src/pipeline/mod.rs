use anyhow::{Context, Result};

use crate::config::Config;
use crate::metadata::{self, VideoMetadata};
use crate::parsers::CaptionEntry;
use crate::strategies::ytdlp::YtDlpStrategy;
use crate::strategies::{CaptionResolver, TranscriptRequest};
use crate::{video_id, TranscriptError};

/// One transcript run: metadata, resolved captions, and the request context
#[derive(Debug)]
pub struct TranscriptResult {
    pub video_id: String,
    pub metadata: VideoMetadata,
    pub entries: Vec<CaptionEntry>,
}

/// Orchestrates a single URL-to-transcript run
pub struct TranscriptPipeline {
    config: Config,
    client: reqwest::Client,
    resolver: CaptionResolver,
}

impl TranscriptPipeline {
    pub fn new(config: Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .build()
            .context("Failed to build HTTP client")?;

        let resolver = CaptionResolver::new(client.clone(), config.http.user_agent.clone());

        Ok(Self {
            config,
            client,
            resolver,
        })
    }

    /// Fetch the transcript for a video URL.
    ///
    /// The video ID is extracted first since no strategy can run without it.
    /// Metadata is looked up once up front, best-effort, and its info value
    /// is threaded into the request for the yt-dlp strategy to reuse.
    pub async fn fetch(&self, url: &str, languages: Option<Vec<String>>) -> Result<TranscriptResult> {
        let video_id = video_id::extract(url)?;
        tracing::info!(%video_id, "resolving transcript");

        let info_strategy = YtDlpStrategy::new(self.client.clone());
        let (metadata, video_info) = metadata::lookup(&info_strategy, url).await;
        if metadata.is_empty() {
            tracing::debug!("continuing without video metadata");
        }

        let request = TranscriptRequest {
            url: url.to_string(),
            video_id: video_id.clone(),
            languages: languages.unwrap_or_else(|| self.config.languages.clone()),
            video_info,
        };

        let entries = self.resolver.resolve(&request).await?;

        Ok(TranscriptResult {
            video_id,
            metadata,
            entries,
        })
    }

    /// Convenience check used before any network work
    pub fn validate_url(url: &str) -> std::result::Result<String, TranscriptError> {
        video_id::extract(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert_eq!(
            TranscriptPipeline::validate_url("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            "dQw4w9WgXcQ"
        );
        assert!(TranscriptPipeline::validate_url("https://example.com").is_err());
    }
}
