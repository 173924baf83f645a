use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::strategies::ytdlp::YtDlpStrategy;

/// Best-effort video metadata; empty strings when the lookup fails
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    pub title: String,
    pub channel: String,
}

impl VideoMetadata {
    /// Read title and channel out of a yt-dlp info value. Prefers the
    /// `channel` field, falling back to `uploader`.
    pub fn from_video_info(info: &Value) -> Self {
        let title = info
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let channel = info
            .get("channel")
            .or_else(|| info.get("uploader"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self { title, channel }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.channel.is_empty()
    }
}

/// Fetch video info once up front. Failure degrades to empty metadata and
/// never interrupts caption resolution; the info value is kept so the
/// yt-dlp strategy can reuse it.
pub async fn lookup(strategy: &YtDlpStrategy, url: &str) -> (VideoMetadata, Option<Value>) {
    match strategy.get_video_info(url).await {
        Ok(info) => {
            let metadata = VideoMetadata::from_video_info(&info);
            (metadata, Some(info))
        }
        Err(e) => {
            tracing::debug!(error = %e, "metadata lookup failed");
            (VideoMetadata::default(), None)
        }
    }
}
