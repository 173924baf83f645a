use async_trait::async_trait;
use serde_json::Value;

use crate::parsers::CaptionEntry;
use crate::{Result, TranscriptError};

pub mod player;
pub mod timedtext;
pub mod ytdlp;

/// Request-scoped context shared by all strategies in one resolution
#[derive(Debug, Clone)]
pub struct TranscriptRequest {
    /// Original video URL as given on the command line
    pub url: String,

    /// Extracted 11-character video ID
    pub video_id: String,

    /// Preferred caption languages, tried in order
    pub languages: Vec<String>,

    /// Video info JSON from the up-front metadata lookup, when it succeeded.
    /// Lets the yt-dlp strategy skip a second extraction.
    pub video_info: Option<Value>,
}

impl TranscriptRequest {
    /// Primary preferred language (the first in the configured order)
    pub fn primary_language(&self) -> &str {
        self.languages.first().map(String::as_str).unwrap_or("en")
    }
}

/// One caption source in the fallback chain
#[async_trait]
pub trait CaptionStrategy: Send + Sync {
    /// Fetch and normalize captions for the request
    async fn fetch_captions(&self, request: &TranscriptRequest) -> Result<Vec<CaptionEntry>>;

    /// Name of this caption source
    fn name(&self) -> &'static str;
}

/// Ordered fallback chain over caption strategies
pub struct CaptionResolver {
    strategies: Vec<Box<dyn CaptionStrategy>>,
}

impl CaptionResolver {
    /// Create a resolver with the default strategy order: timedtext scrape,
    /// yt-dlp extraction, watch-page player response.
    pub fn new(client: reqwest::Client, user_agent: String) -> Self {
        let mut resolver = Self {
            strategies: Vec::new(),
        };

        resolver.register(Box::new(timedtext::TimedtextStrategy::new(client.clone())));
        resolver.register(Box::new(ytdlp::YtDlpStrategy::new(client.clone())));
        resolver.register(Box::new(player::PlayerResponseStrategy::new(
            client, user_agent,
        )));

        resolver
    }

    /// Build a resolver from an explicit strategy list (used in tests)
    pub fn from_strategies(strategies: Vec<Box<dyn CaptionStrategy>>) -> Self {
        Self { strategies }
    }

    /// Register an additional strategy at the end of the chain
    pub fn register(&mut self, strategy: Box<dyn CaptionStrategy>) {
        self.strategies.push(strategy);
    }

    /// Try each strategy in order, returning the first non-empty caption
    /// sequence. Any single strategy failure advances the chain; only
    /// exhaustion of every strategy is an error.
    pub async fn resolve(
        &self,
        request: &TranscriptRequest,
    ) -> std::result::Result<Vec<CaptionEntry>, TranscriptError> {
        for strategy in &self.strategies {
            tracing::debug!(strategy = strategy.name(), "trying caption source");
            match strategy.fetch_captions(request).await {
                Ok(entries) if !entries.is_empty() => {
                    tracing::info!(
                        strategy = strategy.name(),
                        lines = entries.len(),
                        "captions resolved"
                    );
                    return Ok(entries);
                }
                Ok(_) => {
                    tracing::debug!(strategy = strategy.name(), "caption source returned no lines");
                }
                Err(e) => {
                    tracing::debug!(strategy = strategy.name(), error = %e, "caption source failed");
                }
            }
        }
        Err(TranscriptError::NoCaptionsAvailable)
    }
}
