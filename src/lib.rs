//! yt-transcript - A Rust CLI tool for fetching YouTube video transcripts
//!
//! This library extracts a timed transcript for a YouTube video by trying an
//! ordered chain of caption sources (timedtext endpoint, yt-dlp, watch-page
//! player response) and formatting the result with `[MM:SS]` prefixes.

pub mod cli;
pub mod config;
pub mod metadata;
pub mod output;
pub mod parsers;
pub mod pipeline;
pub mod strategies;
pub mod video_id;

pub use cli::Cli;
pub use config::Config;
pub use metadata::VideoMetadata;
pub use parsers::{CaptionEntry, CaptionFormat};
pub use pipeline::TranscriptPipeline;
pub use strategies::{CaptionResolver, CaptionStrategy, TranscriptRequest};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to transcript fetching
#[derive(thiserror::Error, Debug)]
pub enum TranscriptError {
    #[error("Cannot find YouTube video ID in URL: {0}")]
    InvalidUrl(String),

    #[error("Couldn't fetch captions from any source.")]
    NoCaptionsAvailable,

    #[error("Captions are disabled for this video")]
    CaptionsDisabled,

    #[error("Caption parsing failed: {0}")]
    ParseFailed(String),
}
