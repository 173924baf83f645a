use clap::Parser;

#[derive(Parser)]
#[command(
    name = "yt-transcript",
    about = "Fetch a YouTube video transcript with [MM:SS] timestamps",
    version,
    long_about = "Fetches the transcript for a YouTube video URL by trying the \
timedtext endpoint, yt-dlp, and the watch-page player response in order, then \
prints or saves the result with [MM:SS] timestamp prefixes."
)]
pub struct Cli {
    /// YouTube video URL (watch, embed, or youtu.be form)
    #[arg(value_name = "URL")]
    pub url: String,

    /// Output a JSON object {title, channel, transcript}
    #[arg(long, conflicts_with = "save")]
    pub json: bool,

    /// Save the transcript to transcript_<id>_<timestamp>.txt, one line per caption
    #[arg(long, conflicts_with = "json")]
    pub save: bool,

    /// Preferred caption languages, tried in order
    #[arg(short, long, value_name = "LANGS", value_delimiter = ',')]
    pub languages: Option<Vec<String>>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
