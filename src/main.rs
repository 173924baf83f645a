use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yt_transcript::{output, Cli, Config, TranscriptPipeline};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "yt_transcript=debug"
    } else {
        "yt_transcript=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;
    let pipeline = TranscriptPipeline::new(config)?;

    let result = pipeline.fetch(&cli.url, cli.languages.clone()).await?;
    let transcript = output::format_transcript(&result.entries);

    if cli.save {
        let filename = output::save_to_file(&result.entries, &result.video_id)?;
        println!("{}", filename);
    } else if cli.json {
        println!("{}", output::format_as_json(&result.metadata, &transcript)?);
    } else {
        output::print_to_console(&result.metadata, &transcript);
    }

    Ok(())
}
