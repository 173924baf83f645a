use anyhow::Result;
use serde_json::json;

use crate::metadata::VideoMetadata;
use crate::parsers::CaptionEntry;

/// Render one entry as `[MM:SS] text`. Minutes are deliberately uncapped:
/// a start beyond an hour renders as `[62:05]`, never an hour component.
pub fn format_entry(entry: &CaptionEntry) -> String {
    let total = entry.start as u64;
    let minutes = total / 60;
    let seconds = total % 60;
    format!("[{:02}:{:02}] {}", minutes, seconds, entry.text.trim())
}

/// Join all entries into the single-line transcript form
pub fn format_transcript(entries: &[CaptionEntry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join(" ")
}

/// One entry per line, for the file-writing mode
pub fn format_lines(entries: &[CaptionEntry]) -> String {
    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

/// JSON object output for --json
pub fn format_as_json(metadata: &VideoMetadata, transcript: &str) -> Result<String> {
    let value = json!({
        "title": metadata.title,
        "channel": metadata.channel,
        "transcript": transcript,
    });
    Ok(serde_json::to_string(&value)?)
}

/// Write the transcript to `transcript_<id>_<YYYYMMDD_HHMMSS>.txt` and
/// return the filename
pub fn save_to_file(entries: &[CaptionEntry], video_id: &str) -> Result<String> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let filename = format!("transcript_{}_{}.txt", video_id, timestamp);
    fs_err::write(&filename, format_lines(entries))?;
    Ok(filename)
}

/// Print the human-friendly default output. Title and channel go on their
/// own lines so the first transcript token stays first when piping.
pub fn print_to_console(metadata: &VideoMetadata, transcript: &str) {
    if !metadata.title.is_empty() {
        println!("Title: {}", metadata.title);
    }
    if !metadata.channel.is_empty() {
        println!("Channel: {}", metadata.channel);
    }
    println!("{}", transcript);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(start: f64, text: &str) -> CaptionEntry {
        CaptionEntry {
            start,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(format_entry(&entry(65.0, "hello")), "[01:05] hello");
        assert_eq!(format_entry(&entry(5.2, "world")), "[00:05] world");
    }

    #[test]
    fn test_format_entry_trims_text() {
        assert_eq!(format_entry(&entry(0.0, "  padded  ")), "[00:00] padded");
    }

    #[test]
    fn test_minutes_not_capped_at_59() {
        assert_eq!(format_entry(&entry(3725.0, "late")), "[62:05] late");
    }

    #[test]
    fn test_format_transcript_joins_with_spaces() {
        let entries = vec![entry(65.0, "hello"), entry(5.2, "world")];
        assert_eq!(format_transcript(&entries), "[01:05] hello [00:05] world");
    }

    #[test]
    fn test_format_lines() {
        let entries = vec![entry(0.0, "a"), entry(60.0, "b")];
        assert_eq!(format_lines(&entries), "[00:00] a\n[01:00] b");
    }

    #[test]
    fn test_format_as_json() {
        let metadata = VideoMetadata {
            title: "T".to_string(),
            channel: "C".to_string(),
        };
        let json = format_as_json(&metadata, "[00:00] hi").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["title"], "T");
        assert_eq!(value["channel"], "C");
        assert_eq!(value["transcript"], "[00:00] hi");
    }
}
