use eyre::Result;
use serde::Serialize;

use crate::Transcript;
use crate::VideoId;
use crate::youtube::UrlShape;

/// Result of one URL submission, as printed by the CLI
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extraction {
    pub input: String,
    pub shape: UrlShape,
    pub video_id: Option<VideoId>,
    pub embed_url: Option<String>,
}

impl Extraction {
    pub fn new(input: &str, shape: UrlShape, video_id: Option<VideoId>) -> Self {
        let embed_url = video_id.as_ref().map(VideoId::embed_url);
        Self {
            input: input.to_string(),
            shape,
            video_id,
            embed_url,
        }
    }
}

/// Render transcript as plain text (one segment per line, no timestamps)
pub fn render_text(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render transcript in the same `{"segments": [...]}` shape it is loaded from
pub fn render_json(transcript: &Transcript) -> Result<String> {
    Ok(serde_json::to_string_pretty(transcript)?)
}

pub fn render_srt(transcript: &Transcript) -> String {
    transcript
        .segments
        .iter()
        .enumerate()
        .map(|(i, s)| {
            format!(
                "{}\n{} --> {}\n{}\n",
                i + 1,
                format_timestamp(s.start_sec),
                format_timestamp(s.end_sec),
                s.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format seconds as an SRT timestamp (`HH:MM:SS,mmm`)
pub fn format_timestamp(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_secs = total_ms / 1000;
    let s = total_secs % 60;
    let m = (total_secs / 60) % 60;
    let h = total_secs / 3600;
    format!("{h:02}:{m:02}:{s:02},{ms:03}")
}

pub fn render_extraction_text(extraction: &Extraction) -> String {
    match &extraction.video_id {
        Some(id) => id.to_string(),
        None => crate::session::PROMPT.to_string(),
    }
}

pub fn render_extraction_json(extraction: &Extraction) -> Result<String> {
    Ok(serde_json::to_string(extraction)?)
}
