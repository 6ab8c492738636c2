use std::path::Path;

use eyre::{Result, WrapErr};
use log::debug;

use crate::{CaptionSegment, Transcript};

/// Transcript shipped with the binary, used when no transcript path is configured
const BUNDLED_TRANSCRIPT: &str = include_str!("../assets/ja-8iAQ1h30n5I.json");

/// Return the text of the first segment covering `time`, if any.
///
/// Linear scan, no index. An unknown time never matches.
pub fn locate(time: Option<f64>, segments: &[CaptionSegment]) -> Option<&str> {
    let time = time?;
    segments.iter().find(|s| s.contains(time)).map(|s| s.text.as_str())
}

/// Ordering problem found in a transcript asset
#[derive(Debug, Clone, PartialEq)]
pub enum TranscriptIssue {
    /// Segment does not end after it starts
    EmptyInterval { index: usize },
    /// Segment starts before the previous one ends
    Overlap { index: usize },
}

impl std::fmt::Display for TranscriptIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranscriptIssue::EmptyInterval { index } => write!(f, "segment {index}: endSec is not after startSec"),
            TranscriptIssue::Overlap { index } => {
                write!(f, "segment {index}: starts before segment {} ends", index - 1)
            }
        }
    }
}

impl Transcript {
    pub fn new(segments: Vec<CaptionSegment>) -> Self {
        Self { segments }
    }

    /// Parse a transcript from JSON of the form `{"segments": [{startSec, endSec, text}]}`
    pub fn from_json(json: &str) -> Result<Self> {
        let transcript: Transcript = serde_json::from_str(json)?;
        debug!("Parsed transcript with {} segments", transcript.segments.len());
        Ok(transcript)
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading transcript from {}", path.display());
        let content =
            std::fs::read_to_string(path).wrap_err_with(|| format!("reading transcript {}", path.display()))?;
        Self::from_json(&content).wrap_err_with(|| format!("parsing transcript {}", path.display()))
    }

    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_TRANSCRIPT).wrap_err("parsing bundled transcript")
    }

    pub fn caption_at(&self, time: Option<f64>) -> Option<&str> {
        locate(time, &self.segments)
    }

    /// End of the last segment, or zero for an empty transcript
    pub fn end_sec(&self) -> f64 {
        self.segments.iter().map(|s| s.end_sec).fold(0.0, f64::max)
    }

    /// Report segments that break the sorted, non-overlapping layout.
    ///
    /// Nothing is repaired; `locate` still answers with the first match.
    pub fn check(&self) -> Vec<TranscriptIssue> {
        let mut issues = Vec::new();
        for (index, seg) in self.segments.iter().enumerate() {
            if seg.end_sec <= seg.start_sec {
                issues.push(TranscriptIssue::EmptyInterval { index });
            }
            if index > 0 && seg.start_sec < self.segments[index - 1].end_sec {
                issues.push(TranscriptIssue::Overlap { index });
            }
        }
        issues
    }
}
