pub mod caption;
pub mod config;
pub mod output;
pub mod playback;
pub mod player;
pub mod session;
pub mod youtube;

use serde::{Deserialize, Serialize};

pub use caption::locate;
pub use youtube::extract_video_id;

/// Opaque token naming a video on YouTube
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    pub fn short_url(&self) -> String {
        format!("https://youtu.be/{}", self.0)
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }
}

impl std::fmt::Display for VideoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single captioned interval, `start_sec` inclusive and `end_sec` exclusive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptionSegment {
    pub start_sec: f64,
    pub end_sec: f64,
    pub text: String,
}

impl CaptionSegment {
    pub fn new(start_sec: f64, end_sec: f64, text: impl Into<String>) -> Self {
        Self {
            start_sec,
            end_sec,
            text: text.into(),
        }
    }

    pub fn contains(&self, time: f64) -> bool {
        self.start_sec <= time && time < self.end_sec
    }
}

/// Ordered caption track, expected sorted by start and non-overlapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub segments: Vec<CaptionSegment>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_contains_bounds() {
        let seg = CaptionSegment::new(1.0, 2.0, "x");
        assert!(seg.contains(1.0));
        assert!(seg.contains(1.5));
        assert!(!seg.contains(2.0));
        assert!(!seg.contains(0.99));
    }

    #[test]
    fn test_segment_serde_field_names() {
        let seg: CaptionSegment = serde_json::from_str(r#"{"startSec":0.5,"endSec":3,"text":"hi"}"#).unwrap();
        assert_eq!(seg, CaptionSegment::new(0.5, 3.0, "hi"));

        let json = serde_json::to_string(&seg).unwrap();
        assert!(json.contains("\"startSec\":0.5"));
        assert!(json.contains("\"endSec\":3.0"));
    }

    #[test]
    fn test_video_id_urls() {
        let id = VideoId::new("8iAQ1h30n5I");
        assert_eq!(id.watch_url(), "https://www.youtube.com/watch?v=8iAQ1h30n5I");
        assert_eq!(id.short_url(), "https://youtu.be/8iAQ1h30n5I");
        assert_eq!(id.embed_url(), "https://www.youtube.com/embed/8iAQ1h30n5I");
        assert_eq!(id.to_string(), "8iAQ1h30n5I");
    }

    #[test]
    fn test_video_id_serializes_as_string() {
        let id = VideoId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }
}
