use log::debug;
use url::Url;

use crate::VideoId;

const WATCH_HOST: &str = "www.youtube.com";
const SHORT_HOST: &str = "youtu.be";
const WATCH_PATH: &str = "/watch";
const EMBED_PREFIX: &str = "/embed/";

/// Recognized YouTube URL layouts, tested in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlShape {
    /// `https://www.youtube.com/watch?v=ID`
    Standard,
    /// `https://youtu.be/ID`
    Short,
    /// `https://www.youtube.com/embed/ID`
    Embed,
    Unknown,
}

impl std::fmt::Display for UrlShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlShape::Standard => write!(f, "standard"),
            UrlShape::Short => write!(f, "short"),
            UrlShape::Embed => write!(f, "embed"),
            UrlShape::Unknown => write!(f, "unknown"),
        }
    }
}

/// Classify a parsed URL by exact host and path matching.
///
/// Scheme is ignored, and only `www.youtube.com` / `youtu.be` are recognized;
/// `m.youtube.com`, bare `youtube.com` and regional domains are `Unknown`.
pub fn classify(url: &Url) -> UrlShape {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let path = url.path();

    if host == WATCH_HOST && path == WATCH_PATH && url.query_pairs().any(|(k, _)| k == "v") {
        UrlShape::Standard
    } else if host == SHORT_HOST {
        UrlShape::Short
    } else if host == WATCH_HOST && path.starts_with(EMBED_PREFIX) {
        UrlShape::Embed
    } else {
        UrlShape::Unknown
    }
}

/// Classify raw input; anything that does not parse as a URL is `Unknown`
pub fn shape_of(raw: &str) -> UrlShape {
    Url::parse(raw).map(|url| classify(&url)).unwrap_or(UrlShape::Unknown)
}

/// Extract the video ID from a standard, short or embed YouTube URL.
///
/// Never fails: input that is not a URL, or a URL of any other shape, yields `None`.
/// A present-but-empty `v` parameter yields an empty ID, and the short/embed
/// forms return the rest of the path verbatim, extra segments included.
pub fn extract_video_id(raw: &str) -> Option<VideoId> {
    debug!("Extracting video ID from: {raw:?}");

    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            debug!("Not a URL ({e}): {raw:?}");
            return None;
        }
    };

    let id = match classify(&url) {
        UrlShape::Standard => url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned()),
        UrlShape::Short => url.path().strip_prefix('/').map(str::to_string),
        UrlShape::Embed => url.path().strip_prefix(EMBED_PREFIX).map(str::to_string),
        UrlShape::Unknown => None,
    };

    debug!("Extracted video ID: {id:?}");
    id.map(VideoId::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> Option<VideoId> {
        Some(VideoId::new(s))
    }

    #[test]
    fn test_watch_url() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=8iAQ1h30n5I"), id("8iAQ1h30n5I"));
    }

    #[test]
    fn test_watch_url_with_extra_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?t=120&v=8iAQ1h30n5I&list=abc"),
            id("8iAQ1h30n5I")
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(extract_video_id("https://youtu.be/8iAQ1h30n5I"), id("8iAQ1h30n5I"));
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(extract_video_id("https://www.youtube.com/embed/8iAQ1h30n5I"), id("8iAQ1h30n5I"));
    }

    #[test]
    fn test_not_a_url() {
        assert_eq!(extract_video_id("not a url"), None);
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("8iAQ1h30n5I"), None);
    }

    #[test]
    fn test_unrecognized_host() {
        assert_eq!(extract_video_id("https://vimeo.com/12345"), None);
        assert_eq!(extract_video_id("https://m.youtube.com/watch?v=8iAQ1h30n5I"), None);
        assert_eq!(extract_video_id("https://youtube.com/watch?v=8iAQ1h30n5I"), None);
        assert_eq!(extract_video_id("https://www.youtube.co.jp/watch?v=8iAQ1h30n5I"), None);
    }

    #[test]
    fn test_missing_v_param() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?x=1"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch"), None);
    }

    #[test]
    fn test_watch_path_must_be_exact() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch/?v=abc"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/shorts/abc"), None);
    }

    #[test]
    fn test_empty_v_param_yields_empty_id() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v="), id(""));
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v"), id(""));
    }

    #[test]
    fn test_host_case_and_scheme_ignored() {
        assert_eq!(extract_video_id("HTTPS://WWW.YouTube.COM/watch?v=abc"), id("abc"));
        assert_eq!(extract_video_id("http://youtu.be/abc"), id("abc"));
        assert_eq!(extract_video_id("ftp://www.youtube.com/embed/abc"), id("abc"));
    }

    #[test]
    fn test_short_url_keeps_extra_path_segments() {
        assert_eq!(extract_video_id("https://youtu.be/abc/def"), id("abc/def"));
        assert_eq!(extract_video_id("https://youtu.be/"), id(""));
    }

    #[test]
    fn test_short_and_embed_exclude_query() {
        assert_eq!(extract_video_id("https://youtu.be/abc?t=30s"), id("abc"));
        assert_eq!(extract_video_id("https://www.youtube.com/embed/abc?start=10"), id("abc"));
    }

    #[test]
    fn test_v_param_is_decoded() {
        assert_eq!(extract_video_id("https://www.youtube.com/watch?v=a%2Db"), id("a-b"));
    }

    #[test]
    fn test_standard_takes_priority_over_embed() {
        let url = Url::parse("https://www.youtube.com/embed/abc?v=zzz").unwrap();
        assert_eq!(classify(&url), UrlShape::Embed);
        let url = Url::parse("https://www.youtube.com/watch?v=zzz").unwrap();
        assert_eq!(classify(&url), UrlShape::Standard);
    }

    #[test]
    fn test_classify_unknown() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(classify(&url), UrlShape::Unknown);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored_by_parser() {
        assert_eq!(extract_video_id("  https://youtu.be/abc \n"), id("abc"));
        assert_eq!(shape_of("\thttps://www.youtube.com/watch?v=abc "), UrlShape::Standard);
    }

    #[test]
    fn test_shape_of() {
        assert_eq!(shape_of("https://youtu.be/abc"), UrlShape::Short);
        assert_eq!(shape_of("https://www.youtube.com/embed/abc"), UrlShape::Embed);
        assert_eq!(shape_of("https://www.youtube.com/watch?v=abc"), UrlShape::Standard);
        assert_eq!(shape_of("not a url"), UrlShape::Unknown);
    }

    #[test]
    fn test_reextracting_from_rebuilt_url_is_stable() {
        let inputs = [
            "https://www.youtube.com/watch?v=8iAQ1h30n5I",
            "https://youtu.be/dQw4w9WgXcQ",
            "https://www.youtube.com/embed/a_b-C1d2E3f",
        ];
        for input in inputs {
            let first = extract_video_id(input).unwrap();
            for rebuilt in [first.watch_url(), first.short_url(), first.embed_url()] {
                assert_eq!(extract_video_id(&rebuilt), Some(first.clone()), "rebuilt from {rebuilt}");
            }
        }
    }
}
