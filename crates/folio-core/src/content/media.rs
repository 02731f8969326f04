use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// Opaque reference to an image or video, as written in the content catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MediaRef {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// What a media reference resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedMedia {
    /// Playable endpoint (embed page or stream)
    Stream(String),
    /// Static image endpoint or path
    Image(String),
}

impl ResolvedMedia {
    pub fn location(&self) -> &str {
        match self {
            ResolvedMedia::Stream(s) | ResolvedMedia::Image(s) => s,
        }
    }
}

/// Turns media references into endpoints. Reachability is never checked.
pub trait MediaResolver {
    fn resolve(&self, media: &MediaRef) -> Option<ResolvedMedia>;

    /// Resolve a reference expected to be a video; anything that does not
    /// resolve to a stream is treated as unavailable.
    fn resolve_video(&self, media: &MediaRef) -> Option<String> {
        match self.resolve(media) {
            Some(ResolvedMedia::Stream(url)) => Some(url),
            other => {
                debug!(media = %media, ?other, "video reference did not resolve to a stream");
                None
            }
        }
    }
}

const IMAGE_EXTENSIONS: [&str; 7] = ["jpg", "jpeg", "png", "gif", "webp", "svg", "avif"];

/// Default resolver: normalizes YouTube links to embed URLs, passes other
/// web URLs through as streams, and treats image files and local paths as
/// static images.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbedResolver;

impl EmbedResolver {
    fn youtube_embed(url: &Url) -> Option<String> {
        let host = url.host_str()?.trim_start_matches("www.").trim_start_matches("m.");
        let video_id = match host {
            "youtu.be" => url.path_segments()?.next().map(str::to_string),
            "youtube.com" => {
                if url.path().starts_with("/embed/") {
                    return Some(url.to_string());
                }
                if url.path() == "/watch" {
                    url.query_pairs()
                        .find(|(k, _)| k == "v")
                        .map(|(_, v)| v.into_owned())
                } else {
                    None
                }
            }
            _ => None,
        }?;
        if video_id.is_empty() {
            return None;
        }
        Some(format!("https://www.youtube.com/embed/{}", video_id))
    }
}

impl MediaResolver for EmbedResolver {
    fn resolve(&self, media: &MediaRef) -> Option<ResolvedMedia> {
        let raw = media.as_str().trim();
        if raw.is_empty() {
            return None;
        }

        let Ok(url) = Url::parse(raw) else {
            // Not a URL: a site-relative or local path
            return Some(ResolvedMedia::Image(raw.to_string()));
        };

        match url.scheme() {
            "http" | "https" => {
                if let Some(embed) = Self::youtube_embed(&url) {
                    return Some(ResolvedMedia::Stream(embed));
                }
                let is_image = url
                    .path()
                    .rsplit('.')
                    .next()
                    .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
                    .unwrap_or(false);
                if is_image {
                    Some(ResolvedMedia::Image(url.to_string()))
                } else {
                    Some(ResolvedMedia::Stream(url.to_string()))
                }
            }
            "file" => Some(ResolvedMedia::Image(url.to_string())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(s: &str) -> Option<ResolvedMedia> {
        EmbedResolver.resolve(&MediaRef::new(s))
    }

    #[test]
    fn test_short_youtube_link() {
        assert_eq!(
            resolve("https://youtu.be/abc123?si=xyz"),
            Some(ResolvedMedia::Stream("https://www.youtube.com/embed/abc123".into()))
        );
    }

    #[test]
    fn test_watch_link() {
        assert_eq!(
            resolve("https://www.youtube.com/watch?v=abc123&t=10"),
            Some(ResolvedMedia::Stream("https://www.youtube.com/embed/abc123".into()))
        );
    }

    #[test]
    fn test_embed_link_passes_through() {
        assert_eq!(
            resolve("https://www.youtube.com/embed/abc123"),
            Some(ResolvedMedia::Stream("https://www.youtube.com/embed/abc123".into()))
        );
    }

    #[test]
    fn test_other_web_video_is_stream() {
        assert_eq!(
            resolve("https://vimeo.com/12345"),
            Some(ResolvedMedia::Stream("https://vimeo.com/12345".into()))
        );
    }

    #[test]
    fn test_paths_are_images() {
        assert_eq!(
            resolve("/img/projects/project-1.jpg"),
            Some(ResolvedMedia::Image("/img/projects/project-1.jpg".into()))
        );
        assert_eq!(
            resolve("https://cdn.example.com/a.PNG"),
            Some(ResolvedMedia::Image("https://cdn.example.com/a.PNG".into()))
        );
    }

    #[test]
    fn test_unresolvable() {
        assert_eq!(resolve("   "), None);
        assert_eq!(resolve("mailto:someone@example.com"), None);
        assert_eq!(EmbedResolver.resolve_video(&MediaRef::new("/img/a.jpg")), None);
    }
}
