use serde::{Deserialize, Serialize};

use super::media::MediaRef;

/// Stable identity of a carousel item: its index in the catalog list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey(pub usize);

/// A project shown in the carousel and the detail panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselItem {
    #[serde(alias = "name")]
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub role: String,
    /// Ordered task descriptions
    #[serde(default, alias = "description")]
    pub tasks: Vec<String>,
    #[serde(default)]
    pub result: String,
    /// Static thumbnail
    #[serde(alias = "src")]
    pub image: MediaRef,
    #[serde(default, alias = "videoSrc")]
    pub video: Option<MediaRef>,
    #[serde(default, alias = "extraVideos")]
    pub extra_videos: Vec<MediaRef>,
    #[serde(default)]
    pub logo: Option<MediaRef>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CarouselItem {
    pub fn has_extra_media(&self) -> bool {
        self.extra_videos.iter().any(|m| !m.is_empty())
    }
}
