//! Video lesson descriptors.

use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Hosts treated as video platforms when filtering search results
const VIDEO_HOSTS: [&str; 3] = ["youtube.com", "youtu.be", "vimeo.com"];

/// A single video lesson found for a topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDescriptor {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,

    /// Platform video id, when the URL points at YouTube
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embed_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl VideoDescriptor {
    /// Create a descriptor, deriving the embed id and thumbnail from the URL
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let url = url.into();
        let embed_id = youtube_id(&url);
        let thumbnail_url = embed_id.as_deref().map(thumbnail_for);

        Self {
            title: title.into(),
            url,
            description: description.into(),
            embed_id,
            thumbnail_url,
            channel_name: None,
            duration: None,
        }
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel_name = Some(channel.into());
        self
    }

    /// Embeddable player URL, when the video is on YouTube
    pub fn embed_url(&self) -> Option<String> {
        self.embed_id
            .as_deref()
            .map(|id| format!("https://www.youtube.com/embed/{}", id))
    }
}

/// Extract the YouTube video id from a watch or short link
pub fn youtube_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();

    let id = if host.contains("youtube.com") {
        parsed
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
    } else if host.contains("youtu.be") {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next())
            .map(str::to_string)
    } else {
        None
    };

    id.filter(|id| !id.is_empty())
}

/// Thumbnail URL for a YouTube video id
pub fn thumbnail_for(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}

/// Whether a URL looks like it points at a video platform
pub fn is_likely_video(url: &str) -> bool {
    let lower = url.to_lowercase();
    VIDEO_HOSTS.iter().any(|host| lower.contains(host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_watch_url() {
        let video = VideoDescriptor::new(
            "Photosynthesis explained",
            "https://www.youtube.com/watch?v=abc123&t=10",
            "Intro",
        );
        assert_eq!(video.embed_id.as_deref(), Some("abc123"));
        assert_eq!(
            video.thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/abc123/hqdefault.jpg")
        );
        assert_eq!(
            video.embed_url().as_deref(),
            Some("https://www.youtube.com/embed/abc123")
        );
    }

    #[test]
    fn test_youtu_be_short_link() {
        assert_eq!(youtube_id("https://youtu.be/xyz789"), Some("xyz789".to_string()));
    }

    #[test]
    fn test_non_youtube_host() {
        let video = VideoDescriptor::new("Cells", "https://vimeo.com/12345", "");
        assert!(video.embed_id.is_none());
        assert!(video.thumbnail_url.is_none());

        assert_eq!(youtube_id("not a url"), None);
        assert_eq!(youtube_id("https://www.youtube.com/channel/UC123"), None);
    }

    #[test]
    fn test_is_likely_video() {
        assert!(is_likely_video("https://www.YouTube.com/watch?v=1"));
        assert!(is_likely_video("https://vimeo.com/1"));
        assert!(!is_likely_video("https://en.wikipedia.org/wiki/Cell"));
    }
}
