//! JSON import of video metadata
//!
//! Accepts the three shapes the metadata panel produces: a
//! `{"videos": [...]}` wrapper, a bare array or a single video object.
//! Anything else is a single import error.

use crate::catalog::NewVideo;
use crate::error::{Error, Result};
use serde::Deserialize;

use super::{extract_video_id, is_youtube_url};

/// One imported video; only title and url are required
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoImport {
    #[serde(default)]
    pub video_id: Option<String>,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub order: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
}

/// The accepted payload shapes
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Wrapped { videos: Vec<VideoImport> },
    Many(Vec<VideoImport>),
    One(Box<VideoImport>),
}

/// Parse an import payload into at least one video
pub fn parse_import(input: &str) -> Result<Vec<VideoImport>> {
    let payload: ImportPayload = serde_json::from_str(input).map_err(|_| {
        Error::Import(
            "expected a {\"videos\": [...]} wrapper, a video array or a single video object with title and url"
                .to_string(),
        )
    })?;

    let videos = match payload {
        ImportPayload::Wrapped { videos } => videos,
        ImportPayload::Many(videos) => videos,
        ImportPayload::One(video) => vec![*video],
    };

    if videos.is_empty() {
        return Err(Error::Import("payload contains no videos".to_string()));
    }
    Ok(videos)
}

impl VideoImport {
    /// Turn an imported video into a creation payload
    ///
    /// A missing video id is recovered from the URL; a missing or zero
    /// order falls back to the given one. Empty strings and zero counters
    /// collapse to null on the wire.
    pub fn into_new_video(self, fallback_order: u32) -> Result<NewVideo> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(Error::Import("video title is required".to_string()));
        }
        let url = self.url.trim().to_string();
        if url.is_empty() {
            return Err(Error::Import("video url is required".to_string()));
        }
        if !is_youtube_url(&url) {
            return Err(Error::Import(format!(
                "'{}' is not a valid YouTube URL",
                url
            )));
        }

        let video_id = match self.video_id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => extract_video_id(&url).ok_or_else(|| {
                Error::Import(format!("could not extract a video id from '{}'", url))
            })?,
        };

        Ok(NewVideo {
            video_id,
            title,
            url,
            order: self.order.filter(|&o| o >= 1).unwrap_or(fallback_order),
            description: none_if_empty(self.description),
            thumbnail_url: none_if_empty(self.thumbnail_url),
            duration: self.duration.filter(|&d| d > 0),
            channel_title: none_if_empty(self.channel_title),
            published_at: none_if_empty(self.published_at),
            view_count: self.view_count.filter(|&v| v > 0),
            tags: self.tags.filter(|tags| !tags.is_empty()),
            category: none_if_empty(self.category),
        })
    }
}

fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Convert a parsed import into a creation batch
///
/// Videos without their own order are numbered sequentially from
/// `first_order`; a batch that would number past `u32::MAX` is rejected.
pub fn to_new_videos(videos: Vec<VideoImport>, first_order: u32) -> Result<Vec<NewVideo>> {
    videos
        .into_iter()
        .enumerate()
        .map(|(i, video)| {
            let fallback_order = u32::try_from(i)
                .ok()
                .and_then(|offset| first_order.checked_add(offset))
                .ok_or_else(|| {
                    Error::Import(format!("sequential order overflows at entry {}", i + 1))
                })?;
            video.into_new_video(fallback_order)
        })
        .collect()
}
