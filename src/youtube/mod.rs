//! YouTube metadata panel: lookups proxied through the backend

pub mod import;

use crate::api::ApiClient;
use crate::error::Result;
use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A video as the metadata endpoints describe it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YouTubeVideo {
    pub video_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Length in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Playlist summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub playlist_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub item_count: u64,
    #[serde(default)]
    pub channel_title: Option<String>,
}

/// Sort order for searches, spelled the way the backend expects it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchOrder {
    #[default]
    Relevance,
    Date,
    ViewCount,
    Rating,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query: &'a str,
    max_results: u32,
    order: SearchOrder,
}

pub async fn search(
    api: &ApiClient,
    query: &str,
    max_results: u32,
    order: SearchOrder,
) -> Result<Vec<YouTubeVideo>> {
    api.post_json(
        "/youtube/search",
        &SearchRequest {
            query,
            max_results,
            order,
        },
    )
    .await
}

pub async fn video_details(api: &ApiClient, video_id: &str) -> Result<YouTubeVideo> {
    api.get_json(&format!("/youtube/video/{}", video_id)).await
}

pub async fn playlist_videos(
    api: &ApiClient,
    playlist_id: &str,
    max_results: u32,
) -> Result<Vec<YouTubeVideo>> {
    api.get_json(&format!(
        "/youtube/playlist/{}?maxResults={}",
        playlist_id, max_results
    ))
    .await
}

pub async fn playlist_info(api: &ApiClient, playlist_id: &str) -> Result<PlaylistInfo> {
    api.get_json(&format!("/youtube/playlist/{}/info", playlist_id))
        .await
}

/// Pull the video id out of a YouTube URL
pub fn extract_video_id(url: &str) -> Option<String> {
    let patterns = [
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([^&\n?#]+)",
        r"youtube\.com/v/([^&\n?#]+)",
    ];

    for pattern in patterns {
        // Compile-time constant patterns, a failure here is a bug
        let re =
            Regex::new(pattern).expect("Invalid regex pattern - this is a bug in the codebase");
        if let Some(captures) = re.captures(url) {
            return Some(captures[1].to_string());
        }
    }
    None
}

/// Check that a URL points at a YouTube video
pub fn is_youtube_url(url: &str) -> bool {
    let patterns = [
        r"^https?://(www\.)?(youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)",
        r"^https?://(www\.)?youtube\.com/v/",
    ];

    patterns.iter().any(|pattern| {
        Regex::new(pattern)
            .expect("Invalid regex pattern - this is a bug in the codebase")
            .is_match(url)
    })
}
