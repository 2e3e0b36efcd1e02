//! Validated builders for catalog submissions
//!
//! Each builder trims its input, runs the same checks the admin forms run
//! and only then produces a wire payload.

use crate::error::{Error, Result};
use crate::youtube;
use serde::Serialize;
use url::Url;

/// Payload for course creation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCourse {
    pub name: String,
    pub description: String,
    /// Serialized as null when absent
    pub image_url: Option<String>,
}

impl NewCourse {
    /// Validate raw form input and build the payload
    pub fn from_input(name: &str, description: &str, image_url: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("course name is required".to_string()));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::Validation(
                "course description is required".to_string(),
            ));
        }
        let image_url = image_url.trim();
        let image_url = if image_url.is_empty() {
            None
        } else {
            Url::parse(image_url)
                .map_err(|_| Error::Validation("image URL is not a valid URL".to_string()))?;
            Some(image_url.to_string())
        };

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            image_url,
        })
    }
}

/// Payload for sub-course creation
#[derive(Debug, Clone, Serialize)]
pub struct NewSubCourse {
    pub name: String,
    pub description: String,
    pub order: u32,
}

impl NewSubCourse {
    /// Validate raw form input and build the payload
    pub fn from_input(name: &str, description: &str, order: u32) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::Validation("sub-course name is required".to_string()));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::Validation(
                "sub-course description is required".to_string(),
            ));
        }
        if order < 1 {
            return Err(Error::Validation("order must be at least 1".to_string()));
        }

        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            order,
        })
    }
}

/// Payload for one video inside a creation batch
///
/// Optional metadata is serialized as null when absent, which is what the
/// backend expects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub video_id: String,
    pub title: String,
    pub url: String,
    pub order: u32,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub duration: Option<u64>,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    pub view_count: Option<u64>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

impl NewVideo {
    /// Validate manual form input and build the payload
    ///
    /// The video id comes out of the URL itself.
    pub fn from_input(title: &str, url: &str, order: u32) -> Result<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::Validation("video title is required".to_string()));
        }
        let url = url.trim();
        if url.is_empty() {
            return Err(Error::Validation("video URL is required".to_string()));
        }
        if !youtube::is_youtube_url(url) {
            return Err(Error::Validation(
                "URL must be a valid YouTube URL".to_string(),
            ));
        }
        if order < 1 {
            return Err(Error::Validation("order must be at least 1".to_string()));
        }
        let video_id = youtube::extract_video_id(url).ok_or_else(|| {
            Error::Validation("could not extract a video id from the URL".to_string())
        })?;

        Ok(Self {
            video_id,
            title: title.to_string(),
            url: url.to_string(),
            order,
            description: None,
            thumbnail_url: None,
            duration: None,
            channel_title: None,
            published_at: None,
            view_count: None,
            tags: None,
            category: None,
        })
    }
}
