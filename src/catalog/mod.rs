//! Course catalog domain: courses, sub-courses and videos

pub mod forms;

use crate::api::ApiClient;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use forms::{NewCourse, NewSubCourse, NewVideo};

/// A top-level course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A sub-course inside a course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCourse {
    pub id: String,
    pub course_id: String,
    pub name: String,
    pub description: String,
    pub order: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A video inside a sub-course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub sub_course_id: String,
    pub video_id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Length in seconds
    #[serde(default)]
    pub duration: Option<u64>,
    #[serde(default)]
    pub channel_title: Option<String>,
    #[serde(default)]
    pub view_count: Option<u64>,
    pub order: u32,
}

/// Batch body for video creation
#[derive(Debug, Serialize)]
pub struct NewVideoBatch<'a> {
    pub videos: &'a [NewVideo],
}

pub async fn list_courses(api: &ApiClient) -> Result<Vec<Course>> {
    api.get_data("/courses").await
}

pub async fn create_course(api: &ApiClient, course: &NewCourse) -> Result<()> {
    api.post_ack("/courses", course).await
}

pub async fn list_sub_courses(api: &ApiClient, course_id: &str) -> Result<Vec<SubCourse>> {
    api.get_data(&format!("/courses/{}/sub-courses", course_id)).await
}

pub async fn create_sub_course(
    api: &ApiClient,
    course_id: &str,
    sub_course: &NewSubCourse,
) -> Result<()> {
    api.post_ack(&format!("/courses/{}/sub-courses", course_id), sub_course)
        .await
}

pub async fn list_videos(api: &ApiClient, sub_course_id: &str) -> Result<Vec<Video>> {
    api.get_data(&format!("/courses/sub-courses/{}/videos", sub_course_id))
        .await
}

pub async fn create_videos(api: &ApiClient, sub_course_id: &str, videos: &[NewVideo]) -> Result<()> {
    api.post_ack(
        &format!("/courses/sub-courses/{}/videos", sub_course_id),
        &NewVideoBatch { videos },
    )
    .await
}

/// Collect the sub-courses of every course into one flat list
///
/// A course whose sub-courses cannot be fetched is skipped; only the
/// course list itself is allowed to fail the whole operation.
pub async fn list_all_sub_courses(api: &ApiClient) -> Result<Vec<SubCourse>> {
    let courses = list_courses(api).await?;

    let mut all = Vec::new();
    for course in &courses {
        match list_sub_courses(api, &course.id).await {
            Ok(sub_courses) => all.extend(sub_courses),
            Err(err) => {
                tracing::warn!(course = %course.name, error = %err, "skipping course, could not fetch its sub-courses");
            }
        }
    }
    Ok(all)
}
