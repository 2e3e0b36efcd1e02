//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::auth::User;
use crate::catalog::{Course, SubCourse, Video};
use crate::youtube::{PlaylistInfo, YouTubeVideo};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// Format a duration in seconds as H:MM:SS, or M:SS under an hour
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

/// Format a view count the way the panel shows it: 1.2M, 3.4K, 999
pub fn format_view_count(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Shorten an ISO timestamp for table cells, leaving unparseable values as
/// they came
pub fn format_date(value: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| value.to_string())
}

/// Print a table of courses
pub fn print_course_table(courses: &[Course]) {
    if courses.is_empty() {
        info("No courses found. Create one with 'coursedesk courses create'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Description").fg(Color::Cyan),
            Cell::new("Image").fg(Color::Cyan),
            Cell::new("Created").fg(Color::Cyan),
        ]);

    for course in courses {
        table.add_row(vec![
            Cell::new(&course.id),
            Cell::new(&course.name),
            Cell::new(&course.description),
            Cell::new(course.image_url.as_deref().unwrap_or("-")),
            Cell::new(
                course
                    .created_at
                    .as_deref()
                    .map(format_date)
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    println!("{table}");
}

/// Print a table of sub-courses
pub fn print_sub_course_table(sub_courses: &[SubCourse]) {
    if sub_courses.is_empty() {
        info("No sub-courses found. Create one with 'coursedesk subcourses create'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").fg(Color::Cyan),
            Cell::new("Course").fg(Color::Cyan),
            Cell::new("Order").fg(Color::Cyan),
            Cell::new("Name").fg(Color::Cyan),
            Cell::new("Description").fg(Color::Cyan),
        ]);

    for sub_course in sub_courses {
        table.add_row(vec![
            Cell::new(&sub_course.id),
            Cell::new(&sub_course.course_id),
            Cell::new(sub_course.order),
            Cell::new(&sub_course.name),
            Cell::new(&sub_course.description),
        ]);
    }

    println!("{table}");
}

/// Print a table of registered videos
pub fn print_video_table(videos: &[Video]) {
    if videos.is_empty() {
        info("No videos found. Register one with 'coursedesk videos create'");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Order").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
            Cell::new("Video").fg(Color::Cyan),
            Cell::new("Duration").fg(Color::Cyan),
            Cell::new("Views").fg(Color::Cyan),
            Cell::new("Channel").fg(Color::Cyan),
        ]);

    for video in videos {
        table.add_row(vec![
            Cell::new(video.order),
            Cell::new(&video.title),
            Cell::new(&video.video_id),
            Cell::new(
                video
                    .duration
                    .map(format_duration)
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(
                video
                    .view_count
                    .map(format_view_count)
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(video.channel_title.as_deref().unwrap_or("-")),
        ]);
    }

    println!("{table}");
}

/// Print a table of YouTube lookup results
pub fn print_youtube_table(videos: &[YouTubeVideo]) {
    if videos.is_empty() {
        info("No videos found");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Video").fg(Color::Cyan),
            Cell::new("Title").fg(Color::Cyan),
            Cell::new("Channel").fg(Color::Cyan),
            Cell::new("Duration").fg(Color::Cyan),
            Cell::new("Views").fg(Color::Cyan),
            Cell::new("Published").fg(Color::Cyan),
        ]);

    for video in videos {
        table.add_row(vec![
            Cell::new(&video.video_id),
            Cell::new(&video.title),
            Cell::new(video.channel_title.as_deref().unwrap_or("-")),
            Cell::new(
                video
                    .duration
                    .map(format_duration)
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(
                video
                    .view_count
                    .map(format_view_count)
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(
                video
                    .published_at
                    .as_deref()
                    .map(format_date)
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    println!("{table}");
}

/// Print the full details of one video
pub fn print_video_detail(video: &YouTubeVideo) {
    println!("{}", "Video Details".bold().underline());
    println!();
    println!("  {} {}", "Title:".bold(), video.title);
    println!("  {} {}", "Video ID:".bold(), video.video_id);
    println!("  {} {}", "URL:".bold(), video.url.cyan());

    if let Some(channel) = &video.channel_title {
        println!("  {} {}", "Channel:".bold(), channel);
    }
    if let Some(published) = &video.published_at {
        println!("  {} {}", "Published:".bold(), format_date(published));
    }
    if let Some(duration) = video.duration {
        println!("  {} {}", "Duration:".bold(), format_duration(duration));
    }
    if let Some(views) = video.view_count {
        println!("  {} {}", "Views:".bold(), format_view_count(views));
    }
    if let Some(category) = &video.category {
        println!("  {} {}", "Category:".bold(), category);
    }
    if !video.tags.is_empty() {
        println!("  {} {}", "Tags:".bold(), video.tags.join(", "));
    }
    if let Some(description) = &video.description {
        println!();
        println!("  {}", "Description:".bold());
        for line in description.lines() {
            println!("    {}", line);
        }
    }
}

/// Print the summary of a playlist
pub fn print_playlist_info(playlist: &PlaylistInfo) {
    println!("{}", "Playlist".bold().underline());
    println!();
    println!("  {} {}", "Title:".bold(), playlist.title);
    println!("  {} {}", "Playlist ID:".bold(), playlist.playlist_id);
    println!("  {} {}", "Items:".bold(), playlist.item_count);

    if let Some(channel) = &playlist.channel_title {
        println!("  {} {}", "Channel:".bold(), channel);
    }
    if let Some(description) = &playlist.description {
        if !description.is_empty() {
            println!();
            println!("  {}", "Description:".bold());
            for line in description.lines() {
                println!("    {}", line);
            }
        }
    }
}

/// Print the active session
pub fn print_session(user: &User) {
    println!("{}", "Session".bold().underline());
    println!();
    println!("  {} {}", "Name:".bold(), user.name);
    println!("  {} {}", "Email:".bold(), user.email);
    println!("  {} {}", "Profile:".bold(), user.profile.green());
    println!("  {} {}", "User ID:".bold(), user.id);
}
