//! CLI interface for Coursedesk

pub mod commands;
mod output;
pub mod prompts;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::youtube::SearchOrder;

#[derive(Parser)]
#[command(name = "coursedesk")]
#[command(version = "1.1.0")]
#[command(about = "Administrative console for the course catalog backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new coursedesk.toml configuration file
    Init,

    /// Log in as an administrator
    Login {
        /// Email to log in with (prompted when omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted when omitted)
        #[arg(short, long, env = "COURSEDESK_PASSWORD")]
        password: Option<String>,
    },

    /// Log out and discard the stored session token
    Logout,

    /// Show the current session
    Whoami,

    /// Interactive wizard for registering courses, sub-courses and videos
    Create,

    /// Manage courses
    Courses {
        #[command(subcommand)]
        action: CoursesAction,
    },

    /// Manage sub-courses
    Subcourses {
        #[command(subcommand)]
        action: SubcoursesAction,
    },

    /// Manage videos
    Videos {
        #[command(subcommand)]
        action: VideosAction,
    },

    /// Look up YouTube metadata through the backend
    Youtube {
        #[command(subcommand)]
        action: YoutubeAction,
    },
}

impl Commands {
    /// Commands that refuse to dispatch without a stored token of
    /// plausible shape
    pub fn requires_auth(&self) -> bool {
        !matches!(
            self,
            Commands::Init | Commands::Login { .. } | Commands::Logout | Commands::Whoami
        )
    }
}

#[derive(Subcommand)]
pub enum CoursesAction {
    /// List all courses
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Create a course
    Create {
        /// Course name (prompted when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Course description (prompted when omitted)
        #[arg(short, long)]
        description: Option<String>,

        /// Optional cover image URL
        #[arg(short, long)]
        image_url: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum SubcoursesAction {
    /// List sub-courses, of one course or of every course
    List {
        /// Course id to list from (all courses when omitted)
        #[arg(short, long)]
        course: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Create a sub-course inside a course
    Create {
        /// Course id (picked interactively when omitted)
        #[arg(short, long)]
        course: Option<String>,

        /// Sub-course name (prompted when omitted)
        #[arg(short, long)]
        name: Option<String>,

        /// Sub-course description (prompted when omitted)
        #[arg(short, long)]
        description: Option<String>,

        /// Position inside the course, starting at 1
        #[arg(short, long)]
        order: Option<u32>,
    },
}

#[derive(Subcommand)]
pub enum VideosAction {
    /// List the videos of a sub-course
    List {
        /// Sub-course id (picked interactively when omitted)
        #[arg(short, long)]
        sub_course: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Register a single video
    Create {
        /// Sub-course id (picked interactively when omitted)
        #[arg(short, long)]
        sub_course: Option<String>,

        /// Video title (prompted when omitted)
        #[arg(short, long)]
        title: Option<String>,

        /// YouTube URL (prompted when omitted)
        #[arg(short, long)]
        url: Option<String>,

        /// Position inside the sub-course, starting at 1
        #[arg(short, long)]
        order: Option<u32>,
    },

    /// Register videos from a JSON payload
    Import {
        /// Sub-course id (picked interactively when omitted)
        #[arg(short, long)]
        sub_course: Option<String>,

        /// File holding the JSON payload (stdin when omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Order given to the first video that carries none of its own
        #[arg(short, long, default_value = "1")]
        order: u32,
    },
}

#[derive(Subcommand)]
pub enum YoutubeAction {
    /// Search videos
    Search {
        /// Search terms
        query: String,

        /// Maximum number of results
        #[arg(short, long, default_value = "10")]
        max_results: u32,

        /// Result ordering
        #[arg(short, long, default_value = "relevance")]
        order: SearchOrder,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show details of one video
    Video {
        /// Video id or YouTube URL
        id: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List the videos of a playlist
    Playlist {
        /// Playlist id
        id: String,

        /// Maximum number of videos
        #[arg(short, long, default_value = "50")]
        max_results: u32,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Show summary information of a playlist
    PlaylistInfo {
        /// Playlist id
        id: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
