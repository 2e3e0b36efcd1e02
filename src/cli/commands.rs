//! CLI command implementations

use anyhow::Result;
use console::Term;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::api::ApiClient;
use crate::auth::{self, route_decision, GuardDecision, SessionManager};
use crate::catalog;
use crate::cli::prompts::{self, spinner, RegistrationKind};
use crate::cli::{
    error, info, print_course_table, print_playlist_info, print_session, print_sub_course_table,
    print_video_detail, print_video_table, print_youtube_table, success, warn, CoursesAction,
    OutputFormat, SubcoursesAction, VideosAction, YoutubeAction,
};
use crate::config::{self, Config};
use crate::youtube::{self, import};

/// Initialize a new coursedesk.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new("coursedesk.toml");

    if config_path.exists() {
        warn("coursedesk.toml already exists");
        return Ok(());
    }

    let content = config::default_config_content();
    fs::write(config_path, content)?;

    success("Created coursedesk.toml");
    info("Run 'coursedesk login' to authenticate against the backend");

    Ok(())
}

/// Log in as an administrator
pub async fn login(email: Option<String>, password: Option<String>) -> Result<()> {
    let config = load_config()?;
    let mut session = SessionManager::from_config(&config);

    let pb = spinner("Checking for an existing session...");
    session.resolve().await;
    pb.finish_and_clear();

    if auth::login_redirect(session.is_loading(), session.is_authenticated()) {
        let email = session
            .current_user()
            .map(|user| user.email.clone())
            .unwrap_or_default();
        info(&format!("Already logged in as {}", email));
        return Ok(());
    }

    let (email, password) = prompts::login_credentials(email, password)?;

    let pb = spinner("Logging in...");
    let logged_in = session.login(&email, &password).await;
    pb.finish_and_clear();

    if logged_in {
        let name = session
            .current_user()
            .map(|user| user.name.clone())
            .unwrap_or_default();
        success(&format!("Logged in as {}", name));
        Ok(())
    } else {
        error("Invalid credentials or access not authorized for administrators");
        Err(anyhow::anyhow!("login failed"))
    }
}

/// Log out and discard the stored session token
pub async fn logout() -> Result<()> {
    let config = load_config()?;
    let mut session = SessionManager::from_config(&config);
    session.logout();

    success("Logged out");
    Ok(())
}

/// Show the current session
pub async fn whoami() -> Result<()> {
    let config = load_config()?;
    let mut session = SessionManager::from_config(&config);

    let pb = spinner("Checking authentication...");
    session.resolve().await;
    pb.finish_and_clear();

    match session.current_user() {
        Some(user) => {
            print_session(user);
            Ok(())
        }
        None => {
            info("Not logged in. Run 'coursedesk login' first.");
            Ok(())
        }
    }
}

/// Interactive registration wizard
pub async fn create() -> Result<()> {
    let config = load_config()?;
    let session = authenticate(&config).await?;
    let api = session.api_client();

    let _ = Term::stdout().clear_screen();

    match prompts::pick_registration()? {
        RegistrationKind::Course => create_course(&api, None, None, None).await,
        RegistrationKind::SubCourse => create_sub_course(&api, None, None, None, None).await,
        RegistrationKind::Video => create_video(&api, None, None, None, None).await,
    }
}

/// Course management commands
pub async fn courses(action: CoursesAction) -> Result<()> {
    let config = load_config()?;
    let session = authenticate(&config).await?;
    let api = session.api_client();

    match action {
        CoursesAction::List { format } => {
            let pb = spinner("Loading courses...");
            let result = catalog::list_courses(&api).await;
            pb.finish_and_clear();

            let courses = result?;
            match format {
                OutputFormat::Table => print_course_table(&courses),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&courses)?),
                OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&courses)?),
            }
            Ok(())
        }
        CoursesAction::Create {
            name,
            description,
            image_url,
        } => create_course(&api, name, description, image_url).await,
    }
}

async fn create_course(
    api: &ApiClient,
    name: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
) -> Result<()> {
    let course = prompts::course_input(name, description, image_url)?;

    let pb = spinner("Creating course...");
    let result = catalog::create_course(api, &course).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            success(&format!("Created course: {}", course.name));
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to create course: {}", e));
            Err(e.into())
        }
    }
}

/// Sub-course management commands
pub async fn sub_courses(action: SubcoursesAction) -> Result<()> {
    let config = load_config()?;
    let session = authenticate(&config).await?;
    let api = session.api_client();

    match action {
        SubcoursesAction::List { course, format } => {
            let pb = spinner("Loading sub-courses...");
            let result = match &course {
                Some(course_id) => catalog::list_sub_courses(&api, course_id).await,
                None => catalog::list_all_sub_courses(&api).await,
            };
            pb.finish_and_clear();

            let sub_courses = result?;
            match format {
                OutputFormat::Table => print_sub_course_table(&sub_courses),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&sub_courses)?),
                OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&sub_courses)?),
            }
            Ok(())
        }
        SubcoursesAction::Create {
            course,
            name,
            description,
            order,
        } => create_sub_course(&api, course, name, description, order).await,
    }
}

async fn create_sub_course(
    api: &ApiClient,
    course: Option<String>,
    name: Option<String>,
    description: Option<String>,
    order: Option<u32>,
) -> Result<()> {
    let course_id = prompts::course_id_or_pick(api, course).await?;
    let sub_course = prompts::sub_course_input(name, description, order)?;

    let pb = spinner("Creating sub-course...");
    let result = catalog::create_sub_course(api, &course_id, &sub_course).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            success(&format!("Created sub-course: {}", sub_course.name));
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to create sub-course: {}", e));
            Err(e.into())
        }
    }
}

/// Video management commands
pub async fn videos(action: VideosAction) -> Result<()> {
    let config = load_config()?;
    let session = authenticate(&config).await?;
    let api = session.api_client();

    match action {
        VideosAction::List { sub_course, format } => {
            let sub_course_id = prompts::sub_course_id_or_pick(&api, sub_course).await?;

            let pb = spinner("Loading videos...");
            let result = catalog::list_videos(&api, &sub_course_id).await;
            pb.finish_and_clear();

            let videos = result?;
            match format {
                OutputFormat::Table => print_video_table(&videos),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&videos)?),
                OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&videos)?),
            }
            Ok(())
        }
        VideosAction::Create {
            sub_course,
            title,
            url,
            order,
        } => create_video(&api, sub_course, title, url, order).await,
        VideosAction::Import {
            sub_course,
            file,
            order,
        } => import_videos(&api, sub_course, file, order).await,
    }
}

async fn create_video(
    api: &ApiClient,
    sub_course: Option<String>,
    title: Option<String>,
    url: Option<String>,
    order: Option<u32>,
) -> Result<()> {
    let sub_course_id = prompts::sub_course_id_or_pick(api, sub_course).await?;
    let video = prompts::video_input(title, url, order)?;

    let pb = spinner("Registering video...");
    let result = catalog::create_videos(api, &sub_course_id, std::slice::from_ref(&video)).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            success(&format!("Registered video: {}", video.title));
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to register video: {}", e));
            Err(e.into())
        }
    }
}

async fn import_videos(
    api: &ApiClient,
    sub_course: Option<String>,
    file: Option<PathBuf>,
    first_order: u32,
) -> Result<()> {
    let input = match &file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    // Parse before any prompting so a bad payload fails fast
    let videos = import::to_new_videos(import::parse_import(&input)?, first_order)?;
    let sub_course_id = prompts::sub_course_id_or_pick(api, sub_course).await?;

    let pb = spinner("Registering videos...");
    let result = catalog::create_videos(api, &sub_course_id, &videos).await;
    pb.finish_and_clear();

    match result {
        Ok(()) => {
            success(&format!("Registered {} video(s)", videos.len()));
            Ok(())
        }
        Err(e) => {
            error(&format!("Failed to register videos: {}", e));
            Err(e.into())
        }
    }
}

/// YouTube metadata commands
pub async fn youtube(action: YoutubeAction) -> Result<()> {
    let config = load_config()?;
    let session = authenticate(&config).await?;
    let api = session.api_client();

    match action {
        YoutubeAction::Search {
            query,
            max_results,
            order,
            format,
        } => {
            let pb = spinner("Searching...");
            let result = youtube::search(&api, &query, max_results, order).await;
            pb.finish_and_clear();

            let videos = result?;
            match format {
                OutputFormat::Table => print_youtube_table(&videos),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&videos)?),
                OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&videos)?),
            }
            Ok(())
        }
        YoutubeAction::Video { id, format } => {
            // A full URL works as well as a bare id
            let video_id = youtube::extract_video_id(&id).unwrap_or(id);

            let pb = spinner("Fetching video details...");
            let result = youtube::video_details(&api, &video_id).await;
            pb.finish_and_clear();

            let video = result?;
            match format {
                OutputFormat::Table => print_video_detail(&video),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&video)?),
                OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&video)?),
            }
            Ok(())
        }
        YoutubeAction::Playlist {
            id,
            max_results,
            format,
        } => {
            let pb = spinner("Fetching playlist videos...");
            let result = youtube::playlist_videos(&api, &id, max_results).await;
            pb.finish_and_clear();

            let videos = result?;
            match format {
                OutputFormat::Table => print_youtube_table(&videos),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&videos)?),
                OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&videos)?),
            }
            Ok(())
        }
        YoutubeAction::PlaylistInfo { id, format } => {
            let pb = spinner("Fetching playlist info...");
            let result = youtube::playlist_info(&api, &id).await;
            pb.finish_and_clear();

            let playlist = result?;
            match format {
                OutputFormat::Table => print_playlist_info(&playlist),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&playlist)?),
                OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&playlist)?),
            }
            Ok(())
        }
    }
}

// Helper functions

fn load_config() -> Result<Config> {
    config::load_config().map_err(|e| anyhow::anyhow!("{}", e))
}

/// Resolve the stored session and enforce the administrator gate
async fn authenticate(config: &Config) -> Result<SessionManager> {
    let mut session = SessionManager::from_config(config);

    let pb = spinner("Checking authentication...");
    session.resolve().await;
    pb.finish_and_clear();

    match route_decision(session.is_loading(), session.is_authenticated()) {
        GuardDecision::Allow => Ok(session),
        GuardDecision::Wait => {
            // resolve() always settles the state before returning
            Err(anyhow::anyhow!("session is still resolving"))
        }
        GuardDecision::Deny => {
            error("Access denied. An administrator session is required.");
            info("Run 'coursedesk login' first.");
            Err(anyhow::anyhow!("not authenticated"))
        }
    }
}
