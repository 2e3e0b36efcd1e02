//! Interactive prompts and progress helpers
//!
//! Everything dialoguer-based lives here: credential prompts, catalog
//! pickers and the input fillers the create commands share. Values already
//! given on the command line are never prompted for again.

use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, FuzzySelect, Input, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::api::ApiClient;
use crate::catalog::{self, Course, NewCourse, NewSubCourse, NewVideo, SubCourse};

/// Spinner shown while a network call is in flight
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// What the create wizard can register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationKind {
    Course,
    SubCourse,
    Video,
}

/// Ask which kind of record to register
pub fn pick_registration() -> Result<RegistrationKind> {
    let options = ["Course", "Sub-course", "Video"];
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What do you want to register?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => RegistrationKind::Course,
        1 => RegistrationKind::SubCourse,
        _ => RegistrationKind::Video,
    })
}

/// Prompt for any credential not already given on the command line
pub fn login_credentials(
    email: Option<String>,
    password: Option<String>,
) -> Result<(String, String)> {
    let theme = ColorfulTheme::default();

    let email = match email {
        Some(email) => email,
        None => Input::with_theme(&theme)
            .with_prompt("Email")
            .interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&theme)
            .with_prompt("Password")
            .interact()?,
    };

    Ok((email, password))
}

/// Fetch all courses and let the user pick one
pub async fn pick_course(api: &ApiClient) -> Result<Course> {
    let pb = spinner("Loading courses...");
    let result = catalog::list_courses(api).await;
    pb.finish_and_clear();

    let mut courses = result?;
    if courses.is_empty() {
        anyhow::bail!("no courses exist yet, create one first");
    }

    let labels: Vec<String> = courses.iter().map(|c| c.name.clone()).collect();
    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Course")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(courses.swap_remove(selection))
}

/// Fetch the sub-courses of every course and let the user pick one
pub async fn pick_sub_course(api: &ApiClient) -> Result<SubCourse> {
    let pb = spinner("Loading sub-courses...");
    let result = catalog::list_all_sub_courses(api).await;
    pb.finish_and_clear();

    let mut sub_courses = result?;
    if sub_courses.is_empty() {
        anyhow::bail!("no sub-courses exist yet, create one first");
    }

    let labels: Vec<String> = sub_courses.iter().map(|s| s.name.clone()).collect();
    let selection = FuzzySelect::with_theme(&ColorfulTheme::default())
        .with_prompt("Sub-course")
        .items(&labels)
        .default(0)
        .interact()?;

    Ok(sub_courses.swap_remove(selection))
}

/// Resolve a course id: the explicit one, or picked interactively
pub async fn course_id_or_pick(api: &ApiClient, course: Option<String>) -> Result<String> {
    match course {
        Some(id) => Ok(id),
        None => Ok(pick_course(api).await?.id),
    }
}

/// Resolve a sub-course id: the explicit one, or picked interactively
pub async fn sub_course_id_or_pick(api: &ApiClient, sub_course: Option<String>) -> Result<String> {
    match sub_course {
        Some(id) => Ok(id),
        None => Ok(pick_sub_course(api).await?.id),
    }
}

/// Fill in and validate course input
pub fn course_input(
    name: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
) -> Result<NewCourse> {
    let theme = ColorfulTheme::default();

    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&theme)
            .with_prompt("Name")
            .interact_text()?,
    };
    let description = match description {
        Some(description) => description,
        None => Input::with_theme(&theme)
            .with_prompt("Description")
            .interact_text()?,
    };
    let image_url = match image_url {
        Some(image_url) => image_url,
        None => Input::with_theme(&theme)
            .with_prompt("Image URL (empty for none)")
            .allow_empty(true)
            .interact_text()?,
    };

    Ok(NewCourse::from_input(&name, &description, &image_url)?)
}

/// Fill in and validate sub-course input
pub fn sub_course_input(
    name: Option<String>,
    description: Option<String>,
    order: Option<u32>,
) -> Result<NewSubCourse> {
    let theme = ColorfulTheme::default();

    let name = match name {
        Some(name) => name,
        None => Input::with_theme(&theme)
            .with_prompt("Name")
            .interact_text()?,
    };
    let description = match description {
        Some(description) => description,
        None => Input::with_theme(&theme)
            .with_prompt("Description")
            .interact_text()?,
    };
    let order: u32 = match order {
        Some(order) => order,
        None => Input::with_theme(&theme)
            .with_prompt("Order")
            .default(1)
            .interact_text()?,
    };

    Ok(NewSubCourse::from_input(&name, &description, order)?)
}

/// Fill in and validate video input
pub fn video_input(
    title: Option<String>,
    url: Option<String>,
    order: Option<u32>,
) -> Result<NewVideo> {
    let theme = ColorfulTheme::default();

    let title = match title {
        Some(title) => title,
        None => Input::with_theme(&theme)
            .with_prompt("Title")
            .interact_text()?,
    };
    let url = match url {
        Some(url) => url,
        None => Input::with_theme(&theme)
            .with_prompt("YouTube URL")
            .interact_text()?,
    };
    let order: u32 = match order {
        Some(order) => order,
        None => Input::with_theme(&theme)
            .with_prompt("Order")
            .default(1)
            .interact_text()?,
    };

    Ok(NewVideo::from_input(&title, &url, order)?)
}
