use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coursedesk::auth::{self, TokenStore};
use coursedesk::cli::{self, Cli, Commands};
use coursedesk::config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coursedesk=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Protected commands need a stored token that at least looks like a JWT
    if cli.command.requires_auth() {
        let config = config::load_config()?;
        let store = TokenStore::from_config(&config.auth);
        if !auth::edge_check(&store) {
            cli::error("No session token found. Run 'coursedesk login' first.");
            std::process::exit(1);
        }
    }

    match cli.command {
        Commands::Init => cli::commands::init().await,
        Commands::Login { email, password } => cli::commands::login(email, password).await,
        Commands::Logout => cli::commands::logout().await,
        Commands::Whoami => cli::commands::whoami().await,
        Commands::Create => cli::commands::create().await,
        Commands::Courses { action } => cli::commands::courses(action).await,
        Commands::Subcourses { action } => cli::commands::sub_courses(action).await,
        Commands::Videos { action } => cli::commands::videos(action).await,
        Commands::Youtube { action } => cli::commands::youtube(action).await,
    }
}
