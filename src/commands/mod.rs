//! CLI entry points.
//!
//! Each subcommand group lives in its own module; this module owns argument
//! parsing, context construction, and dispatch.

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::api::ApiClient;
use crate::config::Settings;
use crate::error::AppError;
use crate::storage::{Database, SessionStore};

pub mod auth;
pub mod bulk;
pub mod directory;
pub mod interview;

/// Shared handles for command handlers.
pub struct AppContext {
    pub api: ApiClient,
    pub session: SessionStore,
    pub settings: Settings,
}

#[derive(Parser)]
#[command(
    name = "talentdesk",
    about = "Client for the recruitment-management backend",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        /// Password; prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the current user's profile
    Whoami,
    /// Change the current user's password
    Passwd {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
    /// Bulk resume upload and job monitoring
    Bulk {
        #[command(subcommand)]
        command: bulk::BulkCommand,
    },
    /// Interview scheduling
    Interviews {
        #[command(subcommand)]
        command: interview::InterviewCommand,
    },
    /// Candidate directory
    Candidates {
        #[command(subcommand)]
        command: directory::CandidateCommand,
    },
    /// Company directory
    Companies {
        #[command(subcommand)]
        command: directory::CompanyCommand,
    },
    /// Recruiter directory
    Recruiters {
        #[command(subcommand)]
        command: directory::RecruiterCommand,
    },
    /// Requirement directory
    Requirements {
        #[command(subcommand)]
        command: directory::RequirementCommand,
    },
}

/// Parses arguments, builds the context, and runs the selected command.
pub async fn run(settings: Settings) -> Result<(), AppError> {
    let cli = Cli::parse();

    let db = Database::init(settings.db_path()).await?;
    let session = SessionStore::new(Arc::new(db));

    let api = ApiClient::new(&settings.api_base_url)?;
    if let Some(token) = session.auth_token().await? {
        api.set_token(&token).await;
    }

    let ctx = AppContext {
        api,
        session,
        settings,
    };

    match cli.command {
        Command::Login { email, password } => auth::login(&ctx, &email, password).await,
        Command::Logout => auth::logout(&ctx).await,
        Command::Whoami => auth::whoami(&ctx).await,
        Command::Passwd {
            current,
            new,
            confirm,
        } => auth::change_password(&ctx, &current, &new, &confirm).await,
        Command::Bulk { command } => bulk::run(&ctx, command).await,
        Command::Interviews { command } => interview::run(&ctx, command).await,
        Command::Candidates { command } => directory::run_candidates(&ctx, command).await,
        Command::Companies { command } => directory::run_companies(&ctx, command).await,
        Command::Recruiters { command } => directory::run_recruiters(&ctx, command).await,
        Command::Requirements { command } => directory::run_requirements(&ctx, command).await,
    }
}
