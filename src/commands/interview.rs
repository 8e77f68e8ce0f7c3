//! Interview scheduling commands.

use std::path::PathBuf;

use clap::Subcommand;

use crate::api::interviews::{
    self, InterviewMode, InterviewStatus, NewInterview,
};
use crate::commands::AppContext;
use crate::error::AppError;
use crate::ui::export;

#[derive(Subcommand)]
pub enum InterviewCommand {
    /// List interviews, optionally filtered by status
    List {
        /// scheduled | pending | completed | cancelled
        #[arg(long)]
        status: Option<String>,
        /// Write the listing to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Schedule an interview
    Schedule {
        #[arg(long)]
        candidate: i64,
        #[arg(long)]
        requirement: i64,
        /// Time slot, e.g. "2026-08-12 14:00"
        #[arg(long)]
        at: String,
        /// Telephonic | Online | "Face to Face"
        #[arg(long, default_value = "Telephonic")]
        mode: String,
        #[arg(long, default_value_t = 1)]
        tenant: i64,
    },
}

pub async fn run(ctx: &AppContext, command: InterviewCommand) -> Result<(), AppError> {
    match command {
        InterviewCommand::List { status, export } => list(ctx, status, export).await,
        InterviewCommand::Schedule {
            candidate,
            requirement,
            at,
            mode,
            tenant,
        } => schedule(ctx, candidate, requirement, &at, &mode, tenant).await,
    }
}

async fn list(
    ctx: &AppContext,
    status: Option<String>,
    export_path: Option<PathBuf>,
) -> Result<(), AppError> {
    let status = status
        .as_deref()
        .map(InterviewStatus::parse)
        .transpose()?;

    let interviews = interviews::list_interviews(&ctx.api, status).await?;

    if interviews.is_empty() {
        println!("No interviews scheduled yet.");
        return Ok(());
    }

    for interview in &interviews {
        println!(
            "#{}  candidate {}  requirement {}  {}  {}  {}",
            interview.id,
            interview.candidate_id,
            interview
                .requirement_id
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".into()),
            interview.scheduled_at.as_deref().unwrap_or("-"),
            interview.mode.map(|m| m.as_str()).unwrap_or("-"),
            interview.status.map(|s| s.as_str()).unwrap_or("-"),
        );
    }

    if let Some(path) = export_path {
        export::export_interviews(&path, &interviews)?;
        println!("Exported {} interview(s) to {}", interviews.len(), path.display());
    }
    Ok(())
}

async fn schedule(
    ctx: &AppContext,
    candidate_id: i64,
    requirement_id: i64,
    at: &str,
    mode: &str,
    tenant_id: i64,
) -> Result<(), AppError> {
    let scheduled_at = interviews::parse_scheduled_at(at)?;
    let mode = InterviewMode::parse(mode)?;

    let created = interviews::create_interview(
        &ctx.api,
        &NewInterview {
            tenant_id,
            candidate_id,
            requirement_id,
            scheduled_at,
            mode,
            status: InterviewStatus::Scheduled,
        },
    )
    .await?;

    println!(
        "Scheduled interview #{} for candidate {} at {} ({})",
        created.id,
        candidate_id,
        created.scheduled_at.as_deref().unwrap_or(at),
        mode.as_str()
    );
    Ok(())
}
