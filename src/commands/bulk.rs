//! Bulk upload commands: submit a batch, watch an in-flight job, and send
//! pause/resume control actions.

use std::path::PathBuf;
use std::time::Duration;

use clap::Subcommand;

use crate::api::bulk::{self, BulkJobSnapshot};
use crate::commands::AppContext;
use crate::error::AppError;
use crate::monitor::view;
use crate::monitor::{JobMonitor, MonitorState, PendingBatch, PendingFile, PollOutcome};
use crate::ui::menu::{self, render_menu};

#[derive(Subcommand)]
pub enum BulkCommand {
    /// Submit PDF resumes as a new bulk job (non-PDF files are skipped)
    Upload {
        /// Files to upload
        files: Vec<PathBuf>,
        /// Keep polling until the job finishes
        #[arg(long)]
        watch: bool,
    },
    /// Poll the stored in-flight job until it finishes
    Watch,
    /// Print one status snapshot of the stored in-flight job
    Status,
    /// Request a pause for the stored in-flight job
    Pause,
    /// Request a resume for the stored in-flight job
    Resume,
    /// List all bulk jobs
    List,
}

pub async fn run(ctx: &AppContext, command: BulkCommand) -> Result<(), AppError> {
    match command {
        BulkCommand::Upload { files, watch } => upload(ctx, files, watch).await,
        BulkCommand::Watch => watch(ctx).await,
        BulkCommand::Status => status(ctx).await,
        BulkCommand::Pause => pause(ctx).await,
        BulkCommand::Resume => resume(ctx).await,
        BulkCommand::List => list(ctx).await,
    }
}

fn new_monitor(ctx: &AppContext) -> JobMonitor {
    JobMonitor::new(
        ctx.api.clone(),
        ctx.session.clone(),
        Duration::from_secs(ctx.settings.poll_interval_secs),
    )
}

/// Builds a pending batch from disk paths. Non-PDF names are dropped
/// silently at selection time, matching the drop-zone behavior.
async fn collect_batch(paths: &[PathBuf]) -> Result<PendingBatch, AppError> {
    let mut batch = PendingBatch::new();

    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        if !crate::monitor::batch::is_accepted_name(name) {
            continue;
        }
        batch.push(PendingFile::from_path(path).await?);
    }

    Ok(batch)
}

async fn upload(ctx: &AppContext, paths: Vec<PathBuf>, watch: bool) -> Result<(), AppError> {
    let mut monitor = new_monitor(ctx);
    if monitor.resume_from_storage().await? {
        return Err(AppError::Validation(
            "A bulk upload job is already in flight; run `talentdesk bulk watch` or wait for it to finish".into(),
        ));
    }

    let mut batch = collect_batch(&paths).await?;
    println!("{} file(s) selected", batch.len());

    match monitor.submit_batch(&mut batch).await? {
        Some(job_id) => println!("Created bulk job {job_id}"),
        None => {
            println!("Nothing to upload.");
            return Ok(());
        }
    }

    if watch {
        follow(&mut monitor).await?;
    }
    Ok(())
}

async fn watch(ctx: &AppContext) -> Result<(), AppError> {
    let mut monitor = new_monitor(ctx);
    if !monitor.resume_from_storage().await? {
        println!("No bulk upload job is being tracked.");
        return Ok(());
    }

    follow(&mut monitor).await
}

/// Polls to completion, printing every fresh snapshot.
async fn follow(monitor: &mut JobMonitor) -> Result<(), AppError> {
    let final_state = monitor.run(|snapshot| print_snapshot(snapshot)).await?;

    match final_state {
        MonitorState::Terminal(job_id) => {
            println!("Job {job_id} finished.");
        }
        MonitorState::NoJob => {
            println!("Lost track of the job; it was abandoned after repeated fetch failures.");
        }
        MonitorState::Polling(_) => {
            println!("Stopped watching; the job is still running.");
        }
    }
    Ok(())
}

async fn status(ctx: &AppContext) -> Result<(), AppError> {
    let mut monitor = new_monitor(ctx);
    if !monitor.resume_from_storage().await? {
        println!("No bulk upload job is being tracked.");
        return Ok(());
    }

    match monitor.poll_once().await? {
        PollOutcome::Updated | PollOutcome::Terminal(_) => {
            if let Some(snapshot) = monitor.snapshot() {
                print_snapshot(snapshot);
            }
        }
        PollOutcome::Failed { .. } | PollOutcome::Abandoned => {
            println!("Could not fetch the job status.");
        }
        PollOutcome::Idle | PollOutcome::Stale => {}
    }
    Ok(())
}

async fn pause(ctx: &AppContext) -> Result<(), AppError> {
    let mut monitor = new_monitor(ctx);
    if !monitor.resume_from_storage().await? {
        println!("No bulk upload job is being tracked.");
        return Ok(());
    }

    monitor.pause().await?;
    println!("Pause requested; the next poll will reflect it.");
    Ok(())
}

async fn resume(ctx: &AppContext) -> Result<(), AppError> {
    let mut monitor = new_monitor(ctx);
    if !monitor.resume_from_storage().await? {
        println!("No bulk upload job is being tracked.");
        return Ok(());
    }

    monitor.resume().await?;
    println!("Resume requested; the next poll will reflect it.");
    Ok(())
}

async fn list(ctx: &AppContext) -> Result<(), AppError> {
    let jobs = bulk::list_jobs(&ctx.api).await?;

    if jobs.is_empty() {
        println!("No bulk jobs yet.");
        return Ok(());
    }

    for job in jobs {
        println!(
            "#{}  {}  {}/{} processed  {} failed  ${}  {}",
            job.id,
            job.status.as_str().to_uppercase(),
            job.processed,
            job.total_files,
            job.failed_count,
            job.total_cost_usd,
            job.created_at
        );
    }
    Ok(())
}

fn print_snapshot(snapshot: &BulkJobSnapshot) {
    println!("{}", view::summary_line(snapshot));

    for row in view::result_rows(snapshot) {
        println!(
            "  {:>3}. {}  [{}]  {}  {}  {}",
            row.index, row.file_name, row.label, row.candidate, row.email, row.cost
        );
        if let Some(error) = &row.error {
            println!("       error: {error}");
        }
        if !row.warnings.is_empty() {
            println!("       warnings: {}", row.warnings.join(" | "));
        }
    }

    let pending = view::pending_file_names(snapshot);
    if !pending.is_empty() {
        println!("  pending: {}", pending.join(", "));
    }

    let actions = menu::job_actions(snapshot.status);
    if !actions.is_empty() {
        println!("  actions: {}", render_menu(&actions));
    }
}
