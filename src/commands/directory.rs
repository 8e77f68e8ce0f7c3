//! Directory commands: candidates, companies, recruiters, requirements.

use std::path::PathBuf;

use clap::Subcommand;

use crate::api::auth::Role;
use crate::api::directory::{self, CompanyDraft, RequirementDraft};
use crate::commands::AppContext;
use crate::error::AppError;
use crate::ui::export;
use crate::ui::menu::{self, render_menu};

// ─────────────────────────────────────────────────────────────────────────────
// Candidates
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub enum CandidateCommand {
    /// List candidates, optionally filtered by a search term
    List {
        #[arg(long)]
        search: Option<String>,
        /// Write the listing to a CSV file
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Show one candidate
    Show { id: i64 },
    /// Delete a candidate
    Delete { id: i64 },
}

pub async fn run_candidates(ctx: &AppContext, command: CandidateCommand) -> Result<(), AppError> {
    match command {
        CandidateCommand::List { search, export } => {
            let candidates =
                directory::list_candidates(&ctx.api, search.as_deref()).await?;

            if candidates.is_empty() {
                println!("No candidates found.");
                return Ok(());
            }

            for candidate in &candidates {
                println!(
                    "#{}  {}  {}  {}",
                    candidate.id,
                    candidate.display_name(),
                    candidate.email.as_deref().unwrap_or("-"),
                    candidate.interested_position.as_deref().unwrap_or("-"),
                );
            }
            println!("  actions: {}", render_menu(&menu::candidate_actions()));

            if let Some(path) = export {
                export::export_candidates(&path, &candidates)?;
                println!("Exported {} candidate(s) to {}", candidates.len(), path.display());
            }
            Ok(())
        }
        CandidateCommand::Show { id } => {
            let candidate = directory::get_candidate(&ctx.api, id).await?;

            println!("{} (#{})", candidate.display_name(), candidate.id);
            if let Some(email) = &candidate.email {
                println!("Email: {email}");
            }
            if let Some(phone) = &candidate.phone {
                println!("Phone: {phone}");
            }
            if let Some(position) = &candidate.interested_position {
                println!("Position: {position}");
            }
            if let Some(location) = &candidate.current_location {
                println!("Location: {location}");
            }
            if !candidate.skills.is_empty() {
                println!("Skills: {}", candidate.skills.join(", "));
            }
            if let Some(recruiter) = &candidate.recruiter_name {
                println!("Recruiter: {recruiter}");
            }
            Ok(())
        }
        CandidateCommand::Delete { id } => {
            directory::delete_candidate(&ctx.api, id).await?;
            println!("Deleted candidate {id}.");
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Companies
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub enum CompanyCommand {
    /// List companies
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one company
    Show { id: i64 },
    /// Add a company
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        city: Option<String>,
    },
    /// Delete a company
    Delete { id: i64 },
}

pub async fn run_companies(ctx: &AppContext, command: CompanyCommand) -> Result<(), AppError> {
    match command {
        CompanyCommand::List { search } => {
            let companies = directory::list_companies(&ctx.api, search.as_deref()).await?;

            if companies.is_empty() {
                println!("No companies found.");
                return Ok(());
            }

            for company in companies {
                println!(
                    "#{}  {}  {}",
                    company.id,
                    company.name,
                    company.city.as_deref().unwrap_or("-"),
                );
            }
            Ok(())
        }
        CompanyCommand::Show { id } => {
            let company = directory::get_company(&ctx.api, id).await?;

            println!("{} (#{})", company.name, company.id);
            if let Some(website) = &company.website {
                println!("Website: {website}");
            }
            let contact = format!(
                "{} {}",
                company.contact_first_name.as_deref().unwrap_or(""),
                company.contact_last_name.as_deref().unwrap_or("")
            );
            if !contact.trim().is_empty() {
                println!("Contact: {}", contact.trim());
            }
            if let Some(city) = &company.city {
                println!("City: {city}");
            }
            Ok(())
        }
        CompanyCommand::Add {
            name,
            website,
            city,
        } => {
            let company = directory::create_company(
                &ctx.api,
                &CompanyDraft {
                    name,
                    website,
                    city,
                    ..Default::default()
                },
            )
            .await?;
            println!("Created company {} (#{})", company.name, company.id);
            Ok(())
        }
        CompanyCommand::Delete { id } => {
            directory::delete_company(&ctx.api, id).await?;
            println!("Deleted company {id}.");
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Recruiters
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub enum RecruiterCommand {
    /// List recruiters
    List,
    /// Add a recruiter account
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Delete a recruiter
    Delete { id: i64 },
}

pub async fn run_recruiters(ctx: &AppContext, command: RecruiterCommand) -> Result<(), AppError> {
    match command {
        RecruiterCommand::List => {
            let recruiters = directory::list_recruiters(&ctx.api).await?;

            if recruiters.is_empty() {
                println!("No recruiters found.");
                return Ok(());
            }

            for recruiter in recruiters {
                println!(
                    "#{}  {} {}  {}",
                    recruiter.id,
                    recruiter.first_name.as_deref().unwrap_or(""),
                    recruiter.last_name.as_deref().unwrap_or(""),
                    recruiter.email.as_deref().unwrap_or("-"),
                );
            }
            Ok(())
        }
        RecruiterCommand::Add {
            first_name,
            last_name,
            email,
            phone,
            password,
            confirm_password,
        } => {
            let recruiter = directory::create_recruiter(
                &ctx.api,
                &first_name,
                &last_name,
                &email,
                phone.as_deref(),
                &password,
                &confirm_password,
            )
            .await?;
            println!("Created recruiter #{}", recruiter.id);
            Ok(())
        }
        RecruiterCommand::Delete { id } => {
            directory::delete_recruiter(&ctx.api, id).await?;
            println!("Deleted recruiter {id}.");
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Requirements
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Subcommand)]
pub enum RequirementCommand {
    /// List requirements
    List {
        #[arg(long)]
        status: Option<String>,
    },
    /// Show one requirement
    Show { id: i64 },
    /// Add a requirement
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        company: Option<i64>,
        #[arg(long)]
        positions: Option<u32>,
        /// Comma-separated skills
        #[arg(long)]
        skills: Option<String>,
    },
    /// Show AI-matched candidates for a requirement
    Matches {
        id: i64,
        #[arg(long, default_value_t = 0)]
        skip: u64,
        #[arg(long, default_value_t = 10)]
        limit: u64,
    },
    /// Delete a requirement
    Delete { id: i64 },
}

/// Splits a comma- or newline-separated list into trimmed entries.
fn split_list(value: &str) -> Vec<String> {
    value
        .split([',', '\n'])
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

pub async fn run_requirements(
    ctx: &AppContext,
    command: RequirementCommand,
) -> Result<(), AppError> {
    match command {
        RequirementCommand::List { status } => {
            let requirements =
                directory::list_requirements(&ctx.api, status.as_deref()).await?;

            if requirements.is_empty() {
                println!("No requirements found.");
                return Ok(());
            }

            for requirement in requirements {
                println!(
                    "#{}  {}  company {}  {}",
                    requirement.id,
                    requirement.title,
                    requirement
                        .company_id
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "-".into()),
                    requirement.status.as_deref().unwrap_or("-"),
                );
            }

            let role = ctx
                .session
                .role()
                .await?
                .map(|raw| Role::parse(&raw))
                .unwrap_or(Role::Admin);
            println!("  actions: {}", render_menu(&menu::requirement_actions(role)));
            Ok(())
        }
        RequirementCommand::Show { id } => {
            let requirement = directory::get_requirement(&ctx.api, id).await?;

            println!("{} (#{})", requirement.title, requirement.id);
            if let Some(description) = &requirement.description {
                println!("{description}");
            }
            if !requirement.skills.is_empty() {
                println!("Skills: {}", requirement.skills.join(", "));
            }
            if let (Some(min), Some(max)) = (requirement.min_exp, requirement.max_exp) {
                println!("Experience: {min}-{max} years");
            }
            if let Some(positions) = requirement.positions {
                println!("Positions: {positions}");
            }
            Ok(())
        }
        RequirementCommand::Add {
            title,
            company,
            positions,
            skills,
        } => {
            let requirement = directory::create_requirement(
                &ctx.api,
                &RequirementDraft {
                    title,
                    company_id: company,
                    positions,
                    skills: skills.as_deref().map(split_list).unwrap_or_default(),
                    ..Default::default()
                },
            )
            .await?;
            println!("Created requirement #{}", requirement.id);
            Ok(())
        }
        RequirementCommand::Matches { id, skip, limit } => {
            let page = directory::matched_candidates(&ctx.api, id, skip, limit).await?;

            println!(
                "{} match(es), showing {}-{} of {}",
                page.summary.total_matches,
                page.pagination.skip + 1,
                page.pagination.skip + page.matches.len() as u64,
                page.pagination.total
            );

            for matched in &page.matches {
                println!(
                    "  {}  {:.1}%  {}",
                    matched
                        .candidate_id
                        .map(|c| format!("#{c}"))
                        .unwrap_or_else(|| "-".into()),
                    matched.overall_score,
                    matched.name.as_deref().unwrap_or("-"),
                );
            }
            Ok(())
        }
        RequirementCommand::Delete { id } => {
            directory::delete_requirement(&ctx.api, id).await?;
            println!("Deleted requirement {id}.");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(split_list("rust, sql,,  grpc "), vec!["rust", "sql", "grpc"]);
        assert_eq!(split_list("one\ntwo"), vec!["one", "two"]);
        assert!(split_list("  ").is_empty());
    }
}
