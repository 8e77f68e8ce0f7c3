//! Data-driven row action menus.
//!
//! Each table row carries a variable list of commands; the list is plain
//! data consumed by one generic renderer. Which commands appear depends on
//! the record's state and the user's role, never on the renderer.

use crate::api::auth::Role;
use crate::api::bulk::JobStatus;

/// Visual weight of a menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionStyle {
    Default,
    Primary,
    Danger,
}

/// What a menu entry does when selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    View,
    Edit,
    Delete,
    ScheduleInterview,
    ViewMatches,
    AssignRecruiter,
    PauseJob,
    ResumeJob,
    StartNewBatch,
}

/// One entry in a row's action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub style: ActionStyle,
    pub command: MenuCommand,
}

impl MenuItem {
    const fn new(label: &'static str, style: ActionStyle, command: MenuCommand) -> Self {
        Self {
            label,
            style,
            command,
        }
    }
}

/// Renders a menu as a single hint line, e.g. `View | Edit | Delete`.
pub fn render_menu(items: &[MenuItem]) -> String {
    items
        .iter()
        .map(|item| item.label)
        .collect::<Vec<_>>()
        .join(" | ")
}

// ─────────────────────────────────────────────────────────────────────────────
// Per-row menus
// ─────────────────────────────────────────────────────────────────────────────

/// Actions for the tracked bulk job, derived from the latest observed status.
///
/// Pause is offered only while `processing`, resume only while `paused`, and
/// a terminal job offers only starting over. The offer is a UI affordance:
/// the request itself carries no precondition and the backend may still
/// reject it.
pub fn job_actions(status: JobStatus) -> Vec<MenuItem> {
    match status {
        JobStatus::Processing => vec![MenuItem::new(
            "Pause",
            ActionStyle::Default,
            MenuCommand::PauseJob,
        )],
        JobStatus::Paused => vec![MenuItem::new(
            "Resume",
            ActionStyle::Primary,
            MenuCommand::ResumeJob,
        )],
        JobStatus::Completed | JobStatus::Failed => vec![MenuItem::new(
            "New Bulk Upload",
            ActionStyle::Primary,
            MenuCommand::StartNewBatch,
        )],
        JobStatus::Pending => vec![],
    }
}

/// Actions for a candidate row.
pub fn candidate_actions() -> Vec<MenuItem> {
    vec![
        MenuItem::new("View", ActionStyle::Default, MenuCommand::View),
        MenuItem::new("Edit", ActionStyle::Default, MenuCommand::Edit),
        MenuItem::new(
            "Schedule Interview",
            ActionStyle::Primary,
            MenuCommand::ScheduleInterview,
        ),
        MenuItem::new("Delete", ActionStyle::Danger, MenuCommand::Delete),
    ]
}

/// Actions for a requirement row. Assignment is an admin-only command.
pub fn requirement_actions(role: Role) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::new("View", ActionStyle::Default, MenuCommand::View),
        MenuItem::new("Matches", ActionStyle::Primary, MenuCommand::ViewMatches),
    ];

    if role == Role::Admin {
        items.push(MenuItem::new(
            "Edit",
            ActionStyle::Default,
            MenuCommand::Edit,
        ));
        items.push(MenuItem::new(
            "Assign Recruiter",
            ActionStyle::Default,
            MenuCommand::AssignRecruiter,
        ));
        items.push(MenuItem::new(
            "Delete",
            ActionStyle::Danger,
            MenuCommand::Delete,
        ));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(items: &[MenuItem]) -> Vec<MenuCommand> {
        items.iter().map(|i| i.command).collect()
    }

    #[test]
    fn processing_job_offers_pause_only() {
        let items = job_actions(JobStatus::Processing);
        assert_eq!(commands(&items), vec![MenuCommand::PauseJob]);
    }

    #[test]
    fn paused_job_offers_resume_only() {
        let items = job_actions(JobStatus::Paused);
        assert_eq!(commands(&items), vec![MenuCommand::ResumeJob]);
    }

    #[test]
    fn terminal_jobs_offer_start_new_and_no_controls() {
        for status in [JobStatus::Completed, JobStatus::Failed] {
            let items = job_actions(status);
            assert_eq!(commands(&items), vec![MenuCommand::StartNewBatch]);
            assert!(!commands(&items).contains(&MenuCommand::PauseJob));
            assert!(!commands(&items).contains(&MenuCommand::ResumeJob));
        }
    }

    #[test]
    fn pending_job_offers_nothing() {
        assert!(job_actions(JobStatus::Pending).is_empty());
    }

    #[test]
    fn requirement_menu_varies_by_role() {
        let admin = commands(&requirement_actions(Role::Admin));
        let recruiter = commands(&requirement_actions(Role::Recruiter));

        assert!(admin.contains(&MenuCommand::AssignRecruiter));
        assert!(admin.contains(&MenuCommand::Delete));
        assert!(!recruiter.contains(&MenuCommand::AssignRecruiter));
        assert!(!recruiter.contains(&MenuCommand::Delete));
        assert!(recruiter.contains(&MenuCommand::ViewMatches));
    }

    #[test]
    fn render_joins_labels() {
        let items = candidate_actions();
        assert_eq!(
            render_menu(&items),
            "View | Edit | Schedule Interview | Delete"
        );
    }
}
