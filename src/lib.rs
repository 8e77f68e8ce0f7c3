//! TalentDesk: a client for a multi-tenant recruitment-management backend.
//!
//! All business logic (AI resume parsing, candidate matching, authentication,
//! persistence) lives behind the backend's REST API. This crate provides:
//!
//! - a typed API client facade with bearer-token handling ([`api`])
//! - the bulk resume-upload job monitor: batch submission, fixed-cadence
//!   status polling, pause/resume control actions ([`monitor`])
//! - local session persistence so a restart can resume observing an
//!   in-flight job ([`storage`])
//! - presentation helpers: result classification, progress, row action
//!   menus, CSV export ([`ui`])
//! - the CLI wiring ([`commands`])

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod monitor;
pub mod storage;
pub mod ui;
