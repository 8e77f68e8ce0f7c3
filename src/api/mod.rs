//! Backend REST API layer.
//!
//! Thin, strongly-typed wrappers over the recruitment backend. Key points:
//!
//! - **Single client facade** (`ApiClient`): bearer-token attachment,
//!   uniform error surfacing, safe request logging that never leaks tokens
//! - **No business logic**: parsing, matching, and persistence all live on
//!   the backend; these modules only shape requests and decode snapshots
//! - Non-2xx responses become `AppError::Api` with the body text verbatim

pub mod auth;
pub mod bulk;
pub mod client;
pub mod directory;
pub mod interviews;

pub use client::{ApiClient, LoggingMode};
