//! File-backed stores for users and submissions.
//!
//! Both stores load their whole collection at startup and rewrite the whole
//! file on every mutation, synchronously, before the handler responds. There
//! is no incremental persistence; a write failure surfaces as a `StoreError`
//! and the triggering request is reported as failed.

pub mod submissions;
pub mod users;

pub use submissions::{StatusCounts, SubmissionStore};
pub use users::{Role, User, UserStore};

use crate::domain::LifecycleError;

/// Errors surfaced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("A user with this id already exists")]
    DuplicateUser,
    #[error("Submission {0} not found")]
    NotFound(u64),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("Failed to read store file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode store file: {0}")]
    Serde(#[from] serde_json::Error),
}
