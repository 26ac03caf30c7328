//! Application state container shared across Axum route handlers.
//!
//! Holds the file-backed stores and the notifier. It is cheap to clone and is
//! passed into route handlers via Axum's `State<T>` extractor.

use crate::config;
use crate::services::Notifier;
use crate::store::{StoreError, SubmissionStore, UserStore};
use std::sync::Arc;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    users: Arc<UserStore>,
    submissions: Arc<SubmissionStore>,
    notifier: Notifier,
}

impl AppState {
    /// Loads both stores from the configured file paths and builds the
    /// notifier from configuration.
    pub fn init() -> Result<Self, StoreError> {
        Ok(Self {
            users: Arc::new(UserStore::load(config::users_file())?),
            submissions: Arc::new(SubmissionStore::load(config::submissions_file())?),
            notifier: Notifier::from_config(),
        })
    }

    pub fn users(&self) -> &UserStore {
        &self.users
    }

    pub fn submissions(&self) -> &SubmissionStore {
        &self.submissions
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
