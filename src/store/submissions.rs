//! Submission store: an ordered sequence of submission records, persisted as
//! a JSON array with RFC 3339 timestamps.
//!
//! Records are addressed by a stable `id` assigned at creation, never by
//! position, so deleting one record cannot redirect an in-flight action onto
//! a neighbour.

use crate::domain::{LifecycleError, Status, Submission};
use crate::store::StoreError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Aggregate submission counts by status, as served by the report endpoint.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub pending: usize,
    pub late: usize,
    pub graded: usize,
    pub rejected: usize,
}

struct Inner {
    records: Vec<Submission>,
    next_id: u64,
}

/// Owns the submission sequence behind a single mutation entry point.
///
/// Every mutating call rewrites the backing file before returning; a failed
/// write rolls the in-memory change back and surfaces the error.
pub struct SubmissionStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl SubmissionStore {
    /// Loads the store from `path`. A missing file yields an empty store.
    /// The id counter resumes above the highest persisted id.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records: Vec<Submission> = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Vec::new()
        };
        let next_id = records.iter().map(|s| s.id).max().map_or(1, |max| max + 1);
        Ok(Self {
            path,
            inner: Mutex::new(Inner { records, next_id }),
        })
    }

    /// Snapshot of every record, in submission order.
    pub fn all(&self) -> Vec<Submission> {
        self.lock().records.clone()
    }

    /// Snapshot of one student's records.
    pub fn for_student(&self, student: &str) -> Vec<Submission> {
        self.lock()
            .records
            .iter()
            .filter(|s| s.student == student)
            .cloned()
            .collect()
    }

    /// Looks up a record by id.
    pub fn get(&self, id: u64) -> Option<Submission> {
        self.lock().records.iter().find(|s| s.id == id).cloned()
    }

    /// Creates a submission classified against `deadline`, appends it and
    /// persists the store.
    pub fn create(
        &self,
        student: &str,
        assignment: &str,
        filename: &str,
        submitted_at: DateTime<Utc>,
        deadline: DateTime<Utc>,
    ) -> Result<Submission, StoreError> {
        let mut inner = self.lock();
        let id = inner.next_id;
        let submission = Submission::new(id, student, assignment, filename, submitted_at, deadline);
        inner.records.push(submission.clone());
        match Self::persist(&self.path, &inner.records) {
            Ok(()) => {
                inner.next_id += 1;
                Ok(submission)
            }
            Err(e) => {
                inner.records.pop();
                Err(e)
            }
        }
    }

    /// Applies a lifecycle transition to the record with the given id and
    /// persists the store.
    ///
    /// The transition closure must leave the record untouched when it fails;
    /// all [`Submission`] methods uphold that.
    pub fn update<F>(&self, id: u64, transition: F) -> Result<Submission, StoreError>
    where
        F: FnOnce(&mut Submission) -> Result<(), LifecycleError>,
    {
        let mut inner = self.lock();
        let index = inner
            .records
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let before = inner.records[index].clone();
        transition(&mut inner.records[index])?;

        match Self::persist(&self.path, &inner.records) {
            Ok(()) => Ok(inner.records[index].clone()),
            Err(e) => {
                inner.records[index] = before;
                Err(e)
            }
        }
    }

    /// Removes the record with the given id and persists the store.
    pub fn remove(&self, id: u64) -> Result<(), StoreError> {
        let mut inner = self.lock();
        let index = inner
            .records
            .iter()
            .position(|s| s.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = inner.records.remove(index);
        match Self::persist(&self.path, &inner.records) {
            Ok(()) => Ok(()),
            Err(e) => {
                inner.records.insert(index, removed);
                Err(e)
            }
        }
    }

    /// Aggregate counts by status. `pending` counts `Submitted` records.
    pub fn counts(&self) -> StatusCounts {
        let inner = self.lock();
        let mut counts = StatusCounts {
            total: inner.records.len(),
            ..Default::default()
        };
        for s in &inner.records {
            match s.status {
                Status::Submitted => counts.pending += 1,
                Status::Late => counts.late += 1,
                Status::Graded => counts.graded += 1,
                Status::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("submission store lock poisoned")
    }

    fn persist(path: &Path, records: &[Submission]) -> Result<(), StoreError> {
        fs::write(path, serde_json::to_string(records)?)?;
        Ok(())
    }
}
