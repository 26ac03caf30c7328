//! Submission records and the grading lifecycle state machine.
//!
//! A submission moves between four states:
//!
//! ```text
//! Submitted --grade--------------> Graded
//! Late ------grade(accept)-------> Graded   (late penalty applied)
//! Late ------grade(reject)-------> Rejected (grade forced to 0)
//! Graded / Rejected --reopen-----> original status (grade/feedback cleared)
//! ```
//!
//! Every other transition is a guard error. The machine never auto-transitions;
//! each move is an explicit instructor action.

use crate::domain::deadline::classify;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Grading status of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Submitted,
    Late,
    Graded,
    Rejected,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Submitted => "Submitted",
            Status::Late => "Late",
            Status::Graded => "Graded",
            Status::Rejected => "Rejected",
        };
        write!(f, "{s}")
    }
}

/// Instructor decision for a late submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LateAction {
    Accept,
    Reject,
}

/// A transition was attempted that the state machine does not permit.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("Submission is already {0}; reopen it before grading again")]
    AlreadyFinal(Status),
    #[error("Only late submissions can be rejected")]
    RejectNotLate,
    #[error("A late submission requires a late_action (accept or reject)")]
    LateActionRequired,
    #[error("Only graded or rejected submissions can be reopened")]
    NotReopenable,
}

/// One student's uploaded assignment artifact with grading state.
///
/// `id` is a stable, monotonically increasing identifier assigned by the
/// store at creation. All mutating operations address submissions by this id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub student: String,
    pub assignment: String,
    pub filename: String,
    pub status: Status,
    pub grade: Option<i32>,
    pub feedback: Option<String>,
    pub submitted_at: DateTime<Utc>,
    /// Status held before grading, recorded so a reopen can restore it.
    /// Absent on records written before this field existed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_status: Option<Status>,
}

impl Submission {
    /// Creates a new submission, classified against the deadline.
    pub fn new(
        id: u64,
        student: impl Into<String>,
        assignment: impl Into<String>,
        filename: impl Into<String>,
        submitted_at: DateTime<Utc>,
        deadline: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            student: student.into(),
            assignment: assignment.into(),
            filename: filename.into(),
            status: classify(submitted_at, deadline),
            grade: None,
            feedback: None,
            submitted_at,
            original_status: None,
        }
    }

    /// Applies an instructor grading action.
    ///
    /// - From `Submitted`: grade recorded as-is; a `late_action` supplied here
    ///   is ignored.
    /// - From `Late` with `Accept`: `penalty` points deducted, floored at 0.
    /// - From `Late` with `Reject`: grade forced to 0, feedback left untouched.
    /// - From `Late` with no action: error, the caller must decide.
    /// - From `Graded`/`Rejected`: error, reopen first.
    ///
    /// No upper bound is applied to `grade`; a value above 100 is stored
    /// as given.
    pub fn grade(
        &mut self,
        grade: i32,
        feedback: Option<String>,
        late_action: Option<LateAction>,
        penalty: i32,
    ) -> Result<(), LifecycleError> {
        match self.status {
            Status::Submitted => {
                self.original_status = Some(Status::Submitted);
                self.status = Status::Graded;
                self.grade = Some(grade);
                self.feedback = feedback;
                Ok(())
            }
            Status::Late => match late_action {
                Some(LateAction::Accept) => {
                    self.original_status = Some(Status::Late);
                    self.status = Status::Graded;
                    // Saturating: the caller only guarantees a parseable
                    // integer, so i32::MIN must not wrap past the floor.
                    self.grade = Some(grade.saturating_sub(penalty).max(0));
                    self.feedback = feedback;
                    Ok(())
                }
                Some(LateAction::Reject) => self.reject(),
                None => Err(LifecycleError::LateActionRequired),
            },
            Status::Graded | Status::Rejected => Err(LifecycleError::AlreadyFinal(self.status)),
        }
    }

    /// Rejects a late submission outright: grade forced to 0, feedback
    /// untouched. Only valid while the submission is `Late`.
    pub fn reject(&mut self) -> Result<(), LifecycleError> {
        if self.status != Status::Late {
            return Err(LifecycleError::RejectNotLate);
        }
        self.original_status = Some(Status::Late);
        self.status = Status::Rejected;
        self.grade = Some(0);
        Ok(())
    }

    /// Reverts a graded or rejected submission to its pre-grading status and
    /// clears grade and feedback.
    ///
    /// Records written before `original_status` existed are re-classified
    /// against the deadline instead.
    pub fn reopen(&mut self, deadline: DateTime<Utc>) -> Result<(), LifecycleError> {
        if !matches!(self.status, Status::Graded | Status::Rejected) {
            return Err(LifecycleError::NotReopenable);
        }
        self.status = match self.original_status {
            Some(status) => status,
            None => classify(self.submitted_at, deadline),
        };
        self.grade = None;
        self.feedback = None;
        Ok(())
    }
}
