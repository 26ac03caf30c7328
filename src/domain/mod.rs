pub mod deadline;
pub mod submission;

pub use deadline::classify;
pub use submission::{LateAction, LifecycleError, Status, Submission};
