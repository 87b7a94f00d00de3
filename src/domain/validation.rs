use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which draft fields `add` must see filled in. The description is always
/// required; the date and priority fields vary by deployment, so their
/// requiredness is configuration rather than a hard-coded shape.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FieldPolicy {
    pub require_due_date: bool,
    pub require_priority: bool,
}

impl FieldPolicy {
    /// Everything required: description, due date, and priority must all
    /// be supplied.
    pub fn strict() -> Self {
        Self { require_due_date: true, require_priority: true }
    }
}

/// Rejection of a draft. Recoverable: the collection is left untouched and
/// the message is meant to be shown to the user as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("a due date is required")]
    MissingDate,
    #[error("a priority is required")]
    MissingPriority,
}
