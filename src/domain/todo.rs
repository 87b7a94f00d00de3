use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TodoId(pub Uuid);

impl Default for TodoId {
    fn default() -> Self { Self(Uuid::new_v4()) }
}

/// One task record. `description` is always non-empty and trimmed;
/// `due_date` and `priority` are present when the collection's policy
/// collects them. `priority` is an open label (High/Medium/Low by
/// convention) rather than a closed enum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoEntry {
    pub id: TodoId,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User-entered candidate values for a new entry, not yet validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoDraft {
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<String>,
}
