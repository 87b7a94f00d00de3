use crate::domain::todo::{TodoDraft, TodoEntry, TodoId};
use crate::domain::validation::{FieldPolicy, ValidationError};
use chrono::Utc;

/// The contract a rendering surface programs against: read the current
/// entries, and route every mutation through the validated operations.
/// Deletion and toggling address entries by id, never by row position.
pub trait TodoStore {
    fn add(&mut self, draft: TodoDraft) -> Result<TodoEntry, ValidationError>;
    fn delete(&mut self, id: &TodoId);
    fn toggle_complete(&mut self, id: &TodoId);
    fn list(&self) -> &[TodoEntry];
}

/// Authoritative in-memory list of entries for one view session, newest
/// first. Entries enter only through `add` and leave only through `delete`,
/// so the collection never holds an invalid or duplicate-id entry.
#[derive(Debug, Clone, Default)]
pub struct TodoCollection {
    policy: FieldPolicy,
    entries: Vec<TodoEntry>,
}

impl TodoCollection {
    pub fn new(policy: FieldPolicy) -> Self {
        Self { policy, entries: Vec::new() }
    }

    pub fn policy(&self) -> FieldPolicy { self.policy }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    fn validate(&self, draft: &TodoDraft) -> Result<(), ValidationError> {
        if draft.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if self.policy.require_due_date && draft.due_date.is_none() {
            return Err(ValidationError::MissingDate);
        }
        let priority_blank = draft
            .priority
            .as_deref()
            .map_or(true, |p| p.trim().is_empty());
        if self.policy.require_priority && priority_blank {
            return Err(ValidationError::MissingPriority);
        }
        Ok(())
    }
}

impl TodoStore for TodoCollection {
    fn add(&mut self, draft: TodoDraft) -> Result<TodoEntry, ValidationError> {
        self.validate(&draft)?;
        let now = Utc::now();
        let entry = TodoEntry {
            id: TodoId::default(),
            description: draft.description.trim().to_string(),
            due_date: draft.due_date,
            priority: draft
                .priority
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string),
            completed: false,
            created_at: now,
            updated_at: now,
        };
        tracing::debug!(id = %entry.id.0, description = %entry.description, "todo added");
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    fn delete(&mut self, id: &TodoId) {
        let before = self.entries.len();
        self.entries.retain(|e| &e.id != id);
        if self.entries.len() < before {
            tracing::debug!(id = %id.0, "todo deleted");
        }
    }

    fn toggle_complete(&mut self, id: &TodoId) {
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.id == id) {
            entry.completed = !entry.completed;
            entry.updated_at = Utc::now();
            tracing::debug!(id = %id.0, completed = entry.completed, "todo toggled");
        }
    }

    fn list(&self) -> &[TodoEntry] {
        &self.entries
    }
}
