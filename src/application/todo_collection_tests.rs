#[cfg(test)]
mod tests {
    use super::super::todo_collection::{TodoCollection, TodoStore};
    use crate::domain::todo::TodoDraft;
    use crate::domain::validation::{FieldPolicy, ValidationError};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(description: &str) -> TodoDraft {
        TodoDraft { description: description.into(), due_date: None, priority: None }
    }

    fn full_draft(description: &str, due: &str, priority: &str) -> TodoDraft {
        TodoDraft {
            description: description.into(),
            due_date: Some(date(due)),
            priority: Some(priority.into()),
        }
    }

    #[test]
    fn add_prepends_newest_first() {
        let mut col = TodoCollection::default();
        col.add(draft("first")).unwrap();
        col.add(draft("second")).unwrap();
        let descriptions: Vec<_> = col.list().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, ["second", "first"]);
    }

    #[test]
    fn add_returns_created_entry() {
        let mut col = TodoCollection::default();
        let entry = col.add(full_draft("Buy milk", "2024-01-01", "High")).unwrap();
        assert_eq!(entry.description, "Buy milk");
        assert_eq!(entry.due_date, Some(date("2024-01-01")));
        assert_eq!(entry.priority.as_deref(), Some("High"));
        assert!(!entry.completed);
        assert_eq!(col.list()[0], entry);
    }

    #[test]
    fn add_trims_description_and_priority() {
        let mut col = TodoCollection::default();
        let entry = col.add(full_draft("  walk dog  ", "2024-01-03", " Medium ")).unwrap();
        assert_eq!(entry.description, "walk dog");
        assert_eq!(entry.priority.as_deref(), Some("Medium"));
    }

    #[test]
    fn blank_priority_stored_as_absent_when_optional() {
        let mut col = TodoCollection::default();
        let entry = col
            .add(TodoDraft { description: "x".into(), due_date: None, priority: Some("   ".into()) })
            .unwrap();
        assert_eq!(entry.priority, None);
    }

    #[test]
    fn whitespace_description_rejected_and_state_unchanged() {
        let mut col = TodoCollection::default();
        col.add(draft("keep me")).unwrap();
        let before: Vec<_> = col.list().to_vec();
        let err = col.add(draft("   \t")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyDescription);
        assert_eq!(col.list(), &before[..]);
    }

    #[test]
    fn due_date_required_only_under_strict_policy() {
        let mut lax = TodoCollection::default();
        assert!(lax.add(draft("no date")).is_ok());

        let mut strict = TodoCollection::new(FieldPolicy::strict());
        assert!(strict.add(full_draft("dated", "2024-01-01", "Low")).is_ok());
        let err = strict
            .add(TodoDraft { description: "no date".into(), due_date: None, priority: Some("Low".into()) })
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingDate);
        assert_eq!(strict.len(), 1);
    }

    #[test]
    fn priority_required_only_under_strict_policy() {
        let mut strict = TodoCollection::new(FieldPolicy::strict());
        let err = strict
            .add(TodoDraft {
                description: "x".into(),
                due_date: Some(date("2024-01-01")),
                priority: Some("  ".into()),
            })
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingPriority);
        assert!(strict.is_empty());
    }

    #[test]
    fn empty_description_reported_before_other_missing_fields() {
        let mut strict = TodoCollection::new(FieldPolicy::strict());
        let err = strict.add(draft("")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyDescription);
    }

    #[test]
    fn delete_removes_only_the_target_and_keeps_order() {
        let mut col = TodoCollection::default();
        col.add(draft("a")).unwrap();
        let b = col.add(draft("b")).unwrap();
        col.add(draft("c")).unwrap();

        col.delete(&b.id);

        let descriptions: Vec<_> = col.list().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, ["c", "a"]);
    }

    #[test]
    fn delete_is_idempotent_and_tolerates_unknown_ids() {
        let mut col = TodoCollection::default();
        let a = col.add(draft("a")).unwrap();
        col.delete(&a.id);
        col.delete(&a.id);
        col.delete(&crate::domain::todo::TodoId::default());
        assert!(col.is_empty());
    }

    #[test]
    fn ids_stay_stable_across_interleaved_mutations() {
        let mut col = TodoCollection::default();
        let a = col.add(draft("a")).unwrap();
        let b = col.add(draft("b")).unwrap();
        let c = col.add(draft("c")).unwrap();

        // Removing b shifts positions; ids must keep addressing the
        // originally intended entries.
        col.delete(&b.id);
        col.toggle_complete(&c.id);

        let toggled: Vec<_> = col.list().iter().filter(|e| e.completed).collect();
        assert_eq!(toggled.len(), 1);
        assert_eq!(toggled[0].id, c.id);

        col.delete(&a.id);
        assert_eq!(col.list().len(), 1);
        assert_eq!(col.list()[0].id, c.id);
    }

    #[test]
    fn ids_are_pairwise_distinct() {
        let mut col = TodoCollection::default();
        for i in 0..50 {
            col.add(draft(&format!("task {i}"))).unwrap();
        }
        let mut ids: Vec<_> = col.list().iter().map(|e| e.id.clone()).collect();
        ids.sort_by_key(|id| id.0);
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn toggle_complete_flips_and_ignores_unknown_ids() {
        let mut col = TodoCollection::default();
        let a = col.add(draft("a")).unwrap();

        col.toggle_complete(&a.id);
        assert!(col.list()[0].completed);
        col.toggle_complete(&a.id);
        assert!(!col.list()[0].completed);

        col.toggle_complete(&crate::domain::todo::TodoId::default());
        assert_eq!(col.len(), 1);
    }
}
