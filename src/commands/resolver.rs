use crate::client::Task;

/// Find the task a user referred to by title.
///
/// Case-insensitive exact equality only — fuzzy or partial matching is a
/// deliberate non-feature, since ambiguous matches change user-visible
/// behavior. Duplicate titles resolve to the first task in backend list
/// order. `None` means "task not found", which callers render as a normal
/// reply, never an error.
pub fn resolve<'a>(tasks: &'a [Task], title_fragment: &str) -> Option<&'a Task> {
    let wanted = title_fragment.trim().to_lowercase();
    tasks.iter().find(|task| task.title.to_lowercase() == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.into(),
            is_completed: false,
        }
    }

    #[test]
    fn exact_match_case_insensitive() {
        let tasks = vec![task(1, "Buy Milk")];
        assert_eq!(resolve(&tasks, "buy milk").map(|t| t.id), Some(1));
    }

    #[test]
    fn no_match_returns_none() {
        let tasks = vec![task(1, "Buy Milk")];
        assert!(resolve(&tasks, "buy bread").is_none());
    }

    #[test]
    fn partial_titles_never_match() {
        let tasks = vec![task(1, "Buy Milk")];
        assert!(resolve(&tasks, "buy").is_none());
        assert!(resolve(&tasks, "buy milk today").is_none());
    }

    #[test]
    fn duplicates_resolve_to_first_in_list_order() {
        let tasks = vec![task(3, "buy milk"), task(1, "Buy Milk")];
        assert_eq!(resolve(&tasks, "buy milk").map(|t| t.id), Some(3));
    }

    #[test]
    fn empty_task_list() {
        assert!(resolve(&[], "buy milk").is_none());
    }

    #[test]
    fn fragment_whitespace_is_ignored() {
        let tasks = vec![task(1, "Buy Milk")];
        assert_eq!(resolve(&tasks, "  Buy Milk  ").map(|t| t.id), Some(1));
    }
}
