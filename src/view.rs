use chrono::{DateTime, Local, LocalResult, NaiveDate, TimeZone};

use crate::task::Task;

/// The active view filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Pending,
    Done,
}

/// Tasks shown for a tab: pending tasks for `Pending`, completed tasks for
/// `Done`. The store's insertion order is the display order; there is no
/// re-sorting by priority or date.
pub fn visible_tasks(tasks: &[Task], tab: Tab) -> Vec<&Task> {
    let want_done = tab == Tab::Done;
    tasks.iter().filter(|t| t.done == want_done).collect()
}

/// A pending task is overdue once the local end of its due date
/// (23:59:59.999) lies strictly before `now`. Completed tasks and tasks
/// without a parsable due date are never overdue.
pub fn is_overdue(task: &Task, now: DateTime<Local>) -> bool {
    if task.done {
        return false;
    }
    let Some(due) = task.due_date.as_deref() else {
        return false;
    };
    let Ok(date) = NaiveDate::parse_from_str(due, "%Y-%m-%d") else {
        return false;
    };
    let Some(end_of_day) = date.and_hms_milli_opt(23, 59, 59, 999) else {
        return false;
    };
    match Local.from_local_datetime(&end_of_day) {
        LocalResult::Single(end) | LocalResult::Ambiguous(end, _) => end < now,
        // a DST gap swallowed the instant; call it not overdue
        LocalResult::None => false,
    }
}

/// The "no tasks" placeholder only makes sense on the active-work view:
/// true iff the Pending tab is selected and nothing is pending.
pub fn is_empty_state(tasks: &[Task], tab: Tab) -> bool {
    tab == Tab::Pending && visible_tasks(tasks, tab).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;
    use chrono::Utc;

    fn task(id: i64, done: bool, due_date: Option<&str>) -> Task {
        Task {
            id,
            text: format!("task {id}"),
            priority: Priority::Medium,
            start_date: "2024-06-01".to_string(),
            due_date: due_date.map(str::to_string),
            done,
            created_at: Utc::now(),
        }
    }

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn visible_tasks_splits_by_done_in_insertion_order() {
        let tasks = vec![
            task(1, false, None),
            task(2, true, None),
            task(3, false, None),
            task(4, true, None),
        ];
        let pending: Vec<i64> = visible_tasks(&tasks, Tab::Pending)
            .iter()
            .map(|t| t.id)
            .collect();
        let done: Vec<i64> = visible_tasks(&tasks, Tab::Done)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(pending, vec![1, 3]);
        assert_eq!(done, vec![2, 4]);
    }

    #[test]
    fn overdue_when_end_of_due_day_has_passed() {
        let now = local(2024, 6, 15, 10, 0);
        assert!(is_overdue(&task(1, false, Some("2024-06-14")), now));
    }

    #[test]
    fn not_overdue_on_the_due_date_itself() {
        let now = local(2024, 6, 15, 10, 0);
        assert!(!is_overdue(&task(1, false, Some("2024-06-15")), now));
    }

    #[test]
    fn overdue_just_after_end_of_day() {
        let now = local(2024, 6, 16, 0, 0);
        assert!(is_overdue(&task(1, false, Some("2024-06-15")), now));
    }

    #[test]
    fn done_tasks_are_never_overdue() {
        let now = local(2024, 6, 15, 10, 0);
        assert!(!is_overdue(&task(1, true, Some("1999-01-01")), now));
    }

    #[test]
    fn missing_or_unparsable_due_date_is_not_overdue() {
        let now = local(2024, 6, 15, 10, 0);
        assert!(!is_overdue(&task(1, false, None), now));
        assert!(!is_overdue(&task(2, false, Some("")), now));
        assert!(!is_overdue(&task(3, false, Some("yesterday")), now));
        assert!(!is_overdue(&task(4, false, Some("2024-13-40")), now));
        assert!(!is_overdue(&task(5, false, Some("06/14/2024")), now));
    }

    #[test]
    fn empty_state_only_on_pending_tab() {
        let none: Vec<Task> = Vec::new();
        assert!(is_empty_state(&none, Tab::Pending));
        assert!(!is_empty_state(&none, Tab::Done));

        let all_done = vec![task(1, true, None)];
        assert!(is_empty_state(&all_done, Tab::Pending));
        assert!(!is_empty_state(&all_done, Tab::Done));

        let some_pending = vec![task(1, false, None)];
        assert!(!is_empty_state(&some_pending, Tab::Pending));
        assert!(!is_empty_state(&some_pending, Tab::Done));
    }
}
