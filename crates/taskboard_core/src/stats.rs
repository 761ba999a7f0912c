use crate::model::Task;

/// Share of active and completed tasks, as percentages of the whole list.
///
/// Built fresh on every call to [`compute_stats`]; an empty or absent input
/// reports zero on both axes instead of failing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsResult {
    pub active_tasks_percent: f32,
    pub completed_tasks_percent: f32,
}

impl StatsResult {
    pub const ZERO: Self = Self {
        active_tasks_percent: 0.0,
        completed_tasks_percent: 0.0,
    };
}

pub fn compute_stats(tasks: Option<&[Task]>) -> StatsResult {
    let tasks = match tasks {
        Some(tasks) if !tasks.is_empty() => tasks,
        _ => return StatsResult::ZERO,
    };

    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.is_completed()).count();
    let active = total - completed;

    StatsResult {
        active_tasks_percent: 100.0 * active as f32 / total as f32,
        completed_tasks_percent: 100.0 * completed as f32 / total as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::{StatsResult, compute_stats};
    use crate::model::{Task, TaskStatus};

    const EPSILON: f32 = 1e-3;

    fn task(id: &str, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: "title".to_string(),
            description: "desc".to_string(),
            status: if completed {
                TaskStatus::Completed
            } else {
                TaskStatus::Active
            },
            created_at: "2026-01-10T00:00:00Z".to_string(),
            completed_at: None,
        }
    }

    #[test]
    fn no_completed_returns_hundred_zero() {
        let tasks = vec![task("task-1", false)];

        let result = compute_stats(Some(&tasks));

        assert_eq!(result.active_tasks_percent, 100.0);
        assert_eq!(result.completed_tasks_percent, 0.0);
    }

    #[test]
    fn no_active_returns_zero_hundred() {
        let tasks = vec![task("task-1", true)];

        let result = compute_stats(Some(&tasks));

        assert_eq!(result.active_tasks_percent, 0.0);
        assert_eq!(result.completed_tasks_percent, 100.0);
    }

    #[test]
    fn empty_list_returns_zero_zero() {
        let result = compute_stats(Some(&[]));

        assert_eq!(result, StatsResult::ZERO);
    }

    #[test]
    fn absent_input_returns_zero_zero() {
        let result = compute_stats(None);

        assert_eq!(result, StatsResult::ZERO);
    }

    #[test]
    fn three_completed_two_active_returns_forty_sixty() {
        let tasks = vec![
            task("task-1", true),
            task("task-2", true),
            task("task-3", true),
            task("task-4", false),
            task("task-5", false),
        ];

        let result = compute_stats(Some(&tasks));

        assert_eq!(result.active_tasks_percent, 40.0);
        assert_eq!(result.completed_tasks_percent, 60.0);
    }

    #[test]
    fn percentages_sum_to_hundred_for_non_empty_input() {
        for completed in 0..=7 {
            let tasks: Vec<Task> = (0..7)
                .map(|index| task(&format!("task-{index}"), index < completed))
                .collect();

            let result = compute_stats(Some(&tasks));
            let sum = result.active_tasks_percent + result.completed_tasks_percent;

            assert!((sum - 100.0).abs() < EPSILON, "sum was {sum}");
            assert!((0.0..=100.0).contains(&result.active_tasks_percent));
            assert!((0.0..=100.0).contains(&result.completed_tasks_percent));
        }
    }

    #[test]
    fn duplicates_are_counted_independently() {
        let tasks = vec![task("task-1", true), task("task-1", true), task("task-1", false)];

        let result = compute_stats(Some(&tasks));

        assert!((result.completed_tasks_percent - 200.0 / 3.0).abs() < EPSILON);
    }

    #[test]
    fn result_is_order_independent() {
        let mut tasks = vec![
            task("task-1", true),
            task("task-2", false),
            task("task-3", true),
            task("task-4", false),
        ];

        let forward = compute_stats(Some(&tasks));
        tasks.reverse();
        let reversed = compute_stats(Some(&tasks));

        assert_eq!(forward, reversed);
    }

    #[test]
    fn repeated_calls_yield_identical_results() {
        let tasks = vec![task("task-1", true), task("task-2", false)];

        assert_eq!(compute_stats(Some(&tasks)), compute_stats(Some(&tasks)));
    }
}
