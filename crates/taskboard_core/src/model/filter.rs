use crate::model::Task;
use serde::{Deserialize, Serialize};

/// Which slice of the task list a screen or command shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    AllTasks,
    ActiveTasks,
    CompletedTasks,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Self::AllTasks => true,
            Self::ActiveTasks => task.is_active(),
            Self::CompletedTasks => task.is_completed(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AllTasks => "All tasks",
            Self::ActiveTasks => "Active tasks",
            Self::CompletedTasks => "Completed tasks",
        }
    }

    pub fn empty_label(&self) -> &'static str {
        match self {
            Self::AllTasks => "You have no tasks!",
            Self::ActiveTasks => "You have no active tasks!",
            Self::CompletedTasks => "You have no completed tasks!",
        }
    }

    /// Parses user-facing spellings such as `all`, `active` and `completed`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "all" | "all_tasks" => Some(Self::AllTasks),
            "active" | "active_tasks" => Some(Self::ActiveTasks),
            "completed" | "completed_tasks" | "done" => Some(Self::CompletedTasks),
            _ => None,
        }
    }
}
