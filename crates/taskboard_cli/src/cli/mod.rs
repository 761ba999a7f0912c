use clap::{Parser, Subcommand, ValueEnum};
use taskboard_core::model::TaskFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configuration values (format KEY=VALUE)
    #[arg(long = "config-override", value_name = "KEY=VALUE", global = true)]
    pub config_override: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: taskboard add "Buy milk" --description "2 liters, whole"
    Add {
        title: Option<String>,
        #[arg(long, short = 'd')]
        description: Option<String>,
    },
    /// Edit a task's title and description
    ///
    /// Example: taskboard edit task-1 "Buy organic milk"
    Edit {
        id: String,
        new_title: String,
        #[arg(long, short = 'd')]
        description: Option<String>,
    },
    /// Delete a task
    ///
    /// Example: taskboard delete task-1
    Delete {
        id: String,
    },
    /// Show details of a task
    ///
    /// Example: taskboard show task-1
    Show {
        id: String,
    },
    /// Mark a task as completed
    ///
    /// Example: taskboard done task-1
    Done {
        id: String,
    },
    /// Reopen a completed task
    ///
    /// Example: taskboard activate task-1
    Activate {
        id: String,
    },
    /// Remove all completed tasks
    ///
    /// Example: taskboard clear-completed
    ClearCompleted,
    /// List tasks, optionally narrowed to active or completed ones
    ///
    /// Example: taskboard list
    /// Example: taskboard list active
    List {
        filter: Option<FilterArg>,
    },
    /// Show the share of active and completed tasks
    ///
    /// Example: taskboard stats
    Stats,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for TaskFilter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => TaskFilter::AllTasks,
            FilterArg::Active => TaskFilter::ActiveTasks,
            FilterArg::Completed => TaskFilter::CompletedTasks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigOverrideTarget {
    Theme,
    DefaultFilter(TaskFilter),
}

/// Parse a raw `KEY=VALUE` override string into a structured target.
pub fn parse_config_override(raw: &str) -> Result<(ConfigOverrideTarget, String), String> {
    let trimmed = raw.trim();
    let (key_raw, value_raw) = trimmed
        .split_once('=')
        .ok_or_else(|| "override must be in KEY=VALUE format".to_string())?;

    let value = value_raw.trim().to_string();
    let canonical_field = canonicalize_flag_name(key_raw)
        .ok_or_else(|| "override key cannot be empty".to_string())?;

    match canonical_field.as_str() {
        "theme" => Ok((ConfigOverrideTarget::Theme, value)),
        "default_filter" | "filter" => {
            let filter = TaskFilter::parse(&value)
                .ok_or_else(|| format!("unknown filter '{value}'"))?;
            Ok((ConfigOverrideTarget::DefaultFilter(filter), value))
        }
        other => Err(format!("unknown config field '{other}'")),
    }
}

fn canonicalize_flag_name(name: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut previous_underscore = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            cleaned.push(ch.to_ascii_lowercase());
            previous_underscore = false;
        } else if !previous_underscore && !cleaned.is_empty() {
            cleaned.push('_');
            previous_underscore = true;
        }
    }

    let trimmed = cleaned.trim_matches('_');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
