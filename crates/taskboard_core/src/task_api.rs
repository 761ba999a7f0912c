use crate::error::AppError;
use crate::model::{Task, TaskFilter, TaskStatus};
use crate::stats::{StatsResult, compute_stats};
use crate::storage::json_store;
use std::path::Path;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

pub fn add_task(title: &str, description: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    add_task_with_path(&path, title, description)
}

pub fn edit_task(id: &str, new_title: &str, new_description: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    edit_task_with_path(&path, id, new_title, new_description)
}

pub fn delete_task(id: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    delete_task_with_path(&path, id)
}

pub fn complete_task(id: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    complete_task_with_path(&path, id)
}

pub fn activate_task(id: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    activate_task_with_path(&path, id)
}

pub fn clear_completed_tasks() -> Result<usize, AppError> {
    let path = json_store::store_path()?;
    clear_completed_tasks_with_path(&path)
}

pub fn get_task_by_id(id: &str) -> Result<Task, AppError> {
    let path = json_store::store_path()?;
    get_task_by_id_with_path(&path, id)
}

pub fn list_tasks(filter: TaskFilter) -> Result<Vec<Task>, AppError> {
    let path = json_store::store_path()?;
    list_tasks_with_path(&path, filter)
}

/// Loads every stored task and computes the activity percentages over them.
pub fn statistics() -> Result<StatsResult, AppError> {
    let path = json_store::store_path()?;
    statistics_with_path(&path)
}

fn now_rfc3339() -> Result<String, AppError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|err| AppError::invalid_data(err.to_string()))
}

fn add_task_with_path(path: &Path, title: &str, description: &str) -> Result<Task, AppError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("title is required"));
    }

    let task = Task {
        id: format!("task-{}", OffsetDateTime::now_utc().unix_timestamp_nanos()),
        title: trimmed.to_string(),
        description: description.trim().to_string(),
        status: TaskStatus::Active,
        created_at: now_rfc3339()?,
        completed_at: None,
    };

    let mut tasks = json_store::load_tasks(path)?;
    tasks.push(task.clone());
    json_store::save_tasks(path, &tasks)?;

    Ok(task)
}

fn edit_task_with_path(
    path: &Path,
    id: &str,
    new_title: &str,
    new_description: &str,
) -> Result<Task, AppError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }

    let trimmed_title = new_title.trim();
    if trimmed_title.is_empty() {
        return Err(AppError::invalid_input("title is required"));
    }

    let mut tasks = json_store::load_tasks(path)?;
    let mut updated_task = None;

    for task in &mut tasks {
        if task.id == trimmed_id {
            task.title = trimmed_title.to_string();
            task.description = new_description.trim().to_string();
            updated_task = Some(task.clone());
            break;
        }
    }

    let updated = updated_task.ok_or_else(|| AppError::not_found("task not found"))?;
    json_store::save_tasks(path, &tasks)?;

    Ok(updated)
}

fn delete_task_with_path(path: &Path, id: &str) -> Result<Task, AppError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }

    let mut tasks = json_store::load_tasks(path)?;
    let index = tasks
        .iter()
        .position(|task| task.id == trimmed_id)
        .ok_or_else(|| AppError::not_found("task not found"))?;

    let removed = tasks.remove(index);
    json_store::save_tasks(path, &tasks)?;

    Ok(removed)
}

fn complete_task_with_path(path: &Path, id: &str) -> Result<Task, AppError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }

    let mut tasks = json_store::load_tasks(path)?;
    let mut updated_task = None;

    for task in &mut tasks {
        if task.id == trimmed_id {
            if task.is_completed() {
                return Err(AppError::invalid_input("task already completed"));
            }

            task.status = TaskStatus::Completed;
            task.completed_at = Some(now_rfc3339()?);
            updated_task = Some(task.clone());
            break;
        }
    }

    let updated = updated_task.ok_or_else(|| AppError::not_found("task not found"))?;
    json_store::save_tasks(path, &tasks)?;

    Ok(updated)
}

fn activate_task_with_path(path: &Path, id: &str) -> Result<Task, AppError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }

    let mut tasks = json_store::load_tasks(path)?;
    let mut updated_task = None;

    for task in &mut tasks {
        if task.id == trimmed_id {
            if task.is_active() {
                return Err(AppError::invalid_input("task is already active"));
            }

            task.status = TaskStatus::Active;
            task.completed_at = None;
            updated_task = Some(task.clone());
            break;
        }
    }

    let updated = updated_task.ok_or_else(|| AppError::not_found("task not found"))?;
    json_store::save_tasks(path, &tasks)?;

    Ok(updated)
}

fn clear_completed_tasks_with_path(path: &Path) -> Result<usize, AppError> {
    let mut tasks = json_store::load_tasks(path)?;
    let before = tasks.len();
    tasks.retain(|task| task.is_active());
    let removed = before - tasks.len();

    if removed > 0 {
        json_store::save_tasks(path, &tasks)?;
    }

    Ok(removed)
}

fn get_task_by_id_with_path(path: &Path, id: &str) -> Result<Task, AppError> {
    let trimmed_id = id.trim();
    if trimmed_id.is_empty() {
        return Err(AppError::invalid_input("id is required"));
    }

    let tasks = json_store::load_tasks(path)?;
    tasks
        .into_iter()
        .find(|task| task.id == trimmed_id)
        .ok_or_else(|| AppError::not_found("task not found"))
}

fn list_tasks_with_path(path: &Path, filter: TaskFilter) -> Result<Vec<Task>, AppError> {
    let tasks = json_store::load_tasks(path)?;
    Ok(tasks
        .into_iter()
        .filter(|task| filter.matches(task))
        .collect())
}

fn statistics_with_path(path: &Path) -> Result<StatsResult, AppError> {
    let tasks = json_store::load_tasks(path)?;
    Ok(compute_stats(Some(&tasks)))
}
