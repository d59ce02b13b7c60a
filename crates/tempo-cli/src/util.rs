use anyhow::{anyhow, Result};
use tempo_core::error::CoreError;
use tempo_core::models::Task;
use tempo_core::repository::Repository;
use uuid::Uuid;

/// Short display form of an id: the leading hex of the uuid.
pub fn short_id(id: Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

pub async fn resolve_task_id(repo: &impl Repository, prefix: &str) -> Result<Uuid> {
    if prefix.len() < 2 {
        return Err(anyhow!(CoreError::InvalidInput(
            "Short ID must be at least 2 characters long.".to_string()
        )));
    }
    let tasks = repo.find_tasks_by_short_id_prefix(prefix).await?;
    match tasks.len() {
        1 => Ok(tasks[0].id),
        0 => Err(anyhow!(CoreError::NotFound(format!(
            "No task found with ID prefix '{}'",
            prefix
        )))),
        _ => {
            let task_info: Vec<(String, String)> = tasks
                .into_iter()
                .map(|t: Task| (short_id(t.id), t.title))
                .collect();
            Err(anyhow!(CoreError::AmbiguousId(task_info)))
        }
    }
}
