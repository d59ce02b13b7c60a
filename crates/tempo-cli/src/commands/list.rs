use anyhow::Result;
use tempo_core::repository::{Repository, TaskFilter};

use crate::cli::ListCommand;
use crate::config::Config;
use crate::util::short_id;
use crate::views::table::{display_tasks, ViewTask};

pub async fn list_tasks(
    repo: &impl Repository,
    command: ListCommand,
    config: &Config,
) -> Result<()> {
    let filter = TaskFilter {
        status: command.status.map(Into::into),
        tag: command.tag,
    };

    let tasks = repo.find_tasks(&filter).await?;

    let view_tasks: Vec<ViewTask> = tasks
        .into_iter()
        .map(|t| ViewTask {
            short_id: short_id(t.id),
            title: t.title,
            status: t.status,
            priority: t.priority,
            due_date: t.due_date,
            due_time: t.due_time,
            repeat_type: t.repeat_type,
            repeat_interval: t.repeat_interval.unwrap_or(1),
            tag_name: t.tag_name,
        })
        .collect();

    display_tasks(&view_tasks, config);

    Ok(())
}
