use anyhow::Result;
use chrono::Local;
use owo_colors::OwoColorize;
use tempo_core::models::InstanceStatus;
use tempo_core::repository::Repository;

use crate::cli::{DoneCommand, ReopenCommand};
use crate::parser::parse_date;
use crate::util::resolve_task_id;

pub async fn done_task(repo: &impl Repository, command: DoneCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Task disappeared while resolving '{}'", command.id))?;

    if task.repeat_type.is_recurring() {
        // Recurring tasks complete one occurrence at a time.
        let on = match &command.on {
            Some(date) => parse_date(date)?,
            None => Local::now().date_naive(),
        };
        repo.set_instance_status(task.id, on, InstanceStatus::Completed)
            .await?;
        println!(
            "{} Completed '{}' for {}",
            "✓".green().bold(),
            task.title.bold(),
            on.to_string().cyan()
        );
    } else {
        let completed = repo.complete_task(task.id).await?;
        println!("{} Completed task: '{}'", "✓".green().bold(), completed.title);
    }

    Ok(())
}

pub async fn reopen_task(repo: &impl Repository, command: ReopenCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Task disappeared while resolving '{}'", command.id))?;

    if task.repeat_type.is_recurring() {
        let on = match &command.on {
            Some(date) => parse_date(date)?,
            None => Local::now().date_naive(),
        };
        repo.set_instance_status(task.id, on, InstanceStatus::Pending)
            .await?;
        println!("Reopened '{}' for {}", task.title.bold(), on);
    } else {
        let reopened = repo.reopen_task(task.id).await?;
        println!("Reopened task: '{}'", reopened.title);
    }

    Ok(())
}
