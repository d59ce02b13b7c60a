use anyhow::Result;
use owo_colors::OwoColorize;
use tempo_core::models::{RepeatType, UpdateTaskData};
use tempo_core::repository::Repository;

use crate::cli::EditCommand;
use crate::parser::{parse_date, parse_time};
use crate::util::{resolve_task_id, short_id};

pub async fn edit_task(repo: &impl Repository, command: EditCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;

    let due_date = if command.due_clear {
        Some(None)
    } else {
        command
            .due
            .as_deref()
            .map(parse_date)
            .transpose()?
            .map(Some)
    };

    let due_time = if command.at_clear {
        Some(None)
    } else {
        command.at.as_deref().map(parse_time).transpose()?.map(Some)
    };

    let tag_id = if command.tag_clear {
        Some(None)
    } else {
        match &command.tag {
            Some(name) => match repo.find_tag_by_name(name).await? {
                Some(tag) => Some(Some(tag.id)),
                None => {
                    return Err(anyhow::anyhow!(
                        "No tag named '{}'. Create it first with: tempo tag add {}",
                        name,
                        name
                    ))
                }
            },
            None => None,
        }
    };

    let (repeat_type, repeat_interval) = if command.every_clear {
        (Some(RepeatType::None), Some(None))
    } else {
        (
            command.every.map(Into::into),
            command.interval.map(Some),
        )
    };

    let update_data = UpdateTaskData {
        title: command.title,
        description: if command.description_clear {
            Some(None)
        } else {
            command.description.map(Some)
        },
        due_date,
        due_time,
        priority: command.priority.map(Into::into),
        status: command.status.map(Into::into),
        tag_id,
        repeat_type,
        repeat_interval,
    };

    let updated = repo.update_task(task_id, update_data).await?;
    println!(
        "{} Updated task {} ('{}')",
        "✓".green().bold(),
        short_id(updated.id).yellow(),
        updated.title
    );

    Ok(())
}
