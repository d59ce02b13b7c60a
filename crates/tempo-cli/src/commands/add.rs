use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use tempo_core::models::NewTaskData;
use tempo_core::repository::Repository;

use crate::cli::AddCommand;
use crate::parser::{parse_date, parse_time};
use crate::util::short_id;

pub async fn add_task(repo: &impl Repository, command: AddCommand) -> Result<()> {
    let due_date = command.due.as_deref().map(parse_date).transpose()?;
    let due_time = command.at.as_deref().map(parse_time).transpose()?;

    let tag_id = match &command.tag {
        Some(name) => match repo.find_tag_by_name(name).await? {
            Some(tag) => Some(tag.id),
            None => {
                return Err(anyhow::anyhow!(
                    "No tag named '{}'. Create it first with: tempo tag add {}",
                    name,
                    name
                ))
            }
        },
        None => None,
    };

    let new_task_data = NewTaskData {
        title: command.title,
        description: command.description,
        due_date,
        due_time,
        priority: command.priority.map(Into::into),
        tag_id,
        repeat_type: command.every.map(Into::into),
        repeat_interval: command.interval,
    };

    let added_task = repo.add_task(new_task_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();

    if added_task.repeat_type.is_recurring() {
        println!(
            "{} Created recurring task: {}",
            "✓".style(success_style),
            added_task.title.bold()
        );
        println!(
            "  {} Task ID: {}",
            "→".style(info_style),
            short_id(added_task.id).yellow()
        );
        println!(
            "  {} Repeats {} starting {}",
            "→".style(info_style),
            added_task.repeat_type,
            added_task
                .due_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "whenever the agenda window begins".to_string())
        );
    } else {
        println!(
            "{} Created task: {}",
            "✓".style(success_style),
            added_task.title.bold()
        );
        println!(
            "  {} Task ID: {}",
            "→".style(info_style),
            short_id(added_task.id).yellow()
        );
        if let Some(due) = added_task.due_date {
            println!("  {} Due: {}", "→".style(info_style), due.to_string().cyan());
        }
    }

    Ok(())
}
