use anyhow::Result;
use tempo_core::models::{Task, TaskStatus};
use tempo_core::recurrence::{expand, DateWindow};
use tempo_core::repository::{Repository, TaskFilter};

use crate::cli::AgendaCommand;
use crate::config::{week_start_of, Config};
use crate::parser::parse_date;
use crate::util::short_id;
use crate::views::table::{display_occurrences, ViewOccurrence};

pub async fn show_agenda(
    repo: &impl Repository,
    command: AgendaCommand,
    config: &Config,
) -> Result<()> {
    let anchor = parse_date(&command.date)?;

    let window = if command.month {
        DateWindow::month_of(anchor)
    } else if command.week {
        DateWindow::week_from(week_start_of(anchor, config))
    } else {
        DateWindow::single_day(anchor)
    };

    let rows = repo.find_tasks(&TaskFilter::default()).await?;
    let mut tag_names = std::collections::HashMap::new();
    let tasks: Vec<Task> = rows
        .into_iter()
        .filter(|t| t.status != TaskStatus::Cancelled)
        .map(|t| {
            if let Some(name) = t.tag_name.clone() {
                tag_names.insert(t.id, name);
            }
            t.into_task()
        })
        .collect();
    let overrides = repo
        .find_instances_in_range(window.start.min(window.end), window.end.max(window.start))
        .await?;

    let occurrences = expand(&tasks, &overrides, &window);

    let view: Vec<ViewOccurrence> = occurrences
        .into_iter()
        .map(|occ| ViewOccurrence {
            date: occ.instance_date,
            time: occ.task.due_time,
            short_id: short_id(occ.task.id),
            title: occ.task.title.clone(),
            completed: occ.is_completed()
                || (!occ.task.repeat_type.is_recurring()
                    && occ.task.status == TaskStatus::Completed),
            recurring: occ.task.repeat_type.is_recurring(),
            priority: occ.task.priority,
            tag_name: tag_names.get(&occ.task.id).cloned(),
        })
        .collect();

    display_occurrences(&view, config);

    Ok(())
}
