use chrono::{Local, NaiveDate, NaiveTime};
use comfy_table::{Attribute, Cell, Color, Row, Table};
use tempo_core::models::{HabitLogStatus, RepeatType, Tag, TaskPriority, TaskStatus};

use crate::config::{format_time, Config};

#[derive(Debug, Clone)]
pub struct ViewTask {
    pub short_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub repeat_type: RepeatType,
    pub repeat_interval: i64,
    pub tag_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ViewOccurrence {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub short_id: String,
    pub title: String,
    pub completed: bool,
    pub recurring: bool,
    pub priority: TaskPriority,
    pub tag_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ViewHabit {
    pub name: String,
    pub cadence: String,
    pub preferred_time: Option<NaiveTime>,
    pub active: bool,
    pub today: Option<HabitLogStatus>,
}

fn priority_cell(title: String, priority: TaskPriority, muted: bool) -> Cell {
    let cell = Cell::new(title);
    if muted {
        return cell.add_attribute(Attribute::CrossedOut).fg(Color::DarkGrey);
    }
    match priority {
        TaskPriority::High => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        TaskPriority::Medium => cell.fg(Color::Yellow),
        TaskPriority::Low => cell.fg(Color::Green),
    }
}

fn cadence_label(repeat_type: RepeatType, interval: i64) -> String {
    match (repeat_type, interval) {
        (RepeatType::None, _) => "—".to_string(),
        (rt, i) if i <= 1 => rt.to_string(),
        (RepeatType::Daily, i) => format!("every {i} days"),
        (RepeatType::Weekly, i) => format!("every {i} weeks"),
        (RepeatType::Monthly, i) => format!("every {i} months"),
    }
}

pub fn display_tasks(tasks: &[ViewTask], config: &Config) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let today = Local::now().date_naive();

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Status", "Due", "Repeats", "Tag"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(&task.short_id));

        let mut title = String::new();
        if task.repeat_type.is_recurring() {
            title.push('↻');
            title.push(' ');
        }
        title.push_str(&task.title);
        let muted = matches!(task.status, TaskStatus::Completed | TaskStatus::Cancelled);
        row.add_cell(priority_cell(title, task.priority, muted));

        let status_cell = match task.status {
            TaskStatus::Completed => Cell::new("completed").fg(Color::Green),
            TaskStatus::Cancelled => Cell::new("cancelled").fg(Color::DarkGrey),
            TaskStatus::Pending => Cell::new("pending"),
        };
        row.add_cell(status_cell);

        let due_cell = match task.due_date {
            Some(due) => {
                let mut text = due.format("%Y-%m-%d").to_string();
                if let Some(time) = task.due_time {
                    text.push(' ');
                    text.push_str(&format_time(time, config));
                }
                if task.status == TaskStatus::Pending && due < today {
                    Cell::new(text).fg(Color::Red) // Overdue
                } else if task.status == TaskStatus::Pending && due == today {
                    Cell::new(text).fg(Color::Yellow) // Due today
                } else {
                    Cell::new(text)
                }
            }
            None => Cell::new("None"),
        };
        row.add_cell(due_cell);

        row.add_cell(Cell::new(cadence_label(
            task.repeat_type,
            task.repeat_interval,
        )));
        row.add_cell(Cell::new(task.tag_name.as_deref().unwrap_or("None")));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_occurrences(occurrences: &[ViewOccurrence], config: &Config) {
    if occurrences.is_empty() {
        println!("Nothing scheduled.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Time", "ID", "Title", "Done", "Tag"]);

    for occ in occurrences {
        let mut row = Row::new();
        row.add_cell(Cell::new(occ.date.format("%Y-%m-%d %a").to_string()));
        row.add_cell(Cell::new(
            occ.time
                .map(|t| format_time(t, config))
                .unwrap_or_else(|| "—".to_string()),
        ));
        row.add_cell(Cell::new(&occ.short_id));

        let mut title = String::new();
        if occ.recurring {
            title.push('↻');
            title.push(' ');
        }
        title.push_str(&occ.title);
        row.add_cell(priority_cell(title, occ.priority, occ.completed));

        let done_cell = if occ.completed {
            Cell::new("✓").fg(Color::Green)
        } else {
            Cell::new("·")
        };
        row.add_cell(done_cell);
        row.add_cell(Cell::new(occ.tag_name.as_deref().unwrap_or("None")));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_habits(habits: &[ViewHabit], config: &Config) {
    if habits.is_empty() {
        println!("No habits found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Cadence", "Time", "Today", "Active"]);

    for habit in habits {
        let mut row = Row::new();

        let name_cell = if habit.active {
            Cell::new(&habit.name)
        } else {
            Cell::new(&habit.name).fg(Color::DarkGrey)
        };
        row.add_cell(name_cell);
        row.add_cell(Cell::new(&habit.cadence));
        row.add_cell(Cell::new(
            habit
                .preferred_time
                .map(|t| format_time(t, config))
                .unwrap_or_else(|| "—".to_string()),
        ));

        let today_cell = match habit.today {
            Some(HabitLogStatus::Completed) => Cell::new("completed").fg(Color::Green),
            Some(HabitLogStatus::Skipped) => Cell::new("skipped").fg(Color::Yellow),
            Some(HabitLogStatus::Failed) => Cell::new("failed").fg(Color::Red),
            None => Cell::new("—"),
        };
        row.add_cell(today_cell);
        row.add_cell(Cell::new(if habit.active { "yes" } else { "paused" }));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_tags(tags: &[Tag]) {
    if tags.is_empty() {
        println!("No tags found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Color"]);
    for tag in tags {
        let mut row = Row::new();
        row.add_cell(Cell::new(&tag.name));
        row.add_cell(Cell::new(&tag.color));
        table.add_row(row);
    }

    println!("{table}");
}
