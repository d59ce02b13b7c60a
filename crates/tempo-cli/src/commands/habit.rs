use anyhow::{anyhow, Result};
use chrono::{Local, Weekday};
use dialoguer::Confirm;
use owo_colors::OwoColorize;
use tempo_core::models::{Habit, NewHabitData, RepeatType, UpdateHabitData};
use tempo_core::repository::Repository;

use crate::cli::{HabitCommand, HabitSubcommand, LogHabitCommand};
use crate::config::Config;
use crate::parser::{parse_date, parse_time, parse_weekdays};
use crate::views::table::{display_habits, ViewHabit};

pub async fn habit_command(
    repo: &impl Repository,
    command: HabitCommand,
    config: &Config,
) -> Result<()> {
    match command.command {
        HabitSubcommand::Add(cmd) => {
            let preferred_time = cmd.at.as_deref().map(parse_time).transpose()?;
            let frequency: RepeatType = cmd.every.into();
            let frequency_days = match &cmd.on {
                Some(days) => {
                    if frequency != RepeatType::Weekly {
                        return Err(anyhow!("--on only applies to weekly habits"));
                    }
                    Some(parse_weekdays(days)?)
                }
                None => None,
            };
            let tag_id = match &cmd.tag {
                Some(name) => Some(
                    repo.find_tag_by_name(name)
                        .await?
                        .ok_or_else(|| anyhow!("No tag named '{}'", name))?
                        .id,
                ),
                None => None,
            };

            let habit = repo
                .add_habit(NewHabitData {
                    name: cmd.name,
                    description: cmd.description,
                    frequency: Some(frequency),
                    frequency_days,
                    preferred_time,
                    tag_id,
                })
                .await?;
            println!("{} Created habit: {}", "✓".green().bold(), habit.name.bold());
        }
        HabitSubcommand::List(cmd) => {
            let habits = repo.find_habits(cmd.all).await?;
            let today = Local::now().date_naive();
            let logs = repo.find_logs_in_range(today, today).await?;

            let view: Vec<ViewHabit> = habits
                .iter()
                .map(|h| ViewHabit {
                    name: h.name.clone(),
                    cadence: cadence_label(h),
                    preferred_time: h.preferred_time,
                    active: h.is_active,
                    today: logs
                        .iter()
                        .find(|l| l.habit_id == h.id)
                        .map(|l| l.status),
                })
                .collect();
            display_habits(&view, config);
        }
        HabitSubcommand::Log(cmd) => log_habit(repo, cmd).await?,
        HabitSubcommand::Pause(cmd) => {
            let habit = find_habit(repo, &cmd.name).await?;
            repo.update_habit(
                habit.id,
                UpdateHabitData {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await?;
            println!("Paused habit '{}'.", habit.name);
        }
        HabitSubcommand::Resume(cmd) => {
            let habit = find_habit(repo, &cmd.name).await?;
            repo.update_habit(
                habit.id,
                UpdateHabitData {
                    is_active: Some(true),
                    ..Default::default()
                },
            )
            .await?;
            println!("Resumed habit '{}'.", habit.name);
        }
        HabitSubcommand::Delete(cmd) => {
            let habit = find_habit(repo, &cmd.name).await?;
            if !cmd.force {
                let confirmation = Confirm::new()
                    .with_prompt(format!(
                        "Delete habit '{}' and all of its log entries?",
                        habit.name
                    ))
                    .default(false)
                    .interact()
                    .unwrap_or(false);
                if !confirmation {
                    println!("Deletion cancelled.");
                    return Ok(());
                }
            }
            repo.delete_habit(habit.id).await?;
            println!("Habit deleted.");
        }
    }

    Ok(())
}

async fn log_habit(repo: &impl Repository, cmd: LogHabitCommand) -> Result<()> {
    let habit = find_habit(repo, &cmd.name).await?;
    let on = match &cmd.on {
        Some(date) => parse_date(date)?,
        None => Local::now().date_naive(),
    };

    let log = repo
        .log_habit(habit.id, on, cmd.status.into(), cmd.notes)
        .await?;
    println!(
        "{} Logged '{}' as {} for {}",
        "✓".green().bold(),
        habit.name.bold(),
        log.status,
        on
    );

    Ok(())
}

async fn find_habit(repo: &impl Repository, name: &str) -> Result<Habit> {
    repo.find_habit_by_name(name)
        .await?
        .ok_or_else(|| anyhow!("No habit named '{}'", name))
}

fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

fn cadence_label(habit: &Habit) -> String {
    match habit.frequency {
        RepeatType::Weekly => {
            let days = habit.weekdays();
            if days.is_empty() {
                "weekly".to_string()
            } else {
                let names: Vec<&str> = days.into_iter().map(weekday_label).collect();
                format!("weekly ({})", names.join(", "))
            }
        }
        other => other.to_string(),
    }
}
