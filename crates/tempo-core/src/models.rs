use chrono::{DateTime, NaiveDate, NaiveTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task status: {0}")]
pub struct ParseTaskStatusError(String);

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(ParseTaskStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "pending"),
            TaskStatus::Completed => write!(f, "completed"),
            TaskStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid task priority: {0}")]
pub struct ParseTaskPriorityError(String);

impl FromStr for TaskPriority {
    type Err = ParseTaskPriorityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(ParseTaskPriorityError(s.to_string())),
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskPriority::Low => write!(f, "low"),
            TaskPriority::Medium => write!(f, "medium"),
            TaskPriority::High => write!(f, "high"),
        }
    }
}

/// Repeat cadence of a task or habit. `None` means the task produces at most
/// one occurrence, on its own due date.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum RepeatType {
    None,
    Daily,
    Weekly,
    Monthly,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid repeat type: {0}")]
pub struct ParseRepeatTypeError(String);

impl FromStr for RepeatType {
    type Err = ParseRepeatTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(RepeatType::None),
            "daily" => Ok(RepeatType::Daily),
            "weekly" => Ok(RepeatType::Weekly),
            "monthly" => Ok(RepeatType::Monthly),
            _ => Err(ParseRepeatTypeError(s.to_string())),
        }
    }
}

impl RepeatType {
    /// Lenient parse for values read back from storage or user input that has
    /// already been accepted once. Unknown or empty values fall back to
    /// `None`, so a malformed cadence can never break occurrence expansion.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(RepeatType::None)
    }

    pub fn is_recurring(&self) -> bool {
        !matches!(self, RepeatType::None)
    }
}

impl std::fmt::Display for RepeatType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepeatType::None => write!(f, "none"),
            RepeatType::Daily => write!(f, "daily"),
            RepeatType::Weekly => write!(f, "weekly"),
            RepeatType::Monthly => write!(f, "monthly"),
        }
    }
}

/// Completion state of a single occurrence. Unlike [`TaskStatus`] this never
/// carries `cancelled`: an occurrence is either still open or done.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum InstanceStatus {
    Pending,
    Completed,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid instance status: {0}")]
pub struct ParseInstanceStatusError(String);

impl FromStr for InstanceStatus {
    type Err = ParseInstanceStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(InstanceStatus::Pending),
            "completed" => Ok(InstanceStatus::Completed),
            _ => Err(ParseInstanceStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceStatus::Pending => write!(f, "pending"),
            InstanceStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A task definition. Recurring tasks (`repeat_type` other than `None`)
/// act as templates: their concrete occurrences are computed on demand by
/// [`crate::recurrence::expand`] and are never stored as rows.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// Anchor date for recurrence; `None` means unscheduled.
    pub due_date: Option<NaiveDate>,
    /// Carried through into occurrences unchanged, never used in expansion.
    pub due_time: Option<NaiveTime>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub tag_id: Option<Uuid>,
    pub repeat_type: RepeatType,
    /// Cadence multiplier, `None` defaults to 1.
    pub repeat_interval: Option<i64>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Task {
    fn default() -> Self {
        Self {
            id: Uuid::now_v7(),
            title: "".to_string(),
            description: None,
            due_date: None,
            due_time: None,
            priority: TaskPriority::Medium,
            status: TaskStatus::Pending,
            tag_id: None,
            repeat_type: RepeatType::None,
            repeat_interval: None,
            completed_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}

impl Task {
    /// Effective cadence multiplier, clamped so expansion always makes
    /// forward progress even if storage holds a zero or negative value.
    pub fn effective_interval(&self) -> u32 {
        self.repeat_interval.unwrap_or(1).max(1) as u32
    }
}

/// A persisted completion override for one occurrence of a recurring task.
/// Sparse by design: at most one row per `(task_id, instance_date)`, and
/// occurrences without a row default to pending.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct TaskInstance {
    pub id: Uuid,
    pub task_id: Uuid,
    pub instance_date: NaiveDate,
    pub status: InstanceStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    /// Hex color used by presentation layers, opaque to the core.
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// A tracked habit. Weekly habits may restrict themselves to specific
/// weekdays via `frequency_days`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct Habit {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub frequency: RepeatType,
    /// Comma-separated weekday numbers (1 = Monday .. 7 = Sunday), weekly only.
    pub frequency_days: Option<String>,
    pub preferred_time: Option<NaiveTime>,
    pub tag_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Habit {
    /// Weekdays this habit is restricted to, empty when unrestricted.
    /// Unparseable entries are skipped rather than failing the whole list.
    pub fn weekdays(&self) -> Vec<Weekday> {
        let Some(days) = &self.frequency_days else {
            return Vec::new();
        };
        days.split(',')
            .filter_map(|d| d.trim().parse::<u8>().ok())
            .filter_map(|d| match d {
                1 => Some(Weekday::Mon),
                2 => Some(Weekday::Tue),
                3 => Some(Weekday::Wed),
                4 => Some(Weekday::Thu),
                5 => Some(Weekday::Fri),
                6 => Some(Weekday::Sat),
                7 => Some(Weekday::Sun),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum HabitLogStatus {
    Completed,
    Skipped,
    Failed,
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid habit log status: {0}")]
pub struct ParseHabitLogStatusError(String);

impl FromStr for HabitLogStatus {
    type Err = ParseHabitLogStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(HabitLogStatus::Completed),
            "skipped" => Ok(HabitLogStatus::Skipped),
            "failed" => Ok(HabitLogStatus::Failed),
            _ => Err(ParseHabitLogStatusError(s.to_string())),
        }
    }
}

impl std::fmt::Display for HabitLogStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HabitLogStatus::Completed => write!(f, "completed"),
            HabitLogStatus::Skipped => write!(f, "skipped"),
            HabitLogStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One journal entry for a habit on a given date. Unique per
/// `(habit_id, date)`; re-logging the same day replaces the entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct HabitLog {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub date: NaiveDate,
    pub status: HabitLogStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub priority: Option<TaskPriority>,
    pub tag_id: Option<Uuid>,
    pub repeat_type: Option<RepeatType>,
    pub repeat_interval: Option<i64>,
}

/// Partial update for a task. The outer `Option` means "change this field";
/// the inner `Option` (where present) carries the new value, with `None`
/// clearing it.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub due_date: Option<Option<NaiveDate>>,
    pub due_time: Option<Option<NaiveTime>>,
    pub priority: Option<TaskPriority>,
    pub status: Option<TaskStatus>,
    pub tag_id: Option<Option<Uuid>>,
    pub repeat_type: Option<RepeatType>,
    pub repeat_interval: Option<Option<i64>>,
}

#[derive(Debug, Clone, Default)]
pub struct NewHabitData {
    pub name: String,
    pub description: Option<String>,
    pub frequency: Option<RepeatType>,
    pub frequency_days: Option<String>,
    pub preferred_time: Option<NaiveTime>,
    pub tag_id: Option<Uuid>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateHabitData {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub frequency: Option<RepeatType>,
    pub frequency_days: Option<Option<String>>,
    pub preferred_time: Option<Option<NaiveTime>>,
    pub tag_id: Option<Option<Uuid>>,
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_type_round_trips_through_strings() {
        for (text, expected) in [
            ("none", RepeatType::None),
            ("daily", RepeatType::Daily),
            ("WEEKLY", RepeatType::Weekly),
            ("Monthly", RepeatType::Monthly),
        ] {
            assert_eq!(text.parse::<RepeatType>().unwrap(), expected);
        }
        assert!("fortnightly".parse::<RepeatType>().is_err());
    }

    #[test]
    fn lenient_parse_falls_back_to_none() {
        assert_eq!(RepeatType::parse_lenient("daily"), RepeatType::Daily);
        assert_eq!(RepeatType::parse_lenient("fortnightly"), RepeatType::None);
        assert_eq!(RepeatType::parse_lenient(""), RepeatType::None);
    }

    #[test]
    fn effective_interval_clamps_to_one() {
        let mut task = Task::default();
        assert_eq!(task.effective_interval(), 1);
        task.repeat_interval = Some(0);
        assert_eq!(task.effective_interval(), 1);
        task.repeat_interval = Some(-3);
        assert_eq!(task.effective_interval(), 1);
        task.repeat_interval = Some(4);
        assert_eq!(task.effective_interval(), 4);
    }

    #[test]
    fn habit_weekdays_parses_and_skips_garbage() {
        let mut habit = Habit {
            id: Uuid::now_v7(),
            name: "Stretch".to_string(),
            description: None,
            frequency: RepeatType::Weekly,
            frequency_days: Some("1, 3,5".to_string()),
            preferred_time: None,
            tag_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(
            habit.weekdays(),
            vec![Weekday::Mon, Weekday::Wed, Weekday::Fri]
        );

        habit.frequency_days = Some("0,8,x,7".to_string());
        assert_eq!(habit.weekdays(), vec![Weekday::Sun]);

        habit.frequency_days = None;
        assert!(habit.weekdays().is_empty());
    }
}
