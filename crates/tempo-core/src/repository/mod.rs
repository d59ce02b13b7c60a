use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{
    Habit, HabitLog, HabitLogStatus, InstanceStatus, NewHabitData, NewTaskData, RepeatType, Tag,
    Task, TaskInstance, TaskPriority, TaskStatus, UpdateHabitData, UpdateTaskData,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export domain modules
pub mod habits;
pub mod instances;
pub mod tags;
pub mod tasks;

// Traits are defined in this module and implemented in respective domain modules

/// A task row joined with its tag, as shown in list views.
#[derive(Debug, Clone, FromRow)]
pub struct TaskWithTag {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub due_time: Option<NaiveTime>,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    pub tag_id: Option<Uuid>,
    pub repeat_type: RepeatType,
    pub repeat_interval: Option<i64>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub tag_name: Option<String>,
    pub tag_color: Option<String>,
}

impl TaskWithTag {
    /// The bare task row without the joined tag columns.
    pub fn into_task(self) -> Task {
        Task {
            id: self.id,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            due_time: self.due_time,
            priority: self.priority,
            status: self.status,
            tag_id: self.tag_id,
            repeat_type: self.repeat_type,
            repeat_interval: self.repeat_interval,
            completed_at: self.completed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Filter for task listings. Empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub tag: Option<String>,
}

/// Domain-specific trait for task operations
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Task>, CoreError>;
    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<TaskWithTag>, CoreError>;
    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
    async fn complete_task(&self, id: Uuid) -> Result<Task, CoreError>;
    async fn reopen_task(&self, id: Uuid) -> Result<Task, CoreError>;
}

/// Domain-specific trait for per-occurrence override operations
#[async_trait]
pub trait InstanceRepository {
    async fn find_instances(&self) -> Result<Vec<TaskInstance>, CoreError>;
    async fn find_instances_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TaskInstance>, CoreError>;
    /// Inserts or updates the override for `(task_id, date)`.
    async fn set_instance_status(
        &self,
        task_id: Uuid,
        date: NaiveDate,
        status: InstanceStatus,
    ) -> Result<TaskInstance, CoreError>;
}

/// Domain-specific trait for tag operations
#[async_trait]
pub trait TagRepository {
    async fn add_tag(&self, name: String, color: String) -> Result<Tag, CoreError>;
    async fn find_tags(&self) -> Result<Vec<Tag>, CoreError>;
    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, CoreError>;
    async fn delete_tag(&self, name: &str) -> Result<(), CoreError>;
}

/// Domain-specific trait for habit operations
#[async_trait]
pub trait HabitRepository {
    async fn add_habit(&self, data: NewHabitData) -> Result<Habit, CoreError>;
    async fn find_habits(&self, include_inactive: bool) -> Result<Vec<Habit>, CoreError>;
    async fn find_habit_by_name(&self, name: &str) -> Result<Option<Habit>, CoreError>;
    async fn update_habit(&self, id: Uuid, data: UpdateHabitData) -> Result<Habit, CoreError>;
    async fn delete_habit(&self, id: Uuid) -> Result<(), CoreError>;
    /// Inserts or updates the journal entry for `(habit_id, date)`.
    async fn log_habit(
        &self,
        habit_id: Uuid,
        date: NaiveDate,
        status: HabitLogStatus,
        notes: Option<String>,
    ) -> Result<HabitLog, CoreError>;
    async fn find_logs_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HabitLog>, CoreError>;
}

/// Main repository trait that composes all domain traits
#[async_trait]
pub trait Repository: TaskRepository + InstanceRepository + TagRepository + HabitRepository {
    // Individual domain operations are defined in their respective traits
}

/// SQLite implementation of the repository pattern
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the database pool for internal use across modules
    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }
}

impl Repository for SqliteRepository {}

/// Normalizes a user-supplied short id for matching against `hex(id)`.
/// Short ids are the leading hex digits of the uuid, hyphens allowed.
pub(crate) fn normalize_short_id(prefix: &str) -> String {
    prefix.to_lowercase().replace('-', "")
}
