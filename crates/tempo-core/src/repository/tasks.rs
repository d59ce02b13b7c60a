use crate::error::CoreError;
use crate::models::{NewTaskData, RepeatType, Task, TaskPriority, TaskStatus, UpdateTaskData};
use crate::repository::{normalize_short_id, SqliteRepository, TaskFilter, TaskRepository, TaskWithTag};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite};
use uuid::Uuid;

const TASK_WITH_TAG_SELECT: &str = "SELECT t.id, t.title, t.description, t.due_date, t.due_time, \
     t.priority, t.status, t.tag_id, t.repeat_type, t.repeat_interval, \
     t.completed_at, t.created_at, t.updated_at, \
     g.name AS tag_name, g.color AS tag_color \
     FROM tasks t LEFT JOIN tags g ON t.tag_id = g.id";

fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::InvalidInput(
            "Task title cannot be empty.".to_string(),
        ));
    }
    Ok(())
}

fn validate_interval(interval: Option<i64>) -> Result<(), CoreError> {
    if let Some(i) = interval {
        if i < 1 {
            return Err(CoreError::InvalidInput(format!(
                "Repeat interval must be at least 1, got {i}."
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        validate_title(&data.title)?;
        validate_interval(data.repeat_interval)?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::now_v7(),
            title: data.title,
            description: data.description,
            due_date: data.due_date,
            due_time: data.due_time,
            priority: data.priority.unwrap_or(TaskPriority::Medium),
            status: TaskStatus::Pending,
            tag_id: data.tag_id,
            repeat_type: data.repeat_type.unwrap_or(RepeatType::None),
            repeat_interval: data.repeat_interval,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO tasks (id, title, description, due_date, due_time, priority, status, \
             tag_id, repeat_type, repeat_interval, completed_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.due_time)
        .bind(task.priority)
        .bind(task.status.clone())
        .bind(task.tag_id)
        .bind(task.repeat_type)
        .bind(task.repeat_interval)
        .bind(task.completed_at)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(self.pool())
        .await?;

        Ok(task)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks_by_short_id_prefix(&self, prefix: &str) -> Result<Vec<Task>, CoreError> {
        // Ids are stored as raw bytes; match the user's hex prefix against
        // the hex rendering of the column.
        let mut pattern = normalize_short_id(prefix);
        pattern.push('%');

        let tasks: Vec<Task> = sqlx::query_as("SELECT * FROM tasks WHERE lower(hex(id)) LIKE $1")
            .bind(pattern)
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn find_tasks(&self, filter: &TaskFilter) -> Result<Vec<TaskWithTag>, CoreError> {
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(TASK_WITH_TAG_SELECT);

        if filter.status.is_some() || filter.tag.is_some() {
            query_builder.push(" WHERE ");
            let mut conditions = query_builder.separated(" AND ");
            if let Some(status) = &filter.status {
                conditions.push("t.status = ");
                conditions.push_bind_unseparated(status.clone());
            }
            if let Some(tag) = &filter.tag {
                conditions.push("g.name = ");
                conditions.push_bind_unseparated(tag.clone());
            }
        }

        query_builder.push(" ORDER BY t.due_date IS NULL, t.due_date ASC, t.created_at ASC");

        let tasks = query_builder
            .build_query_as()
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut task = self
            .find_task_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        if let Some(title) = data.title {
            validate_title(&title)?;
            task.title = title;
        }
        if let Some(description) = data.description {
            task.description = description;
        }
        if let Some(due_date) = data.due_date {
            task.due_date = due_date;
        }
        if let Some(due_time) = data.due_time {
            task.due_time = due_time;
        }
        if let Some(priority) = data.priority {
            task.priority = priority;
        }
        if let Some(status) = data.status {
            if status == TaskStatus::Completed && task.completed_at.is_none() {
                task.completed_at = Some(Utc::now());
            }
            if status != TaskStatus::Completed {
                task.completed_at = None;
            }
            task.status = status;
        }
        if let Some(tag_id) = data.tag_id {
            task.tag_id = tag_id;
        }
        if let Some(repeat_type) = data.repeat_type {
            task.repeat_type = repeat_type;
        }
        if let Some(repeat_interval) = data.repeat_interval {
            validate_interval(repeat_interval)?;
            task.repeat_interval = repeat_interval;
        }
        task.updated_at = Utc::now();

        sqlx::query(
            "UPDATE tasks SET title = $1, description = $2, due_date = $3, due_time = $4, \
             priority = $5, status = $6, tag_id = $7, repeat_type = $8, repeat_interval = $9, \
             completed_at = $10, updated_at = $11 WHERE id = $12",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.due_time)
        .bind(task.priority)
        .bind(task.status.clone())
        .bind(task.tag_id)
        .bind(task.repeat_type)
        .bind(task.repeat_interval)
        .bind(task.completed_at)
        .bind(task.updated_at)
        .bind(task.id)
        .execute(self.pool())
        .await?;

        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn complete_task(&self, id: Uuid) -> Result<Task, CoreError> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE tasks SET status = 'completed', completed_at = $1, updated_at = $1 \
             WHERE id = $2",
        )
        .bind(now)
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        self.find_task_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }

    async fn reopen_task(&self, id: Uuid) -> Result<Task, CoreError> {
        let result = sqlx::query(
            "UPDATE tasks SET status = 'pending', completed_at = NULL, updated_at = $1 \
             WHERE id = $2",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(self.pool())
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        self.find_task_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }
}
