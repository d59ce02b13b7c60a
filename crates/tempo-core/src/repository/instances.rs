use crate::error::CoreError;
use crate::models::{InstanceStatus, TaskInstance};
use crate::repository::{InstanceRepository, SqliteRepository};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

#[async_trait]
impl InstanceRepository for SqliteRepository {
    async fn find_instances(&self) -> Result<Vec<TaskInstance>, CoreError> {
        let instances = sqlx::query_as(
            "SELECT * FROM task_instances ORDER BY instance_date ASC, created_at ASC",
        )
        .fetch_all(self.pool())
        .await?;
        Ok(instances)
    }

    async fn find_instances_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TaskInstance>, CoreError> {
        let instances = sqlx::query_as(
            "SELECT * FROM task_instances WHERE instance_date BETWEEN $1 AND $2 \
             ORDER BY instance_date ASC, created_at ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;
        Ok(instances)
    }

    async fn set_instance_status(
        &self,
        task_id: Uuid,
        date: NaiveDate,
        status: InstanceStatus,
    ) -> Result<TaskInstance, CoreError> {
        let task_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM tasks WHERE id = $1")
            .bind(task_id)
            .fetch_optional(self.pool())
            .await?;
        if task_exists.is_none() {
            return Err(CoreError::NotFound(task_id.to_string()));
        }

        let now = Utc::now();
        let completed_at = (status == InstanceStatus::Completed).then_some(now);

        // One row per (task_id, instance_date): re-marking a date replaces
        // the previous state instead of accumulating rows.
        sqlx::query(
            "INSERT INTO task_instances (id, task_id, instance_date, status, completed_at, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (task_id, instance_date) \
             DO UPDATE SET status = excluded.status, completed_at = excluded.completed_at",
        )
        .bind(Uuid::now_v7())
        .bind(task_id)
        .bind(date)
        .bind(status)
        .bind(completed_at)
        .bind(now)
        .execute(self.pool())
        .await?;

        let instance = sqlx::query_as(
            "SELECT * FROM task_instances WHERE task_id = $1 AND instance_date = $2",
        )
        .bind(task_id)
        .bind(date)
        .fetch_one(self.pool())
        .await?;
        Ok(instance)
    }
}
