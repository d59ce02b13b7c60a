use crate::error::CoreError;
use crate::models::{Habit, HabitLog, HabitLogStatus, NewHabitData, RepeatType, UpdateHabitData};
use crate::repository::{HabitRepository, SqliteRepository};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

#[async_trait]
impl HabitRepository for SqliteRepository {
    async fn add_habit(&self, data: NewHabitData) -> Result<Habit, CoreError> {
        if data.name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Habit name cannot be empty.".to_string(),
            ));
        }

        let now = Utc::now();
        let habit = Habit {
            id: Uuid::now_v7(),
            name: data.name,
            description: data.description,
            frequency: data.frequency.unwrap_or(RepeatType::Daily),
            frequency_days: data.frequency_days,
            preferred_time: data.preferred_time,
            tag_id: data.tag_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            "INSERT INTO habits (id, name, description, frequency, frequency_days, \
             preferred_time, tag_id, is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(habit.id)
        .bind(&habit.name)
        .bind(&habit.description)
        .bind(habit.frequency)
        .bind(&habit.frequency_days)
        .bind(habit.preferred_time)
        .bind(habit.tag_id)
        .bind(habit.is_active)
        .bind(habit.created_at)
        .bind(habit.updated_at)
        .execute(self.pool())
        .await?;

        Ok(habit)
    }

    async fn find_habits(&self, include_inactive: bool) -> Result<Vec<Habit>, CoreError> {
        // Habits with a preferred time come first (earliest first), the
        // rest follow newest-first.
        let sql = if include_inactive {
            "SELECT * FROM habits \
             ORDER BY preferred_time IS NULL, preferred_time ASC, created_at DESC"
        } else {
            "SELECT * FROM habits WHERE is_active = 1 \
             ORDER BY preferred_time IS NULL, preferred_time ASC, created_at DESC"
        };
        let habits = sqlx::query_as(sql).fetch_all(self.pool()).await?;
        Ok(habits)
    }

    async fn find_habit_by_name(&self, name: &str) -> Result<Option<Habit>, CoreError> {
        let habit = sqlx::query_as("SELECT * FROM habits WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(habit)
    }

    async fn update_habit(&self, id: Uuid, data: UpdateHabitData) -> Result<Habit, CoreError> {
        let mut habit: Habit = sqlx::query_as("SELECT * FROM habits WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        if let Some(name) = data.name {
            if name.trim().is_empty() {
                return Err(CoreError::InvalidInput(
                    "Habit name cannot be empty.".to_string(),
                ));
            }
            habit.name = name;
        }
        if let Some(description) = data.description {
            habit.description = description;
        }
        if let Some(frequency) = data.frequency {
            habit.frequency = frequency;
        }
        if let Some(frequency_days) = data.frequency_days {
            habit.frequency_days = frequency_days;
        }
        if let Some(preferred_time) = data.preferred_time {
            habit.preferred_time = preferred_time;
        }
        if let Some(tag_id) = data.tag_id {
            habit.tag_id = tag_id;
        }
        if let Some(is_active) = data.is_active {
            habit.is_active = is_active;
        }
        habit.updated_at = Utc::now();

        sqlx::query(
            "UPDATE habits SET name = $1, description = $2, frequency = $3, \
             frequency_days = $4, preferred_time = $5, tag_id = $6, is_active = $7, \
             updated_at = $8 WHERE id = $9",
        )
        .bind(&habit.name)
        .bind(&habit.description)
        .bind(habit.frequency)
        .bind(&habit.frequency_days)
        .bind(habit.preferred_time)
        .bind(habit.tag_id)
        .bind(habit.is_active)
        .bind(habit.updated_at)
        .bind(habit.id)
        .execute(self.pool())
        .await?;

        Ok(habit)
    }

    async fn delete_habit(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn log_habit(
        &self,
        habit_id: Uuid,
        date: NaiveDate,
        status: HabitLogStatus,
        notes: Option<String>,
    ) -> Result<HabitLog, CoreError> {
        let habit_exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM habits WHERE id = $1")
            .bind(habit_id)
            .fetch_optional(self.pool())
            .await?;
        if habit_exists.is_none() {
            return Err(CoreError::NotFound(habit_id.to_string()));
        }

        // Re-logging a day replaces the previous entry.
        sqlx::query(
            "INSERT INTO habit_logs (id, habit_id, date, status, notes, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (habit_id, date) \
             DO UPDATE SET status = excluded.status, notes = excluded.notes",
        )
        .bind(Uuid::now_v7())
        .bind(habit_id)
        .bind(date)
        .bind(status)
        .bind(&notes)
        .bind(Utc::now())
        .execute(self.pool())
        .await?;

        let log = sqlx::query_as("SELECT * FROM habit_logs WHERE habit_id = $1 AND date = $2")
            .bind(habit_id)
            .bind(date)
            .fetch_one(self.pool())
            .await?;
        Ok(log)
    }

    async fn find_logs_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<HabitLog>, CoreError> {
        let logs = sqlx::query_as(
            "SELECT * FROM habit_logs WHERE date BETWEEN $1 AND $2 ORDER BY date ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(self.pool())
        .await?;
        Ok(logs)
    }
}
