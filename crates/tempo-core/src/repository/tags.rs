use crate::error::CoreError;
use crate::models::Tag;
use crate::repository::{SqliteRepository, TagRepository};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

#[async_trait]
impl TagRepository for SqliteRepository {
    async fn add_tag(&self, name: String, color: String) -> Result<Tag, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "Tag name cannot be empty.".to_string(),
            ));
        }

        let tag = Tag {
            id: Uuid::now_v7(),
            name,
            color,
            created_at: Utc::now(),
        };

        let result = sqlx::query("INSERT INTO tags (id, name, color, created_at) VALUES ($1, $2, $3, $4)")
            .bind(tag.id)
            .bind(&tag.name)
            .bind(&tag.color)
            .bind(tag.created_at)
            .execute(self.pool())
            .await;

        match result {
            Ok(_) => Ok(tag),
            Err(e) if e.as_database_error().is_some_and(|d| d.is_unique_violation()) => Err(
                CoreError::InvalidInput(format!("Tag '{}' already exists.", tag.name)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_tags(&self) -> Result<Vec<Tag>, CoreError> {
        let tags = sqlx::query_as("SELECT * FROM tags ORDER BY name ASC")
            .fetch_all(self.pool())
            .await?;
        Ok(tags)
    }

    async fn find_tag_by_name(&self, name: &str) -> Result<Option<Tag>, CoreError> {
        let tag = sqlx::query_as("SELECT * FROM tags WHERE name = $1")
            .bind(name)
            .fetch_optional(self.pool())
            .await?;
        Ok(tag)
    }

    async fn delete_tag(&self, name: &str) -> Result<(), CoreError> {
        // ON DELETE SET NULL detaches tasks and habits referencing the tag.
        let result = sqlx::query("DELETE FROM tags WHERE name = $1")
            .bind(name)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(format!("No tag named '{name}'")));
        }
        Ok(())
    }
}
