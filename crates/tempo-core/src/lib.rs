//! # Tempo Core Library
//!
//! A personal productivity library: tasks with daily/weekly/monthly
//! recurrence, per-occurrence completion tracking, tags, and habits, backed
//! by SQLite.
//!
//! The centerpiece is the recurrence expander in [`recurrence`]: a pure
//! function that turns task definitions plus persisted per-occurrence
//! overrides into the concrete, date-sorted occurrences inside an arbitrary
//! calendar window. Everything else is a thin repository layer feeding it
//! snapshots.
//!
//! ## Core Modules
//!
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`recurrence`]: Occurrence expansion over date windows
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use tempo_core::{
//!     db,
//!     recurrence::{expand, DateWindow},
//!     repository::{InstanceRepository, SqliteRepository, TaskFilter, TaskRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let pool = db::establish_connection("tempo.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let tasks: Vec<_> = repo
//!         .find_tasks(&TaskFilter::default())
//!         .await?
//!         .into_iter()
//!         .map(|t| t.into_task())
//!         .collect();
//!     let overrides = repo.find_instances().await?;
//!
//!     let window = DateWindow::new(
//!         NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
//!     );
//!     for occurrence in expand(&tasks, &overrides, &window) {
//!         println!("{} {}", occurrence.instance_date, occurrence.task.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
