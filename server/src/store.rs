//! SQLite persistence for todos.
//!
//! # Design
//! `TodoStore` owns a cloned `SqlitePool` handed in by the caller; there is no
//! process-global handle. Every statement binds its values, including the list
//! filter, which `QueryBuilder` assembles from whichever conditions are set.
//! Rows are read as plain strings and converted into `Todo`; a row whose enum
//! or date column does not parse is reported as `CorruptRow` instead of being
//! passed through.

use std::time::Duration;

use chrono::NaiveDate;
use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use todo_core::date::{canonical, CANONICAL_FORMAT};
use todo_core::{Todo, TodoQuery};

pub static MIGRATOR: Migrator = sqlx::migrate!();

const SELECT_TODO: &str = "SELECT id, todo, priority, status, category, due_date FROM todo";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("todo {0} already exists")]
    Duplicate(i64),

    #[error("stored todo {id} has an invalid {column}")]
    CorruptRow { id: i64, column: &'static str },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migrate(#[from] MigrateError),
}

/// One row of the `todo` table, exactly as stored.
#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    todo: String,
    priority: String,
    status: String,
    category: String,
    due_date: String,
}

impl TryFrom<TodoRow> for Todo {
    type Error = StoreError;

    fn try_from(row: TodoRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = move |column| StoreError::CorruptRow { id, column };

        Ok(Todo {
            id,
            todo: row.todo,
            category: row.category.parse().map_err(|_| corrupt("category"))?,
            priority: row.priority.parse().map_err(|_| corrupt("priority"))?,
            status: row.status.parse().map_err(|_| corrupt("status"))?,
            due_date: NaiveDate::parse_from_str(&row.due_date, CANONICAL_FORMAT)
                .map_err(|_| corrupt("due_date"))?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct TodoStore {
    pool: SqlitePool,
}

impl TodoStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens the database at `url` and applies pending migrations.
    ///
    /// In-memory databases are private to one connection, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = if url.contains(":memory:") || url.contains("mode=memory") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
                .max_connections(5)
                .acquire_timeout(Duration::from_secs(5))
        };
        let pool = options.connect(url).await?;
        MIGRATOR.run(&pool).await?;
        tracing::info!("database ready at {url}");
        Ok(Self::new(pool))
    }

    /// Every todo matching all conditions in `query`, ordered by id.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, query: &TodoQuery) -> Result<Vec<Todo>, StoreError> {
        let mut builder = QueryBuilder::<Sqlite>::new(SELECT_TODO);
        builder.push(" WHERE 1 = 1");
        if let Some(status) = query.status {
            builder.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(priority) = query.priority {
            builder.push(" AND priority = ").push_bind(priority.as_str());
        }
        if let Some(category) = query.category {
            builder.push(" AND category = ").push_bind(category.as_str());
        }
        if let Some(search) = &query.search {
            builder
                .push(" AND todo LIKE ")
                .push_bind(like_pattern(search))
                .push(" ESCAPE '\\'");
        }
        builder.push(" ORDER BY id");

        let rows = builder
            .build_query_as::<TodoRow>()
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Todo::try_from).collect()
    }

    #[tracing::instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query_as::<_, TodoRow>(&format!("{SELECT_TODO} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Todo::try_from).transpose()
    }

    /// Todos due on `date`, ordered by id.
    #[tracing::instrument(skip(self))]
    pub async fn agenda(&self, date: NaiveDate) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query_as::<_, TodoRow>(&format!(
            "{SELECT_TODO} WHERE due_date = ? ORDER BY id"
        ))
        .bind(canonical(date))
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Todo::try_from).collect()
    }

    #[tracing::instrument(skip(self, todo), fields(id = todo.id))]
    pub async fn insert(&self, todo: &Todo) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO todo (id, todo, priority, status, category, due_date) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(todo.id)
        .bind(&todo.todo)
        .bind(todo.priority.as_str())
        .bind(todo.status.as_str())
        .bind(todo.category.as_str())
        .bind(canonical(todo.due_date))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
                Err(StoreError::Duplicate(todo.id))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Overwrites all mutable columns. Returns `false` when no row has the id.
    #[tracing::instrument(skip(self, todo), fields(id = todo.id))]
    pub async fn update(&self, todo: &Todo) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE todo SET todo = ?, priority = ?, status = ?, category = ?, due_date = ? \
             WHERE id = ?",
        )
        .bind(&todo.todo)
        .bind(todo.priority.as_str())
        .bind(todo.status.as_str())
        .bind(todo.category.as_str())
        .bind(canonical(todo.due_date))
        .bind(todo.id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `false` when no row had the id.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// `%text%` with LIKE wildcards in `text` escaped by a backslash.
fn like_pattern(text: &str) -> String {
    let mut pattern = String::with_capacity(text.len() + 2);
    pattern.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
