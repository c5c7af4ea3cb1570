use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use shared::models::{CreatePollRequest, Poll};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use time::OffsetDateTime;
use tracing::{debug, info};
use uuid::Uuid;

use super::{PollStore, StoreError};

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS polls (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        options TEXT NOT NULL,
        multi_select INTEGER NOT NULL,
        min_choices INTEGER NOT NULL,
        max_choices INTEGER NOT NULL,
        voter_count INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS votes (
        poll_id TEXT NOT NULL,
        option_name TEXT NOT NULL,
        vote_count INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (poll_id, option_name),
        FOREIGN KEY (poll_id) REFERENCES polls(id) ON DELETE CASCADE
    )",
    "CREATE INDEX IF NOT EXISTS polls_created_at_idx ON polls (created_at)",
];

const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

const SELECT_POLL: &str =
    "SELECT id, title, options, multi_select, min_choices, max_choices, voter_count, created_at
     FROM polls";

#[derive(sqlx::FromRow)]
struct PollRow {
    id: String,
    title: String,
    options: String,
    multi_select: bool,
    min_choices: i64,
    max_choices: i64,
    voter_count: i64,
    created_at: i64,
}

impl PollRow {
    fn into_poll(self, votes: HashMap<String, u64>) -> Result<Poll, StoreError> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StoreError::Persistence(format!("invalid poll id {}: {}", self.id, e)))?;
        let created_at = OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.created_at))
            .map_err(|e| StoreError::Persistence(format!("invalid created_at for poll {}: {}", id, e)))?;

        Ok(Poll {
            id,
            title: self.title,
            options: serde_json::from_str(&self.options)?,
            multi_select: self.multi_select,
            min_choices: column_u32(self.min_choices, "min_choices")?,
            max_choices: column_u32(self.max_choices, "max_choices")?,
            votes,
            voter_count: column_u64(self.voter_count, "voter_count")?,
            created_at,
        })
    }
}

fn column_u32(value: i64, column: &str) -> Result<u32, StoreError> {
    u32::try_from(value)
        .map_err(|_| StoreError::Persistence(format!("{} out of range: {}", column, value)))
}

fn column_u64(value: i64, column: &str) -> Result<u64, StoreError> {
    u64::try_from(value)
        .map_err(|_| StoreError::Persistence(format!("{} out of range: {}", column, value)))
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Durable poll storage on SQLite.
///
/// Create and AddVote each run in one transaction. Reads are not wrapped in a
/// transaction, so a snapshot's `votes` and `voter_count` may straddle a
/// concurrent vote.
pub struct SqlPollStore {
    pool: SqlitePool,
}

impl SqlPollStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(BUSY_TIMEOUT);

        // Every connection to `:memory:` is its own database, so keep exactly one alive.
        let pool = if is_in_memory(database_url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections.max(1))
                .connect_with(options.journal_mode(SqliteJournalMode::Wal))
                .await?
        };

        let store = Self { pool };
        store.init_schema().await?;
        info!("✓ Poll schema ready");
        Ok(store)
    }

    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:", 1).await
    }

    #[cfg(test)]
    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn init_schema(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn fetch_votes(&self, poll_id: &str) -> Result<HashMap<String, u64>, StoreError> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT option_name, vote_count FROM votes WHERE poll_id = ?"
        )
        .bind(poll_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(option, count)| column_u64(count, "vote_count").map(|count| (option, count)))
            .collect()
    }
}

#[async_trait]
impl PollStore for SqlPollStore {
    async fn create(&self, request: CreatePollRequest) -> Result<Poll, StoreError> {
        let poll = Poll::new(request);
        let id = poll.id.to_string();
        let options = serde_json::to_string(&poll.options)?;
        let created_at = i64::try_from(poll.created_at.unix_timestamp_nanos())
            .map_err(|_| StoreError::Persistence(format!("created_at out of range: {}", poll.created_at)))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "INSERT INTO polls (id, title, options, multi_select, min_choices, max_choices, voter_count, created_at)
             VALUES (?, ?, ?, ?, ?, ?, 0, ?)"
        )
        .bind(id.as_str())
        .bind(poll.title.as_str())
        .bind(options.as_str())
        .bind(poll.multi_select)
        .bind(i64::from(poll.min_choices))
        .bind(i64::from(poll.max_choices))
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        for option in &poll.options {
            sqlx::query(
                "INSERT INTO votes (poll_id, option_name, vote_count) VALUES (?, ?, 0)
                 ON CONFLICT (poll_id, option_name) DO NOTHING"
            )
            .bind(id.as_str())
            .bind(option.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        debug!(poll_id = %poll.id, options = poll.options.len(), "Created poll");
        Ok(poll)
    }

    async fn get(&self, id: Uuid) -> Result<Poll, StoreError> {
        let id = id.to_string();
        let row: PollRow = sqlx::query_as(&format!("{} WHERE id = ?", SELECT_POLL))
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)?;

        let votes = self.fetch_votes(&id).await?;
        row.into_poll(votes)
    }

    async fn get_all(&self) -> Result<Vec<Poll>, StoreError> {
        let rows: Vec<PollRow> = sqlx::query_as(&format!("{} ORDER BY created_at DESC, rowid DESC", SELECT_POLL))
            .fetch_all(&self.pool)
            .await?;

        let mut polls = Vec::with_capacity(rows.len());
        for row in rows {
            let votes = self.fetch_votes(&row.id).await?;
            polls.push(row.into_poll(votes)?);
        }
        Ok(polls)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM polls WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        debug!(poll_id = %id, "Deleted poll");
        Ok(())
    }

    async fn add_vote(&self, id: Uuid, options: &[String]) -> Result<(), StoreError> {
        let poll_id = id.to_string();
        let mut tx = self.pool.begin().await?;

        // Write first so the transaction holds the write lock before any read.
        let updated = sqlx::query("UPDATE polls SET voter_count = voter_count + 1 WHERE id = ?")
            .bind(poll_id.as_str())
            .execute(&mut *tx)
            .await?;

        if updated.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }

        for option in options {
            sqlx::query(
                "UPDATE votes SET vote_count = vote_count + 1 WHERE poll_id = ? AND option_name = ?"
            )
            .bind(poll_id.as_str())
            .bind(option.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        debug!(poll_id = %id, options = options.len(), "Recorded vote");
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("✓ Poll database closed");
    }
}
