use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

use crate::availability::{Availability, decode_with_report, encode};
use crate::event::{Event, User};

const START_DAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid event id: {0}")]
    InvalidEventId(#[from] uuid::Error),
}

/// Where weekly availability records live, keyed by `(user_id, start_day)`.
#[cfg_attr(test, mockall::automock)]
pub trait AvailabilityStore {
    fn get_weekly_availability(
        &self,
        user_id: i64,
        start_day: NaiveDate,
    ) -> Result<Option<Vec<Availability>>, StoreError>;

    fn update_weekly_availability(
        &self,
        user_id: i64,
        start_day: NaiveDate,
        availability: &[Availability],
    ) -> Result<(), StoreError>;

    fn list_user_names(&self) -> Result<Vec<String>, StoreError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("Creating database directory {} failed: {}", parent.display(), e);
        }
        let store = Self::new(Connection::open(path)?);
        store.initialize()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self::new(Connection::open_in_memory()?);
        store.initialize()?;
        Ok(store)
    }

    pub fn initialize(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE
            );
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                dates TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS event_users (
                event_id TEXT NOT NULL,
                user_id INTEGER NOT NULL,
                PRIMARY KEY (event_id, user_id)
            );
            CREATE TABLE IF NOT EXISTS weekly_availabilities (
                user_id INTEGER NOT NULL,
                start_day TEXT NOT NULL,
                availability TEXT NOT NULL,
                PRIMARY KEY (user_id, start_day)
            );",
        )?;
        Ok(())
    }

    pub fn find_or_create_user(&self, name: &str) -> Result<User, StoreError> {
        self.conn.execute("INSERT OR IGNORE INTO users (name) VALUES (?1)", [name])?;
        let id = self
            .conn
            .query_row("SELECT id FROM users WHERE name = ?1", [name], |row| row.get(0))?;
        Ok(User {
            id,
            name: name.to_string(),
        })
    }

    pub fn store_event(&self, event: &Event) -> Result<(), StoreError> {
        let dates = serde_json::to_string(&event.dates)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO events (id, name, dates) VALUES (?1, ?2, ?3)",
            rusqlite::params![event.id.to_string(), &event.name, &dates],
        )?;
        Ok(())
    }

    pub fn load_event(&self, id: &Uuid) -> Result<Option<Event>, StoreError> {
        let row: Option<(String, String)> = self
            .conn
            .query_row(
                "SELECT name, dates FROM events WHERE id = ?1",
                [id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        row.map(|(name, dates)| {
            Ok::<_, StoreError>(Event {
                id: *id,
                name,
                dates: serde_json::from_str(&dates)?,
            })
        })
        .transpose()
    }

    pub fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT id, name, dates FROM events ORDER BY name ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, name, dates) = row?;
            events.push(Event {
                id: Uuid::parse_str(&id)?,
                name,
                dates: serde_json::from_str(&dates)?,
            });
        }
        Ok(events)
    }

    pub fn join_event(&self, event_id: &Uuid, user_id: i64) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO event_users (event_id, user_id) VALUES (?1, ?2)",
            rusqlite::params![event_id.to_string(), user_id],
        )?;
        Ok(())
    }

    pub fn event_participants(&self, event_id: &Uuid) -> Result<Vec<User>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT users.id, users.name FROM users
             JOIN event_users ON event_users.user_id = users.id
             WHERE event_users.event_id = ?1
             ORDER BY users.name ASC",
        )?;
        let users = stmt
            .query_map([event_id.to_string()], |row| {
                Ok(User {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(users)
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        );
        result.unwrap_or(0) > 0
    }
}

impl AvailabilityStore for SqliteStore {
    fn get_weekly_availability(
        &self,
        user_id: i64,
        start_day: NaiveDate,
    ) -> Result<Option<Vec<Availability>>, StoreError> {
        let encoded: Option<String> = self
            .conn
            .query_row(
                "SELECT availability FROM weekly_availabilities WHERE user_id = ?1 AND start_day = ?2",
                rusqlite::params![user_id, start_day.format(START_DAY_FORMAT).to_string()],
                |row| row.get(0),
            )
            .optional()?;

        Ok(encoded.map(|encoded| {
            let report = decode_with_report(&encoded);
            if !report.is_clean() {
                tracing::warn!(
                    "Weekly availability for user {} starting {} had {} unreadable slots",
                    user_id,
                    start_day,
                    report.unknown
                );
            }
            report.values
        }))
    }

    fn update_weekly_availability(
        &self,
        user_id: i64,
        start_day: NaiveDate,
        availability: &[Availability],
    ) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO weekly_availabilities (user_id, start_day, availability)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![
                user_id,
                start_day.format(START_DAY_FORMAT).to_string(),
                encode(availability),
            ],
        )?;
        Ok(())
    }

    fn list_user_names(&self) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT name FROM users ORDER BY name ASC")?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<SqliteResult<Vec<String>>>()?;
        Ok(names)
    }
}
