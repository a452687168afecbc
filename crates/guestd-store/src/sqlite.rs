// ABOUTME: SQLite-backed store for guest records with soft-delete semantics.
// ABOUTME: Ensures the schema on open and provides insert, list, get, update, and delete.

use std::path::Path;

use chrono::{DateTime, Utc};
use guestd_core::Guest;
use rusqlite::types::Type;
use rusqlite::{Connection, params};
use thiserror::Error;
use ulid::Ulid;

/// Errors that can occur during guest store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("guest not found")]
    NotFound,

    #[error("conflicts with an existing guest: {0}")]
    Conflict(String),
}

/// Durable storage for guest records. One table, one connection; callers
/// serialize access. Deletion is a status flip, never a row removal.
pub struct GuestStore {
    conn: Connection,
}

impl GuestStore {
    /// Open or create the guest database at the given path and ensure the
    /// schema exists. Never performs destructive migrations.
    ///
    /// Uniqueness of email and id_card is scoped to non-deleted records via
    /// partial indexes, so a soft-deleted guest's email can be re-registered.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS guests (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                id_card TEXT NOT NULL,
                remark TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                deleted_at TEXT
            );

            CREATE UNIQUE INDEX IF NOT EXISTS guests_email_live
                ON guests(email) WHERE status != 'deleted';

            CREATE UNIQUE INDEX IF NOT EXISTS guests_id_card_live
                ON guests(id_card) WHERE status != 'deleted';",
        )?;

        tracing::debug!("guest store opened at {}", path.display());
        Ok(Self { conn })
    }

    /// Persist a new guest record.
    pub fn insert(&self, guest: &Guest) -> Result<(), StoreError> {
        self.conn
            .execute(
                "INSERT INTO guests (id, name, email, phone, id_card, remark, status, created_at, updated_at, deleted_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    guest.id.to_string(),
                    guest.name,
                    guest.email,
                    guest.phone,
                    guest.id_card,
                    guest.remark,
                    guest.status.as_str(),
                    guest.created_at.to_rfc3339(),
                    guest.updated_at.to_rfc3339(),
                    guest.deleted_at.map(|t| t.to_rfc3339()),
                ],
            )
            .map_err(map_write_err)?;
        Ok(())
    }

    /// List all active guests in registration order. Soft-deleted records
    /// never appear here.
    pub fn list_active(&self) -> Result<Vec<Guest>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, email, phone, id_card, remark, status, created_at, updated_at, deleted_at
             FROM guests WHERE status = 'active' ORDER BY created_at ASC",
        )?;

        let rows = stmt.query_map([], row_to_guest)?;

        let mut guests = Vec::new();
        for row in rows {
            guests.push(row?);
        }
        Ok(guests)
    }

    /// Fetch a guest by id, soft-deleted or not.
    pub fn get(&self, id: &Ulid) -> Result<Guest, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, email, phone, id_card, remark, status, created_at, updated_at, deleted_at
             FROM guests WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], row_to_guest) {
            Ok(guest) => Ok(guest),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(StoreError::NotFound),
            Err(e) => Err(StoreError::Sqlite(e)),
        }
    }

    /// Overwrite every mutable field of an existing record. Full replacement,
    /// last write wins; there is no conflict detection.
    pub fn update(&self, guest: &Guest) -> Result<(), StoreError> {
        let changed = self
            .conn
            .execute(
                "UPDATE guests
                 SET name = ?1, email = ?2, phone = ?3, id_card = ?4, remark = ?5,
                     status = ?6, updated_at = ?7
                 WHERE id = ?8",
                params![
                    guest.name,
                    guest.email,
                    guest.phone,
                    guest.id_card,
                    guest.remark,
                    guest.status.as_str(),
                    guest.updated_at.to_rfc3339(),
                    guest.id.to_string(),
                ],
            )
            .map_err(map_write_err)?;

        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Mark a guest as deleted, recording when. The row is kept.
    pub fn soft_delete(&self, id: &Ulid, when: DateTime<Utc>) -> Result<(), StoreError> {
        let changed = self.conn.execute(
            "UPDATE guests SET status = 'deleted', deleted_at = ?1, updated_at = ?1 WHERE id = ?2",
            params![when.to_rfc3339(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

/// Map a uniqueness-constraint failure to Conflict, everything else to Sqlite.
fn map_write_err(err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(e, msg)
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            StoreError::Conflict(msg.unwrap_or_else(|| "uniqueness constraint".to_string()))
        }
        other => StoreError::Sqlite(other),
    }
}

fn row_to_guest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Guest> {
    let id: String = row.get(0)?;
    let status: String = row.get(6)?;
    let created_at: String = row.get(7)?;
    let updated_at: String = row.get(8)?;
    let deleted_at: Option<String> = row.get(9)?;

    Ok(Guest {
        id: id
            .parse::<Ulid>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))?,
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        id_card: row.get(4)?,
        remark: row.get(5)?,
        status: status
            .parse()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e)))?,
        created_at: parse_timestamp(&created_at, 7)?,
        updated_at: parse_timestamp(&updated_at, 8)?,
        deleted_at: deleted_at.as_deref().map(|t| parse_timestamp(t, 9)).transpose()?,
    })
}

fn parse_timestamp(raw: &str, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
