// ABOUTME: Defines the Guest entity and the GuestDraft request payload.
// ABOUTME: Guests carry a ULID id, lifecycle status, and system-managed timestamps.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ulid::Ulid;

/// Lifecycle status of a guest record. `Deleted` is terminal; there is no
/// way back to `Active` once a record has been soft-deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    #[default]
    Active,
    Deleted,
}

impl GuestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GuestStatus::Active => "active",
            GuestStatus::Deleted => "deleted",
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is not a known variant.
#[derive(Debug, Error)]
#[error("unknown guest status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for GuestStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(GuestStatus::Active),
            "deleted" => Ok(GuestStatus::Deleted),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// A persisted guest record, the sole entity in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub id: Ulid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_card: String,
    pub remark: String,
    pub status: GuestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Inbound guest fields as submitted by a client, before sanitation.
/// All text fields default to empty so that a missing field is caught by
/// the validator with a specific reason rather than a parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id_card: String,
    pub remark: String,
    pub status: Option<GuestStatus>,
}

impl Guest {
    /// Create a new Guest from a sanitized draft. Generates a fresh ULID,
    /// stamps both timestamps to now, and forces the status to `Active`
    /// regardless of what the draft carried.
    pub fn new(draft: GuestDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Ulid::new(),
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            id_card: draft.id_card,
            remark: draft.remark,
            status: GuestStatus::Active,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Overwrite every mutable field from a sanitized draft, wholesale.
    /// Updates are full replacements, never field-by-field merges.
    pub fn apply(&mut self, draft: GuestDraft) {
        self.name = draft.name;
        self.email = draft.email;
        self.phone = draft.phone;
        self.id_card = draft.id_card;
        self.remark = draft.remark;
        self.status = draft.status.unwrap_or_default();
        self.updated_at = Utc::now();
    }
}
