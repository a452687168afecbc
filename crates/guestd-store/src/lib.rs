// ABOUTME: Persistence layer for guestd, backed by a single-file SQLite database.
// ABOUTME: Provides the GuestStore with CRUD primitives and soft-delete bookkeeping.

pub mod sqlite;

pub use sqlite::{GuestStore, StoreError};
