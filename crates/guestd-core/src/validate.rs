// ABOUTME: The sanitize step applied to inbound guest data before it reaches the store.
// ABOUTME: Trims all text fields, then checks them in order and returns the first failure.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::guest::{GuestDraft, GuestStatus};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap());

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10,13}$").unwrap());

/// A field-level validation failure. The display strings are the exact
/// reasons surfaced to clients in the error envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required")]
    NameRequired,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("phone number must be 10-13 digits")]
    InvalidPhone,

    #[error("id card must be 12-20 characters")]
    InvalidIdCard,

    #[error("remark is required")]
    RemarkRequired,
}

/// Normalize and check a guest draft in place.
///
/// Trims leading/trailing whitespace from every text field, then validates
/// them in a fixed order, returning the first failure encountered. An absent
/// status defaults to `Active`. Runs on both the create and update paths.
pub fn sanitize(draft: &mut GuestDraft) -> Result<(), ValidationError> {
    draft.name = draft.name.trim().to_string();
    draft.email = draft.email.trim().to_string();
    draft.phone = draft.phone.trim().to_string();
    draft.id_card = draft.id_card.trim().to_string();
    draft.remark = draft.remark.trim().to_string();

    if draft.name.is_empty() {
        return Err(ValidationError::NameRequired);
    }

    if !EMAIL_RE.is_match(&draft.email) {
        return Err(ValidationError::InvalidEmail);
    }

    if !PHONE_RE.is_match(&draft.phone) {
        return Err(ValidationError::InvalidPhone);
    }

    // Character count, not bytes; the id card is not digit-restricted.
    let id_card_len = draft.id_card.chars().count();
    if !(12..=20).contains(&id_card_len) {
        return Err(ValidationError::InvalidIdCard);
    }

    if draft.remark.is_empty() {
        return Err(ValidationError::RemarkRequired);
    }

    if draft.status.is_none() {
        draft.status = Some(GuestStatus::Active);
    }

    Ok(())
}
