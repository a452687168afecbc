// ABOUTME: Domain types and input validation for guestd.
// ABOUTME: Defines the Guest entity, the inbound draft shape, and the sanitize step.

pub mod guest;
pub mod validate;

pub use guest::{Guest, GuestDraft, GuestStatus, ParseStatusError};
pub use validate::{ValidationError, sanitize};
