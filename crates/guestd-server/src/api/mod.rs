// ABOUTME: API module containing the HTTP handlers for the guestd REST API.
// ABOUTME: Split into the guest CRUD handlers and the shared response plumbing.

pub mod guests;
pub mod response;
