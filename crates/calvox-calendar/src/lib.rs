//! Google Calendar integration for the calvox skill.
//!
//! Read-only client: calendar list, event list, account timezone.

pub mod client;
pub mod error;
pub mod types;

pub use client::CalendarClient;
pub use error::CalendarError;
pub use types::{Calendar, Event, EventListResponse, EventTime};
