//! Calendar API types and data structures.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;

/// Calendar event as used by the skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub calendar_id: String,
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
    pub all_day: bool,
}

/// Event time - a specific datetime, or a date for all-day events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventTime {
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
}

impl EventTime {
    /// Comparable instant; all-day events collapse to midnight.
    pub fn as_datetime(&self) -> DateTime<Utc> {
        match self {
            EventTime::DateTime(dt) => *dt,
            EventTime::Date(d) => d.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}

/// Calendar metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub id: String,
    pub summary: String,
    pub is_primary: bool,
}

// API Response Types

/// Google Calendar API event response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEvent {
    pub id: String,
    pub summary: Option<String>,
    pub start: Option<ApiEventTime>,
    pub end: Option<ApiEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEventTime {
    pub date_time: Option<String>,
    pub date: Option<String>,
    pub time_zone: Option<String>,
}

/// API response for event list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventListResponse {
    #[serde(default)]
    pub items: Vec<ApiEvent>,
    pub next_page_token: Option<String>,
}

/// API response for calendar list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarListResponse {
    #[serde(default)]
    pub items: Vec<ApiCalendar>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiCalendar {
    pub id: String,
    pub summary: Option<String>,
    #[serde(default)]
    pub primary: bool,
}

/// A single entry of the account settings collection.
#[derive(Debug, Deserialize)]
pub struct ApiSetting {
    pub id: String,
    pub value: String,
}

impl Event {
    /// Convert API response to a skill event.
    ///
    /// The start timestamp must be a valid RFC 3339 datetime or an ISO
    /// date; anything else is rejected here so nothing downstream has to
    /// defend against it.
    pub fn from_api(api: ApiEvent, calendar_id: &str) -> Result<Self, CalendarError> {
        let start_raw = api
            .start
            .ok_or_else(|| CalendarError::InvalidEventData(format!("event {} has no start", api.id)))?;

        let (start, all_day) = parse_event_time(&start_raw).ok_or_else(|| {
            CalendarError::InvalidEventData(format!("event {} has an unparseable start", api.id))
        })?;

        let end = api
            .end
            .as_ref()
            .and_then(|t| parse_event_time(t))
            .map(|(time, _)| time)
            .unwrap_or_else(|| start.clone());

        Ok(Self {
            id: api.id,
            calendar_id: calendar_id.to_string(),
            summary: api.summary.unwrap_or_default(),
            start,
            end,
            all_day,
        })
    }
}

impl From<ApiCalendar> for Calendar {
    fn from(api: ApiCalendar) -> Self {
        Self {
            id: api.id,
            summary: api.summary.unwrap_or_default(),
            is_primary: api.primary,
        }
    }
}

fn parse_event_time(api: &ApiEventTime) -> Option<(EventTime, bool)> {
    if let Some(dt_str) = &api.date_time {
        if let Ok(dt) = DateTime::parse_from_rfc3339(dt_str) {
            return Some((EventTime::DateTime(dt.with_timezone(&Utc)), false));
        }
    }
    if let Some(date_str) = &api.date {
        if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
            return Some((EventTime::Date(date), true));
        }
    }
    None
}
