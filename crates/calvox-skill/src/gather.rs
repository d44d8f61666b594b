//! Event gathering: calendar selection, fetch, merge, sort.

use chrono::{DateTime, TimeZone};

use calvox_calendar::{Calendar, CalendarClient, CalendarError, Event};

/// Resolve which calendar ids to read, by display name.
///
/// `enable_all` overrides the name list; when nothing matches, the primary
/// calendar is the fallback so the skill always has something to read.
pub fn resolve_calendar_ids(
    calendars: &[Calendar],
    enabled: &[String],
    enable_all: bool,
) -> Vec<String> {
    let mut ids: Vec<String> = if enable_all {
        calendars.iter().map(|c| c.id.clone()).collect()
    } else {
        calendars
            .iter()
            .filter(|c| enabled.iter().any(|name| name == &c.summary))
            .map(|c| c.id.clone())
            .collect()
    };

    if ids.is_empty() {
        ids.push("primary".to_string());
    }

    ids
}

/// Fetch events from every selected calendar over the range, merged into
/// one list ordered by start time.
pub async fn fetch_events<Tz: TimeZone>(
    client: &CalendarClient,
    calendar_ids: &[String],
    time_min: &DateTime<Tz>,
    time_max: &DateTime<Tz>,
    time_zone: Option<&str>,
) -> Result<Vec<Event>, CalendarError>
where
    Tz::Offset: std::fmt::Display,
{
    let mut events = Vec::new();

    for calendar_id in calendar_ids {
        let mut page_token: Option<String> = None;
        loop {
            let response = client
                .list_events(
                    calendar_id,
                    time_min,
                    time_max,
                    time_zone,
                    page_token.as_deref(),
                )
                .await?;

            for api_event in response.items {
                match Event::from_api(api_event, calendar_id) {
                    Ok(event) => events.push(event),
                    Err(err) => tracing::warn!("Dropping event: {}", err),
                }
            }

            match response.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }
    }

    sort_by_start(&mut events);
    Ok(events)
}

/// Stable sort by start instant; events with equal starts keep their
/// fetch order.
pub fn sort_by_start(events: &mut [Event]) {
    events.sort_by_key(|event| event.start.as_datetime());
}
