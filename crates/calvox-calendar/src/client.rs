//! Google Calendar API client.

use chrono::{DateTime, TimeZone};
use tracing::instrument;

use crate::error::CalendarError;
use crate::types::*;

const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

pub struct CalendarClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl CalendarClient {
    pub fn new(access_token: &str) -> Self {
        Self::with_base_url(access_token, CALENDAR_API_BASE)
    }

    /// Client against an alternate endpoint; tests point this at a mock
    /// server.
    pub fn with_base_url(access_token: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token: access_token.to_string(),
            base_url: base_url.to_string(),
        }
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// List all calendars on the account.
    #[instrument(skip(self), level = "info")]
    pub async fn list_calendars(&self) -> Result<Vec<Calendar>, CalendarError> {
        let url = format!("{}/users/me/calendarList", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let resp: CalendarListResponse = self.handle_response(response).await?;
        Ok(resp.items.into_iter().map(Calendar::from).collect())
    }

    /// List events from a calendar within a time range.
    ///
    /// Recurring events are expanded into single instances and the server
    /// orders them by start time. `time_zone` is the IANA name the response
    /// times are rendered in.
    #[instrument(skip(self, time_min, time_max), level = "info")]
    pub async fn list_events<Tz: TimeZone>(
        &self,
        calendar_id: &str,
        time_min: &DateTime<Tz>,
        time_max: &DateTime<Tz>,
        time_zone: Option<&str>,
        page_token: Option<&str>,
    ) -> Result<EventListResponse, CalendarError>
    where
        Tz::Offset: std::fmt::Display,
    {
        let mut url = format!(
            "{}/calendars/{}/events?timeMin={}&timeMax={}&singleEvents=true&orderBy=startTime&maxResults=50",
            self.base_url,
            urlencoding::encode(calendar_id),
            urlencoding::encode(&time_min.to_rfc3339()),
            urlencoding::encode(&time_max.to_rfc3339()),
        );

        if let Some(tz) = time_zone {
            url.push_str(&format!("&timeZone={}", urlencoding::encode(tz)));
        }
        if let Some(pt) = page_token {
            url.push_str(&format!("&pageToken={}", pt));
        }

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Read the account timezone from the calendar settings.
    #[instrument(skip(self), level = "info")]
    pub async fn timezone(&self) -> Result<String, CalendarError> {
        let url = format!("{}/users/me/settings/timezone", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let setting: ApiSetting = self.handle_response(response).await?;
        Ok(setting.value)
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, CalendarError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| CalendarError::ApiError(format!("JSON parse error: {}", e)))
        } else if status.as_u16() == 401 {
            Err(CalendarError::TokenExpired)
        } else if status.as_u16() == 403 {
            Err(CalendarError::AuthRequired)
        } else if status.as_u16() == 404 {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::CalendarNotFound(text))
        } else if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            Err(CalendarError::RateLimited(retry_after))
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(CalendarError::ApiError(format!("{}: {}", status, text)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn range() -> (DateTime<Utc>, DateTime<Utc>) {
        let time_min = DateTime::parse_from_rfc3339("2024-02-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let time_max = DateTime::parse_from_rfc3339("2024-02-01T23:59:59Z")
            .unwrap()
            .with_timezone(&Utc);
        (time_min, time_max)
    }

    #[tokio::test]
    async fn test_list_calendars() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/calendarList"))
            .and(header("Authorization", "Bearer test_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {"id": "primary", "summary": "My Calendar", "primary": true},
                    {"id": "cal2", "summary": "Work"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("test_token", &mock_server.uri());
        let calendars = client.list_calendars().await.unwrap();

        assert_eq!(calendars.len(), 2);
        assert!(calendars[0].is_primary);
        assert_eq!(calendars[1].summary, "Work");
    }

    #[tokio::test]
    async fn test_list_events() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .and(query_param("singleEvents", "true"))
            .and(query_param("orderBy", "startTime"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [
                    {
                        "id": "event1",
                        "summary": "Meeting",
                        "start": {"dateTime": "2024-02-01T10:00:00Z"},
                        "end": {"dateTime": "2024-02-01T11:00:00Z"}
                    }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("test_token", &mock_server.uri());
        let (time_min, time_max) = range();

        let response = client
            .list_events("primary", &time_min, &time_max, None, None)
            .await
            .unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].summary, Some("Meeting".to_string()));
    }

    #[tokio::test]
    async fn test_list_events_passes_time_zone() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendars/primary/events"))
            .and(query_param("timeZone", "Europe/Helsinki"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": []
            })))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("test_token", &mock_server.uri());
        let (time_min, time_max) = range();

        let response = client
            .list_events("primary", &time_min, &time_max, Some("Europe/Helsinki"), None)
            .await
            .unwrap();
        assert!(response.items.is_empty());
    }

    #[tokio::test]
    async fn test_timezone_setting() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/settings/timezone"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "kind": "calendar#setting",
                "id": "timezone",
                "value": "America/New_York"
            })))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("test_token", &mock_server.uri());
        let tz = client.timezone().await.unwrap();
        assert_eq!(tz, "America/New_York");
    }

    #[tokio::test]
    async fn test_token_expired() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/calendarList"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("expired_token", &mock_server.uri());
        let result = client.list_calendars().await;

        assert!(matches!(result, Err(CalendarError::TokenExpired)));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users/me/calendarList"))
            .respond_with(ResponseTemplate::new(429).append_header("Retry-After", "60"))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("token", &mock_server.uri());
        let result = client.list_calendars().await;

        assert!(matches!(result, Err(CalendarError::RateLimited(60))));
    }

    #[tokio::test]
    async fn test_unknown_calendar() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/calendars/nope/events"))
            .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
            .mount(&mock_server)
            .await;

        let client = CalendarClient::with_base_url("token", &mock_server.uri());
        let (time_min, time_max) = range();
        let result = client
            .list_events("nope", &time_min, &time_max, None, None)
            .await;

        assert!(matches!(result, Err(CalendarError::CalendarNotFound(_))));
    }
}
