//! The calendar skill: lifecycle, intents, and readback handlers.

use async_trait::async_trait;
use chrono::{Timelike, Utc};
use chrono_tz::Tz;
use serde_json::json;

use calvox_auth::{GoogleOAuth2Provider, TokenStorage};
use calvox_calendar::{CalendarClient, Event, EventTime};
use calvox_core::{Config, DialogRegistry, Intent, IntentBuilder, Skill, SkillContext, SkillError};

use crate::dialogs;
use crate::gather;
use crate::range;
use crate::speech::{spoken_time, ClockFormat};

pub const WHAT_IS_TODAY: &str = "WhatIsScheduledToday";
pub const WHAT_IS_TOMORROW: &str = "WhatIsScheduledTomorrow";

/// Which day a readback covers.
#[derive(Debug, Clone, Copy)]
enum Day {
    Today,
    Tomorrow,
}

/// Skill that reads the day's calendar events aloud.
pub struct CalendarSkill {
    provider: GoogleOAuth2Provider,
    storage: TokenStorage,
    dialogs: DialogRegistry,
    api_base: Option<String>,
    /// Account timezone, fetched once at initialization. `None` until the
    /// skill has authenticated successfully.
    timezone: Option<Tz>,
}

impl CalendarSkill {
    /// Create the skill against the default token store.
    pub fn new(config: &Config) -> Result<Self, SkillError> {
        let storage = TokenStorage::open()?;
        Self::with_storage(config, storage)
    }

    /// Create the skill against an explicit token store.
    pub fn with_storage(config: &Config, storage: TokenStorage) -> Result<Self, SkillError> {
        let provider = GoogleOAuth2Provider::new(
            config.google.client_id.clone(),
            config.google.client_secret.clone(),
        );

        Ok(Self {
            provider,
            storage,
            dialogs: dialogs::registry()?,
            api_base: None,
            timezone: None,
        })
    }

    /// Point the skill at an alternate Calendar API endpoint; tests use
    /// this with a mock server.
    pub fn with_api_base(mut self, base_url: impl Into<String>) -> Self {
        self.api_base = Some(base_url.into());
        self
    }

    fn client(&self, access_token: &str) -> CalendarClient {
        match &self.api_base {
            Some(base) => CalendarClient::with_base_url(access_token, base),
            None => CalendarClient::new(access_token),
        }
    }

    fn speak_dialog(
        &self,
        ctx: &SkillContext,
        name: &str,
        params: &serde_json::Value,
    ) -> Result<(), SkillError> {
        let text = self.dialogs.render(name, params)?;
        ctx.speaker.speak(&text);
        Ok(())
    }

    /// Speak the fixed apology for absent or invalid credentials, and log
    /// the underlying cause.
    fn speak_credentials_invalid(
        &self,
        ctx: &SkillContext,
        cause: &anyhow::Error,
    ) -> Result<(), SkillError> {
        tracing::error!(
            "Calendar skill error: invalid credentials; run `calvox auth` to refresh: {:#}",
            cause
        );
        self.speak_dialog(ctx, dialogs::CREDENTIALS_INVALID, &json!({}))
    }

    async fn read_schedule(&self, ctx: &SkillContext, day: Day) -> Result<(), SkillError> {
        let Some(tz) = self.timezone else {
            // Initialization already apologized once; repeat it rather
            // than touching the API without credentials.
            self.speak_credentials_invalid(ctx, &anyhow::anyhow!("skill is not authenticated"))?;
            return Ok(());
        };

        self.speak_dialog(ctx, dialogs::LET_ME_CHECK, &json!({}))?;

        let access_token =
            match calvox_auth::valid_access_token(&self.provider, &self.storage).await {
                Ok(token) => token,
                Err(err) => return self.speak_credentials_invalid(ctx, &err),
            };
        let client = self.client(&access_token);

        let now = Utc::now().with_timezone(&tz);
        let (time_min, time_max) = match day {
            Day::Today => range::today_range(&now)?,
            Day::Tomorrow => range::tomorrow_range(&now)?,
        };

        let calendars = client
            .list_calendars()
            .await
            .map_err(anyhow::Error::from)?;

        let settings = &ctx.config.skill;
        if settings.enable_all_calendars {
            tracing::info!("All calendars enabled");
        } else {
            tracing::info!("Enabled calendars are {:?}", settings.enabled_calendars);
        }
        let calendar_ids = gather::resolve_calendar_ids(
            &calendars,
            &settings.enabled_calendars,
            settings.enable_all_calendars,
        );

        let events = gather::fetch_events(&client, &calendar_ids, &time_min, &time_max, Some(tz.name()))
            .await
            .map_err(anyhow::Error::from)?;

        if events.is_empty() {
            let dialog = match day {
                Day::Today => dialogs::NO_EVENTS_TODAY,
                Day::Tomorrow => dialogs::NO_EVENTS_TOMORROW,
            };
            return self.speak_dialog(ctx, dialog, &json!({}));
        }

        let preamble = match day {
            Day::Today => dialogs::TODAY_YOU_HAVE,
            Day::Tomorrow => dialogs::TOMORROW_YOU_HAVE,
        };
        self.speak_dialog(ctx, preamble, &json!({}))?;

        let clock = ClockFormat::from_setting(settings.use_24_hour_clock);
        for event in &events {
            self.speak_event(ctx, event, clock, &tz)?;
        }

        Ok(())
    }

    fn speak_event(
        &self,
        ctx: &SkillContext,
        event: &Event,
        clock: ClockFormat,
        tz: &Tz,
    ) -> Result<(), SkillError> {
        match &event.start {
            EventTime::Date(_) => self.speak_dialog(
                ctx,
                dialogs::EVENT_ALL_DAY,
                &json!({"event_summary": event.summary}),
            ),
            EventTime::DateTime(start) => {
                let local = start.with_timezone(tz);
                let spoken = spoken_time(local.hour(), local.minute(), clock);
                self.speak_dialog(
                    ctx,
                    spoken.dialog,
                    &json!({
                        "event_summary": event.summary,
                        "event_start_hr": spoken.hour,
                        "event_start_min": spoken.minute,
                        "meridiem": spoken.meridiem,
                    }),
                )
            }
        }
    }
}

#[async_trait]
impl Skill for CalendarSkill {
    fn id(&self) -> &str {
        "calendar"
    }

    fn name(&self) -> &str {
        "Google Calendar"
    }

    fn intents(&self) -> Vec<Intent> {
        vec![
            IntentBuilder::new(WHAT_IS_TODAY)
                .require("what", &["what", "whats"])
                .require(
                    "scheduled",
                    &["scheduled", "planned", "happening", "on my calendar", "on my schedule"],
                )
                .require("today", &["today"])
                .build(),
            IntentBuilder::new(WHAT_IS_TOMORROW)
                .require("what", &["what", "whats"])
                .require(
                    "scheduled",
                    &["scheduled", "planned", "happening", "on my calendar", "on my schedule"],
                )
                .require("tomorrow", &["tomorrow"])
                .build(),
        ]
    }

    async fn initialize(&mut self, ctx: &SkillContext) -> Result<(), SkillError> {
        match calvox_auth::valid_access_token(&self.provider, &self.storage).await {
            Ok(access_token) => {
                let client = self.client(&access_token);

                // The account timezone drives all date ranges; assume the
                // desired timezone matches the calendar's.
                let tz_name = client.timezone().await.map_err(anyhow::Error::from)?;
                let tz = tz_name.parse::<Tz>().map_err(|_| {
                    SkillError::Config(format!("Unknown account timezone: {}", tz_name))
                })?;

                tracing::info!("Calendar skill initialized with timezone {}", tz.name());
                self.timezone = Some(tz);
                Ok(())
            }
            Err(err) => {
                self.speak_credentials_invalid(ctx, &err)?;
                Ok(())
            }
        }
    }

    async fn handle_intent(
        &self,
        intent: &str,
        _utterance: &str,
        ctx: &SkillContext,
    ) -> Result<(), SkillError> {
        match intent {
            WHAT_IS_TODAY => self.read_schedule(ctx, Day::Today).await,
            WHAT_IS_TOMORROW => self.read_schedule(ctx, Day::Tomorrow).await,
            other => Err(SkillError::UnknownIntent(other.to_string())),
        }
    }

    async fn shutdown(&mut self) -> Result<(), SkillError> {
        tracing::debug!("Calendar skill shut down");
        Ok(())
    }
}
