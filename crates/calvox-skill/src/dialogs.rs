//! The skill's dialog set: dotted names and their templates.

use calvox_core::{DialogRegistry, SkillError};

pub const LET_ME_CHECK: &str = "let.me.check";
pub const TODAY_YOU_HAVE: &str = "today.you.have";
pub const TOMORROW_YOU_HAVE: &str = "tomorrow.you.have";
pub const NO_EVENTS_TODAY: &str = "no.events.today";
pub const NO_EVENTS_TOMORROW: &str = "no.events.tomorrow";
pub const CREDENTIALS_INVALID: &str = "credentials.invalid";

pub const EVENT_AT: &str = "event.is.at";
pub const EVENT_AT_OH: &str = "event.is.at.oh";
pub const EVENT_AT_OH_CLOCK: &str = "event.is.at.oh.clock";
pub const EVENT_AT_HUNDRED: &str = "event.is.at.hundred";
pub const EVENT_ALL_DAY: &str = "event.is.all.day";

const TEMPLATES: &[(&str, &str)] = &[
    (LET_ME_CHECK, "Let me check."),
    (TODAY_YOU_HAVE, "Today, you have the following events."),
    (TOMORROW_YOU_HAVE, "Tomorrow, you have the following events."),
    (NO_EVENTS_TODAY, "You have nothing scheduled today."),
    (NO_EVENTS_TOMORROW, "You have nothing scheduled tomorrow."),
    (
        CREDENTIALS_INVALID,
        "I can't reach your calendar. Please reconnect your Google account.",
    ),
    (
        EVENT_AT,
        "{{event_summary}}, at {{event_start_hr}} {{event_start_min}} {{meridiem}}",
    ),
    (
        EVENT_AT_OH,
        "{{event_summary}}, at {{event_start_hr}} oh {{event_start_min}} {{meridiem}}",
    ),
    (
        EVENT_AT_OH_CLOCK,
        "{{event_summary}}, at {{event_start_hr}} oh clock {{meridiem}}",
    ),
    (EVENT_AT_HUNDRED, "{{event_summary}}, at {{event_start_hr}} hundred"),
    (EVENT_ALL_DAY, "{{event_summary}}, all day"),
];

/// Build the registry with every dialog the skill speaks.
pub fn registry() -> Result<DialogRegistry, SkillError> {
    let mut dialogs = DialogRegistry::new();
    for (name, template) in TEMPLATES {
        dialogs.register(name, template)?;
    }
    Ok(dialogs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_every_dialog_registers() {
        let dialogs = registry().unwrap();
        for (name, _) in TEMPLATES {
            assert!(dialogs.contains(name), "missing dialog {}", name);
        }
    }

    #[test]
    fn test_event_dialog_rendering() {
        let dialogs = registry().unwrap();

        let params = json!({
            "event_summary": "Standup",
            "event_start_hr": "9",
            "event_start_min": "30",
            "meridiem": "a.m.",
        });
        assert_eq!(
            dialogs.render(EVENT_AT, &params).unwrap(),
            "Standup, at 9 30 a.m."
        );

        let params = json!({
            "event_summary": "Standup",
            "event_start_hr": "9",
            "event_start_min": "",
            "meridiem": "a.m.",
        });
        assert_eq!(
            dialogs.render(EVENT_AT_OH_CLOCK, &params).unwrap(),
            "Standup, at 9 oh clock a.m."
        );

        let params = json!({
            "event_summary": "Standup",
            "event_start_hr": "14",
        });
        assert_eq!(
            dialogs.render(EVENT_AT_HUNDRED, &params).unwrap(),
            "Standup, at 14 hundred"
        );

        let params = json!({"event_summary": "Holiday"});
        assert_eq!(
            dialogs.render(EVENT_ALL_DAY, &params).unwrap(),
            "Holiday, all day"
        );
    }
}
