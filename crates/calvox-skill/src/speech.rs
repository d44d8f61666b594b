//! Spoken time-of-day phrasing.
//!
//! Text-to-speech reads "9:05" poorly, so start times are routed through
//! idiom dialogs: "oh clock" for round hours, "oh five" for single-digit
//! minutes, "fourteen hundred" on the 24-hour clock.

use crate::dialogs;

/// Clock preference for spoken times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockFormat {
    TwelveHour,
    TwentyFourHour,
}

impl ClockFormat {
    pub fn from_setting(use_24_hour_clock: bool) -> Self {
        if use_24_hour_clock {
            ClockFormat::TwentyFourHour
        } else {
            ClockFormat::TwelveHour
        }
    }
}

/// A start time reduced to the dialog that should speak it, plus the
/// placeholder values the dialog needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenTime {
    pub dialog: &'static str,
    pub hour: String,
    pub minute: String,
    pub meridiem: String,
}

/// Select the dialog and placeholders for an hour/minute pair.
///
/// Pure function of its inputs; `hour` is 0-23 and `minute` 0-59 as they
/// come off a parsed timestamp.
pub fn spoken_time(hour: u32, minute: u32, clock: ClockFormat) -> SpokenTime {
    match clock {
        ClockFormat::TwentyFourHour => {
            let hour_text = format!("{:02}", hour);
            match minute {
                0 => SpokenTime {
                    dialog: dialogs::EVENT_AT_HUNDRED,
                    hour: hour_text,
                    minute: String::new(),
                    meridiem: String::new(),
                },
                1..=9 => SpokenTime {
                    dialog: dialogs::EVENT_AT_OH,
                    hour: hour_text,
                    minute: minute.to_string(),
                    meridiem: String::new(),
                },
                _ => SpokenTime {
                    dialog: dialogs::EVENT_AT,
                    hour: hour_text,
                    minute: format!("{:02}", minute),
                    meridiem: String::new(),
                },
            }
        }
        ClockFormat::TwelveHour => {
            let meridiem = if hour < 12 { "a.m." } else { "p.m." };
            // 0 and 12 both speak as twelve; everything past noon drops 12
            let display_hour = match hour {
                0 => 12,
                1..=12 => hour,
                _ => hour - 12,
            };
            let hour_text = display_hour.to_string();
            match minute {
                0 => SpokenTime {
                    dialog: dialogs::EVENT_AT_OH_CLOCK,
                    hour: hour_text,
                    minute: String::new(),
                    meridiem: meridiem.to_string(),
                },
                1..=9 => SpokenTime {
                    dialog: dialogs::EVENT_AT_OH,
                    hour: hour_text,
                    minute: minute.to_string(),
                    meridiem: meridiem.to_string(),
                },
                _ => SpokenTime {
                    dialog: dialogs::EVENT_AT,
                    hour: hour_text,
                    minute: format!("{:02}", minute),
                    meridiem: meridiem.to_string(),
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twelve_hour_boundaries() {
        let midnight = spoken_time(0, 0, ClockFormat::TwelveHour);
        assert_eq!(midnight.hour, "12");
        assert_eq!(midnight.meridiem, "a.m.");

        let noon = spoken_time(12, 0, ClockFormat::TwelveHour);
        assert_eq!(noon.hour, "12");
        assert_eq!(noon.meridiem, "p.m.");

        let one_pm = spoken_time(13, 0, ClockFormat::TwelveHour);
        assert_eq!(one_pm.hour, "1");
        assert_eq!(one_pm.meridiem, "p.m.");

        let eleven_pm = spoken_time(23, 0, ClockFormat::TwelveHour);
        assert_eq!(eleven_pm.hour, "11");
        assert_eq!(eleven_pm.meridiem, "p.m.");
    }

    #[test]
    fn test_twelve_hour_conversion_for_every_hour() {
        for hour in 0u32..24 {
            let spoken = spoken_time(hour, 15, ClockFormat::TwelveHour);
            let expected_hour = match hour {
                0 => 12,
                1..=12 => hour,
                _ => hour - 12,
            };
            let expected_meridiem = if hour < 12 { "a.m." } else { "p.m." };
            assert_eq!(spoken.hour, expected_hour.to_string(), "hour {}", hour);
            assert_eq!(spoken.meridiem, expected_meridiem, "hour {}", hour);
        }
    }

    #[test]
    fn test_minute_phrase_selection_for_every_minute() {
        for minute in 0u32..60 {
            let spoken = spoken_time(9, minute, ClockFormat::TwelveHour);
            match minute {
                0 => {
                    assert_eq!(spoken.dialog, dialogs::EVENT_AT_OH_CLOCK);
                    assert!(spoken.minute.is_empty());
                }
                1..=9 => {
                    assert_eq!(spoken.dialog, dialogs::EVENT_AT_OH);
                    assert_eq!(spoken.minute, minute.to_string());
                }
                _ => {
                    assert_eq!(spoken.dialog, dialogs::EVENT_AT);
                    assert_eq!(spoken.minute, format!("{:02}", minute));
                }
            }
        }
    }

    #[test]
    fn test_twenty_four_hour_minute_selection() {
        for minute in 0u32..60 {
            let spoken = spoken_time(14, minute, ClockFormat::TwentyFourHour);
            match minute {
                0 => assert_eq!(spoken.dialog, dialogs::EVENT_AT_HUNDRED),
                1..=9 => assert_eq!(spoken.dialog, dialogs::EVENT_AT_OH),
                _ => assert_eq!(spoken.dialog, dialogs::EVENT_AT),
            }
            assert_eq!(spoken.hour, "14");
            assert!(spoken.meridiem.is_empty());
        }
    }

    #[test]
    fn test_twenty_four_hour_zero_pads_hour() {
        let spoken = spoken_time(9, 0, ClockFormat::TwentyFourHour);
        assert_eq!(spoken.hour, "09");
        assert_eq!(spoken.dialog, dialogs::EVENT_AT_HUNDRED);
    }

    #[test]
    fn test_clock_format_from_setting() {
        assert_eq!(ClockFormat::from_setting(true), ClockFormat::TwentyFourHour);
        assert_eq!(ClockFormat::from_setting(false), ClockFormat::TwelveHour);
    }
}
