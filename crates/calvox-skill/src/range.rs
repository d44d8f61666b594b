//! Date-range construction in the account timezone.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone};

/// The range a "today" query covers: now through the end of the local day.
///
/// Starting at the current instant rather than midnight keeps already
/// finished events out of the readback.
pub fn today_range<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let end_naive = now
        .date_naive()
        .and_hms_opt(23, 59, 59)
        .context("Failed to build end of day")?;
    let end = now
        .timezone()
        .from_local_datetime(&end_naive)
        .latest()
        .context("End of day does not exist in this timezone")?;

    Ok((now.clone(), end))
}

/// The range a "tomorrow" query covers: the whole of the next local day.
pub fn tomorrow_range<Tz: TimeZone>(now: &DateTime<Tz>) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let date = now.date_naive() + Duration::days(1);

    let start_naive = date
        .and_hms_opt(0, 0, 0)
        .context("Failed to build start of day")?;
    let start = now
        .timezone()
        .from_local_datetime(&start_naive)
        .earliest()
        .context("Start of day does not exist in this timezone")?;

    let end_naive = date
        .and_hms_opt(23, 59, 59)
        .context("Failed to build end of day")?;
    let end = now
        .timezone()
        .from_local_datetime(&end_naive)
        .latest()
        .context("End of day does not exist in this timezone")?;

    Ok((start, end))
}
