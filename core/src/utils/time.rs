use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use log::warn;

/// Interpret a naive timestamp string in the target-local zone and return RFC 3339 UTC.
/// Strings that already carry an offset are honored as-is
pub(crate) fn naive_to_utc(value: &str, offset: &FixedOffset) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    if let Ok(aware) = DateTime::parse_from_rfc3339(value) {
        return Some(aware.with_timezone(&Utc).to_rfc3339());
    }

    let formats = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d"];
    for format in formats {
        let naive_result = if format == "%Y-%m-%d" {
            NaiveDate::parse_from_str(value, format).map(|date| date.and_hms_opt(0, 0, 0))
        } else {
            NaiveDateTime::parse_from_str(value, format).map(Some)
        };
        if let Ok(Some(naive)) = naive_result {
            if let Some(aware) = offset.from_local_datetime(&naive).single() {
                return Some(aware.with_timezone(&Utc).to_rfc3339());
            }
        }
    }

    warn!("[taskscan] Could not parse timestamp: {value}");
    None
}

/// Build a UTC boundary timestamp from the date and time parts of a `Job` trigger
pub(crate) fn parts_to_utc(
    year: u16,
    month: u16,
    day: u16,
    hour: u16,
    minute: u16,
    offset: &FixedOffset,
) -> Option<String> {
    let date = NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))?;
    let naive = date.and_hms_opt(u32::from(hour), u32::from(minute), 0)?;
    let aware = offset.from_local_datetime(&naive).single()?;
    Some(aware.with_timezone(&Utc).to_rfc3339())
}

/// Render a minute count as an ISO-8601 duration string (ex: 795 -> PT13H15M)
pub(crate) fn minutes_to_duration(minutes: u32) -> String {
    let mins_per_hour = 60;
    let hours_per_day = 24;

    let total_hours = minutes / mins_per_hour;
    duration_iso(
        total_hours / hours_per_day,
        total_hours % hours_per_day,
        minutes % mins_per_hour,
        0,
    )
}

/// Render a millisecond count as an ISO-8601 duration string (ex: 259200000 -> P3D)
pub(crate) fn milliseconds_to_duration(milliseconds: u32) -> String {
    let ms_per_second = 1000;
    let seconds_per_minute = 60;

    let total_seconds = milliseconds / ms_per_second;
    let total_minutes = total_seconds / seconds_per_minute;
    duration_iso(
        total_minutes / 60 / 24,
        (total_minutes / 60) % 24,
        total_minutes % 60,
        total_seconds % 60,
    )
}

/// Compose an ISO-8601 duration, omitting zero components
fn duration_iso(days: u32, hours: u32, minutes: u32, seconds: u32) -> String {
    if days == 0 && hours == 0 && minutes == 0 && seconds == 0 {
        return String::from("PT0S");
    }

    let mut value = String::from("P");
    if days != 0 {
        value += &format!("{days}D");
    }
    if hours != 0 || minutes != 0 || seconds != 0 {
        value += "T";
        if hours != 0 {
            value += &format!("{hours}H");
        }
        if minutes != 0 {
            value += &format!("{minutes}M");
        }
        if seconds != 0 {
            value += &format!("{seconds}S");
        }
    }
    value
}
