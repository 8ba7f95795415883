//! Date/time parsing and the session duration rule.

use chrono::{NaiveDate, NaiveTime};

use crate::errors::ModelError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const TIME_FORMAT: &str = "%H:%M";

pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| ModelError::invalid(field, format!("expected YYYY-MM-DD, got {raw:?}")))
}

/// Accepts `HH:MM`, and `HH:MM:SS` as returned by SQL `TIME` columns.
pub fn parse_time(field: &str, raw: &str) -> Result<NaiveTime, ModelError> {
    let s = raw.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|_| ModelError::invalid(field, format!("expected HH:MM, got {raw:?}")))
}

pub fn format_date(d: NaiveDate) -> String {
    d.format(DATE_FORMAT).to_string()
}

pub fn format_time(t: NaiveTime) -> String {
    t.format(TIME_FORMAT).to_string()
}

/// Minutes between `start` and `end` on `date`, rounded half away from zero.
///
/// An end before the start is rejected: sessions never span midnight.
pub fn duration_minutes(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Result<i32, ModelError> {
    let span = date.and_time(end) - date.and_time(start);
    let millis = span.num_milliseconds();
    if millis < 0 {
        return Err(ModelError::Validation(format!(
            "heure_fin ({}) is before heure_debut ({})",
            format_time(end),
            format_time(start)
        )));
    }
    Ok((millis as f64 / 60_000.0).round() as i32)
}
