use chrono::{DateTime, Local, Utc};

/// Timestamp as stored in the DB (RFC 3339, UTC, second precision).
pub fn to_db(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

pub fn from_db(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Human form in the local timezone, e.g. `2025-03-14 18:02`.
pub fn display(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn display_opt(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(display).unwrap_or_else(|| "--".to_string())
}
