use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Accepts naive ISO timestamps (what the service emits) as well as
/// offset-qualified ones. Anything else reads as `None` instead of failing
/// the whole record.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse))
}

pub fn parse(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = raw.parse::<NaiveDateTime>() {
        return Some(ts);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.naive_utc())
        .ok()
}
