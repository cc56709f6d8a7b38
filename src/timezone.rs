use time::{Date, OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

/// The current UTC offset of a canonical timezone, e.g. "Pacific/Auckland".
///
/// Returns `None` if the timezone name is not recognised.
pub fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

/// Today's date in `canonical_timezone`.
///
/// Without a timezone, or with one that is not recognised, the system's local
/// offset is used, falling back to UTC if that cannot be determined.
pub fn local_today(canonical_timezone: Option<&str>) -> Date {
    let offset = match canonical_timezone {
        Some(name) => get_local_offset(name).or_else(|| {
            tracing::warn!("unknown timezone {name:?}, using the system offset instead");
            None
        }),
        None => None,
    };

    let offset = offset
        .or_else(|| UtcOffset::current_local_offset().ok())
        .unwrap_or(UtcOffset::UTC);

    OffsetDateTime::now_utc().to_offset(offset).date()
}
