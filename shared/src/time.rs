use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolve a local wall-clock date/time in `timezone` to a UTC instant.
///
/// Shift-type window rules are specified in local time (e.g. "Monday 08:00
/// local"); this is the single place that local-time arithmetic crosses into
/// the `DateTime<Utc>` instants stored on a `Shift`. DST gaps and folds
/// resolve to the earliest valid UTC instant, matching `chrono_tz`'s default
/// `LocalResult::single()`-or-earliest behaviour.
pub fn local_to_utc(naive: NaiveDateTime, timezone: Tz) -> DateTime<Utc> {
    match timezone.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.with_timezone(&Utc),
        chrono::LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        chrono::LocalResult::None => {
            // Gap (spring-forward): fall back to UTC-naive interpretation
            // rather than panicking on a schedule that straddles a DST jump.
            Utc.from_utc_datetime(&naive)
        }
    }
}

/// Today's date as observed in `timezone`.
pub fn today_in(timezone: Tz) -> NaiveDate {
    Utc::now().with_timezone(&timezone).date_naive()
}
