pub mod calendar;
pub mod incidents;
pub mod incidents_standby;
pub mod policy;
pub mod waakdienst;
pub mod window;

pub use calendar::{Calendar, FixedHolidayCalendar};
pub use incidents::IncidentsScheduler;
pub use incidents_standby::IncidentsStandbyScheduler;
pub use policy::ShiftTypePolicy;
pub use waakdienst::WaakdienstScheduler;
pub use window::Window;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use shared::ShiftTypeKey;

/// One shift type's window-generation plug-in. The window rule, mutex
/// group, and fairness weight (all on `ShiftTypePolicy`) are the only
/// shift-type-specific knowledge; the Orchestrator treats every
/// implementation uniformly.
pub trait ShiftTypeScheduler: Send + Sync {
    fn shift_type(&self) -> ShiftTypeKey;
    fn policy(&self) -> &ShiftTypePolicy;

    /// Ordered windows of this shift type inside `[horizon_start,
    /// horizon_end)`, in local `timezone`, skipping or including holidays
    /// per this scheduler's `holiday_policy`.
    fn enumerate_windows(
        &self,
        horizon_start: DateTime<Utc>,
        horizon_end: DateTime<Utc>,
        timezone: Tz,
        calendar: &dyn Calendar,
    ) -> Vec<Window>;
}

/// Monday dates (local to `timezone`) of every ISO week whose `[Mon, Sun]`
/// span overlaps `[horizon_start, horizon_end)`. Shared by the built-in
/// window rules, which are all anchored to the ISO week grid.
pub(crate) fn iso_week_mondays_overlapping(
    horizon_start: DateTime<Utc>,
    horizon_end: DateTime<Utc>,
    timezone: Tz,
) -> Vec<NaiveDate> {
    let start_date = horizon_start.with_timezone(&timezone).date_naive();
    let end_date = horizon_end.with_timezone(&timezone).date_naive();

    let first_monday = start_date - Duration::days(start_date.weekday().num_days_from_monday() as i64);

    let mut mondays = Vec::new();
    let mut monday = first_monday;
    while monday < end_date {
        mondays.push(monday);
        monday += Duration::days(7);
    }
    mondays
}

pub(crate) fn any_holiday_in_range(
    calendar: &dyn Calendar,
    start: NaiveDate,
    end_inclusive: NaiveDate,
) -> bool {
    let mut date = start;
    while date <= end_inclusive {
        if calendar.is_holiday(date) {
            return true;
        }
        date += Duration::days(1);
    }
    false
}
