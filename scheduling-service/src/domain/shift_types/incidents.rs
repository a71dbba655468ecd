use chrono::{DateTime, Duration, NaiveTime, Utc};
use chrono_tz::Tz;
use shared::{HolidayPolicy, ShiftTypeKey};

use shared::time::local_to_utc;

use super::{any_holiday_in_range, iso_week_mondays_overlapping, Calendar, ShiftTypePolicy, ShiftTypeScheduler, Window};

/// Business-hours block: Monday 08:00 through Friday 17:00 local, one per
/// ISO week overlapping the horizon. `fairness_weight = 5`.
pub struct IncidentsScheduler {
    policy: ShiftTypePolicy,
}

impl IncidentsScheduler {
    pub fn new(policy: ShiftTypePolicy) -> Self {
        Self { policy }
    }
}

impl ShiftTypeScheduler for IncidentsScheduler {
    fn shift_type(&self) -> ShiftTypeKey {
        ShiftTypeKey::Incidents
    }

    fn policy(&self) -> &ShiftTypePolicy {
        &self.policy
    }

    fn enumerate_windows(
        &self,
        horizon_start: DateTime<Utc>,
        horizon_end: DateTime<Utc>,
        timezone: Tz,
        calendar: &dyn Calendar,
    ) -> Vec<Window> {
        let mondays = iso_week_mondays_overlapping(horizon_start, horizon_end, timezone);
        let mut windows = Vec::with_capacity(mondays.len());

        for monday in mondays {
            let friday = monday + Duration::days(4);

            if self.policy.holiday_policy == HolidayPolicy::Skip
                && any_holiday_in_range(calendar, monday, friday)
            {
                continue;
            }

            let start_naive = monday.and_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap());
            let end_naive = friday.and_time(NaiveTime::from_hms_opt(17, 0, 0).unwrap());

            let start_instant = local_to_utc(start_naive, timezone);
            let end_instant = local_to_utc(end_naive, timezone);

            if start_instant < horizon_end && end_instant > horizon_start {
                windows.push(Window {
                    start_instant,
                    end_instant,
                    shift_type: self.shift_type(),
                });
            }
        }

        windows
    }
}
