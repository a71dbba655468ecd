use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use chrono_tz::Tz;
use shared::time::local_to_utc;
use shared::ShiftTypeKey;

use super::{Calendar, ShiftTypePolicy, ShiftTypeScheduler, Window};

/// On-call: Wednesday 17:00 local through the next Wednesday 08:00,
/// `fairness_weight = 7`, holiday-insensitive by default (on-call coverage
/// doesn't pause for a public holiday the way a business-hours block does).
pub struct WaakdienstScheduler {
    policy: ShiftTypePolicy,
}

impl WaakdienstScheduler {
    pub fn new(policy: ShiftTypePolicy) -> Self {
        Self { policy }
    }
}

impl ShiftTypeScheduler for WaakdienstScheduler {
    fn shift_type(&self) -> ShiftTypeKey {
        ShiftTypeKey::Waakdienst
    }

    fn policy(&self) -> &ShiftTypePolicy {
        &self.policy
    }

    fn enumerate_windows(
        &self,
        horizon_start: DateTime<Utc>,
        horizon_end: DateTime<Utc>,
        timezone: Tz,
        _calendar: &dyn Calendar,
    ) -> Vec<Window> {
        let start_date = horizon_start.with_timezone(&timezone).date_naive();
        let end_date = horizon_end.with_timezone(&timezone).date_naive();

        // Wednesday of the ISO week containing `start_date` (Mon=0 .. Wed=2),
        // nudged forward a week if that lands before `start_date` itself.
        let days_from_monday = start_date.weekday().num_days_from_monday() as i64;
        let first_wednesday = start_date - Duration::days(days_from_monday) + Duration::days(2);
        let first_wednesday = if first_wednesday < start_date {
            first_wednesday + Duration::days(7)
        } else {
            first_wednesday
        };

        let mut windows = Vec::new();
        let mut wednesday = first_wednesday;
        while wednesday < end_date {
            let next_wednesday = wednesday + Duration::days(7);

            let start_naive = wednesday.and_time(NaiveTime::from_hms_opt(17, 0, 0).unwrap());
            let end_naive = next_wednesday.and_time(NaiveTime::from_hms_opt(8, 0, 0).unwrap());

            let start_instant = local_to_utc(start_naive, timezone);
            let end_instant = local_to_utc(end_naive, timezone);

            if start_instant < horizon_end && end_instant > horizon_start {
                windows.push(Window {
                    start_instant,
                    end_instant,
                    shift_type: self.shift_type(),
                });
            }

            wednesday = next_wednesday;
        }

        windows
    }
}
