use chrono::NaiveDate;
use std::collections::HashSet;

/// Source of public holidays consulted by a `ShiftTypeScheduler`'s
/// `holiday_policy`. Modelled as a narrow trait, the same pattern as the
/// Repository Interface, so a real holiday calendar (a vendored dataset, an
/// external service) can be substituted without touching scheduler code.
pub trait Calendar: Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A calendar backed by an explicit, fixed set of dates. The production
/// default until a real holiday-data source is wired in.
#[derive(Debug, Clone, Default)]
pub struct FixedHolidayCalendar {
    holidays: HashSet<NaiveDate>,
}

impl FixedHolidayCalendar {
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

impl Calendar for FixedHolidayCalendar {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }
}
