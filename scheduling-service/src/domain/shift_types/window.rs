use chrono::{DateTime, Utc};
use shared::ShiftTypeKey;

/// A single schedulable interval of a given shift type, e.g. one Mon 08:00 -
/// Fri 17:00 Incidents block, produced by a `ShiftTypeScheduler` and
/// consumed by the Orchestrator in `(start_instant, shift_type_priority)`
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    pub shift_type: ShiftTypeKey,
}

impl Window {
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_instant < end && start < self.end_instant
    }

    /// ISO week of the window's start instant, local to `timezone`. Mutex
    /// enforcement keys on this, not a shift-type-anchored week, so
    /// Waakdienst's own Wed-to-Wed window doesn't skew the boundary.
    pub fn iso_week(&self, timezone: chrono_tz::Tz) -> chrono::IsoWeek {
        use chrono::Datelike;
        self.start_instant.with_timezone(&timezone).iso_week()
    }
}
