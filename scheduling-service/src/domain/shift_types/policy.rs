use shared::{HolidayPolicy, ShiftTypeKey};

/// Per-shift-type policy: the only pieces of shift-type-specific knowledge
/// the rest of the engine needs. Shift types vary by these values, not by
/// subclassed behaviour — new shift types plug in by constructing a
/// `ShiftTypePolicy` and a `ShiftTypeScheduler` impl, nothing else.
#[derive(Debug, Clone)]
pub struct ShiftTypePolicy {
    pub shift_type: ShiftTypeKey,
    pub label: String,
    /// Shift types sharing a mutex group cannot both be held by the same
    /// employee in the same ISO week. `None` means this shift type never
    /// mutex-conflicts with another.
    pub mutex_group: Option<String>,
    /// Days of "load" one assignment of this shift type contributes to an
    /// employee's fairness history.
    pub fairness_weight: u32,
    pub holiday_policy: HolidayPolicy,
    /// Processing priority used for the `(start_instant, shift_type
    /// priority)` window ordering tie-break — lower runs first. Configured
    /// so longer-block types are processed first, reducing mutex thrashing.
    pub priority: u8,
}

impl ShiftTypePolicy {
    pub fn validate(&self) -> Result<(), shared::DomainError> {
        if self.fairness_weight == 0 {
            return Err(shared::DomainError::InvariantViolation(format!(
                "fairness_weight for {:?} must be > 0",
                self.shift_type
            )));
        }
        Ok(())
    }
}
