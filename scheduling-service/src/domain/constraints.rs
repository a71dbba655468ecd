use std::collections::HashMap;

use chrono_tz::Tz;
use shared::{Employee, LeaveRecord, ShiftTypeKey};
use uuid::Uuid;

use super::entities::Shift;
use super::shift_types::{ShiftTypePolicy, Window};

/// A tentative assignment made earlier in the *current* planning run. Not
/// yet persisted, but load-bearing for later windows in the same run: the
/// mutex check and the Fairness Calculator both see these alongside
/// persisted state.
#[derive(Debug, Clone)]
pub struct TentativeAssignment {
    pub employee_id: Uuid,
    pub shift_type: ShiftTypeKey,
    pub window: Window,
}

/// Why a candidate was rejected, for diagnostics. The Constraint Checker
/// never throws on "zero candidates" — the Orchestrator decides how to
/// report an empty eligible set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionReason {
    Inactive,
    AvailabilityFlagFalse,
    ApprovedLeaveOverlap,
    ExistingShiftOverlap,
    TentativeShiftOverlap { other_shift_type: ShiftTypeKey },
    MutexConflict { other_shift_type: ShiftTypeKey },
}

impl std::fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectionReason::Inactive => write!(f, "employee is inactive"),
            RejectionReason::AvailabilityFlagFalse => write!(f, "availability flag not set"),
            RejectionReason::ApprovedLeaveOverlap => write!(f, "on approved leave"),
            RejectionReason::ExistingShiftOverlap => write!(f, "existing shift overlaps window"),
            RejectionReason::TentativeShiftOverlap { other_shift_type } => {
                write!(f, "already tentatively assigned to {:?} this run", other_shift_type)
            }
            RejectionReason::MutexConflict { other_shift_type } => {
                write!(f, "mutex conflict with {:?} in the same week", other_shift_type)
            }
        }
    }
}

/// Result of checking one candidate against all ordered rules.
#[derive(Debug, Clone)]
pub struct CandidateCheck {
    pub employee_id: Uuid,
    pub rejected_for: Option<RejectionReason>,
}

/// Ordered-by-employee-id eligible set plus per-candidate diagnostics for
/// every employee considered, whether they passed or not.
#[derive(Debug, Clone, Default)]
pub struct EligibilityResult {
    pub eligible: Vec<Uuid>,
    pub checks: Vec<CandidateCheck>,
}

impl EligibilityResult {
    /// Best single reason to report for an `UnassignableWindow`: the most
    /// common rejection cause across all candidates, falling back to a
    /// generic message if there were no candidates to reject at all.
    pub fn summary_reason(&self) -> String {
        if self.checks.is_empty() {
            return "no candidates in scope".to_string();
        }

        let mut counts: HashMap<String, usize> = HashMap::new();
        for check in &self.checks {
            if let Some(reason) = &check.rejected_for {
                *counts.entry(reason_label(reason)).or_insert(0) += 1;
            }
        }

        counts
            .into_iter()
            .max_by_key(|(_, count)| *count)
            .map(|(label, _)| label)
            .unwrap_or_else(|| "no availability".to_string())
    }
}

fn reason_label(reason: &RejectionReason) -> String {
    match reason {
        RejectionReason::Inactive => "inactive".to_string(),
        RejectionReason::AvailabilityFlagFalse => "no availability".to_string(),
        RejectionReason::ApprovedLeaveOverlap => "all on leave".to_string(),
        RejectionReason::ExistingShiftOverlap => "all already booked".to_string(),
        RejectionReason::TentativeShiftOverlap { .. } => "all already booked".to_string(),
        RejectionReason::MutexConflict { .. } => "all mutex-blocked".to_string(),
    }
}

/// Given `(window, shift type)`, returns the eligible employee set. Checks
/// run in order and short-circuit on the first failure, per §4.3.
pub struct ConstraintChecker;

impl ConstraintChecker {
    /// `mutex_partners` maps every shift-type key to the set of *other*
    /// shift types sharing its mutex group (empty if none). `timezone`
    /// determines the ISO week used for the mutex check.
    #[allow(clippy::too_many_arguments)]
    pub fn eligible_employees(
        window: &Window,
        policy: &ShiftTypePolicy,
        employees: &[Employee],
        leaves: &[LeaveRecord],
        existing_shifts: &[Shift],
        tentative: &[TentativeAssignment],
        mutex_partners: &HashMap<ShiftTypeKey, Vec<ShiftTypeKey>>,
        timezone: Tz,
    ) -> EligibilityResult {
        let partners = mutex_partners
            .get(&window.shift_type)
            .cloned()
            .unwrap_or_default();
        let target_week = window.iso_week(timezone);

        let mut sorted_employees: Vec<&Employee> = employees.iter().collect();
        sorted_employees.sort_by_key(|e| e.id);

        let mut result = EligibilityResult::default();

        for employee in sorted_employees {
            let rejected_for = Self::first_failing_reason(
                employee,
                window,
                policy,
                leaves,
                existing_shifts,
                tentative,
                &partners,
                target_week,
                timezone,
            );

            if rejected_for.is_none() {
                result.eligible.push(employee.id);
            }
            result.checks.push(CandidateCheck {
                employee_id: employee.id,
                rejected_for,
            });
        }

        result
    }

    #[allow(clippy::too_many_arguments)]
    fn first_failing_reason(
        employee: &Employee,
        window: &Window,
        policy: &ShiftTypePolicy,
        leaves: &[LeaveRecord],
        existing_shifts: &[Shift],
        tentative: &[TentativeAssignment],
        mutex_partners: &[ShiftTypeKey],
        target_week: chrono::IsoWeek,
        timezone: Tz,
    ) -> Option<RejectionReason> {
        // 1. active
        if !employee.active {
            return Some(RejectionReason::Inactive);
        }

        // 2. availability flag
        if !employee.available_for(policy.shift_type) {
            return Some(RejectionReason::AvailabilityFlagFalse);
        }

        // 3. approved leave overlap
        let leave_conflict = leaves.iter().any(|leave| {
            leave.employee_id == employee.id
                && leave.overlaps_date_range(
                    window.start_instant.with_timezone(&timezone).date_naive(),
                    window.end_instant.with_timezone(&timezone).date_naive() + chrono::Duration::days(1),
                )
        });
        if leave_conflict {
            return Some(RejectionReason::ApprovedLeaveOverlap);
        }

        // 4. existing non-cancelled shift overlap
        let shift_conflict = existing_shifts.iter().any(|shift| {
            shift.assigned_employee == employee.id
                && shift.status != shared::ShiftStatus::Cancelled
                && shift.overlaps(window.start_instant, window.end_instant)
        });
        if shift_conflict {
            return Some(RejectionReason::ExistingShiftOverlap);
        }

        // Tentative assignments made earlier in this run occupy real wall-clock
        // time too, even across shift types that don't share a mutex group
        // (e.g. Incidents and its Standby counterpart run the identical Mon-Fri
        // grid): the same window-time overlap that rules out a second persisted
        // shift must also rule out a second tentative one.
        let tentative_time_conflict = tentative
            .iter()
            .find(|t| t.employee_id == employee.id && t.window.overlaps(window.start_instant, window.end_instant));
        if let Some(t) = tentative_time_conflict {
            return Some(RejectionReason::TentativeShiftOverlap {
                other_shift_type: t.shift_type,
            });
        }

        // 5. mutex group: persisted shifts of a partner shift type in the same week...
        if !mutex_partners.is_empty() {
            let persisted_mutex_hit = existing_shifts.iter().find(|shift| {
                shift.assigned_employee == employee.id
                    && shift.status != shared::ShiftStatus::Cancelled
                    && mutex_partners.contains(&shift.shift_type)
                    && shift.start_instant.with_timezone(&timezone).iso_week() == target_week
            });
            if let Some(shift) = persisted_mutex_hit {
                return Some(RejectionReason::MutexConflict {
                    other_shift_type: shift.shift_type,
                });
            }

            // ...and tentative assignments made earlier in this run.
            let tentative_mutex_hit = tentative.iter().find(|t| {
                t.employee_id == employee.id
                    && mutex_partners.contains(&t.shift_type)
                    && t.window.iso_week(timezone) == target_week
            });
            if let Some(t) = tentative_mutex_hit {
                return Some(RejectionReason::MutexConflict {
                    other_shift_type: t.shift_type,
                });
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use shared::LeaveStatus;

    fn employee(id: Uuid, active: bool, avail_incidents: bool) -> Employee {
        Employee {
            id,
            team_scope: "T1".into(),
            display_name: "E".into(),
            fte: 1.0,
            available_for_incidents: avail_incidents,
            available_for_waakdienst: true,
            hire_date: chrono::NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn window(start: DateTime<Utc>, end: DateTime<Utc>) -> Window {
        Window {
            start_instant: start,
            end_instant: end,
            shift_type: ShiftTypeKey::Incidents,
        }
    }

    fn policy() -> ShiftTypePolicy {
        ShiftTypePolicy {
            shift_type: ShiftTypeKey::Incidents,
            label: "Incidents".into(),
            mutex_group: Some("primary".into()),
            fairness_weight: 5,
            holiday_policy: shared::HolidayPolicy::Skip,
            priority: 0,
        }
    }

    #[test]
    fn inactive_employee_is_never_eligible() {
        let id = Uuid::new_v4();
        let employees = vec![employee(id, false, true)];
        let w = window(Utc::now(), Utc::now() + chrono::Duration::days(1));
        let result = ConstraintChecker::eligible_employees(
            &w,
            &policy(),
            &employees,
            &[],
            &[],
            &[],
            &HashMap::new(),
            chrono_tz::Europe::Amsterdam,
        );
        assert!(result.eligible.is_empty());
        assert_eq!(result.checks[0].rejected_for, Some(RejectionReason::Inactive));
    }

    #[test]
    fn leave_blocks_overlapping_window() {
        let id = Uuid::new_v4();
        let employees = vec![employee(id, true, true)];
        let w = window(
            chrono::DateTime::parse_from_rfc3339("2025-01-06T07:00:00Z").unwrap().with_timezone(&Utc),
            chrono::DateTime::parse_from_rfc3339("2025-01-10T16:00:00Z").unwrap().with_timezone(&Utc),
        );
        let leave = LeaveRecord {
            id: Uuid::new_v4(),
            employee_id: id,
            start_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 6).unwrap(),
            end_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            status: LeaveStatus::Approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let result = ConstraintChecker::eligible_employees(
            &w,
            &policy(),
            &employees,
            &[leave],
            &[],
            &[],
            &HashMap::new(),
            chrono_tz::Europe::Amsterdam,
        );
        assert!(result.eligible.is_empty());
        assert_eq!(
            result.checks[0].rejected_for,
            Some(RejectionReason::ApprovedLeaveOverlap)
        );
    }

    #[test]
    fn tentative_assignment_blocks_same_window_across_shift_types() {
        // Incidents and IncidentsStandby run the identical Mon-Fri grid but
        // sit in different mutex groups; a tentative Incidents pick must
        // still rule the same employee out of IncidentsStandby for that
        // exact window.
        let id = Uuid::new_v4();
        let employees = vec![employee(id, true, true)];
        let start = chrono::DateTime::parse_from_rfc3339("2025-01-06T07:00:00Z").unwrap().with_timezone(&Utc);
        let end = chrono::DateTime::parse_from_rfc3339("2025-01-10T16:00:00Z").unwrap().with_timezone(&Utc);

        let standby_window = Window {
            start_instant: start,
            end_instant: end,
            shift_type: ShiftTypeKey::IncidentsStandby,
        };
        let standby_policy = ShiftTypePolicy {
            shift_type: ShiftTypeKey::IncidentsStandby,
            label: "Incidents Standby".into(),
            mutex_group: Some("standby".into()),
            fairness_weight: 5,
            holiday_policy: shared::HolidayPolicy::Skip,
            priority: 0,
        };
        let tentative = vec![TentativeAssignment {
            employee_id: id,
            shift_type: ShiftTypeKey::Incidents,
            window: window(start, end),
        }];

        let result = ConstraintChecker::eligible_employees(
            &standby_window,
            &standby_policy,
            &employees,
            &[],
            &[],
            &tentative,
            &HashMap::new(),
            chrono_tz::Europe::Amsterdam,
        );

        assert!(result.eligible.is_empty());
        assert_eq!(
            result.checks[0].rejected_for,
            Some(RejectionReason::TentativeShiftOverlap {
                other_shift_type: ShiftTypeKey::Incidents
            })
        );
    }
}
