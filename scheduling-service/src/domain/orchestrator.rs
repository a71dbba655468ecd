use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use shared::{DomainError, DomainResult, PlanMode, ShiftStatus, ShiftTypeKey};
use utoipa::ToSchema;
use uuid::Uuid;

use super::constraints::{ConstraintChecker, TentativeAssignment};
use super::entities::{AssignmentDto, EmployeeSummary, Shift, ShiftTypeCount, UnassignableWindowDto};
use super::fairness::{CandidateLoad, FairnessCalculator, FairnessConfig};
use super::repository::SchedulingRepository;
use super::shift_types::{Calendar, ShiftTypeScheduler, Window};

/// `(horizon_start, horizon_end, team_scope, shift_types_enabled, mode)`
/// plus the `strict`/`deadline_ms` knobs from the Planning API (§6).
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlanRequest {
    pub horizon_start: DateTime<Utc>,
    pub horizon_end: DateTime<Utc>,
    pub team_scope: String,
    pub shift_types: Option<Vec<ShiftTypeKey>>,
    pub mode: PlanMode,
    #[serde(default)]
    pub strict: bool,
    pub deadline_ms: Option<u64>,
    #[serde(default = "default_initiator")]
    pub initiator: String,
}

fn default_initiator() -> String {
    "unknown".to_string()
}

/// `metrics` in the `/plan` response: per-employee scores plus the
/// system-wide score and its team average.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Metrics {
    pub per_employee: Vec<EmployeeSummary>,
    pub system_score: f64,
    pub average_individual_score: f64,
}

/// The full result of one `plan()` call: preview payload or apply result,
/// depending on `PlanRequest::mode`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PlanningOutcome {
    pub run_id: Uuid,
    pub mode: PlanMode,
    pub committed: bool,
    pub assignments: Vec<AssignmentDto>,
    pub unassignable: Vec<UnassignableWindowDto>,
    pub per_shift_type: Vec<ShiftTypeCount>,
    pub metrics: Metrics,
}

/// Drives one planning run end to end: decomposes the horizon via the
/// Shift-type Schedulers, invokes the Constraint Checker and Fairness
/// Calculator per window in order, and exposes preview/apply. Stateless
/// across runs; all state lives in the returned `PlanningOutcome` and
/// whatever the Repository persists.
pub struct Orchestrator {
    schedulers: Vec<Arc<dyn ShiftTypeScheduler>>,
    calendar: Arc<dyn Calendar>,
    repository: Arc<dyn SchedulingRepository>,
    fairness_config: FairnessConfig,
    history_window_days: i64,
    team_timezone: Tz,
    apply_default_deadline_ms: u64,
}

impl Orchestrator {
    pub fn new(
        schedulers: Vec<Arc<dyn ShiftTypeScheduler>>,
        calendar: Arc<dyn Calendar>,
        repository: Arc<dyn SchedulingRepository>,
        fairness_config: FairnessConfig,
        history_window_days: i64,
        team_timezone: Tz,
        apply_default_deadline_ms: u64,
    ) -> DomainResult<Self> {
        for scheduler in &schedulers {
            scheduler.policy().validate()?;
        }
        Ok(Self {
            schedulers,
            calendar,
            repository,
            fairness_config,
            history_window_days,
            team_timezone,
            apply_default_deadline_ms,
        })
    }

    fn mutex_partners(&self) -> HashMap<ShiftTypeKey, Vec<ShiftTypeKey>> {
        let mut by_group: HashMap<String, Vec<ShiftTypeKey>> = HashMap::new();
        for scheduler in &self.schedulers {
            if let Some(group) = &scheduler.policy().mutex_group {
                by_group.entry(group.clone()).or_default().push(scheduler.shift_type());
            }
        }

        let mut partners: HashMap<ShiftTypeKey, Vec<ShiftTypeKey>> = HashMap::new();
        for members in by_group.values() {
            for &shift_type in members {
                let others: Vec<ShiftTypeKey> = members.iter().copied().filter(|&m| m != shift_type).collect();
                partners.insert(shift_type, others);
            }
        }
        partners
    }

    /// Run a planning request to completion (or time out per `deadline_ms`).
    /// `cancellation`, if set, is polled at every window boundary; a fired
    /// token discards partial preview results / rolls back an apply that
    /// hasn't committed yet.
    pub async fn plan(
        &self,
        request: PlanRequest,
        cancellation: Option<Arc<AtomicBool>>,
    ) -> DomainResult<PlanningOutcome> {
        let deadline_ms = match (request.mode, request.deadline_ms) {
            (_, Some(ms)) => Some(ms),
            (PlanMode::Apply, None) => Some(self.apply_default_deadline_ms),
            (PlanMode::Preview, None) => None,
        };

        let body = self.plan_inner(request, cancellation);

        match deadline_ms {
            Some(ms) => tokio::time::timeout(Duration::from_millis(ms), body)
                .await
                .map_err(|_| DomainError::DeadlineExceeded)?,
            None => body.await,
        }
    }

    async fn plan_inner(
        &self,
        request: PlanRequest,
        cancellation: Option<Arc<AtomicBool>>,
    ) -> DomainResult<PlanningOutcome> {
        if request.horizon_end <= request.horizon_start {
            return Err(DomainError::HorizonInvalid(
                "horizon_end must be after horizon_start".to_string(),
            ));
        }

        let run_id = Uuid::new_v4();
        let enabled: Vec<&Arc<dyn ShiftTypeScheduler>> = self
            .schedulers
            .iter()
            .filter(|s| match &request.shift_types {
                Some(types) => types.contains(&s.shift_type()),
                None => true,
            })
            .collect();

        if enabled.is_empty() {
            return Err(DomainError::HorizonInvalid(
                "no enabled shift types resolved for this request".to_string(),
            ));
        }

        // Step 1/2: enumerate windows for every enabled shift type.
        let mut windows: Vec<Window> = Vec::new();
        for scheduler in &enabled {
            windows.extend(scheduler.enumerate_windows(
                request.horizon_start,
                request.horizon_end,
                self.team_timezone,
                self.calendar.as_ref(),
            ));
        }

        let priority_of: HashMap<ShiftTypeKey, u8> = self
            .schedulers
            .iter()
            .map(|s| (s.shift_type(), s.policy().priority))
            .collect();
        windows.sort_by(|a, b| {
            a.start_instant
                .cmp(&b.start_instant)
                .then_with(|| priority_of.get(&a.shift_type).cmp(&priority_of.get(&b.shift_type)))
        });

        let employees = self.repository.list_employees(&request.team_scope).await?;
        for employee in &employees {
            if employee.fte <= 0.0 {
                return Err(DomainError::InvariantViolation(format!(
                    "employee {} has non-positive FTE",
                    employee.id
                )));
            }
        }
        let employee_ids: Vec<Uuid> = employees.iter().map(|e| e.id).collect();

        let leaves = self
            .repository
            .list_approved_leaves(&employee_ids, request.horizon_start, request.horizon_end)
            .await?;
        let existing_shifts = self
            .repository
            .list_shifts(&employee_ids, request.horizon_start, request.horizon_end, false)
            .await?;

        let since = Utc::now() - chrono::Duration::days(self.history_window_days);
        let mut history_cache: HashMap<ShiftTypeKey, HashMap<Uuid, f64>> = HashMap::new();
        for scheduler in &enabled {
            let counts = self
                .repository
                .history_counts(&employee_ids, scheduler.shift_type(), since)
                .await?;
            history_cache.insert(scheduler.shift_type(), counts);
        }

        let mutex_partners = self.mutex_partners();
        let fairness = FairnessCalculator::new(&self.fairness_config);

        let mut tentative: Vec<TentativeAssignment> = Vec::new();
        let mut run_tentative_days: HashMap<(ShiftTypeKey, Uuid), f64> = HashMap::new();
        let mut unassignable: Vec<UnassignableWindowDto> = Vec::new();
        let mut template_cache: HashMap<ShiftTypeKey, Uuid> = HashMap::new();

        for window in &windows {
            if let Some(flag) = &cancellation {
                if flag.load(Ordering::SeqCst) {
                    break;
                }
            }

            let scheduler = enabled
                .iter()
                .find(|s| s.shift_type() == window.shift_type)
                .expect("window's shift type always has a matching scheduler");
            let policy = scheduler.policy();

            let eligibility = ConstraintChecker::eligible_employees(
                window,
                policy,
                &employees,
                &leaves,
                &existing_shifts,
                &tentative,
                &mutex_partners,
                self.team_timezone,
            );

            if eligibility.eligible.is_empty() {
                unassignable.push(UnassignableWindowDto {
                    shift_type: window.shift_type,
                    start_instant: window.start_instant,
                    end_instant: window.end_instant,
                    reason: eligibility.summary_reason(),
                });
                continue;
            }

            let history = history_cache.get(&window.shift_type).cloned().unwrap_or_default();
            let candidates: Vec<CandidateLoad> = eligibility
                .eligible
                .iter()
                .map(|id| {
                    let employee = employees.iter().find(|e| &e.id == id).expect("eligible id came from employees");
                    CandidateLoad {
                        employee_id: *id,
                        fte: employee.fte,
                        history_weighted_days: *history.get(id).unwrap_or(&0.0),
                        run_tentative_days: *run_tentative_days.get(&(window.shift_type, *id)).unwrap_or(&0.0),
                        hire_date: employee.hire_date,
                    }
                })
                .collect();

            let winner = fairness
                .select(&candidates, policy.fairness_weight as f64)
                .expect("non-empty eligible set always yields a winner");

            tentative.push(TentativeAssignment {
                employee_id: winner.employee_id,
                shift_type: window.shift_type,
                window: *window,
            });
            *run_tentative_days.entry((window.shift_type, winner.employee_id)).or_insert(0.0) +=
                policy.fairness_weight as f64;
        }

        if request.strict && !unassignable.is_empty() {
            return Err(DomainError::NoEligibleEmployees(format!(
                "{} window(s) had no eligible candidate under strict mode",
                unassignable.len()
            )));
        }

        // Resolve one template per shift type touched this run.
        for scheduler in &enabled {
            if !template_cache.contains_key(&scheduler.shift_type()) {
                let template = self.repository.template_for(scheduler.shift_type()).await?;
                template_cache.insert(scheduler.shift_type(), template.id);
            }
        }

        let assignments: Vec<AssignmentDto> = tentative
            .iter()
            .map(|t| AssignmentDto {
                shift_type: t.shift_type,
                start_instant: t.window.start_instant,
                end_instant: t.window.end_instant,
                employee_id: t.employee_id,
                template_id: template_cache[&t.shift_type],
                auto_generated: true,
            })
            .collect();

        let per_shift_type: Vec<ShiftTypeCount> = enabled
            .iter()
            .map(|s| ShiftTypeCount {
                shift_type: s.shift_type(),
                count: tentative.iter().filter(|t| t.shift_type == s.shift_type()).count() as u32,
            })
            .collect();

        let metrics = self.compute_metrics(&employees, &enabled, &history_cache, &run_tentative_days);

        let mut outcome = PlanningOutcome {
            run_id,
            mode: request.mode,
            committed: false,
            assignments,
            unassignable,
            per_shift_type,
            metrics,
        };

        if request.mode == PlanMode::Apply {
            self.apply(&request, &tentative, &template_cache, &mut outcome).await?;
        }

        Ok(outcome)
    }

    fn compute_metrics(
        &self,
        employees: &[shared::Employee],
        enabled: &[&Arc<dyn ShiftTypeScheduler>],
        history_cache: &HashMap<ShiftTypeKey, HashMap<Uuid, f64>>,
        run_tentative_days: &HashMap<(ShiftTypeKey, Uuid), f64>,
    ) -> Metrics {
        let fairness = FairnessCalculator::new(&self.fairness_config);

        let candidates: Vec<CandidateLoad> = employees
            .iter()
            .map(|e| {
                let history_total: f64 = enabled
                    .iter()
                    .map(|s| *history_cache.get(&s.shift_type()).and_then(|m| m.get(&e.id)).unwrap_or(&0.0))
                    .sum();
                let run_total: f64 = enabled
                    .iter()
                    .map(|s| *run_tentative_days.get(&(s.shift_type(), e.id)).unwrap_or(&0.0))
                    .sum();
                CandidateLoad {
                    employee_id: e.id,
                    fte: e.fte,
                    history_weighted_days: history_total,
                    run_tentative_days: run_total,
                    hire_date: e.hire_date,
                }
            })
            .collect();

        let ranked = fairness.rank(&candidates, 0.0);

        let per_employee: Vec<EmployeeSummary> = ranked
            .iter()
            .map(|r| {
                let candidate = candidates.iter().find(|c| c.employee_id == r.employee_id).unwrap();
                EmployeeSummary {
                    employee_id: r.employee_id,
                    assigned_days: candidate.run_tentative_days,
                    projected_load: r.projected_load,
                    individual_score: r.individual_score,
                }
            })
            .collect();

        let average_individual_score = if per_employee.is_empty() {
            100.0
        } else {
            per_employee.iter().map(|e| e.individual_score).sum::<f64>() / per_employee.len() as f64
        };

        let final_loads: Vec<f64> = candidates.iter().map(|c| c.history_weighted_days + c.run_tentative_days).collect();
        let system_score = fairness.overall_system_score(&final_loads);

        Metrics {
            per_employee,
            system_score,
            average_individual_score,
        }
    }

    async fn apply(
        &self,
        request: &PlanRequest,
        tentative: &[TentativeAssignment],
        template_cache: &HashMap<ShiftTypeKey, Uuid>,
        outcome: &mut PlanningOutcome,
    ) -> DomainResult<()> {
        let shifts: Vec<Shift> = tentative
            .iter()
            .map(|t| Shift {
                id: Uuid::new_v4(),
                template_ref: template_cache[&t.shift_type],
                shift_type: t.shift_type,
                assigned_employee: t.employee_id,
                start_instant: t.window.start_instant,
                end_instant: t.window.end_instant,
                status: ShiftStatus::Scheduled,
                auto_generated: true,
            })
            .collect();

        let mut txn = self
            .repository
            .begin_apply(&request.team_scope, request.horizon_start, request.horizon_end)
            .await?;

        let clean = txn.check_no_new_conflicts(&shifts).await?;
        if !clean {
            txn.rollback().await?;
            return Err(DomainError::ConflictOnApply(
                "a concurrent writer committed an overlapping shift since preview".to_string(),
            ));
        }

        txn.write_shifts(shifts).await?;
        txn.commit().await?;
        outcome.committed = true;
        Ok(())
    }
}
