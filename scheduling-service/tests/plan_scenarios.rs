#[path = "common/mod.rs"]
mod common;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use common::{build_orchestrator, build_orchestrator_full, employee, history_shift, test_monday, TEAM};
use scheduling_service::api::{create_router, AppState};
use scheduling_service::domain::entities::Shift;
use scheduling_service::domain::orchestrator::PlanRequest;
use scheduling_service::domain::repository::{ApplyTransaction, SchedulingRepository};
use scheduling_service::infrastructure::planning_run_store::InMemoryPlanningRunStore;
use serde_json::json;
use shared::{DomainError, DomainResult, Employee, LeaveRecord, LeaveStatus, PlanMode, ShiftTemplate, ShiftTypeKey};
use uuid::Uuid;

/// Local midnight of a future Monday, converted to its UTC instant, chosen
/// far enough ahead that no fixture's history window overlaps the horizon.
fn horizon_monday() -> DateTime<Utc> {
    let today = Utc::now().date_naive();
    let days_from_monday = today.weekday().num_days_from_monday() as i64;
    let this_monday = today - Duration::days(days_from_monday);
    let target = this_monday + Duration::weeks(6);
    shared::time::local_to_utc(target.and_time(NaiveTime::from_hms_opt(0, 0, 0).unwrap()), chrono_tz::Europe::Amsterdam)
}

fn weeks_from(base: DateTime<Utc>, weeks: i64) -> DateTime<Utc> {
    base + Duration::weeks(weeks)
}

fn request(
    horizon_start: DateTime<Utc>,
    horizon_end: DateTime<Utc>,
    shift_types: Option<Vec<ShiftTypeKey>>,
    mode: PlanMode,
    strict: bool,
) -> PlanRequest {
    PlanRequest {
        horizon_start,
        horizon_end,
        team_scope: TEAM.to_string(),
        shift_types,
        mode,
        strict,
        deadline_ms: None,
        initiator: "integration-test".to_string(),
    }
}

fn four_employees() -> Vec<Employee> {
    (1..=4)
        .map(|i| employee(&format!("E{i}"), NaiveDate::from_ymd_opt(2020, 1, i).unwrap()))
        .collect()
}

fn iso_week_key(instant: DateTime<Utc>) -> (i32, u32) {
    let week = instant.with_timezone(&chrono_tz::Europe::Amsterdam).iso_week();
    (week.year(), week.week())
}

#[tokio::test]
async fn scenario_a_perfect_balance_across_four_weeks() {
    let employees = four_employees();
    let (orchestrator, _repo) = build_orchestrator(employees);

    let start = horizon_monday();
    let end = weeks_from(start, 4);
    let req = request(
        start,
        end,
        Some(vec![ShiftTypeKey::Incidents, ShiftTypeKey::Waakdienst]),
        PlanMode::Preview,
        false,
    );

    let outcome = orchestrator.plan(req, None).await.expect("plan succeeds");

    assert!(outcome.unassignable.is_empty());
    assert_eq!(outcome.assignments.len(), 8);

    let mut incidents_per_employee: HashMap<Uuid, u32> = HashMap::new();
    let mut waakdienst_per_employee: HashMap<Uuid, u32> = HashMap::new();
    let mut weeks_per_employee: HashMap<Uuid, Vec<(i32, u32)>> = HashMap::new();

    for a in &outcome.assignments {
        match a.shift_type {
            ShiftTypeKey::Incidents => *incidents_per_employee.entry(a.employee_id).or_insert(0) += 1,
            ShiftTypeKey::Waakdienst => *waakdienst_per_employee.entry(a.employee_id).or_insert(0) += 1,
            ShiftTypeKey::IncidentsStandby => unreachable!("not enabled for this request"),
        }
        weeks_per_employee.entry(a.employee_id).or_default().push(iso_week_key(a.start_instant));
    }

    for count in incidents_per_employee.values() {
        assert_eq!(*count, 1);
    }
    for count in waakdienst_per_employee.values() {
        assert_eq!(*count, 1);
    }

    // Mutex group "primary" covers both shift types: no employee can hold
    // both in the same ISO week.
    for weeks in weeks_per_employee.values() {
        let unique: std::collections::HashSet<_> = weeks.iter().collect();
        assert_eq!(unique.len(), weeks.len(), "same employee assigned twice in one ISO week");
    }

    assert!(outcome.metrics.system_score >= 85.0, "system_score = {}", outcome.metrics.system_score);
}

#[tokio::test]
async fn scenario_b_leave_blocks_one_candidate_for_the_week() {
    let employees = four_employees();
    let e1 = employees[0].id;

    let start = horizon_monday();
    let leave = LeaveRecord {
        id: Uuid::new_v4(),
        employee_id: e1,
        start_date: start.date_naive(),
        end_date: start.date_naive() + Duration::days(6),
        status: LeaveStatus::Approved,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let (orchestrator, _repo) = build_orchestrator_full(employees, vec![leave], Vec::new());

    let end = weeks_from(start, 4);
    let req = request(
        start,
        end,
        Some(vec![ShiftTypeKey::Incidents, ShiftTypeKey::Waakdienst]),
        PlanMode::Preview,
        false,
    );

    let outcome = orchestrator.plan(req, None).await.expect("plan succeeds");

    assert!(outcome.unassignable.is_empty());
    assert_eq!(outcome.assignments.len(), 8, "leave reduces E1's eligibility, not the number of filled windows");

    let first_week = iso_week_key(start);
    for a in &outcome.assignments {
        if a.employee_id == e1 {
            assert_ne!(iso_week_key(a.start_instant), first_week, "E1 should not work the week it's on leave");
        }
    }
}

#[tokio::test]
async fn scenario_c_all_on_leave_yields_unassignable_window() {
    let employees = four_employees();
    let start = horizon_monday();
    let end = weeks_from(start, 1);

    let leaves: Vec<LeaveRecord> = employees
        .iter()
        .map(|e| LeaveRecord {
            id: Uuid::new_v4(),
            employee_id: e.id,
            start_date: start.date_naive(),
            end_date: start.date_naive() + Duration::days(6),
            status: LeaveStatus::Approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .collect();

    let (orchestrator, _repo) = build_orchestrator_full(employees, leaves, Vec::new());

    let req = request(start, end, Some(vec![ShiftTypeKey::Incidents]), PlanMode::Preview, false);
    let outcome = orchestrator.plan(req, None).await.expect("preview does not fail without strict");

    assert!(outcome.assignments.is_empty());
    assert_eq!(outcome.unassignable.len(), 1);
    assert_eq!(outcome.unassignable[0].reason, "all on leave");

    let strict_req = request(start, end, Some(vec![ShiftTypeKey::Incidents]), PlanMode::Preview, true);
    let err = orchestrator.plan(strict_req, None).await.expect_err("strict mode fails the run");
    assert!(matches!(err, DomainError::NoEligibleEmployees(_)));
}

#[tokio::test]
async fn scenario_d_fairness_recovers_from_history() {
    let employees = vec![
        employee("E1", NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()),
        employee("E2", NaiveDate::from_ymd_opt(2019, 1, 2).unwrap()),
        employee("E3", NaiveDate::from_ymd_opt(2019, 1, 3).unwrap()),
    ];
    let e1 = employees[0].id;
    let e2 = employees[1].id;
    let e3 = employees[2].id;

    let history_start = Utc::now() - Duration::days(10);
    let shifts = vec![
        history_shift(e1, ShiftTypeKey::Incidents, history_start),
        history_shift(e1, ShiftTypeKey::Incidents, history_start + Duration::weeks(1)),
        history_shift(e1, ShiftTypeKey::Incidents, history_start + Duration::weeks(2)),
        history_shift(e1, ShiftTypeKey::Incidents, history_start + Duration::weeks(3)),
        history_shift(e2, ShiftTypeKey::Incidents, history_start),
        history_shift(e3, ShiftTypeKey::Incidents, history_start),
    ];

    let (orchestrator, _repo) = build_orchestrator_full(employees, Vec::new(), shifts);

    let start = horizon_monday();
    let end = weeks_from(start, 2);
    let req = request(start, end, Some(vec![ShiftTypeKey::Incidents]), PlanMode::Preview, false);

    let outcome = orchestrator.plan(req, None).await.expect("plan succeeds");

    assert_eq!(outcome.assignments.len(), 2);
    assert!(outcome.assignments.iter().all(|a| a.employee_id != e1), "E1 carries too much history to be picked");

    let recipients: std::collections::HashSet<Uuid> = outcome.assignments.iter().map(|a| a.employee_id).collect();
    assert!(recipients.is_subset(&[e2, e3].into_iter().collect()));
}

/// Wraps an `InMemoryRepository` but forces `check_no_new_conflicts` to
/// report a conflict, standing in for a concurrent writer whose commit
/// landed between this run's preview and its apply-time re-check.
struct ConflictingRepository {
    inner: Arc<dyn SchedulingRepository>,
}

struct ConflictingTransaction;

#[async_trait]
impl ApplyTransaction for ConflictingTransaction {
    async fn check_no_new_conflicts(&mut self, _tentative: &[Shift]) -> DomainResult<bool> {
        Ok(false)
    }

    async fn write_shifts(&mut self, _shifts: Vec<Shift>) -> DomainResult<()> {
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        Ok(())
    }
}

#[async_trait]
impl SchedulingRepository for ConflictingRepository {
    async fn list_employees(&self, team_scope: &str) -> DomainResult<Vec<Employee>> {
        self.inner.list_employees(team_scope).await
    }

    async fn list_approved_leaves(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> DomainResult<Vec<LeaveRecord>> {
        self.inner.list_approved_leaves(employee_ids, range_start, range_end).await
    }

    async fn list_shifts(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        include_cancelled: bool,
    ) -> DomainResult<Vec<Shift>> {
        self.inner.list_shifts(employee_ids, range_start, range_end, include_cancelled).await
    }

    async fn history_counts(
        &self,
        employee_ids: &[Uuid],
        shift_type: ShiftTypeKey,
        since: DateTime<Utc>,
    ) -> DomainResult<HashMap<Uuid, f64>> {
        self.inner.history_counts(employee_ids, shift_type, since).await
    }

    async fn template_for(&self, shift_type: ShiftTypeKey) -> DomainResult<ShiftTemplate> {
        self.inner.template_for(shift_type).await
    }

    async fn begin_apply(
        &self,
        _team_scope: &str,
        _horizon_start: DateTime<Utc>,
        _horizon_end: DateTime<Utc>,
    ) -> DomainResult<Box<dyn ApplyTransaction>> {
        Ok(Box::new(ConflictingTransaction))
    }
}

#[tokio::test]
async fn scenario_e_apply_detects_concurrent_write() {
    let employees = four_employees();
    let (orchestrator, repo) = build_orchestrator(employees);
    let conflicting = Arc::new(ConflictingRepository { inner: repo.clone() as Arc<dyn SchedulingRepository> });

    let schedulers_fairness = scheduling_service::domain::fairness::FairnessConfig::default();
    let calendar: Arc<dyn scheduling_service::domain::shift_types::Calendar> =
        Arc::new(scheduling_service::domain::shift_types::FixedHolidayCalendar::empty());

    let policies = [
        (ShiftTypeKey::Incidents, 5u32, Some("primary".to_string())),
        (ShiftTypeKey::Waakdienst, 7u32, Some("primary".to_string())),
    ];
    let schedulers: Vec<Arc<dyn scheduling_service::domain::shift_types::ShiftTypeScheduler>> = policies
        .iter()
        .map(|(key, weight, group)| {
            let policy = scheduling_service::domain::shift_types::ShiftTypePolicy {
                shift_type: *key,
                label: format!("{key}"),
                mutex_group: group.clone(),
                fairness_weight: *weight,
                holiday_policy: shared::HolidayPolicy::Skip,
                priority: 0,
            };
            match key {
                ShiftTypeKey::Incidents => {
                    Arc::new(scheduling_service::domain::shift_types::IncidentsScheduler::new(policy))
                        as Arc<dyn scheduling_service::domain::shift_types::ShiftTypeScheduler>
                }
                ShiftTypeKey::Waakdienst => {
                    Arc::new(scheduling_service::domain::shift_types::WaakdienstScheduler::new(policy))
                        as Arc<dyn scheduling_service::domain::shift_types::ShiftTypeScheduler>
                }
                ShiftTypeKey::IncidentsStandby => unreachable!(),
            }
        })
        .collect();

    let conflict_orchestrator = scheduling_service::domain::orchestrator::Orchestrator::new(
        schedulers,
        calendar,
        conflicting,
        schedulers_fairness,
        365,
        chrono_tz::Europe::Amsterdam,
        30_000,
    )
    .expect("valid policies");

    let start = horizon_monday();
    let end = weeks_from(start, 1);
    let req = request(start, end, Some(vec![ShiftTypeKey::Incidents]), PlanMode::Apply, false);

    let err = conflict_orchestrator.plan(req, None).await.expect_err("conflicting repository rejects the apply");
    assert!(matches!(err, DomainError::ConflictOnApply(_)));

    // The shifts table is untouched: a plain preview against the original
    // (non-conflicting) orchestrator still sees nothing persisted.
    let sanity_req = request(start, end, Some(vec![ShiftTypeKey::Incidents]), PlanMode::Preview, false);
    let sanity = orchestrator.plan(sanity_req, None).await.expect("plan succeeds");
    assert!(sanity.assignments.iter().all(|a| a.auto_generated));
}

#[tokio::test]
async fn scenario_f_determinism_across_identical_preview_calls() {
    let employees = four_employees();
    let (orchestrator, _repo) = build_orchestrator(employees);

    let start = horizon_monday();
    let end = weeks_from(start, 4);
    let req = request(
        start,
        end,
        Some(vec![ShiftTypeKey::Incidents, ShiftTypeKey::Waakdienst]),
        PlanMode::Preview,
        false,
    );

    let first = orchestrator.plan(req.clone(), None).await.expect("first plan succeeds");
    let second = orchestrator.plan(req, None).await.expect("second plan succeeds");

    assert_eq!(
        serde_json::to_value(&first.assignments).unwrap(),
        serde_json::to_value(&second.assignments).unwrap(),
    );
}

#[tokio::test]
async fn post_plan_endpoint_returns_422_for_strict_unassignable_window() {
    let employees = four_employees();
    let start = horizon_monday();
    let end = weeks_from(start, 1);

    let leaves: Vec<LeaveRecord> = employees
        .iter()
        .map(|e| LeaveRecord {
            id: Uuid::new_v4(),
            employee_id: e.id,
            start_date: start.date_naive(),
            end_date: start.date_naive() + Duration::days(6),
            status: LeaveStatus::Approved,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .collect();

    let (orchestrator, _repo) = build_orchestrator_full(employees, leaves, Vec::new());
    let state = AppState::new(orchestrator, Arc::new(InMemoryPlanningRunStore::new()));
    let app = create_router(state);
    let server = TestServer::new(app).unwrap();

    let response = server
        .post("/api/v1/plan")
        .json(&json!({
            "horizon_start": start,
            "horizon_end": end,
            "team_scope": TEAM,
            "shift_types": ["INCIDENTS"],
            "mode": "preview",
            "strict": true,
            "deadline_ms": null,
            "initiator": "integration-test",
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}
