use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use scheduling_service::domain::entities::Shift;
use scheduling_service::domain::orchestrator::Orchestrator;
use scheduling_service::domain::shift_types::{
    Calendar, FixedHolidayCalendar, IncidentsScheduler, IncidentsStandbyScheduler, ShiftTypePolicy,
    ShiftTypeScheduler, WaakdienstScheduler,
};
use scheduling_service::infrastructure::in_memory_repository::InMemoryRepository;
use shared::{Employee, HolidayPolicy, LeaveRecord, ShiftStatus, ShiftTemplate, ShiftTypeKey};
use uuid::Uuid;

pub const TEAM: &str = "platform-ops";

pub fn employee(display_name: &str, hire_date: NaiveDate) -> Employee {
    let now = Utc::now();
    Employee {
        id: Uuid::new_v4(),
        team_scope: TEAM.to_string(),
        display_name: display_name.to_string(),
        fte: 1.0,
        available_for_incidents: true,
        available_for_waakdienst: true,
        hire_date,
        active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_employees(count: usize) -> Vec<Employee> {
    (0..count)
        .map(|i| {
            employee(
                &format!("Employee {}", i + 1),
                NaiveDate::from_ymd_opt(2018 + i as i32, 1, 1).unwrap(),
            )
        })
        .collect()
}

pub fn template(shift_type: ShiftTypeKey, start: NaiveTime, end: NaiveTime) -> ShiftTemplate {
    let now = Utc::now();
    ShiftTemplate {
        id: Uuid::new_v4(),
        shift_type,
        default_start_time: start,
        default_end_time: end,
        notes: None,
        tags: Vec::new(),
        favourite_count: 0,
        usage_count: 0,
        created_at: now,
        updated_at: now,
    }
}

pub fn default_templates() -> Vec<ShiftTemplate> {
    vec![
        template(
            ShiftTypeKey::Incidents,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        ),
        template(
            ShiftTypeKey::IncidentsStandby,
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
        ),
        template(
            ShiftTypeKey::Waakdienst,
            NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
        ),
    ]
}

pub fn default_policies() -> Vec<ShiftTypePolicy> {
    vec![
        ShiftTypePolicy {
            shift_type: ShiftTypeKey::Incidents,
            label: "Incidents".to_string(),
            mutex_group: Some("primary".to_string()),
            fairness_weight: 5,
            holiday_policy: HolidayPolicy::Skip,
            priority: 0,
        },
        ShiftTypePolicy {
            shift_type: ShiftTypeKey::IncidentsStandby,
            label: "Incidents Standby".to_string(),
            mutex_group: Some("standby".to_string()),
            fairness_weight: 5,
            holiday_policy: HolidayPolicy::Skip,
            priority: 0,
        },
        ShiftTypePolicy {
            shift_type: ShiftTypeKey::Waakdienst,
            label: "Waakdienst".to_string(),
            mutex_group: Some("primary".to_string()),
            fairness_weight: 7,
            holiday_policy: HolidayPolicy::Include,
            priority: 1,
        },
    ]
}

pub fn build_scheduler(policy: ShiftTypePolicy) -> Arc<dyn ShiftTypeScheduler> {
    match policy.shift_type {
        ShiftTypeKey::Incidents => Arc::new(IncidentsScheduler::new(policy)),
        ShiftTypeKey::IncidentsStandby => Arc::new(IncidentsStandbyScheduler::new(policy)),
        ShiftTypeKey::Waakdienst => Arc::new(WaakdienstScheduler::new(policy)),
    }
}

/// Build an Orchestrator wired to an `InMemoryRepository` seeded with the
/// given employees, over the three built-in shift-type schedulers.
pub fn build_orchestrator(employees: Vec<Employee>) -> (Arc<Orchestrator>, Arc<InMemoryRepository>) {
    build_orchestrator_full(employees, Vec::new(), Vec::new())
}

/// Same as `build_orchestrator`, additionally seeding approved leave and
/// pre-existing shifts (for history / conflict scenarios).
pub fn build_orchestrator_full(
    employees: Vec<Employee>,
    leaves: Vec<LeaveRecord>,
    shifts: Vec<Shift>,
) -> (Arc<Orchestrator>, Arc<InMemoryRepository>) {
    let fairness_weight: HashMap<ShiftTypeKey, u32> = default_policies()
        .into_iter()
        .map(|p| (p.shift_type, p.fairness_weight))
        .collect();

    let repository = Arc::new(
        InMemoryRepository::new(fairness_weight)
            .with_employees(employees)
            .with_leaves(leaves)
            .with_shifts(shifts)
            .with_templates(default_templates()),
    );

    let schedulers: Vec<Arc<dyn ShiftTypeScheduler>> =
        default_policies().into_iter().map(build_scheduler).collect();

    let calendar: Arc<dyn Calendar> = Arc::new(FixedHolidayCalendar::empty());

    let orchestrator = Orchestrator::new(
        schedulers,
        calendar,
        repository.clone(),
        scheduling_service::domain::fairness::FairnessConfig::default(),
        365,
        chrono_tz::Europe::Amsterdam,
        30_000,
    )
    .expect("valid scheduler policies");

    (Arc::new(orchestrator), repository)
}

/// A past, non-cancelled Incidents shift contributing history load — used to
/// seed fairness history ahead of a horizon.
pub fn history_shift(employee_id: Uuid, shift_type: ShiftTypeKey, start: chrono::DateTime<Utc>) -> Shift {
    Shift {
        id: Uuid::new_v4(),
        template_ref: Uuid::new_v4(),
        shift_type,
        assigned_employee: employee_id,
        start_instant: start,
        end_instant: start + chrono::Duration::hours(9),
        status: ShiftStatus::Scheduled,
        auto_generated: true,
    }
}

/// A Monday at 00:00 UTC, used as a fixed horizon anchor across tests.
pub fn test_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 9).unwrap()
}
