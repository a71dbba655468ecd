use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::{DomainError, DomainResult, Employee, LeaveRecord, ShiftTemplate, ShiftTypeKey};
use uuid::Uuid;

use crate::domain::entities::Shift;
use crate::domain::repository::{ApplyTransaction, SchedulingRepository};

/// Dependency-free `SchedulingRepository` reference implementation backed
/// entirely by in-process state. Used by the test suite and as the model
/// against which the HTTP-backed `repository_client` is checked: both must
/// resolve every operation to the same semantics.
#[derive(Default)]
pub struct InMemoryRepository {
    employees: RwLock<Vec<Employee>>,
    leaves: RwLock<Vec<LeaveRecord>>,
    shifts: RwLock<HashMap<Uuid, Shift>>,
    templates: RwLock<HashMap<ShiftTypeKey, ShiftTemplate>>,
    fairness_weight: HashMap<ShiftTypeKey, u32>,
}

impl InMemoryRepository {
    pub fn new(fairness_weight: HashMap<ShiftTypeKey, u32>) -> Self {
        Self {
            fairness_weight,
            ..Default::default()
        }
    }

    pub fn with_employees(mut self, employees: Vec<Employee>) -> Self {
        self.employees = RwLock::new(employees);
        self
    }

    pub fn with_leaves(mut self, leaves: Vec<LeaveRecord>) -> Self {
        self.leaves = RwLock::new(leaves);
        self
    }

    pub fn with_shifts(mut self, shifts: Vec<Shift>) -> Self {
        self.shifts = RwLock::new(shifts.into_iter().map(|s| (s.id, s)).collect());
        self
    }

    pub fn with_templates(mut self, templates: Vec<ShiftTemplate>) -> Self {
        self.templates = RwLock::new(templates.into_iter().map(|t| (t.shift_type, t)).collect());
        self
    }

    pub fn shifts_snapshot(&self) -> Vec<Shift> {
        self.shifts.read().unwrap().values().cloned().collect()
    }
}

#[async_trait]
impl SchedulingRepository for InMemoryRepository {
    async fn list_employees(&self, team_scope: &str) -> DomainResult<Vec<Employee>> {
        Ok(self
            .employees
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.team_scope == team_scope && e.active)
            .cloned()
            .collect())
    }

    async fn list_approved_leaves(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> DomainResult<Vec<LeaveRecord>> {
        let start_date = range_start.date_naive();
        let end_date_exclusive = range_end.date_naive() + chrono::Duration::days(1);
        Ok(self
            .leaves
            .read()
            .unwrap()
            .iter()
            .filter(|l| {
                employee_ids.contains(&l.employee_id)
                    && l.overlaps_date_range(start_date, end_date_exclusive)
            })
            .cloned()
            .collect())
    }

    async fn list_shifts(
        &self,
        employee_ids: &[Uuid],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        include_cancelled: bool,
    ) -> DomainResult<Vec<Shift>> {
        Ok(self
            .shifts
            .read()
            .unwrap()
            .values()
            .filter(|s| {
                employee_ids.contains(&s.assigned_employee)
                    && s.overlaps(range_start, range_end)
                    && (include_cancelled || s.status != shared::ShiftStatus::Cancelled)
            })
            .cloned()
            .collect())
    }

    async fn history_counts(
        &self,
        employee_ids: &[Uuid],
        shift_type: ShiftTypeKey,
        since: DateTime<Utc>,
    ) -> DomainResult<HashMap<Uuid, f64>> {
        let weight = *self.fairness_weight.get(&shift_type).unwrap_or(&1) as f64;
        let mut counts: HashMap<Uuid, f64> = HashMap::new();
        for shift in self.shifts.read().unwrap().values() {
            if employee_ids.contains(&shift.assigned_employee)
                && shift.shift_type == shift_type
                && shift.start_instant >= since
                && shift.status != shared::ShiftStatus::Cancelled
            {
                *counts.entry(shift.assigned_employee).or_insert(0.0) += weight;
            }
        }
        Ok(counts)
    }

    async fn template_for(&self, shift_type: ShiftTypeKey) -> DomainResult<ShiftTemplate> {
        self.templates
            .read()
            .unwrap()
            .get(&shift_type)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("no template registered for {:?}", shift_type)))
    }

    async fn begin_apply(
        &self,
        _team_scope: &str,
        _horizon_start: DateTime<Utc>,
        _horizon_end: DateTime<Utc>,
    ) -> DomainResult<Box<dyn ApplyTransaction>> {
        Ok(Box::new(InMemoryApplyTransaction {
            shifts: &self.shifts,
            pending: Vec::new(),
        }))
    }
}

/// Apply-mode transaction over the shared in-memory shift map. There is no
/// separate snapshot to isolate: `check_no_new_conflicts` re-reads the live
/// map directly, which is the same guarantee a single-writer Postgres
/// advisory lock gives the HTTP-backed implementation.
struct InMemoryApplyTransaction<'a> {
    shifts: &'a RwLock<HashMap<Uuid, Shift>>,
    pending: Vec<Shift>,
}

#[async_trait]
impl<'a> ApplyTransaction for InMemoryApplyTransaction<'a> {
    async fn check_no_new_conflicts(&mut self, tentative: &[Shift]) -> DomainResult<bool> {
        let map = self.shifts.read().unwrap();
        let clean = tentative.iter().all(|candidate| {
            !map.values().any(|existing| {
                existing.assigned_employee == candidate.assigned_employee
                    && existing.status != shared::ShiftStatus::Cancelled
                    && existing.overlaps(candidate.start_instant, candidate.end_instant)
            })
        });
        Ok(clean)
    }

    async fn write_shifts(&mut self, shifts: Vec<Shift>) -> DomainResult<()> {
        self.pending.extend(shifts);
        Ok(())
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let mut map = self.shifts.write().unwrap();
        for shift in self.pending {
            map.insert(shift.id, shift);
        }
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> DomainResult<()> {
        Ok(())
    }
}
