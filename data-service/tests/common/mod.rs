use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use data_service::api::requests::{
    ApplyShiftsRequest, CreateEmployeeRequest, CreateLeaveRecordRequest, CreateShiftTemplateRequest,
    UpdateEmployeeRequest, UpdateLeaveStatusRequest, UpdateShiftTemplateRequest,
};
use data_service::api::AppState;
use data_service::domain::entities::Shift;
use data_service::domain::repositories::{
    EmployeeRepository, LeaveRecordRepository, ShiftRepository, ShiftTemplateRepository,
};
use shared::{
    DomainError, DomainResult, Employee, LeaveRecord, LeaveStatus, PaginationParams, ShiftTemplate,
    ShiftTypeKey,
};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub type RedisPool = redis::aio::ConnectionManager;

#[derive(Default)]
pub struct MockEmployeeRepository {
    employees: RwLock<HashMap<Uuid, Employee>>,
}

impl MockEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_employees(employees: Vec<Employee>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.employees.write().unwrap();
            for e in employees {
                map.insert(e.id, e);
            }
        }
        repo
    }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
    async fn create(&self, request: CreateEmployeeRequest) -> DomainResult<Employee> {
        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4(),
            team_scope: request.team_scope,
            display_name: request.display_name,
            fte: request.fte,
            available_for_incidents: request.available_for_incidents,
            available_for_waakdienst: request.available_for_waakdienst,
            hire_date: request.hire_date,
            active: true,
            created_at: now,
            updated_at: now,
        };
        self.employees
            .write()
            .unwrap()
            .insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<Employee>> {
        Ok(self.employees.read().unwrap().get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> DomainResult<Vec<Employee>> {
        let map = self.employees.read().unwrap();
        Ok(ids.iter().filter_map(|id| map.get(id).cloned()).collect())
    }

    async fn list_by_team(
        &self,
        team_scope: &str,
        params: PaginationParams,
    ) -> DomainResult<(Vec<Employee>, u64)> {
        let mut employees: Vec<Employee> = self
            .employees
            .read()
            .unwrap()
            .values()
            .filter(|e| e.team_scope == team_scope)
            .cloned()
            .collect();
        employees.sort_by_key(|e| e.hire_date);
        let total = employees.len() as u64;
        let offset = ((params.page - 1) * params.page_size) as usize;
        let page: Vec<Employee> = employees
            .into_iter()
            .skip(offset)
            .take(params.page_size as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_active_by_team(&self, team_scope: &str) -> DomainResult<Vec<Employee>> {
        let mut employees: Vec<Employee> = self
            .employees
            .read()
            .unwrap()
            .values()
            .filter(|e| e.team_scope == team_scope && e.active)
            .cloned()
            .collect();
        employees.sort_by_key(|e| e.hire_date);
        Ok(employees)
    }

    async fn update(&self, id: Uuid, request: UpdateEmployeeRequest) -> DomainResult<Employee> {
        let mut map = self.employees.write().unwrap();
        let employee = map
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Employee with id {} not found", id)))?;

        if let Some(display_name) = request.display_name {
            employee.display_name = display_name;
        }
        if let Some(fte) = request.fte {
            employee.fte = fte;
        }
        if let Some(available_for_incidents) = request.available_for_incidents {
            employee.available_for_incidents = available_for_incidents;
        }
        if let Some(available_for_waakdienst) = request.available_for_waakdienst {
            employee.available_for_waakdienst = available_for_waakdienst;
        }
        if let Some(active) = request.active {
            employee.active = active;
        }
        employee.updated_at = Utc::now();
        Ok(employee.clone())
    }
}

#[derive(Default)]
pub struct MockShiftTemplateRepository {
    templates: RwLock<HashMap<Uuid, ShiftTemplate>>,
}

impl MockShiftTemplateRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShiftTemplateRepository for MockShiftTemplateRepository {
    async fn create(&self, request: CreateShiftTemplateRequest) -> DomainResult<ShiftTemplate> {
        let now = Utc::now();
        let template = ShiftTemplate {
            id: Uuid::new_v4(),
            shift_type: request.shift_type,
            default_start_time: request.default_start_time,
            default_end_time: request.default_end_time,
            notes: request.notes,
            tags: request.tags,
            favourite_count: 0,
            usage_count: 0,
            created_at: now,
            updated_at: now,
        };
        self.templates
            .write()
            .unwrap()
            .insert(template.id, template.clone());
        Ok(template)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<ShiftTemplate>> {
        Ok(self.templates.read().unwrap().get(&id).cloned())
    }

    async fn find_by_shift_type(&self, shift_type: ShiftTypeKey) -> DomainResult<Vec<ShiftTemplate>> {
        let mut templates: Vec<ShiftTemplate> = self
            .templates
            .read()
            .unwrap()
            .values()
            .filter(|t| t.shift_type == shift_type)
            .cloned()
            .collect();
        templates.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        Ok(templates)
    }

    async fn list(&self, params: PaginationParams) -> DomainResult<(Vec<ShiftTemplate>, u64)> {
        let templates: Vec<ShiftTemplate> = self.templates.read().unwrap().values().cloned().collect();
        let total = templates.len() as u64;
        let offset = ((params.page - 1) * params.page_size) as usize;
        let page: Vec<ShiftTemplate> = templates
            .into_iter()
            .skip(offset)
            .take(params.page_size as usize)
            .collect();
        Ok((page, total))
    }

    async fn update(
        &self,
        id: Uuid,
        request: UpdateShiftTemplateRequest,
    ) -> DomainResult<ShiftTemplate> {
        let mut map = self.templates.write().unwrap();
        let template = map
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Template with id {} not found", id)))?;

        if let Some(start) = request.default_start_time {
            template.default_start_time = start;
        }
        if let Some(end) = request.default_end_time {
            template.default_end_time = end;
        }
        if let Some(notes) = request.notes {
            template.notes = Some(notes);
        }
        if let Some(tags) = request.tags {
            template.tags = tags;
        }
        template.updated_at = Utc::now();
        Ok(template.clone())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<()> {
        self.templates
            .write()
            .unwrap()
            .remove(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Template with id {} not found", id)))?;
        Ok(())
    }

    async fn increment_usage(&self, id: Uuid) -> DomainResult<()> {
        let mut map = self.templates.write().unwrap();
        let template = map
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Template with id {} not found", id)))?;
        template.usage_count += 1;
        Ok(())
    }
}

#[derive(Default)]
pub struct MockLeaveRecordRepository {
    records: RwLock<HashMap<Uuid, LeaveRecord>>,
}

impl MockLeaveRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<LeaveRecord>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.records.write().unwrap();
            for r in records {
                map.insert(r.id, r);
            }
        }
        repo
    }
}

#[async_trait]
impl LeaveRecordRepository for MockLeaveRecordRepository {
    async fn create(&self, request: CreateLeaveRecordRequest) -> DomainResult<LeaveRecord> {
        let now = Utc::now();
        let record = LeaveRecord {
            id: Uuid::new_v4(),
            employee_id: request.employee_id,
            start_date: request.start_date,
            end_date: request.end_date,
            status: LeaveStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.records.write().unwrap().insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> DomainResult<Option<LeaveRecord>> {
        Ok(self.records.read().unwrap().get(&id).cloned())
    }

    async fn list_by_employee(
        &self,
        employee_id: Uuid,
        params: PaginationParams,
    ) -> DomainResult<(Vec<LeaveRecord>, u64)> {
        let mut records: Vec<LeaveRecord> = self
            .records
            .read()
            .unwrap()
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        let total = records.len() as u64;
        let offset = ((params.page - 1) * params.page_size) as usize;
        let page: Vec<LeaveRecord> = records
            .into_iter()
            .skip(offset)
            .take(params.page_size as usize)
            .collect();
        Ok((page, total))
    }

    async fn list_approved_overlapping(
        &self,
        employee_ids: &[Uuid],
        range_start: NaiveDate,
        range_end_exclusive: NaiveDate,
    ) -> DomainResult<Vec<LeaveRecord>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .values()
            .filter(|r| {
                employee_ids.contains(&r.employee_id)
                    && r.overlaps_date_range(range_start, range_end_exclusive)
            })
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        request: UpdateLeaveStatusRequest,
    ) -> DomainResult<LeaveRecord> {
        let mut map = self.records.write().unwrap();
        let record = map
            .get_mut(&id)
            .ok_or_else(|| DomainError::NotFound(format!("Leave record with id {} not found", id)))?;
        record.status = request.status;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

#[derive(Default)]
pub struct MockShiftRepository {
    shifts: RwLock<HashMap<Uuid, Shift>>,
}

impl MockShiftRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shifts(shifts: Vec<Shift>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.shifts.write().unwrap();
            for s in shifts {
                map.insert(s.id, s);
            }
        }
        repo
    }
}

#[async_trait]
impl ShiftRepository for MockShiftRepository {
    async fn list_in_range(
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
                    && s.start_instant < range_end
                    && range_start < s.end_instant
                    && (include_cancelled || s.status != shared::ShiftStatus::Cancelled)
            })
            .cloned()
            .collect())
    }

    async fn history_raw_counts(
        &self,
        employee_ids: &[Uuid],
        shift_type: ShiftTypeKey,
        since: DateTime<Utc>,
    ) -> DomainResult<HashMap<Uuid, i64>> {
        let mut counts = HashMap::new();
        for shift in self.shifts.read().unwrap().values() {
            if employee_ids.contains(&shift.assigned_employee)
                && shift.shift_type == shift_type
                && shift.start_instant >= since
                && shift.status != shared::ShiftStatus::Cancelled
            {
                *counts.entry(shift.assigned_employee).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn apply(&self, request: ApplyShiftsRequest) -> DomainResult<Vec<Shift>> {
        let mut map = self.shifts.write().unwrap();

        for new_shift in &request.shifts {
            let conflict = map.values().any(|existing| {
                existing.assigned_employee == new_shift.assigned_employee
                    && existing.status != shared::ShiftStatus::Cancelled
                    && existing.start_instant < new_shift.end_instant
                    && new_shift.start_instant < existing.end_instant
            });
            if conflict {
                return Err(DomainError::ConflictOnApply(format!(
                    "employee {} already has an overlapping shift",
                    new_shift.assigned_employee
                )));
            }
        }

        let now = Utc::now();
        let mut written = Vec::with_capacity(request.shifts.len());
        for new_shift in request.shifts {
            let shift = Shift {
                id: new_shift.id,
                template_ref: new_shift.template_ref,
                shift_type: new_shift.shift_type,
                assigned_employee: new_shift.assigned_employee,
                start_instant: new_shift.start_instant,
                end_instant: new_shift.end_instant,
                status: new_shift.status,
                auto_generated: new_shift.auto_generated,
                created_at: now,
                updated_at: now,
            };
            map.insert(shift.id, shift.clone());
            written.push(shift);
        }
        Ok(written)
    }
}

/// Create a dummy Redis connection manager for tests. Cache-path assertions
/// are skipped where they would require a reachable Redis instance.
pub async fn create_mock_redis_pool() -> RedisPool {
    let client = redis::Client::open("redis://localhost:6379").unwrap();
    redis::aio::ConnectionManager::new(client).await.unwrap()
}

pub fn create_test_app_state(
    employee_repo: Arc<dyn EmployeeRepository>,
    template_repo: Arc<dyn ShiftTemplateRepository>,
    leave_repo: Arc<dyn LeaveRecordRepository>,
    shift_repo: Arc<dyn ShiftRepository>,
    redis_pool: RedisPool,
) -> AppState {
    AppState::new(employee_repo, template_repo, leave_repo, shift_repo, redis_pool)
}

pub fn sample_employee(id: Uuid, team_scope: &str, display_name: &str, hire_date: NaiveDate) -> Employee {
    let now = Utc::now();
    Employee {
        id,
        team_scope: team_scope.to_string(),
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
