use std::sync::Arc;

use shared::RedisPool;

use crate::domain::repositories::{
    EmployeeRepository, LeaveRecordRepository, ShiftRepository, ShiftTemplateRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub employee_repo: Arc<dyn EmployeeRepository>,
    pub template_repo: Arc<dyn ShiftTemplateRepository>,
    pub leave_repo: Arc<dyn LeaveRecordRepository>,
    pub shift_repo: Arc<dyn ShiftRepository>,
    pub redis_pool: RedisPool,
}

impl AppState {
    pub fn new(
        employee_repo: Arc<dyn EmployeeRepository>,
        template_repo: Arc<dyn ShiftTemplateRepository>,
        leave_repo: Arc<dyn LeaveRecordRepository>,
        shift_repo: Arc<dyn ShiftRepository>,
        redis_pool: RedisPool,
    ) -> Self {
        Self {
            employee_repo,
            template_repo,
            leave_repo,
            shift_repo,
            redis_pool,
        }
    }
}
