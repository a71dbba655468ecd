use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::Employee;
use utoipa::ToSchema;
use uuid::Uuid;

/// Employee serializer DTO
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EmployeeSerializer {
    pub id: Uuid,
    pub team_scope: String,
    pub display_name: String,
    pub fte: f64,
    pub available_for_incidents: bool,
    pub available_for_waakdienst: bool,
    pub hire_date: NaiveDate,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Employee> for EmployeeSerializer {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            team_scope: employee.team_scope,
            display_name: employee.display_name,
            fte: employee.fte,
            available_for_incidents: employee.available_for_incidents,
            available_for_waakdienst: employee.available_for_waakdienst,
            hire_date: employee.hire_date,
            active: employee.active,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}
