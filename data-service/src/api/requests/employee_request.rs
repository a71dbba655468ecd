use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;

/// Request to create a new employee.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub team_scope: String,
    pub display_name: String,
    pub fte: f64,
    #[serde(default)]
    pub available_for_incidents: bool,
    #[serde(default)]
    pub available_for_waakdienst: bool,
    pub hire_date: NaiveDate,
}

/// Request to update an employee. `active = false` soft-inactivates the
/// employee rather than removing the row; a planning run's
/// `AssignmentHistory` may still reference the id.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEmployeeRequest {
    pub display_name: Option<String>,
    pub fte: Option<f64>,
    pub available_for_incidents: Option<bool>,
    pub available_for_waakdienst: Option<bool>,
    pub active: Option<bool>,
}
