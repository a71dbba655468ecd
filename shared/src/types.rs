use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// One of the built-in shift types. New shift types are added here and paired
/// with a `ShiftTypeScheduler` implementation; the window rule, mutex group
/// and fairness weight are the only pieces of type-specific knowledge.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(type_name = "shift_type_key", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftTypeKey {
    Incidents,
    IncidentsStandby,
    Waakdienst,
}

impl ShiftTypeKey {
    pub const ALL: [ShiftTypeKey; 3] = [
        ShiftTypeKey::Incidents,
        ShiftTypeKey::IncidentsStandby,
        ShiftTypeKey::Waakdienst,
    ];
}

impl std::fmt::Display for ShiftTypeKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShiftTypeKey::Incidents => write!(f, "incidents"),
            ShiftTypeKey::IncidentsStandby => write!(f, "incidents_standby"),
            ShiftTypeKey::Waakdienst => write!(f, "waakdienst"),
        }
    }
}

/// Status of a single assignment instance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "shift_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftStatus {
    Scheduled,
    Confirmed,
    Cancelled,
}

/// Status of a leave request. Only `Approved` records are load-bearing for
/// the engine; the others exist because a surrounding leave workflow writes
/// this same table across its own approval state machine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "leave_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

/// Whether a shift type's window generation skips or includes holidays.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "holiday_policy", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HolidayPolicy {
    Skip,
    Include,
}

/// The two modes a planning run may execute in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "plan_mode", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "lowercase")]
pub enum PlanMode {
    Preview,
    Apply,
}

/// Canonical Employee record. Owned and administered by `data-service`;
/// consumed read-only by `scheduling-service` over the Repository Interface.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Employee {
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

impl Employee {
    /// Resolve the availability flag for a given shift type. `IncidentsStandby`
    /// shares the `Incidents` flag per the spec's named availability set.
    pub fn available_for(&self, shift_type: ShiftTypeKey) -> bool {
        match shift_type {
            ShiftTypeKey::Incidents | ShiftTypeKey::IncidentsStandby => {
                self.available_for_incidents
            }
            ShiftTypeKey::Waakdienst => self.available_for_waakdienst,
        }
    }
}

impl Identifiable for Employee {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for Employee {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// Named preset stamping generated Shifts with default times and metadata.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ShiftTemplate {
    pub id: Uuid,
    pub shift_type: ShiftTypeKey,
    pub default_start_time: NaiveTime,
    pub default_end_time: NaiveTime,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub favourite_count: i64,
    pub usage_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Identifiable for ShiftTemplate {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for ShiftTemplate {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

/// An employee's leave record. Only `status = Approved` blocks scheduling.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct LeaveRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveRecord {
    /// Whether this leave, if approved, blocks a window covering
    /// `[range_start, range_end_exclusive)`.
    pub fn overlaps_date_range(&self, range_start: NaiveDate, range_end_exclusive: NaiveDate) -> bool {
        self.status == LeaveStatus::Approved
            && self.start_date < range_end_exclusive
            && range_start <= self.end_date
    }
}

impl Identifiable for LeaveRecord {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Timestamped for LeaveRecord {
    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
    fn updated_at(&self) -> DateTime<Utc>;
}

pub trait Identifiable {
    fn id(&self) -> Uuid;
}
