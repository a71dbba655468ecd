pub mod metrics;
pub mod planning_run;
pub mod shift;

pub use metrics::{EmployeeSummary, ShiftTypeCount, UnassignableWindowDto};
pub use planning_run::{AssignmentDto, PersistedOutcome, PlanningRun};
pub use shift::Shift;
