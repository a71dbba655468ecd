pub mod employee;
pub mod leave_record;
pub mod shift;
pub mod shift_template;

pub use employee::EmployeeResponse;
pub use leave_record::LeaveRecordResponse;
pub use shift::{Shift, ShiftResponse};
pub use shift_template::ShiftTemplateResponse;

pub use shared::{Employee, LeaveRecord, ShiftTemplate};
