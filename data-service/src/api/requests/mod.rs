pub mod employee_request;
pub mod leave_record_request;
pub mod shift_request;
pub mod shift_template_request;

pub use employee_request::{CreateEmployeeRequest, UpdateEmployeeRequest};
pub use leave_record_request::{CreateLeaveRecordRequest, UpdateLeaveStatusRequest};
pub use shift_request::{ApplyShiftsRequest, NewShiftInput};
pub use shift_template_request::{CreateShiftTemplateRequest, UpdateShiftTemplateRequest};
