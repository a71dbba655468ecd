pub mod employee;
pub mod leave_record;
pub mod shift;
pub mod shift_template;

pub use employee::EmployeeSerializer;
pub use leave_record::LeaveRecordSerializer;
pub use shift::ShiftSerializer;
pub use shift_template::ShiftTemplateSerializer;
