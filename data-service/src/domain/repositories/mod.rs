pub mod employee_repository;
pub mod leave_record_repository;
pub mod shift_repository;
pub mod shift_template_repository;

pub use employee_repository::EmployeeRepository;
pub use leave_record_repository::LeaveRecordRepository;
pub use shift_repository::ShiftRepository;
pub use shift_template_repository::ShiftTemplateRepository;
