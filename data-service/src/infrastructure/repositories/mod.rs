pub mod postgres_employee_repository;
pub mod postgres_leave_record_repository;
pub mod postgres_shift_repository;
pub mod postgres_shift_template_repository;

pub use postgres_employee_repository::PostgresEmployeeRepository;
pub use postgres_leave_record_repository::PostgresLeaveRecordRepository;
pub use postgres_shift_repository::PostgresShiftRepository;
pub use postgres_shift_template_repository::PostgresShiftTemplateRepository;
