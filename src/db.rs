pub mod user_repo;
pub use user_repo::UserRepository;
pub mod booking_repo;
pub use booking_repo::BookingRepository;
pub mod service_repo;
pub use service_repo::ServiceRepository;
pub mod employee_repo;
pub use employee_repo::EmployeeRepository;
pub mod intake_repo;
pub use intake_repo::IntakeRepository;
