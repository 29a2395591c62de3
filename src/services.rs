pub mod auth;
pub mod booking_service;
pub mod catalog_service;
pub mod intake_service;
pub mod payment_service;
pub mod payroll_service;
