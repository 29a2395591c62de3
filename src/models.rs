pub mod auth;
pub mod booking;
pub mod catalog;
pub mod intake;
pub mod payment;
pub mod payroll;
