pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod employees;
pub mod health;
pub mod intake;
pub mod payments;
