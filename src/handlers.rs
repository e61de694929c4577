pub mod auth;
pub mod catalog;
pub mod health;
pub mod payments;
pub mod schedule;
pub mod statistics;
pub mod tutors;
