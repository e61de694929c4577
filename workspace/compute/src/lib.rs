//! Data-service procedures.
//!
//! Each procedure is one named query the HTTP layer forwards to: it takes the
//! database connection plus its arguments, reads the tutoring tables and
//! returns transport rows from `common`. Callers treat them as opaque.

pub mod catalog;
pub mod error;
pub mod payments;
pub mod schedule;
pub mod sessions;
pub mod statistics;
pub mod tutors;

#[cfg(test)]
mod testing;

pub use error::{ComputeError, Result};
