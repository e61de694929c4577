//! This file serves as the root for all SeaORM entity modules.
//! The tables mirror the tutoring data service: accounts and tutors,
//! students enrolled into a tutor's courses, the class sessions delivered
//! for each enrollment and the payments those sessions are billed on.

pub mod account;
pub mod class_session;
pub mod course;
pub mod enrollment;
pub mod payment;
pub mod student;
pub mod tutor;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::account::Entity as Account;
    pub use super::class_session::Entity as ClassSession;
    pub use super::course::Entity as Course;
    pub use super::enrollment::Entity as Enrollment;
    pub use super::payment::Entity as Payment;
    pub use super::student::Entity as Student;
    pub use super::tutor::Entity as Tutor;
}
