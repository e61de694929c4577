//! Class sessions joined with everything the procedures report on.
//!
//! Each procedure works over the same picture: a session, the enrollment it
//! belongs to, that enrollment's student and course, and the payment the
//! session was billed on (if any). The rows are loaded per table and stitched
//! together in memory.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{debug, instrument};

use common::ReportPeriod;
use model::entities::{class_session, course, enrollment, payment, prelude::*, student};

use crate::error::Result;

/// A class session with its student, course and optional payment.
#[derive(Debug, Clone)]
pub struct SessionFact {
    pub session: class_session::Model,
    pub student: student::Model,
    pub course: course::Model,
    pub payment: Option<payment::Model>,
}

impl SessionFact {
    pub fn hours(&self) -> Decimal {
        self.session.hours()
    }

    /// Hours times the course's hourly price.
    pub fn income(&self) -> Decimal {
        self.hours() * self.course.price_per_hour
    }

    pub fn date(&self) -> NaiveDate {
        self.session.session_date
    }

    /// Delivered sessions inside `period`; anything after `today` has not happened yet.
    pub fn taught_within(&self, period: &ReportPeriod, today: NaiveDate) -> bool {
        self.date() <= today && period.contains(self.date())
    }

    /// Delivered but not settled: never billed, or billed on a payment that is not paid.
    pub fn is_pending(&self, today: NaiveDate) -> bool {
        self.date() <= today
            && self
                .payment
                .as_ref()
                .map_or(true, |p| p.status != payment::PaymentStatus::Paid)
    }

    pub fn is_overdue(&self) -> bool {
        self.payment
            .as_ref()
            .is_some_and(|p| p.status == payment::PaymentStatus::Overdue)
    }
}

/// Courses owned by `tutor`, or every course when no tutor is given.
pub async fn courses_of(db: &DatabaseConnection, tutor: Option<i32>) -> Result<Vec<course::Model>> {
    let mut query = Course::find();
    if let Some(tutor_id) = tutor {
        query = query.filter(course::Column::TutorId.eq(tutor_id));
    }
    Ok(query.order_by_asc(course::Column::NameThai).all(db).await?)
}

/// Enrollments into the given courses.
pub async fn enrollments_in(
    db: &DatabaseConnection,
    courses: &[course::Model],
) -> Result<Vec<enrollment::Model>> {
    if courses.is_empty() {
        return Ok(Vec::new());
    }
    let course_ids: Vec<i32> = courses.iter().map(|c| c.id).collect();
    Ok(Enrollment::find()
        .filter(enrollment::Column::CourseId.is_in(course_ids))
        .all(db)
        .await?)
}

pub async fn students_by_id(
    db: &DatabaseConnection,
    enrollments: &[enrollment::Model],
) -> Result<HashMap<i32, student::Model>> {
    if enrollments.is_empty() {
        return Ok(HashMap::new());
    }
    let student_ids: Vec<i32> = enrollments.iter().map(|e| e.student_id).collect();
    let students = Student::find()
        .filter(student::Column::Id.is_in(student_ids))
        .all(db)
        .await?;
    Ok(students.into_iter().map(|s| (s.id, s)).collect())
}

/// Sessions of a tutor (or of everyone) together with every payment billed
/// on their enrollments, paid or not.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    pub facts: Vec<SessionFact>,
    pub payments: Vec<payment::Model>,
}

/// Loads every session taught in `tutor`'s courses (all tutors when `None`),
/// ordered by date and start time.
pub async fn session_facts(db: &DatabaseConnection, tutor: Option<i32>) -> Result<Vec<SessionFact>> {
    Ok(load_ledger(db, tutor).await?.facts)
}

/// One pass over courses, enrollments, students, sessions and payments.
#[instrument(skip(db))]
pub async fn load_ledger(db: &DatabaseConnection, tutor: Option<i32>) -> Result<Ledger> {
    let courses = courses_of(db, tutor).await?;
    let enrollments = enrollments_in(db, &courses).await?;
    if enrollments.is_empty() {
        debug!("No enrollments found");
        return Ok(Ledger::default());
    }

    let students = students_by_id(db, &enrollments).await?;
    let enrollment_ids: Vec<i32> = enrollments.iter().map(|e| e.id).collect();

    let sessions = ClassSession::find()
        .filter(class_session::Column::EnrollmentId.is_in(enrollment_ids.clone()))
        .order_by_asc(class_session::Column::SessionDate)
        .order_by_asc(class_session::Column::StartTime)
        .order_by_asc(class_session::Column::Id)
        .all(db)
        .await?;

    let payments = Payment::find()
        .filter(payment::Column::EnrollmentId.is_in(enrollment_ids))
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await?;
    let payments_by_id: HashMap<i32, &payment::Model> = payments.iter().map(|p| (p.id, p)).collect();

    let courses: HashMap<i32, course::Model> = courses.into_iter().map(|c| (c.id, c)).collect();
    let enrollments: HashMap<i32, enrollment::Model> =
        enrollments.into_iter().map(|e| (e.id, e)).collect();

    let facts: Vec<SessionFact> = sessions
        .into_iter()
        .filter_map(|session| {
            let enrollment = enrollments.get(&session.enrollment_id)?;
            let student = students.get(&enrollment.student_id)?.clone();
            let course = courses.get(&enrollment.course_id)?.clone();
            let payment = session
                .payment_id
                .and_then(|id| payments_by_id.get(&id).map(|p| (*p).clone()));
            Some(SessionFact {
                session,
                student,
                course,
                payment,
            })
        })
        .collect();

    debug!("Loaded {} session facts and {} payments", facts.len(), payments.len());
    Ok(Ledger { facts, payments })
}
