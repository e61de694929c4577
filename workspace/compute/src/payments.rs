use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::{debug, info, instrument, warn};

use common::pending::{STATUS_OVERDUE, STATUS_PENDING};
use common::{ALL, PaymentDetailSession, PendingRecord};
use model::entities::{payment, prelude::Payment};

use crate::error::Result;
use crate::sessions::{courses_of, enrollments_in, session_facts, students_by_id};

struct PendingAccumulator {
    record: PendingRecord,
    overdue: bool,
}

/// Hours taught but not yet paid for, one row per student and course.
///
/// `course_name` narrows the result to one course (by Thai name); `None`,
/// an empty string and `"all"` keep every course. Rows are ordered by student
/// name, then course name.
#[instrument(skip(db))]
pub async fn hours_pending(
    db: &DatabaseConnection,
    tutor_id: i32,
    course_name: Option<&str>,
    today: NaiveDate,
) -> Result<Vec<PendingRecord>> {
    let course_filter = course_name
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case(ALL));

    let facts = session_facts(db, Some(tutor_id)).await?;

    let mut grouped: BTreeMap<(String, i32, String, i32), PendingAccumulator> = BTreeMap::new();
    for fact in facts.iter().filter(|f| f.is_pending(today)) {
        if course_filter.is_some_and(|c| c != fact.course.name_thai) {
            continue;
        }

        let key = (
            fact.student.name.clone(),
            fact.student.id,
            fact.course.name_thai.clone(),
            fact.course.id,
        );
        let acc = grouped.entry(key).or_insert_with(|| PendingAccumulator {
            record: PendingRecord {
                student_id: fact.student.id,
                student_name: fact.student.name.clone(),
                nickname: fact.student.nickname.clone(),
                picture_url: fact.student.picture_url.clone(),
                course_name_thai: fact.course.name_thai.clone(),
                total_pending_hours: Decimal::ZERO,
                course_price: fact.course.price_per_hour,
                total_outstanding: Decimal::ZERO,
                payment_status: String::new(),
            },
            overdue: false,
        });
        acc.record.total_pending_hours += fact.hours();
        acc.overdue |= fact.is_overdue();
    }

    let records: Vec<PendingRecord> = grouped
        .into_values()
        .map(|mut acc| {
            acc.record.total_outstanding = acc.record.total_pending_hours * acc.record.course_price;
            acc.record.payment_status = if acc.overdue { STATUS_OVERDUE } else { STATUS_PENDING }.to_string();
            acc.record
        })
        .collect();

    debug!("Found {} pending student/course rows", records.len());
    Ok(records)
}

/// Billing history of a tutor's students, ordered by bill date.
#[instrument(skip(db))]
pub async fn payment_details(db: &DatabaseConnection, tutor_id: i32) -> Result<Vec<PaymentDetailSession>> {
    let courses = courses_of(db, Some(tutor_id)).await?;
    let enrollments = enrollments_in(db, &courses).await?;
    if enrollments.is_empty() {
        return Ok(Vec::new());
    }
    let students = students_by_id(db, &enrollments).await?;

    let payments = Payment::find()
        .filter(payment::Column::EnrollmentId.is_in(enrollments.iter().map(|e| e.id)))
        .order_by_asc(payment::Column::BillDate)
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await?;

    let details = payments
        .into_iter()
        .filter_map(|payment| {
            let enrollment = enrollments.iter().find(|e| e.id == payment.enrollment_id)?;
            let course = courses.iter().find(|c| c.id == enrollment.course_id)?;
            let student = students.get(&enrollment.student_id)?;
            Some((payment, course.name_thai.clone(), student.name.clone()))
        })
        .enumerate()
        .map(|(position, (payment, course_name, student_name))| PaymentDetailSession {
            index: position as u32 + 1,
            payment_id: payment.id,
            month_label: payment.bill_month,
            student_name,
            course_name,
            session_hours: payment.hours,
            price: payment.price_per_hour,
            amount: payment.amount,
            bill_date: payment.bill_date,
            paid_date: payment.paid_date,
            status: payment.status.as_str().to_string(),
        })
        .collect::<Vec<_>>();

    debug!("Found {} payment lines", details.len());
    Ok(details)
}

/// Sets a payment's status. Marking it paid stamps `today` as the paid date;
/// any other status clears it. Returns `false` when the payment does not exist.
#[instrument(skip(db))]
pub async fn update_payment_status(
    db: &DatabaseConnection,
    payment_id: i32,
    status: payment::PaymentStatus,
    today: NaiveDate,
) -> Result<bool> {
    let Some(existing) = Payment::find_by_id(payment_id).one(db).await? else {
        warn!("Payment {} not found", payment_id);
        return Ok(false);
    };

    let mut active: payment::ActiveModel = existing.into();
    active.status = Set(status);
    active.paid_date = Set(match status {
        payment::PaymentStatus::Paid => Some(today),
        _ => None,
    });
    active.update(db).await?;

    info!("Payment {} marked {}", payment_id, status.as_str());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ENGLISH, MATH, date, seed};

    #[tokio::test]
    async fn test_hours_pending_groups_by_student_and_course() {
        let s = seed().await.unwrap();

        let records = hours_pending(&s.db, s.tutor_a.id, None, s.today).await.unwrap();
        let rows: Vec<(&str, &str)> = records
            .iter()
            .map(|r| (r.student_name.as_str(), r.course_name_thai.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("Armin Arlert", MATH),
                ("Mikasa Ackerman", MATH),
                ("Mikasa Ackerman", ENGLISH),
            ]
        );

        // Overdue bill plus one unbilled hour
        let armin = &records[0];
        assert_eq!(armin.total_pending_hours, Decimal::new(25, 1));
        assert_eq!(armin.total_outstanding, Decimal::from(750));
        assert_eq!(armin.payment_status, STATUS_OVERDUE);

        // Paid February session and the future session are not pending
        let mikasa_math = &records[1];
        assert_eq!(mikasa_math.total_pending_hours, Decimal::from(2));
        assert_eq!(mikasa_math.total_outstanding, Decimal::from(600));
        assert_eq!(mikasa_math.payment_status, STATUS_PENDING);
        assert_eq!(mikasa_math.nickname.as_deref(), Some("Mika"));

        for record in &records {
            assert_eq!(record.total_outstanding, record.total_pending_hours * record.course_price);
        }
    }

    #[tokio::test]
    async fn test_hours_pending_course_filter() {
        let s = seed().await.unwrap();

        let english = hours_pending(&s.db, s.tutor_a.id, Some(ENGLISH), s.today).await.unwrap();
        assert_eq!(english.len(), 1);
        assert_eq!(english[0].total_outstanding, Decimal::from(200));

        let all = hours_pending(&s.db, s.tutor_a.id, Some("all"), s.today).await.unwrap();
        assert_eq!(all.len(), 3);

        let unknown = hours_pending(&s.db, s.tutor_a.id, Some("Art"), s.today).await.unwrap();
        assert!(unknown.is_empty());
    }

    #[tokio::test]
    async fn test_payment_details_ordering() {
        let s = seed().await.unwrap();

        let details = payment_details(&s.db, s.tutor_a.id).await.unwrap();
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].index, 1);
        assert_eq!(details[0].payment_id, s.paid_payment.id);
        assert_eq!(details[0].status, "PAID");
        assert_eq!(details[0].month_label, "2025-02");
        assert_eq!(details[0].paid_date, Some(date(2025, 3, 5)));
        assert_eq!(details[1].index, 2);
        assert_eq!(details[1].student_name, "Armin Arlert");
        assert_eq!(details[1].amount, Decimal::from(450));
        assert_eq!(details[1].paid_date, None);

        assert!(payment_details(&s.db, s.tutor_b.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_settling_overdue_payment_clears_pending() {
        let s = seed().await.unwrap();

        let updated = update_payment_status(&s.db, s.overdue_payment.id, payment::PaymentStatus::Paid, s.today)
            .await
            .unwrap();
        assert!(updated);

        let stored = Payment::find_by_id(s.overdue_payment.id).one(&s.db).await.unwrap().unwrap();
        assert_eq!(stored.paid_date, Some(s.today));

        let records = hours_pending(&s.db, s.tutor_a.id, Some(MATH), s.today).await.unwrap();
        let armin = records.iter().find(|r| r.student_name == "Armin Arlert").unwrap();
        assert_eq!(armin.total_pending_hours, Decimal::from(1));
        assert_eq!(armin.payment_status, STATUS_PENDING);

        // Reopening clears the paid date
        update_payment_status(&s.db, s.overdue_payment.id, payment::PaymentStatus::Overdue, s.today)
            .await
            .unwrap();
        let stored = Payment::find_by_id(s.overdue_payment.id).one(&s.db).await.unwrap().unwrap();
        assert_eq!(stored.paid_date, None);

        assert!(!update_payment_status(&s.db, 9999, payment::PaymentStatus::Paid, s.today).await.unwrap());
    }
}
