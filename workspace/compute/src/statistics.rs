//! Teaching statistics: hours, sessions, students and income per reporting period.
//!
//! Every figure is computed over the sessions that were actually taught: dated
//! inside the requested period and not after `today`. Income is hours times the
//! course's hourly price, independent of whether the session has been paid for.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};

use common::{CourseSummary, IncomePeriod, IncomeStatistic, IncomeSummary, ReportPeriod};
use model::entities::payment;

use crate::error::Result;
use crate::sessions::{SessionFact, load_ledger, session_facts};

async fn taught_sessions(
    db: &DatabaseConnection,
    tutor: Option<i32>,
    period: &ReportPeriod,
    today: NaiveDate,
) -> Result<Vec<SessionFact>> {
    let facts = session_facts(db, tutor).await?;
    Ok(facts
        .into_iter()
        .filter(|f| f.taught_within(period, today))
        .collect())
}

/// Dashboard figures folded from one load of the taught sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeachingTotals {
    pub hours: Decimal,
    pub sessions: i64,
    pub students: i64,
    pub income: Decimal,
}

impl TeachingTotals {
    fn fold(sessions: &[SessionFact]) -> Self {
        let students: HashSet<i32> = sessions.iter().map(|f| f.student.id).collect();
        Self {
            hours: sessions.iter().map(SessionFact::hours).sum(),
            sessions: sessions.len() as i64,
            students: students.len() as i64,
            income: sessions.iter().map(SessionFact::income).sum(),
        }
    }
}

/// Hours, sessions, distinct students and income in one pass.
#[instrument(skip(db))]
pub async fn teaching_totals(
    db: &DatabaseConnection,
    tutor: Option<i32>,
    period: ReportPeriod,
    today: NaiveDate,
) -> Result<TeachingTotals> {
    let sessions = taught_sessions(db, tutor, &period, today).await?;
    let totals = TeachingTotals::fold(&sessions);
    debug!(sessions = totals.sessions, "Folded teaching totals");
    Ok(totals)
}

/// Sum of hours × hourly price.
pub async fn total_income(
    db: &DatabaseConnection,
    tutor: Option<i32>,
    period: ReportPeriod,
    today: NaiveDate,
) -> Result<Decimal> {
    Ok(teaching_totals(db, tutor, period, today).await?.income)
}

pub async fn total_sessions(
    db: &DatabaseConnection,
    tutor: Option<i32>,
    period: ReportPeriod,
    today: NaiveDate,
) -> Result<i64> {
    Ok(teaching_totals(db, tutor, period, today).await?.sessions)
}

pub async fn total_hours(
    db: &DatabaseConnection,
    tutor: Option<i32>,
    period: ReportPeriod,
    today: NaiveDate,
) -> Result<Decimal> {
    Ok(teaching_totals(db, tutor, period, today).await?.hours)
}

/// Distinct students with at least one session in the period.
pub async fn student_count(
    db: &DatabaseConnection,
    tutor: Option<i32>,
    period: ReportPeriod,
    today: NaiveDate,
) -> Result<i64> {
    Ok(teaching_totals(db, tutor, period, today).await?.students)
}

#[derive(Default)]
struct CourseAccumulator {
    hours: Decimal,
    income: Decimal,
    sessions: i64,
    students: HashSet<i32>,
}

/// Per-course breakdown, ordered by course name. Courses without sessions in
/// the period are left out.
#[instrument(skip(db))]
pub async fn course_statistics(
    db: &DatabaseConnection,
    tutor: Option<i32>,
    period: ReportPeriod,
    today: NaiveDate,
) -> Result<Vec<CourseSummary>> {
    let sessions = taught_sessions(db, tutor, &period, today).await?;

    // Keyed by name first so the output is sorted, then by id so two tutors'
    // courses with the same name stay apart.
    let mut by_course: BTreeMap<(String, i32), CourseAccumulator> = BTreeMap::new();
    for fact in &sessions {
        let acc = by_course
            .entry((fact.course.name_thai.clone(), fact.course.id))
            .or_default();
        acc.hours += fact.hours();
        acc.income += fact.income();
        acc.sessions += 1;
        acc.students.insert(fact.student.id);
    }

    debug!("Summarised {} courses", by_course.len());

    Ok(by_course
        .into_iter()
        .map(|((course_name, _), acc)| CourseSummary {
            course_name,
            total_hours: acc.hours,
            total_students: acc.students.len() as i64,
            total_sessions: acc.sessions,
            total_income: acc.income,
        })
        .collect())
}

/// Paid amounts bucketed by the day they were paid, plus what is still owed.
///
/// The week bucket is the ISO week containing `today`.
#[instrument(skip(db))]
pub async fn income_statistics(
    db: &DatabaseConnection,
    tutor_id: i32,
    today: NaiveDate,
) -> Result<Vec<IncomeStatistic>> {
    let ledger = load_ledger(db, Some(tutor_id)).await?;
    let paid: Vec<&payment::Model> = ledger
        .payments
        .iter()
        .filter(|p| p.status == payment::PaymentStatus::Paid)
        .collect();

    let mut buckets = IncomeSummary::default();
    for payment in &paid {
        buckets.total += payment.amount;
        let Some(paid_on) = payment.paid_date else {
            continue;
        };
        if paid_on == today {
            buckets.today += payment.amount;
        }
        if paid_on.iso_week() == today.iso_week() {
            buckets.week += payment.amount;
        }
        if paid_on.year() == today.year() {
            buckets.year += payment.amount;
            if paid_on.month() == today.month() {
                buckets.month += payment.amount;
            }
        }
    }

    buckets.outstanding = ledger
        .facts
        .iter()
        .filter(|f| f.is_pending(today))
        .map(SessionFact::income)
        .sum();

    info!(payments = paid.len(), outstanding = %buckets.outstanding, "Computed income statistics");

    Ok(vec![
        IncomeStatistic { period: IncomePeriod::Today, amount: buckets.today },
        IncomeStatistic { period: IncomePeriod::Week, amount: buckets.week },
        IncomeStatistic { period: IncomePeriod::Month, amount: buckets.month },
        IncomeStatistic { period: IncomePeriod::Year, amount: buckets.year },
        IncomeStatistic { period: IncomePeriod::Total, amount: buckets.total },
        IncomeStatistic { period: IncomePeriod::Outstanding, amount: buckets.outstanding },
    ])
}
