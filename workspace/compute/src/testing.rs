use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, Set};

use migration::{Migrator, MigratorTrait};
use model::entities::{account, class_session, course, enrollment, payment, student, tutor};

pub type Result<T> = std::result::Result<T, DbErr>;

pub async fn setup_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    // Enable foreign keys
    db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

    Migrator::up(&db, None).await.expect("Migrations failed.");
    Ok(db)
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

pub async fn new_tutor(db: &DatabaseConnection, fname: &str) -> Result<tutor::Model> {
    static ACCOUNT_ID: AtomicU64 = AtomicU64::new(0);
    let current_id = ACCOUNT_ID.fetch_add(1, Ordering::SeqCst);

    let account = account::ActiveModel {
        email: Set(format!("tutor_{}@example.com", current_id)),
        password_hash: Set("not-a-real-hash".to_string()),
        fname: Set(fname.to_string()),
        lname: Set("Test".to_string()),
        role: Set(account::AccountRole::Tutor),
        phone: Set(None),
        line: Set(None),
        facebook: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tutor::ActiveModel {
        account_id: Set(account.id),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_student(db: &DatabaseConnection, name: &str, nickname: Option<&str>) -> Result<student::Model> {
    student::ActiveModel {
        name: Set(name.to_string()),
        nickname: Set(nickname.map(str::to_string)),
        grade: Set(Some("M.3".to_string())),
        picture_url: Set(None),
        parent_account_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_course(db: &DatabaseConnection, tutor: &tutor::Model, name: &str, price: i64) -> Result<course::Model> {
    course::ActiveModel {
        tutor_id: Set(tutor.id),
        name_thai: Set(name.to_string()),
        name_english: Set(None),
        price_per_hour: Set(Decimal::from(price)),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn enroll(db: &DatabaseConnection, student: &student::Model, course: &course::Model) -> Result<enrollment::Model> {
    enrollment::ActiveModel {
        student_id: Set(student.id),
        course_id: Set(course.id),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_payment(
    db: &DatabaseConnection,
    enrollment: &enrollment::Model,
    bill_date: NaiveDate,
    hours: Decimal,
    price: i64,
    status: payment::PaymentStatus,
    paid_date: Option<NaiveDate>,
) -> Result<payment::Model> {
    let price = Decimal::from(price);
    payment::ActiveModel {
        enrollment_id: Set(enrollment.id),
        bill_month: Set(bill_date.format("%Y-%m").to_string()),
        hours: Set(hours),
        price_per_hour: Set(price),
        amount: Set(hours * price),
        bill_date: Set(bill_date),
        paid_date: Set(paid_date),
        status: Set(status),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn new_session(
    db: &DatabaseConnection,
    enrollment: &enrollment::Model,
    on: NaiveDate,
    start: (u32, u32),
    end: (u32, u32),
    payment: Option<&payment::Model>,
) -> Result<class_session::Model> {
    class_session::ActiveModel {
        enrollment_id: Set(enrollment.id),
        session_date: Set(on),
        start_time: Set(time(start.0, start.1)),
        end_time: Set(time(end.0, end.1)),
        lesson: Set(Some("Lesson".to_string())),
        note: Set(None),
        payment_id: Set(payment.map(|p| p.id)),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Identifiers of the rows created by [`seed`].
pub struct Seeded {
    pub db: DatabaseConnection,
    pub today: NaiveDate,
    pub tutor_a: tutor::Model,
    pub tutor_b: tutor::Model,
    pub paid_payment: payment::Model,
    pub overdue_payment: payment::Model,
    pub unbilled_session: class_session::Model,
}

pub const MATH: &str = "คณิตศาสตร์";
pub const ENGLISH: &str = "ภาษาอังกฤษ";
pub const PHYSICS: &str = "ฟิสิกส์";

/// Two tutors, today is 2025-03-15.
///
/// Tutor A teaches Math (300/h) to Mikasa and Armin and English (200/h) to Mikasa.
/// Mikasa's February Math session (2h) is paid; Armin's (1.5h) sits on an overdue
/// bill. March has unbilled sessions for Mikasa Math (2h), Mikasa English (1h) and
/// Armin Math (1h), plus one future Mikasa Math session on 2025-03-20.
/// Tutor B teaches Physics (400/h) to Eren, one unbilled hour on 2025-03-04.
pub async fn seed() -> Result<Seeded> {
    let db = setup_db().await?;
    let today = date(2025, 3, 15);

    let tutor_a = new_tutor(&db, "Anong").await?;
    let tutor_b = new_tutor(&db, "Boon").await?;

    let math = new_course(&db, &tutor_a, MATH, 300).await?;
    let english = new_course(&db, &tutor_a, ENGLISH, 200).await?;
    let physics = new_course(&db, &tutor_b, PHYSICS, 400).await?;

    let mikasa = new_student(&db, "Mikasa Ackerman", Some("Mika")).await?;
    let armin = new_student(&db, "Armin Arlert", None).await?;
    let eren = new_student(&db, "Eren Yeager", None).await?;

    let mikasa_math = enroll(&db, &mikasa, &math).await?;
    let mikasa_english = enroll(&db, &mikasa, &english).await?;
    let armin_math = enroll(&db, &armin, &math).await?;
    let eren_physics = enroll(&db, &eren, &physics).await?;

    let paid_payment = new_payment(
        &db,
        &mikasa_math,
        date(2025, 2, 28),
        Decimal::from(2),
        300,
        payment::PaymentStatus::Paid,
        Some(date(2025, 3, 5)),
    )
    .await?;
    let overdue_payment = new_payment(
        &db,
        &armin_math,
        date(2025, 2, 28),
        Decimal::new(15, 1),
        300,
        payment::PaymentStatus::Overdue,
        None,
    )
    .await?;

    new_session(&db, &mikasa_math, date(2025, 2, 10), (16, 0), (18, 0), Some(&paid_payment)).await?;
    let unbilled_session = new_session(&db, &mikasa_math, date(2025, 3, 3), (16, 0), (18, 0), None).await?;
    new_session(&db, &mikasa_english, date(2025, 3, 5), (10, 0), (11, 0), None).await?;
    new_session(&db, &armin_math, date(2025, 2, 12), (9, 0), (10, 30), Some(&overdue_payment)).await?;
    new_session(&db, &armin_math, date(2025, 3, 10), (9, 0), (10, 0), None).await?;
    new_session(&db, &mikasa_math, date(2025, 3, 20), (16, 0), (18, 0), None).await?;
    new_session(&db, &eren_physics, date(2025, 3, 4), (13, 0), (14, 0), None).await?;

    Ok(Seeded {
        db,
        today,
        tutor_a,
        tutor_b,
        paid_payment,
        overdue_payment,
        unbilled_session,
    })
}
