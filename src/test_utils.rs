#[cfg(test)]
pub mod test_utils {
    use std::sync::Arc;

    use crate::auth::password::hash_password;
    use crate::config::AppConfig;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::{NaiveDate, NaiveTime};
    use migration::{Migrator, MigratorTrait};
    use model::entities::{account, class_session, course, enrollment, payment, student, tutor};
    use rust_decimal::Decimal;
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub const TUTOR_EMAIL: &str = "kru.anong@example.com";
    pub const TUTOR_PASSWORD: &str = "correct horse";
    pub const MATH: &str = "คณิตศาสตร์";
    pub const ENGLISH: &str = "ภาษาอังกฤษ";

    /// Rows created by [`seed`] that tests refer to.
    pub struct Fixture {
        pub account_id: i32,
        pub tutor_id: i32,
        pub parent_account_id: i32,
        pub overdue_payment_id: i32,
        pub march_session_id: i32,
    }

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn time(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    async fn new_account(
        db: &DatabaseConnection,
        email: &str,
        fname: &str,
        role: account::AccountRole,
    ) -> account::Model {
        account::ActiveModel {
            email: Set(email.to_string()),
            password_hash: Set(hash_password(TUTOR_PASSWORD).unwrap()),
            fname: Set(fname.to_string()),
            lname: Set("Test".to_string()),
            role: Set(role),
            phone: Set(None),
            line: Set(None),
            facebook: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create account")
    }

    async fn new_session(
        db: &DatabaseConnection,
        enrollment: &enrollment::Model,
        on: NaiveDate,
        start: (u32, u32),
        end: (u32, u32),
        payment_id: Option<i32>,
    ) -> class_session::Model {
        class_session::ActiveModel {
            enrollment_id: Set(enrollment.id),
            session_date: Set(on),
            start_time: Set(time(start.0, start.1)),
            end_time: Set(time(end.0, end.1)),
            lesson: Set(Some("Fractions".to_string())),
            note: Set(None),
            payment_id: Set(payment_id),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create session")
    }

    /// One tutor teaching Math (300/h) to Mikasa and Armin and English
    /// (200/h) to Mikasa. March 2025 holds 4 hours over 3 sessions; Armin
    /// also owes 1.5 hours from February on an overdue bill.
    pub async fn seed(db: &DatabaseConnection) -> Fixture {
        let account = new_account(db, TUTOR_EMAIL, "Anong", account::AccountRole::Tutor).await;
        let tutor = tutor::ActiveModel {
            account_id: Set(account.id),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create tutor");
        let parent = new_account(db, "parent@example.com", "Grisha", account::AccountRole::Parent).await;

        let mut courses = Vec::new();
        for (name, price) in [(MATH, 300), (ENGLISH, 200)] {
            let course = course::ActiveModel {
                tutor_id: Set(tutor.id),
                name_thai: Set(name.to_string()),
                name_english: Set(None),
                price_per_hour: Set(Decimal::from(price)),
                ..Default::default()
            }
            .insert(db)
            .await
            .expect("Failed to create course");
            courses.push(course);
        }

        let mut students = Vec::new();
        for name in ["Mikasa Ackerman", "Armin Arlert"] {
            let student = student::ActiveModel {
                name: Set(name.to_string()),
                nickname: Set(None),
                grade: Set(Some("M.3".to_string())),
                picture_url: Set(None),
                parent_account_id: Set(Some(parent.id)),
                ..Default::default()
            }
            .insert(db)
            .await
            .expect("Failed to create student");
            students.push(student);
        }

        let mut enrollments = Vec::new();
        for (student, course) in [(0, 0), (0, 1), (1, 0)] {
            let enrollment = enrollment::ActiveModel {
                student_id: Set(students[student].id),
                course_id: Set(courses[course].id),
                ..Default::default()
            }
            .insert(db)
            .await
            .expect("Failed to create enrollment");
            enrollments.push(enrollment);
        }
        let (mikasa_math, mikasa_english, armin_math) = (&enrollments[0], &enrollments[1], &enrollments[2]);

        let hours = Decimal::new(15, 1);
        let overdue = payment::ActiveModel {
            enrollment_id: Set(armin_math.id),
            bill_month: Set("2025-02".to_string()),
            hours: Set(hours),
            price_per_hour: Set(Decimal::from(300)),
            amount: Set(hours * Decimal::from(300)),
            bill_date: Set(date(2025, 2, 28)),
            paid_date: Set(None),
            status: Set(payment::PaymentStatus::Overdue),
            ..Default::default()
        }
        .insert(db)
        .await
        .expect("Failed to create payment");

        new_session(db, armin_math, date(2025, 2, 12), (9, 0), (10, 30), Some(overdue.id)).await;
        let march_session = new_session(db, mikasa_math, date(2025, 3, 3), (16, 0), (18, 0), None).await;
        new_session(db, mikasa_english, date(2025, 3, 5), (10, 0), (11, 0), None).await;
        new_session(db, armin_math, date(2025, 3, 10), (9, 0), (10, 0), None).await;

        Fixture {
            account_id: account.id,
            tutor_id: tutor.id,
            parent_account_id: parent.id,
            overdue_payment_id: overdue.id,
            march_session_id: march_session.id,
        }
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        AppState {
            db: setup_test_db().await,
            config: Arc::new(AppConfig::default()),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The level comes from `RUST_LOG` and defaults to WARN.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing, on an empty database
    pub async fn setup_test_app() -> Router {
        let _guard = init_test_tracing();
        create_router(setup_test_app_state().await)
    }

    /// Create axum app for testing with the given configuration
    pub async fn setup_test_app_with_config(config: AppConfig) -> Router {
        let _guard = init_test_tracing();
        create_router(AppState {
            db: setup_test_db().await,
            config: Arc::new(config),
        })
    }

    /// Create axum app for testing on a seeded database
    pub async fn setup_seeded_app() -> (Router, Fixture) {
        let _guard = init_test_tracing();
        let state = setup_test_app_state().await;
        let fixture = seed(&state.db).await;
        (create_router(state), fixture)
    }
}
