use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::instrument;

use common::{ClassSessionDto, ReportPeriod, StudentDto};
use model::entities::{class_session, prelude::*, student};

use crate::error::Result;

#[instrument(skip(db))]
pub async fn list_students(db: &DatabaseConnection) -> Result<Vec<StudentDto>> {
    let students = Student::find()
        .order_by_asc(student::Column::Id)
        .all(db)
        .await?;
    Ok(students
        .into_iter()
        .map(|s| StudentDto {
            id: s.id,
            name: s.name,
            nickname: s.nickname,
            grade: s.grade,
            picture_url: s.picture_url,
            parent_account_id: s.parent_account_id,
        })
        .collect())
}

/// Raw class sessions within `period`, ordered by date.
#[instrument(skip(db))]
pub async fn class_sessions(db: &DatabaseConnection, period: ReportPeriod) -> Result<Vec<ClassSessionDto>> {
    let mut query = ClassSession::find();
    if let Some((start, end)) = period.date_range() {
        query = query
            .filter(class_session::Column::SessionDate.gte(start))
            .filter(class_session::Column::SessionDate.lt(end));
    }

    let sessions = query
        .order_by_asc(class_session::Column::SessionDate)
        .order_by_asc(class_session::Column::StartTime)
        .all(db)
        .await?;

    Ok(sessions
        .into_iter()
        // Month-of-every-year has no single range; narrow it here
        .filter(|s| period.contains(s.session_date))
        .map(|s| ClassSessionDto {
            id: s.id,
            enrollment_id: s.enrollment_id,
            session_date: s.session_date,
            start_time: s.start_time,
            end_time: s.end_time,
            hours: s.hours(),
            lesson: s.lesson,
            note: s.note,
            payment_id: s.payment_id,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::seed;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_list_students() {
        let s = seed().await.unwrap();
        let students = list_students(&s.db).await.unwrap();
        let names: Vec<&str> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Mikasa Ackerman", "Armin Arlert", "Eren Yeager"]);
    }

    #[tokio::test]
    async fn test_class_sessions_by_period() {
        let s = seed().await.unwrap();

        assert_eq!(class_sessions(&s.db, ReportPeriod::AllTime).await.unwrap().len(), 7);

        let february = class_sessions(&s.db, ReportPeriod::Month { year: 2025, month: 2 })
            .await
            .unwrap();
        assert_eq!(february.len(), 2);
        assert_eq!(february[1].hours, Decimal::new(15, 1));

        let every_march = class_sessions(&s.db, ReportPeriod::MonthOfEveryYear(3)).await.unwrap();
        assert_eq!(every_march.len(), 5);
    }
}
