use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{debug, instrument, warn};

use common::ScheduleEntry;
use model::entities::{class_session, prelude::ClassSession};

use crate::error::Result;
use crate::sessions::session_facts;

/// Every session of the tutor, ordered by date and start time.
#[instrument(skip(db))]
pub async fn tutor_schedule(db: &DatabaseConnection, tutor_id: i32) -> Result<Vec<ScheduleEntry>> {
    let facts = session_facts(db, Some(tutor_id)).await?;
    let entries: Vec<ScheduleEntry> = facts
        .into_iter()
        .map(|fact| ScheduleEntry {
            id: fact.session.id,
            enrollment_id: fact.session.enrollment_id,
            date: fact.session.session_date,
            lesson: fact.session.lesson,
            note: fact.session.note,
            student_name: fact.student.name,
            grade: fact.student.grade,
            start_time: fact.session.start_time,
            end_time: fact.session.end_time,
        })
        .collect();
    debug!("Schedule has {} sessions", entries.len());
    Ok(entries)
}

/// Replaces a session's note; a blank note clears it.
/// Returns `false` when the session does not exist.
#[instrument(skip(db, note))]
pub async fn update_note(db: &DatabaseConnection, session_id: i32, note: &str) -> Result<bool> {
    let Some(session) = ClassSession::find_by_id(session_id).one(db).await? else {
        warn!("Class session {} not found", session_id);
        return Ok(false);
    };

    let note = note.trim();
    let mut active: class_session::ActiveModel = session.into();
    active.note = Set((!note.is_empty()).then(|| note.to_string()));
    active.update(db).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{date, seed};

    #[tokio::test]
    async fn test_schedule_is_chronological() {
        let s = seed().await.unwrap();

        let entries = tutor_schedule(&s.db, s.tutor_a.id).await.unwrap();
        assert_eq!(entries.len(), 6);
        assert!(entries.windows(2).all(|w| (w[0].date, w[0].start_time) <= (w[1].date, w[1].start_time)));
        assert_eq!(entries[0].date, date(2025, 2, 10));
        assert_eq!(entries.last().unwrap().date, date(2025, 3, 20));
        assert_eq!(entries[0].grade.as_deref(), Some("M.3"));

        let other = tutor_schedule(&s.db, s.tutor_b.id).await.unwrap();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].student_name, "Eren Yeager");
    }

    #[tokio::test]
    async fn test_update_note() {
        let s = seed().await.unwrap();
        let id = s.unbilled_session.id;

        assert!(update_note(&s.db, id, "Bring the workbook").await.unwrap());
        let stored = ClassSession::find_by_id(id).one(&s.db).await.unwrap().unwrap();
        assert_eq!(stored.note.as_deref(), Some("Bring the workbook"));

        assert!(update_note(&s.db, id, "   ").await.unwrap());
        let stored = ClassSession::find_by_id(id).one(&s.db).await.unwrap().unwrap();
        assert_eq!(stored.note, None);

        assert!(!update_note(&s.db, 9999, "ghost").await.unwrap());
    }
}
