use crate::ScheduleEntry;
use chrono::{Days, NaiveDate};

/// Number of days shown on the tutor home page, starting today.
pub const UPCOMING_DAYS: u64 = 3;

/// Today, tomorrow and the day after.
pub fn upcoming_days(today: NaiveDate) -> Vec<NaiveDate> {
    (0..UPCOMING_DAYS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .collect()
}

/// Sessions on `date` whose student name contains `search`, ignoring case.
pub fn sessions_on<'a>(entries: &'a [ScheduleEntry], date: NaiveDate, search: &str) -> Vec<&'a ScheduleEntry> {
    let needle = search.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| e.date == date)
        .filter(|e| needle.is_empty() || e.student_name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn entry(id: i32, date: NaiveDate, student: &str) -> ScheduleEntry {
        ScheduleEntry {
            id,
            enrollment_id: 1,
            date,
            lesson: None,
            note: None,
            student_name: student.to_string(),
            grade: None,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_upcoming_days_cross_month_end() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        assert_eq!(
            upcoming_days(today),
            vec![
                today,
                NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
            ]
        );
    }

    #[test]
    fn test_sessions_on_filters_by_day_and_name() {
        let monday = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        let entries = vec![
            entry(1, monday, "Mikasa"),
            entry(2, monday, "Armin"),
            entry(3, tuesday, "Mikasa"),
        ];

        assert_eq!(sessions_on(&entries, monday, "").len(), 2);
        let found = sessions_on(&entries, monday, " mik ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
        assert!(sessions_on(&entries, tuesday, "armin").is_empty());
    }
}
