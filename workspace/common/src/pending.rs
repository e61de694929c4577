//! Payment-pending aggregation.
//!
//! The data service returns one flat row per student and course with the
//! hours that have been taught but not paid for. The payment status page
//! shows one card per student instead, with a course selector, so the rows are
//! grouped here: by `student_id` first and `course_name_thai` second, both in
//! order of first appearance.

use crate::lenient;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

/// Label used when any pending session of a course sits on an overdue bill.
pub const STATUS_OVERDUE: &str = "overdue";
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PAID: &str = "paid";

/// Placeholder shown instead of an hourly price when several courses are summed.
pub const MULTIPLE_PRICES: &str = "multiple";

/// One pending-payment row as produced by the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PendingRecord {
    pub student_id: i32,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub picture_url: Option<String>,
    #[serde(default)]
    pub course_name_thai: String,
    #[serde(default, deserialize_with = "lenient::decimal")]
    #[schema(value_type = f64)]
    pub total_pending_hours: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    #[schema(value_type = f64)]
    pub course_price: Decimal,
    #[serde(default, deserialize_with = "lenient::decimal")]
    #[schema(value_type = f64)]
    pub total_outstanding: Decimal,
    #[serde(default)]
    pub payment_status: String,
}

/// What to do when the same student×course key shows up more than once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Hours and outstanding amounts add up; price and status come from the latest row.
    #[default]
    Accumulate,
    /// The latest row replaces the earlier ones.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CoursePending {
    pub course_name: String,
    #[schema(value_type = f64)]
    pub pending_hours: Decimal,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[schema(value_type = f64)]
    pub outstanding: Decimal,
    pub payment_status: String,
}

/// All pending courses of one student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentPending {
    pub student_id: i32,
    pub student_name: String,
    pub nickname: Option<String>,
    pub picture_url: Option<String>,
    /// Distinct course labels for the selector.
    pub course_options: Vec<String>,
    pub courses: Vec<CoursePending>,
}

/// Hourly price shown next to the totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayedPrice {
    /// No course in view.
    None,
    Single(Decimal),
    Multiple,
}

impl Serialize for DisplayedPrice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DisplayedPrice::None => serializer.serialize_i32(0),
            DisplayedPrice::Single(price) => Serialize::serialize(price, serializer),
            DisplayedPrice::Multiple => serializer.serialize_str(MULTIPLE_PRICES),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingTotals {
    pub total_pending_hours: Decimal,
    pub total_outstanding: Decimal,
    pub price: DisplayedPrice,
    pub payment_status: String,
}

/// A student card ready to render: grouped courses plus the totals for the
/// selected course (or for all courses when nothing is selected).
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct StudentPendingView {
    pub student_id: i32,
    pub student_name: String,
    pub nickname: Option<String>,
    pub picture_url: Option<String>,
    pub course_options: Vec<String>,
    pub courses: Vec<CoursePending>,
    pub selected_course: Option<String>,
    #[schema(value_type = f64)]
    pub total_pending_hours: Decimal,
    #[schema(value_type = f64)]
    pub total_outstanding: Decimal,
    /// A number, `"multiple"`, or `0`.
    #[schema(value_type = Object)]
    pub price: DisplayedPrice,
    pub payment_status: String,
}

/// Groups rows using [`DuplicatePolicy::Accumulate`].
pub fn group_pending(records: &[PendingRecord]) -> Vec<StudentPending> {
    group_pending_with(records, DuplicatePolicy::default())
}

pub fn group_pending_with(records: &[PendingRecord], policy: DuplicatePolicy) -> Vec<StudentPending> {
    let mut students: Vec<StudentPending> = Vec::new();

    for record in records {
        let index = match students.iter().position(|s| s.student_id == record.student_id) {
            Some(index) => index,
            None => {
                students.push(StudentPending {
                    student_id: record.student_id,
                    student_name: record.student_name.clone(),
                    nickname: record.nickname.clone(),
                    picture_url: record.picture_url.clone(),
                    course_options: Vec::new(),
                    courses: Vec::new(),
                });
                students.len() - 1
            }
        };
        let student = &mut students[index];

        if student.picture_url.is_none() {
            student.picture_url = record.picture_url.clone();
        }
        if student.nickname.is_none() {
            student.nickname = record.nickname.clone();
        }

        let incoming = CoursePending {
            course_name: record.course_name_thai.clone(),
            pending_hours: record.total_pending_hours,
            price: record.course_price,
            outstanding: record.total_outstanding,
            payment_status: record.payment_status.clone(),
        };

        match student
            .courses
            .iter_mut()
            .find(|c| c.course_name == record.course_name_thai)
        {
            Some(existing) => match policy {
                DuplicatePolicy::Accumulate => {
                    existing.pending_hours += incoming.pending_hours;
                    existing.outstanding += incoming.outstanding;
                    existing.price = incoming.price;
                    existing.payment_status = incoming.payment_status;
                }
                DuplicatePolicy::Overwrite => *existing = incoming,
            },
            None => {
                student.course_options.push(record.course_name_thai.clone());
                student.courses.push(incoming);
            }
        }
    }

    students
}

impl StudentPending {
    pub fn course(&self, course_name: &str) -> Option<&CoursePending> {
        self.courses.iter().find(|c| c.course_name == course_name)
    }

    /// Courses contributing to the totals under the given selection.
    /// An empty selection counts as no selection.
    pub fn courses_in_view<'a>(
        &'a self,
        course_filter: Option<&'a str>,
    ) -> impl Iterator<Item = &'a CoursePending> + 'a {
        let filter = course_filter.filter(|f| !f.is_empty());
        self.courses
            .iter()
            .filter(move |c| filter.map_or(true, |f| c.course_name == f))
    }

    pub fn totals(&self, course_filter: Option<&str>) -> PendingTotals {
        let in_view: Vec<&CoursePending> = self.courses_in_view(course_filter).collect();

        let total_pending_hours = in_view.iter().map(|c| c.pending_hours).sum();
        let total_outstanding = in_view.iter().map(|c| c.outstanding).sum();
        let price = match in_view.as_slice() {
            [] => DisplayedPrice::None,
            [only] => DisplayedPrice::Single(only.price),
            _ => DisplayedPrice::Multiple,
        };

        PendingTotals {
            total_pending_hours,
            total_outstanding,
            price,
            payment_status: combined_status(in_view.iter().map(|c| c.payment_status.as_str())),
        }
    }

    pub fn view(&self, course_filter: Option<&str>) -> StudentPendingView {
        let totals = self.totals(course_filter);
        StudentPendingView {
            student_id: self.student_id,
            student_name: self.student_name.clone(),
            nickname: self.nickname.clone(),
            picture_url: self.picture_url.clone(),
            course_options: self.course_options.clone(),
            courses: self.courses.clone(),
            selected_course: course_filter.filter(|f| !f.is_empty()).map(str::to_string),
            total_pending_hours: totals.total_pending_hours,
            total_outstanding: totals.total_outstanding,
            price: totals.price,
            payment_status: totals.payment_status,
        }
    }

    fn matches_name(&self, needle: &str) -> bool {
        self.student_name.to_lowercase().contains(needle)
            || self
                .nickname
                .as_deref()
                .is_some_and(|n| n.to_lowercase().contains(needle))
    }
}

/// Most severe status among the given labels: overdue, then pending, then paid.
/// Unknown labels are kept when nothing better is found.
fn combined_status<'a>(statuses: impl Iterator<Item = &'a str>) -> String {
    let mut best: Option<(u8, &str)> = None;
    for status in statuses {
        let rank = match status.to_ascii_lowercase().as_str() {
            STATUS_OVERDUE => 3,
            STATUS_PENDING => 2,
            STATUS_PAID => 1,
            _ => 0,
        };
        if best.map_or(true, |(r, _)| rank > r) {
            best = Some((rank, status));
        }
    }
    best.map(|(_, s)| s.to_string()).unwrap_or_default()
}

/// Case-insensitive search on name and nickname. A blank query keeps everyone.
pub fn filter_by_name<'a>(students: &'a [StudentPending], query: &str) -> Vec<&'a StudentPending> {
    let needle = query.trim().to_lowercase();
    students
        .iter()
        .filter(|s| needle.is_empty() || s.matches_name(&needle))
        .collect()
}

/// Keeps students whose combined status (all courses) equals `status`.
pub fn filter_by_status<'a>(
    students: impl IntoIterator<Item = &'a StudentPending>,
    status: Option<&str>,
) -> Vec<&'a StudentPending> {
    let status = status.map(str::trim).filter(|s| !s.is_empty());
    students
        .into_iter()
        .filter(|s| match status {
            None => true,
            Some(wanted) => s.totals(None).payment_status.eq_ignore_ascii_case(wanted),
        })
        .collect()
}
