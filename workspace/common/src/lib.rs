//! Common transport-layer types shared between backend and frontend.
//! These structs mirror the backend handlers' request/response payloads
//! so the frontend can deserialize API responses without duplicating shapes.

pub mod lenient;
pub mod pending;
mod period;
pub mod schedule;

pub use pending::{
    CoursePending, DisplayedPrice, DuplicatePolicy, PendingRecord, PendingTotals, StudentPending,
    StudentPendingView, group_pending, group_pending_with,
};
pub use period::{ALL, PeriodError, ReportPeriod};

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SuccessResponse {
    pub success: bool,
}

// ===================== Auth =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity returned on a successful login. The frontend keeps it in its session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LoginResponse {
    pub account_id: i32,
    /// `"P"` for parents, `"T"` for tutors.
    pub role: String,
    pub fname: String,
    pub lname: String,
}

/// Registration form (mirrors backend).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub fname: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub lname: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(custom(function = "validate_role"))]
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub line: Option<String>,
    #[serde(default)]
    pub facebook: Option<String>,
}

fn validate_role(role: &str) -> Result<(), ValidationError> {
    match role {
        "P" | "T" => Ok(()),
        _ => {
            let mut err = ValidationError::new("role");
            err.message = Some("Role must be P or T".into());
            Err(err)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RegisterResponse {
    pub account_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TutorIdResponse {
    pub tutor_id: i32,
}

// ===================== Statistics =====================

/// Teaching totals for one reporting period.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardStatistics {
    #[schema(value_type = f64)]
    pub total_hours: Decimal,
    pub total_students: i64,
    pub total_sessions: i64,
    #[schema(value_type = f64)]
    pub total_income: Decimal,
    /// Month filter echoed back as received.
    pub month: String,
    pub year: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CourseSummary {
    pub course_name: String,
    #[schema(value_type = f64)]
    pub total_hours: Decimal,
    pub total_students: i64,
    pub total_sessions: i64,
    #[schema(value_type = f64)]
    pub total_income: Decimal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IncomePeriod {
    Today,
    Week,
    Month,
    Year,
    Total,
    /// Amount still owed on unpaid sessions.
    Outstanding,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct IncomeStatistic {
    pub period: IncomePeriod,
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

/// Income cards of the finance report, flattened from [`IncomeStatistic`] rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeSummary {
    pub today: Decimal,
    pub week: Decimal,
    pub month: Decimal,
    pub year: Decimal,
    pub total: Decimal,
    pub outstanding: Decimal,
}

impl IncomeSummary {
    pub fn from_statistics(rows: &[IncomeStatistic]) -> Self {
        rows.iter().fold(Self::default(), |mut summary, row| {
            let slot = match row.period {
                IncomePeriod::Today => &mut summary.today,
                IncomePeriod::Week => &mut summary.week,
                IncomePeriod::Month => &mut summary.month,
                IncomePeriod::Year => &mut summary.year,
                IncomePeriod::Total => &mut summary.total,
                IncomePeriod::Outstanding => &mut summary.outstanding,
            };
            *slot += row.amount;
            summary
        })
    }
}

// ===================== Payments =====================

/// One billing line on the payment history page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PaymentDetailSession {
    /// 1-based position in the list.
    pub index: u32,
    pub payment_id: i32,
    /// Billing month, `YYYY-MM`.
    pub month_label: String,
    pub student_name: String,
    pub course_name: String,
    #[schema(value_type = f64)]
    pub session_hours: Decimal,
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub bill_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdatePaymentStatusRequest {
    pub payment_id: i32,
    /// `PENDING`, `PAID` or `OVERDUE`.
    pub status: String,
}

// ===================== Schedule =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct TutorScheduleRequest {
    pub tutor_id: i32,
}

/// A class session on the tutor home page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ScheduleEntry {
    pub id: i32,
    pub enrollment_id: i32,
    pub date: NaiveDate,
    pub lesson: Option<String>,
    pub note: Option<String>,
    pub student_name: String,
    pub grade: Option<String>,
    #[schema(value_type = String)]
    pub start_time: NaiveTime,
    #[schema(value_type = String)]
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct UpdateNoteRequest {
    pub session_id: i32,
    #[serde(default)]
    pub note: String,
}

// ===================== Catalog =====================

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct StudentDto {
    pub id: i32,
    pub name: String,
    pub nickname: Option<String>,
    pub grade: Option<String>,
    pub picture_url: Option<String>,
    pub parent_account_id: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ClassSessionDto {
    pub id: i32,
    pub enrollment_id: i32,
    pub session_date: NaiveDate,
    #[schema(value_type = String)]
    pub start_time: NaiveTime,
    #[schema(value_type = String)]
    pub end_time: NaiveTime,
    #[schema(value_type = f64)]
    pub hours: Decimal,
    pub lesson: Option<String>,
    pub note: Option<String>,
    pub payment_id: Option<i32>,
}
