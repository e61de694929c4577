use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::config::AppConfig;
pub use common::{ErrorResponse, SuccessResponse};
use common::{
    ClassSessionDto, CoursePending, CourseSummary, DashboardStatistics, IncomePeriod, IncomeStatistic,
    LoginRequest, LoginResponse, PaymentDetailSession, PendingRecord, RegisterRequest,
    RegisterResponse, ScheduleEntry, StudentDto, StudentPendingView, TutorIdResponse,
    TutorScheduleRequest, UpdateNoteRequest, UpdatePaymentStatusRequest,
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Resolved configuration
    pub config: Arc<AppConfig>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    pub message: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

// Identifiers arrive as raw strings so a missing or malformed value can be
// answered with the same `{error}` body as every other failure.

#[derive(Debug, Deserialize, IntoParams)]
pub struct AccountIdQuery {
    /// Login account id
    pub account_id: Option<String>,
}

/// Month/year filter of the statistics pages.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PeriodQuery {
    /// `1`-`12` (leading zero allowed) or `all`
    pub month: Option<String>,
    /// Gregorian year or `all`
    pub year: Option<String>,
    pub tutor_id: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PendingQuery {
    pub current_tutor_id: Option<String>,
    /// Thai course name; empty or `all` keeps every course
    pub course_name: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct TutorQuery {
    pub current_tutor_id: Option<String>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::login,
        crate::handlers::auth::register,
        crate::handlers::tutors::get_tutor_id,
        crate::handlers::statistics::dashboard,
        crate::handlers::statistics::course_summary,
        crate::handlers::statistics::all_statistics,
        crate::handlers::statistics::all_course_statistics,
        crate::handlers::statistics::income_statistics,
        crate::handlers::payments::hours_pending,
        crate::handlers::payments::pending_overview,
        crate::handlers::payments::payment_details,
        crate::handlers::payments::update_payment_status,
        crate::handlers::schedule::tutor_home,
        crate::handlers::schedule::update_note,
        crate::handlers::catalog::list_students,
        crate::handlers::catalog::class_sessions,
    ),
    components(
        schemas(
            ErrorResponse,
            SuccessResponse,
            HealthResponse,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            RegisterResponse,
            TutorIdResponse,
            DashboardStatistics,
            CourseSummary,
            IncomePeriod,
            IncomeStatistic,
            PendingRecord,
            CoursePending,
            StudentPendingView,
            PaymentDetailSession,
            UpdatePaymentStatusRequest,
            TutorScheduleRequest,
            ScheduleEntry,
            UpdateNoteRequest,
            StudentDto,
            ClassSessionDto,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Login and registration"),
        (name = "statistics", description = "Teaching statistics"),
        (name = "payments", description = "Pending hours and billing history"),
        (name = "schedule", description = "Tutor schedule and session notes"),
        (name = "catalog", description = "Raw students and class sessions"),
    ),
    info(
        title = "TutorDesk API",
        description = "Tutoring business API - statistics, payment tracking and schedules for tutors",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
