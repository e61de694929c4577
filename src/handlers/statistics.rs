use axum::{
    extract::{Path, Query, State, rejection::{PathRejection, QueryRejection}},
    response::Json,
};
use common::{ALL, CourseSummary, DashboardStatistics, IncomeStatistic, ReportPeriod};
use compute::statistics;
use sea_orm::DatabaseConnection;
use tracing::{debug, info, instrument};

use crate::errors::{ApiError, ApiResult};
use crate::helpers::params::{non_blank, require_id, today};
use crate::schemas::{AppState, PeriodQuery};

/// Dashboard figures with the requested month and year echoed back.
async fn collect_statistics(
    db: &DatabaseConnection,
    tutor: Option<i32>,
    period: ReportPeriod,
    month: String,
    year: String,
) -> ApiResult<DashboardStatistics> {
    let totals = statistics::teaching_totals(db, tutor, period, today()).await?;

    Ok(DashboardStatistics {
        total_hours: totals.hours,
        total_students: totals.students,
        total_sessions: totals.sessions,
        total_income: totals.income,
        month,
        year,
    })
}

/// Month, year and tutor are all mandatory on the per-tutor pages.
fn tutor_period(query: &PeriodQuery) -> ApiResult<(i32, ReportPeriod, String, String)> {
    let (Some(month), Some(year)) = (non_blank(query.month.as_deref()), non_blank(query.year.as_deref())) else {
        return Err(ApiError::BadRequest("Month and year are required".to_string()));
    };
    let tutor_id = require_id(query.tutor_id.as_deref(), "tutor_id")?;
    let period = ReportPeriod::parse(Some(month), Some(year))?;
    Ok((tutor_id, period, month.to_string(), year.to_string()))
}

fn open_period(query: &PeriodQuery) -> ApiResult<(ReportPeriod, String, String)> {
    let month = non_blank(query.month.as_deref()).unwrap_or(ALL);
    let year = non_blank(query.year.as_deref()).unwrap_or(ALL);
    let period = ReportPeriod::parse(Some(month), Some(year))?;
    Ok((period, month.to_string(), year.to_string()))
}

/// Teaching totals of one tutor for a month/year
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "statistics",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Dashboard totals", body = DashboardStatistics),
        (status = 400, description = "Missing month, year or tutor_id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn dashboard(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Json<DashboardStatistics>> {
    let Query(query) = query?;
    let (tutor_id, period, month, year) = tutor_period(&query)?;
    debug!(?period, tutor_id, "Fetching dashboard statistics");

    let stats = collect_statistics(&state.db, Some(tutor_id), period, month, year)
        .await
        .map_err(|e| e.with_details("Failed to fetch dashboard statistics"))?;

    info!(tutor_id, sessions = stats.total_sessions, "Dashboard statistics computed");
    Ok(Json(stats))
}

/// Per-course breakdown of one tutor for a month/year
#[utoipa::path(
    get,
    path = "/api/getCourseSummary",
    tag = "statistics",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Course rows ordered by name", body = [CourseSummary]),
        (status = 400, description = "Missing month, year or tutor_id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn course_summary(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<CourseSummary>>> {
    let Query(query) = query?;
    let (tutor_id, period, _, _) = tutor_period(&query)?;

    let rows = statistics::course_statistics(&state.db, Some(tutor_id), period, today()).await?;
    debug!("Returning {} course rows", rows.len());
    Ok(Json(rows))
}

/// Totals across every tutor; missing month/year mean `all`
#[utoipa::path(
    get,
    path = "/api/statistics",
    tag = "statistics",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Totals for all tutors", body = DashboardStatistics),
        (status = 400, description = "Invalid month or year", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn all_statistics(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Json<DashboardStatistics>> {
    let Query(query) = query?;
    let (period, month, year) = open_period(&query)?;
    Ok(Json(collect_statistics(&state.db, None, period, month, year).await?))
}

/// Per-course breakdown across every tutor
#[utoipa::path(
    get,
    path = "/api/statisticsCourse",
    tag = "statistics",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Course rows ordered by name", body = [CourseSummary]),
        (status = 400, description = "Invalid month or year", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn all_course_statistics(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<CourseSummary>>> {
    let Query(query) = query?;
    let (period, _, _) = open_period(&query)?;
    Ok(Json(statistics::course_statistics(&state.db, None, period, today()).await?))
}

/// Paid income by period plus the outstanding amount
#[utoipa::path(
    get,
    path = "/api/income/statistics/{tutor_id}",
    tag = "statistics",
    params(
        ("tutor_id" = i32, Path, description = "Tutor ID"),
    ),
    responses(
        (status = 200, description = "Income per period", body = [IncomeStatistic]),
        (status = 400, description = "Invalid tutor_id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn income_statistics(
    State(state): State<AppState>,
    tutor_id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<Vec<IncomeStatistic>>> {
    let Path(tutor_id) = tutor_id?;
    Ok(Json(statistics::income_statistics(&state.db, tutor_id, today()).await?))
}
