use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
};
use common::{ClassSessionDto, ReportPeriod, StudentDto};
use compute::catalog;
use tracing::instrument;

use crate::errors::ApiResult;
use crate::helpers::params::non_blank;
use crate::schemas::{AppState, PeriodQuery};

/// All students
#[utoipa::path(
    get,
    path = "/api/students",
    tag = "catalog",
    responses(
        (status = 200, description = "Students ordered by id", body = [StudentDto]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_students(State(state): State<AppState>) -> ApiResult<Json<Vec<StudentDto>>> {
    Ok(Json(catalog::list_students(&state.db).await?))
}

/// Class sessions of a calendar month, or all of them
#[utoipa::path(
    get,
    path = "/api/classsession",
    tag = "catalog",
    params(PeriodQuery),
    responses(
        (status = 200, description = "Sessions ordered by date", body = [ClassSessionDto]),
        (status = 400, description = "Invalid month or year", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn class_sessions(
    State(state): State<AppState>,
    query: Result<Query<PeriodQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ClassSessionDto>>> {
    let Query(query) = query?;
    let period = ReportPeriod::parse(non_blank(query.month.as_deref()), non_blank(query.year.as_deref()))?;
    Ok(Json(catalog::class_sessions(&state.db, period).await?))
}
