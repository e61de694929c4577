use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use common::{ScheduleEntry, SuccessResponse, TutorScheduleRequest, UpdateNoteRequest};
use compute::schedule;
use tracing::{debug, instrument};

use crate::errors::{ApiError, ApiResult};
use crate::schemas::AppState;

/// Sessions shown on the tutor home page
#[utoipa::path(
    post,
    path = "/api/TutorHome",
    tag = "schedule",
    request_body = TutorScheduleRequest,
    responses(
        (status = 200, description = "Sessions ordered by date and start time", body = [ScheduleEntry]),
        (status = 400, description = "Missing tutor_id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn tutor_home(
    State(state): State<AppState>,
    payload: Result<Json<TutorScheduleRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<ScheduleEntry>>> {
    let Json(request) = payload?;
    let entries = schedule::tutor_schedule(&state.db, request.tutor_id).await?;
    debug!("Tutor {} has {} sessions", request.tutor_id, entries.len());
    Ok(Json(entries))
}

/// Save the free-text note of a session
#[utoipa::path(
    put,
    path = "/api/updateNote",
    tag = "schedule",
    request_body = UpdateNoteRequest,
    responses(
        (status = 200, description = "Note saved", body = SuccessResponse),
        (status = 400, description = "Malformed body", body = ErrorResponse),
        (status = 404, description = "Session not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_note(
    State(state): State<AppState>,
    payload: Result<Json<UpdateNoteRequest>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Json(request) = payload?;
    if !schedule::update_note(&state.db, request.session_id, &request.note).await? {
        return Err(ApiError::NotFound(format!("Session {} not found", request.session_id)));
    }
    Ok(Json(SuccessResponse { success: true }))
}
