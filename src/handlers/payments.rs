use axum::{
    extract::{Query, State, rejection::{JsonRejection, QueryRejection}},
    response::Json,
};
use common::{
    ALL, PaymentDetailSession, PendingRecord, StudentPendingView, SuccessResponse,
    UpdatePaymentStatusRequest, group_pending,
};
use compute::payments;
use model::entities::payment::PaymentStatus;
use tracing::{debug, info, instrument};

use crate::errors::{ApiError, ApiResult};
use crate::helpers::params::{non_blank, require_id, today};
use crate::schemas::{AppState, PendingQuery, TutorQuery};

/// Unpaid hours per student and course
#[utoipa::path(
    get,
    path = "/api/getHoursPending",
    tag = "payments",
    params(PendingQuery),
    responses(
        (status = 200, description = "One row per student and course", body = [PendingRecord]),
        (status = 400, description = "Missing current_tutor_id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn hours_pending(
    State(state): State<AppState>,
    query: Result<Query<PendingQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<PendingRecord>>> {
    let Query(query) = query?;
    let tutor_id = require_id(query.current_tutor_id.as_deref(), "current_tutor_id")?;
    let course = non_blank(query.course_name.as_deref());

    let records = payments::hours_pending(&state.db, tutor_id, course, today()).await?;
    debug!("Returning {} pending rows", records.len());
    Ok(Json(records))
}

/// Pending rows grouped per student, with totals for the selected course
#[utoipa::path(
    get,
    path = "/api/getPendingOverview",
    tag = "payments",
    params(PendingQuery),
    responses(
        (status = 200, description = "One card per student", body = [StudentPendingView]),
        (status = 400, description = "Missing current_tutor_id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn pending_overview(
    State(state): State<AppState>,
    query: Result<Query<PendingQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<StudentPendingView>>> {
    let Query(query) = query?;
    let tutor_id = require_id(query.current_tutor_id.as_deref(), "current_tutor_id")?;
    let course = non_blank(query.course_name.as_deref()).filter(|c| !c.eq_ignore_ascii_case(ALL));

    // Every course is fetched so each card's selector stays complete
    let records = payments::hours_pending(&state.db, tutor_id, None, today()).await?;
    let students = group_pending(&records);

    debug!(records = records.len(), students = students.len(), "Grouped pending rows");
    Ok(Json(students.iter().map(|s| s.view(course)).collect()))
}

/// Billing history of a tutor
#[utoipa::path(
    get,
    path = "/api/getDetailPayment",
    tag = "payments",
    params(TutorQuery),
    responses(
        (status = 200, description = "Billing lines ordered by bill date", body = [PaymentDetailSession]),
        (status = 400, description = "Missing current_tutor_id", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn payment_details(
    State(state): State<AppState>,
    query: Result<Query<TutorQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<PaymentDetailSession>>> {
    let Query(query) = query?;
    let tutor_id = require_id(query.current_tutor_id.as_deref(), "current_tutor_id")?;
    Ok(Json(payments::payment_details(&state.db, tutor_id).await?))
}

/// Change a payment's status
#[utoipa::path(
    put,
    path = "/api/updatePaymentStatus",
    tag = "payments",
    request_body = UpdatePaymentStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = SuccessResponse),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, description = "Payment not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn update_payment_status(
    State(state): State<AppState>,
    payload: Result<Json<UpdatePaymentStatusRequest>, JsonRejection>,
) -> ApiResult<Json<SuccessResponse>> {
    let Json(request) = payload?;
    let status = PaymentStatus::parse(&request.status)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid status: {}", request.status)))?;

    let updated = payments::update_payment_status(&state.db, request.payment_id, status, today()).await?;
    if !updated {
        return Err(ApiError::NotFound(format!("Payment {} not found", request.payment_id)));
    }

    info!("Payment {} is now {}", request.payment_id, status.as_str());
    Ok(Json(SuccessResponse { success: true }))
}
