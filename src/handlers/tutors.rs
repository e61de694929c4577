use axum::{
    extract::{Query, State, rejection::QueryRejection},
    response::Json,
};
use common::TutorIdResponse;
use tracing::{debug, instrument};

use crate::errors::{ApiError, ApiResult};
use crate::helpers::params::require_id;
use crate::schemas::{AccountIdQuery, AppState};

/// Look up the tutor record of a login account
#[utoipa::path(
    get,
    path = "/api/getTutorId",
    tag = "auth",
    params(AccountIdQuery),
    responses(
        (status = 200, description = "Tutor found", body = TutorIdResponse),
        (status = 400, description = "Missing or invalid account_id", body = ErrorResponse),
        (status = 404, description = "Account has no tutor record", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_tutor_id(
    State(state): State<AppState>,
    query: Result<Query<AccountIdQuery>, QueryRejection>,
) -> ApiResult<Json<TutorIdResponse>> {
    let Query(query) = query?;
    let account_id = require_id(query.account_id.as_deref(), "account_id")?;

    let tutor_id = compute::tutors::find_tutor_id(&state.db, account_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No tutor found for account {}", account_id)))?;

    debug!("Account {} is tutor {}", account_id, tutor_id);
    Ok(Json(TutorIdResponse { tutor_id }))
}
