use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use common::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use model::entities::{account, prelude::Account, tutor};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr, TransactionTrait};
use tracing::{debug, info, instrument, warn};
use validator::{Validate, ValidationErrors};

use crate::auth::password::{hash_password, verify_password};
use crate::errors::{ApiError, ApiResult};
use crate::helpers::params::non_blank;
use crate::schemas::AppState;

const EMAIL_TAKEN: &str = "Email already registered";

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Joins the field messages into one line, sorted for a stable response.
fn describe(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field),
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 400, description = "Missing credentials", body = ErrorResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(request) = payload?;
    let email = normalize_email(&request.email);
    if email.is_empty() || request.password.is_empty() {
        return Err(ApiError::BadRequest("Email and password are required".to_string()));
    }

    debug!("Login attempt for {}", email);
    let account = Account::find()
        .filter(account::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("User not found".to_string()))?;

    if !verify_password(&request.password, &account.password_hash)? {
        warn!("Wrong password for account {}", account.id);
        return Err(ApiError::Unauthorized("Wrong password".to_string()));
    }

    info!("Account {} signed in", account.id);
    Ok(Json(LoginResponse {
        account_id: account.id,
        role: account.role.code().to_string(),
        fname: account.fname,
        lname: account.lname,
    }))
}

/// Create an account; tutors also get a tutor record
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid form", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(request) = payload?;
    request
        .validate()
        .map_err(|e| ApiError::BadRequest(describe(&e)))?;

    let role = account::AccountRole::from_code(&request.role)
        .ok_or_else(|| ApiError::BadRequest("Role must be P or T".to_string()))?;
    let email = normalize_email(&request.email);

    let existing = Account::find()
        .filter(account::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let password_hash = hash_password(&request.password)?;

    let txn = state.db.begin().await?;
    let account = account::ActiveModel {
        email: Set(email),
        password_hash: Set(password_hash),
        fname: Set(request.fname.trim().to_string()),
        lname: Set(request.lname.trim().to_string()),
        role: Set(role),
        phone: Set(non_blank(request.phone.as_deref()).map(str::to_string)),
        line: Set(non_blank(request.line.as_deref()).map(str::to_string)),
        facebook: Set(non_blank(request.facebook.as_deref()).map(str::to_string)),
        ..Default::default()
    }
    .insert(&txn)
    .await
    .map_err(|e| match e.sql_err() {
        // Lost a race with a concurrent registration
        Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::Conflict(EMAIL_TAKEN.to_string()),
        _ => ApiError::from(e),
    })?;

    if role == account::AccountRole::Tutor {
        let tutor = tutor::ActiveModel {
            account_id: Set(account.id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        debug!("Created tutor {} for account {}", tutor.id, account.id);
    }
    txn.commit().await?;

    info!("Registered account {} with role {}", account.id, role.code());
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            account_id: account.id,
        }),
    ))
}
