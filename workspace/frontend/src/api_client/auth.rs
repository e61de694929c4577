use common::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, TutorIdResponse};

use crate::api_client;
use crate::session::Session;

pub async fn login(request: &LoginRequest) -> Result<LoginResponse, String> {
    log::debug!("Signing in as {}", request.email);
    api_client::post("/login", request).await
}

pub async fn register(request: &RegisterRequest) -> Result<RegisterResponse, String> {
    log::debug!("Registering {} with role {}", request.email, request.role);
    let result = api_client::post("/register", request).await;
    if let Ok(RegisterResponse { account_id }) = &result {
        log::info!("Registered account {}", account_id);
    }
    result
}

pub async fn get_tutor_id(account_id: i32) -> Result<i32, String> {
    log::trace!("Looking up tutor for account {}", account_id);
    let response: TutorIdResponse = api_client::get(&format!("/getTutorId?account_id={}", account_id)).await?;
    Ok(response.tutor_id)
}

/// Logs in and, for tutors, resolves the tutor record the tutor pages need.
pub async fn sign_in(request: &LoginRequest) -> Result<Session, String> {
    let identity = login(request).await?;
    let tutor_id = if identity.role == Session::TUTOR {
        Some(get_tutor_id(identity.account_id).await?)
    } else {
        None
    };
    Ok(Session::new(identity, tutor_id))
}
