use crate::handlers::{
    auth::{login, register},
    catalog::{class_sessions, list_students},
    health::health_check,
    payments::{hours_pending, payment_details, pending_overview, update_payment_status},
    schedule::{tutor_home, update_note},
    statistics::{all_course_statistics, all_statistics, course_summary, dashboard, income_statistics},
    tutors::get_tutor_id,
};
use crate::errors::ApiError;
use crate::schemas::{ApiDoc, AppState};
use axum::{
    error_handling::HandleErrorLayer,
    routing::{get, post, put},
    BoxError, Router,
};
use std::time::Duration;
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Turns middleware failures into the usual `{error}` body.
async fn handle_middleware_error(err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        ApiError::Timeout
    } else {
        ApiError::internal(format!("Unhandled internal error: {}", err))
    }
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/api/health", get(health_check))
        // Accounts
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/getTutorId", get(get_tutor_id))
        // Per-tutor statistics
        .route("/api/dashboard", get(dashboard))
        .route("/api/getCourseSummary", get(course_summary))
        .route("/api/income/statistics/:tutor_id", get(income_statistics))
        // Admin statistics
        .route("/api/statistics", get(all_statistics))
        .route("/api/statisticsCourse", get(all_course_statistics))
        // Payments
        .route("/api/getHoursPending", get(hours_pending))
        .route("/api/getPendingOverview", get(pending_overview))
        .route("/api/getDetailPayment", get(payment_details))
        .route("/api/updatePaymentStatus", put(update_payment_status))
        // Schedule
        .route("/api/TutorHome", post(tutor_home))
        .route("/api/updateNote", put(update_note))
        // Catalog
        .route("/api/students", get(list_students))
        .route("/api/classsession", get(class_sessions))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(timeout)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
