use axum::extract::State;
use ayurpulse_core::domain::health::{entities::ReadinessStatus, ports::HealthCheckService};

use crate::application::http::server::{api_entities::response::Response, app_state::AppState};

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    summary = "Service readiness",
    description = "Reports whether the classifier artifact is loaded and the diet chart generator is configured. A missing classifier reports status degraded.",
    responses(
        (status = 200, body = ReadinessStatus)
    )
)]
pub async fn get_health(State(state): State<AppState>) -> Response<ReadinessStatus> {
    Response::OK(state.service.readiness())
}
