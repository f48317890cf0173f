use axum::extract::State;
use ayurpulse_core::domain::diet_chart::{
    entities::DayPlan, ports::DietChartService, value_objects::RegenerateDayInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    diet_chart::validators::RegenerateDayRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegenerateDayResponse {
    pub success: bool,
    pub day_plan: DayPlan,
}

#[utoipa::path(
    post,
    path = "/regenerate-day",
    tag = "diet-chart",
    summary = "Regenerate one day",
    description = "Generates a fresh plan for a single day (dayNumber 1-7) of an existing chart.",
    responses(
        (status = 200, body = RegenerateDayResponse),
        (status = 400, description = "Missing fields or day out of range", body = ApiErrorResponse),
        (status = 502, description = "Generation, parse or structure failure", body = ApiErrorResponse)
    ),
    request_body = RegenerateDayRequest
)]
pub async fn regenerate_day(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<RegenerateDayRequest>,
) -> Result<Response<RegenerateDayResponse>, ApiError> {
    let input = RegenerateDayInput::try_from(payload)?;
    let day_plan = state
        .service
        .regenerate_day(input)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(RegenerateDayResponse {
        success: true,
        day_plan,
    }))
}
