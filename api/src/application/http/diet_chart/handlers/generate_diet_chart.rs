use axum::extract::State;
use ayurpulse_core::domain::diet_chart::{entities::DietChart, ports::DietChartService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    diet_chart::validators::DietChartRequest,
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
pub struct GenerateDietChartResponse {
    pub success: bool,
    pub diet_chart: DietChart,
}

#[utoipa::path(
    post,
    path = "/generate-diet-chart",
    tag = "diet-chart",
    summary = "Generate a weekly diet chart",
    description = "Builds a 7-day Ayurvedic meal plan for the submitted intake form. Requires name, dominantDosha (or dosha) and dietType.",
    responses(
        (status = 200, body = GenerateDietChartResponse),
        (status = 400, description = "Missing required fields", body = ApiErrorResponse),
        (status = 502, description = "Generation, parse or structure failure", body = ApiErrorResponse)
    ),
    request_body = DietChartRequest
)]
pub async fn generate_diet_chart(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<DietChartRequest>,
) -> Result<Response<GenerateDietChartResponse>, ApiError> {
    let diet_chart = state
        .service
        .generate_chart(payload.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GenerateDietChartResponse {
        success: true,
        diet_chart,
    }))
}
