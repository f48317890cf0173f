use axum::extract::State;
use ayurpulse_core::domain::prakriti::{entities::DoshaPrediction, ports::PrakritiService};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    prakriti::validators::PredictDoshaRequest,
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
pub struct PredictDoshaResponse {
    pub success: bool,
    pub dosha: String,
    pub fallback_features: Vec<String>,
}

impl From<DoshaPrediction> for PredictDoshaResponse {
    fn from(prediction: DoshaPrediction) -> Self {
        Self {
            success: true,
            dosha: prediction.dosha,
            fallback_features: prediction.fallback_features,
        }
    }
}

#[utoipa::path(
    post,
    path = "/predict",
    tag = "prakriti",
    summary = "Predict dominant dosha",
    description = "Classifies questionnaire answers into a dominant dosha. Unseen categorical answers fall back to the first known class and are listed in fallbackFeatures.",
    responses(
        (status = 200, body = PredictDoshaResponse),
        (status = 400, body = ApiErrorResponse),
        (status = 503, description = "Classifier artifact not loaded", body = ApiErrorResponse)
    ),
    request_body = PredictDoshaRequest
)]
pub async fn predict_dosha(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<PredictDoshaRequest>,
) -> Result<Response<PredictDoshaResponse>, ApiError> {
    let prediction = state
        .service
        .predict_dosha(payload.into())
        .map_err(ApiError::from)?;

    Ok(Response::OK(prediction.into()))
}
