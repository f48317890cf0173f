use ayurpulse_core::domain::{
    common::entities::app_errors::CoreError,
    diet_chart::value_objects::{GenerateChartInput, RegenerateDayInput},
    profile::value_objects::IntakePayload,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::application::http::server::api_entities::api_error::{ApiError, require_non_empty};

pub const DAY_NUMBER_FIELD: &str = "dayNumber";

/// Free-form intake form. Keys are read leniently by the profile normalizer.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(example = json!({
    "name": "Priya",
    "dominantDosha": "Vata",
    "dietType": "vegetarian",
    "allergies": ["Nuts"]
}))]
pub struct DietChartRequest(#[schema(value_type = Object)] pub IntakePayload);

impl Validate for DietChartRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        require_non_empty(&self.0)
    }
}

impl From<DietChartRequest> for GenerateChartInput {
    fn from(request: DietChartRequest) -> Self {
        GenerateChartInput {
            user_data: request.0,
        }
    }
}

/// The intake form plus the `dayNumber` to regenerate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(example = json!({
    "name": "Priya",
    "dominantDosha": "Vata",
    "dietType": "vegetarian",
    "dayNumber": 3
}))]
pub struct RegenerateDayRequest(#[schema(value_type = Object)] pub IntakePayload);

impl Validate for RegenerateDayRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        require_non_empty(&self.0)
    }
}

impl TryFrom<RegenerateDayRequest> for RegenerateDayInput {
    type Error = ApiError;

    fn try_from(request: RegenerateDayRequest) -> Result<Self, Self::Error> {
        let mut user_data = request.0;
        let day_number = user_data
            .remove(DAY_NUMBER_FIELD)
            .filter(|value| !value.is_null())
            .ok_or_else(|| CoreError::MissingFields(vec![DAY_NUMBER_FIELD.to_string()]))?;

        Ok(RegenerateDayInput {
            day_number: strict_day_number(&day_number)?,
            user_data,
        })
    }
}

/// Integers, integral floats and integer strings only. The range is checked by the service.
fn strict_day_number(value: &Value) -> Result<i64, ApiError> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| ApiError::BadRequest {
        code: CoreError::InvalidDay(0).code(),
        message: format!("Invalid day number {value}: must be an integer between 1 and 7"),
    })
}
