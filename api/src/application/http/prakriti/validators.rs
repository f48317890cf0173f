use ayurpulse_core::domain::prakriti::value_objects::PredictDoshaInput;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::application::http::server::api_entities::api_error::require_non_empty;

/// Questionnaire answers keyed by the feature names the classifier was fitted on.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(example = json!({
    "Body Size": "Slim",
    "Sleep Hours": 6
}))]
pub struct PredictDoshaRequest(#[schema(value_type = Object)] pub Map<String, Value>);

impl Validate for PredictDoshaRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        require_non_empty(&self.0)
    }
}

impl From<PredictDoshaRequest> for PredictDoshaInput {
    fn from(request: PredictDoshaRequest) -> Self {
        PredictDoshaInput {
            features: request.0,
        }
    }
}
