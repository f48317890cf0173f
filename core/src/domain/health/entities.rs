use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessStatus {
    /// "ok" when every component is ready, "degraded" otherwise.
    pub status: String,
    pub model_loaded: bool,
    pub generator_ready: bool,
}

impl ReadinessStatus {
    pub fn new(model_loaded: bool, generator_ready: bool) -> Self {
        let status = if model_loaded && generator_ready {
            "ok"
        } else {
            "degraded"
        };

        Self {
            status: status.to_string(),
            model_loaded,
            generator_ready,
        }
    }
}
