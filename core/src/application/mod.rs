use tracing::info;

use crate::{
    domain::common::{AyurPulseConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        classifier::{RandomForest, load_prakriti_classifier},
        llm::GeminiLLMClient,
    },
};

pub type AyurPulseService = Service<GeminiLLMClient, RandomForest>;

/// Wire the concrete adapters into the shared service. Any error here is fatal at startup.
pub async fn create_service(config: AyurPulseConfig) -> Result<AyurPulseService, CoreError> {
    let llm_client = GeminiLLMClient::new(config.llm)?;
    info!(model = %llm_client.model_name(), "diet chart generator ready");

    let classifier = load_prakriti_classifier(&config.classifier.model_path)?;

    Ok(Service::new(llm_client, classifier))
}
