use crate::domain::{
    common::services::Service,
    diet_chart::ports::LLMClient,
    health::{entities::ReadinessStatus, ports::HealthCheckService},
    prakriti::ports::DoshaModel,
};

impl<LLM, M> HealthCheckService for Service<LLM, M>
where
    LLM: LLMClient,
    M: DoshaModel,
{
    fn readiness(&self) -> ReadinessStatus {
        // The provider client is validated at construction, so holding one means it is ready.
        ReadinessStatus::new(self.classifier.is_some(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{diet_chart::ports::MockLLMClient, prakriti::ports::MockDoshaModel};

    #[test]
    fn test_readiness_without_model_is_degraded() {
        let service: Service<MockLLMClient, MockDoshaModel> =
            Service::new(MockLLMClient::new(), None);

        let status = service.readiness();
        assert_eq!(status.status, "degraded");
        assert!(!status.model_loaded);
        assert!(status.generator_ready);
    }

    #[test]
    fn test_readiness_all_ready() {
        assert_eq!(ReadinessStatus::new(true, true).status, "ok");
    }
}
