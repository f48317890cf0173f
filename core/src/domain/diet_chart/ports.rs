use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    diet_chart::{
        entities::{DayPlan, DietChart},
        value_objects::{GenerateChartInput, RegenerateDayInput},
    },
};

/// Text-generation provider boundary.
///
/// One call is one round-trip with the client's fixed sampling configuration. Failures come
/// back as [`CoreError::GenerationFailure`]; nothing here retries.
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate(&self, prompt: String) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for diet chart generation
#[cfg_attr(test, mockall::automock)]
pub trait DietChartService: Send + Sync {
    fn generate_chart(
        &self,
        input: GenerateChartInput,
    ) -> impl Future<Output = Result<DietChart, CoreError>> + Send;

    fn regenerate_day(
        &self,
        input: RegenerateDayInput,
    ) -> impl Future<Output = Result<DayPlan, CoreError>> + Send;
}
