use tracing::{error, info};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    diet_chart::{
        entities::{ChartMetadata, DayNumber, DayPlan, DietChart},
        ports::{DietChartService, LLMClient},
        prompt::{build_single_day_prompt, build_weekly_prompt},
        sanitizer::parse_llm_json,
        validator::{validate_chart, validate_day},
        value_objects::{GenerateChartInput, RegenerateDayInput},
    },
    prakriti::ports::DoshaModel,
    profile::services::{missing_required_fields, normalize_profile},
};

impl<LLM, M> DietChartService for Service<LLM, M>
where
    LLM: LLMClient,
    M: DoshaModel,
{
    async fn generate_chart(&self, input: GenerateChartInput) -> Result<DietChart, CoreError> {
        // 1. Reject before spending a provider call
        let missing = missing_required_fields(&input.user_data);
        if !missing.is_empty() {
            return Err(CoreError::MissingFields(missing));
        }

        // 2. Normalize and render
        let profile = normalize_profile(&input.user_data);
        let prompt = build_weekly_prompt(&profile);

        info!(
            user = %profile.name,
            dosha = %profile.dosha,
            diet_type = %profile.diet_type,
            "generating weekly diet chart"
        );

        // 3. Call provider
        let raw_response = self.llm_client.generate(prompt).await.inspect_err(|e| {
            error!("diet chart generation failed: {}", e);
        })?;

        // 4. Parse and validate
        let parsed = parse_llm_json(&raw_response)?;
        let report = validate_chart(&parsed)?;

        let mut chart: DietChart = serde_json::from_value(parsed).map_err(|e| {
            error!("Invalid diet chart format: {}", e);
            CoreError::StructureError(format!("Invalid diet chart format: {}", e))
        })?;

        // 5. Attach metadata
        chart.metadata = Some(ChartMetadata::new(&profile));

        info!(
            user = %profile.name,
            days = report.day_count,
            warnings = report.warnings.len(),
            "diet chart generated"
        );

        Ok(chart)
    }

    async fn regenerate_day(&self, input: RegenerateDayInput) -> Result<DayPlan, CoreError> {
        let day = DayNumber::try_from(input.day_number)?;

        let profile = normalize_profile(&input.user_data);
        let prompt = build_single_day_prompt(&profile, day);

        info!(
            user = %profile.name,
            dosha = %profile.dosha,
            day = day.get(),
            "regenerating single day"
        );

        let raw_response = self.llm_client.generate(prompt).await.inspect_err(|e| {
            error!("day regeneration failed: {}", e);
        })?;

        let parsed = parse_llm_json(&raw_response)?;
        let day_value = validate_day(parsed, day)?;

        let mut day_plan: DayPlan = serde_json::from_value(day_value).map_err(|e| {
            error!("Invalid day plan format: {}", e);
            CoreError::StructureError(format!("Invalid day plan format: {}", e))
        })?;

        // The label always follows the request.
        day_plan.day = i64::from(day.get());
        day_plan.day_name = day.day_name().to_string();

        Ok(day_plan)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use serde_json::{Value, json};

    use super::*;
    use crate::domain::{
        diet_chart::{ports::MockLLMClient, schema::sample_day},
        prakriti::ports::MockDoshaModel,
        profile::{entities::Dosha, value_objects::IntakePayload},
    };

    /// Provider stub that replays a canned response and records every prompt.
    #[derive(Clone)]
    struct StubLLMClient {
        response: Result<String, CoreError>,
        calls: Arc<AtomicUsize>,
        prompts: Arc<Mutex<Vec<String>>>,
    }

    impl StubLLMClient {
        fn replying(response: impl Into<String>) -> Self {
            Self::with_result(Ok(response.into()))
        }

        fn with_result(response: Result<String, CoreError>) -> Self {
            Self {
                response,
                calls: Arc::new(AtomicUsize::new(0)),
                prompts: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn last_prompt(&self) -> String {
            self.prompts
                .lock()
                .expect("prompt log")
                .last()
                .cloned()
                .unwrap_or_default()
        }
    }

    impl LLMClient for StubLLMClient {
        async fn generate(&self, prompt: String) -> Result<String, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().expect("prompt log").push(prompt);
            self.response.clone()
        }
    }

    fn service(stub: &StubLLMClient) -> Service<StubLLMClient, MockDoshaModel> {
        Service::new(stub.clone(), None)
    }

    fn payload(value: Value) -> IntakePayload {
        let Value::Object(map) = value else {
            panic!("payload must be an object");
        };
        map
    }

    fn priya() -> IntakePayload {
        payload(json!({
            "name": "Priya",
            "dominantDosha": "Vata",
            "dietType": "vegetarian",
            "allergies": ["Nuts"]
        }))
    }

    fn week_json(days: u8) -> String {
        let names = [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ];
        let plan: Vec<Value> = (1..=days)
            .map(|d| sample_day(d, names[usize::from(d - 1) % 7], Dosha::Vata))
            .collect();
        json!({
            "weeklyPlan": plan,
            "doshaBalancingTips": ["Favor warm, moist foods"],
            "metadata": { "userName": "Someone else" }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_chart_end_to_end() {
        let stub = StubLLMClient::replying(format!("```json\n{}\n```", week_json(7)));

        let chart = service(&stub)
            .generate_chart(GenerateChartInput {
                user_data: priya(),
            })
            .await
            .expect("chart should be generated");

        let metadata = chart.metadata.expect("metadata attached");
        assert_eq!(metadata.user_name, "Priya");
        assert_eq!(metadata.dosha, Dosha::Vata);
        assert_eq!(metadata.diet_type, "vegetarian");
        assert_eq!(chart.weekly_plan.len(), 7);
        assert_eq!(chart.weekly_plan[6].day_name, "Sunday");
        assert_eq!(chart.dosha_balancing_tips, vec!["Favor warm, moist foods"]);
        assert_eq!(stub.calls(), 1);
        assert!(stub.last_prompt().contains("STRICTLY AVOID these ingredients: Nuts"));
    }

    #[tokio::test]
    async fn test_generate_chart_missing_name_never_calls_provider() {
        let mut mock = MockLLMClient::new();
        mock.expect_generate().never();
        let service: Service<MockLLMClient, MockDoshaModel> = Service::new(mock, None);

        let err = service
            .generate_chart(GenerateChartInput {
                user_data: payload(json!({ "dominantDosha": "Vata", "dietType": "vegan" })),
            })
            .await
            .expect_err("missing name must fail");

        assert_eq!(err, CoreError::MissingFields(vec!["name".to_string()]));
    }

    #[tokio::test]
    async fn test_generate_chart_missing_fields_counter_stays_zero() {
        let stub = StubLLMClient::replying(week_json(7));

        let err = service(&stub)
            .generate_chart(GenerateChartInput {
                user_data: IntakePayload::new(),
            })
            .await
            .expect_err("empty payload must fail");

        assert_eq!(
            err,
            CoreError::MissingFields(vec![
                "name".to_string(),
                "dominantDosha".to_string(),
                "dietType".to_string()
            ])
        );
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_chart_accepts_short_week() {
        let stub = StubLLMClient::replying(week_json(5));

        let chart = service(&stub)
            .generate_chart(GenerateChartInput {
                user_data: priya(),
            })
            .await
            .expect("five days only warns");

        assert_eq!(chart.weekly_plan.len(), 5);
    }

    #[tokio::test]
    async fn test_generate_chart_surfaces_provider_failure() {
        let stub = StubLLMClient::with_result(Err(CoreError::GenerationFailure(
            "quota exceeded".to_string(),
        )));

        let err = service(&stub)
            .generate_chart(GenerateChartInput {
                user_data: priya(),
            })
            .await
            .expect_err("provider failure propagates");

        assert_eq!(err, CoreError::GenerationFailure("quota exceeded".to_string()));
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_chart_distinguishes_parse_and_structure_errors() {
        let garbled = StubLLMClient::replying("Sure! Here is the plan: {weeklyPlan: oops");
        let err = service(&garbled)
            .generate_chart(GenerateChartInput {
                user_data: priya(),
            })
            .await
            .expect_err("garbled text");
        assert_eq!(err.code(), "parse_failure");

        let incomplete = StubLLMClient::replying(r#"{"doshaBalancingTips": []}"#);
        let err = service(&incomplete)
            .generate_chart(GenerateChartInput {
                user_data: priya(),
            })
            .await
            .expect_err("no weeklyPlan");
        assert_eq!(err.code(), "structure_error");
    }

    #[tokio::test]
    async fn test_regenerate_day_rejects_out_of_range_before_calling_provider() {
        let stub = StubLLMClient::replying(sample_day(1, "Monday", Dosha::Vata).to_string());

        for day_number in [0, 8, -1] {
            let err = service(&stub)
                .regenerate_day(RegenerateDayInput {
                    user_data: priya(),
                    day_number,
                })
                .await
                .expect_err("out of range");
            assert_eq!(err, CoreError::InvalidDay(day_number));
        }
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_regenerate_day_accepts_both_boundaries() {
        for day_number in [1_i64, 7] {
            let stub = StubLLMClient::replying(json!({ "meals": {} }).to_string());

            let day_plan = service(&stub)
                .regenerate_day(RegenerateDayInput {
                    user_data: priya(),
                    day_number,
                })
                .await
                .expect("boundary day succeeds");

            assert_eq!(day_plan.day, day_number);
            assert!(!day_plan.day_name.is_empty());
            assert!(stub.last_prompt().contains(&format!("day {day_number} (")));
        }
    }

    #[tokio::test]
    async fn test_regenerate_day_unwraps_weekly_wrapper() {
        let stub = StubLLMClient::replying(week_json(1));

        let day_plan = service(&stub)
            .regenerate_day(RegenerateDayInput {
                user_data: priya(),
                day_number: 3,
            })
            .await
            .expect("wrapped day is accepted");

        assert_eq!(day_plan.day, 3);
        assert_eq!(day_plan.day_name, "Wednesday");
        assert_eq!(day_plan.meals.lunch.calories, 600);
    }

    #[tokio::test]
    async fn test_regenerate_day_takes_requested_entry_from_full_week() {
        let stub = StubLLMClient::replying(week_json(7));

        let day_plan = service(&stub)
            .regenerate_day(RegenerateDayInput {
                user_data: priya(),
                day_number: 6,
            })
            .await
            .expect("full week is accepted");

        assert_eq!(day_plan.day, 6);
        assert_eq!(day_plan.day_name, "Saturday");
    }

    #[tokio::test]
    async fn test_regenerate_day_overrides_mislabelled_day() {
        let stub =
            StubLLMClient::replying(sample_day(1, "Monday", Dosha::Vata).to_string());

        let day_plan = service(&stub)
            .regenerate_day(RegenerateDayInput {
                user_data: priya(),
                day_number: 4,
            })
            .await
            .expect("standalone day is accepted");

        assert_eq!(day_plan.day, 4);
        assert_eq!(day_plan.day_name, "Thursday");
    }
}
