use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::{LLMConfig, PLACEHOLDER_API_KEY, SamplingConfig, entities::app_errors::CoreError},
    diet_chart::ports::LLMClient,
};

#[derive(Debug, Clone)]
pub struct GeminiLLMClient {
    api_key: String,
    model_name: String,
    base_url: String,
    sampling: SamplingConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: String,
}

impl GeminiLLMClient {
    /// Build the client once at startup. A missing or placeholder key is an
    /// initialization error rather than a failure on the first request.
    pub fn new(config: LLMConfig) -> Result<Self, CoreError> {
        let api_key = config.gemini_api_key.trim().to_string();
        if api_key.is_empty() || api_key == PLACEHOLDER_API_KEY {
            return Err(CoreError::Initialization(
                "Gemini API key not configured. Set GEMINI_API_KEY environment variable."
                    .to_string(),
            ));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| {
            CoreError::Initialization(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            api_key,
            model_name: config.gemini_model,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            sampling: config.sampling,
            client,
        })
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    async fn call_gemini_api(&self, request: GeminiRequest) -> Result<String, CoreError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model_name, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL, which carries the key
                let e = e.without_url();
                tracing::error!("Gemini API request failed: {}", e);
                CoreError::GenerationFailure(format!("LLM API error: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API error: {} - {}", status, error_text);
            return Err(CoreError::GenerationFailure(format!(
                "LLM API returned error: {} - {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            let e = e.without_url();
            tracing::error!("Failed to parse Gemini response: {}", e);
            CoreError::GenerationFailure(format!("Failed to parse LLM response: {}", e))
        })?;

        let text: String = gemini_response
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.parts.iter().map(|p| p.text.as_str()).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(CoreError::GenerationFailure(
                "No response from LLM".to_string(),
            ));
        }

        Ok(text)
    }
}

impl LLMClient for GeminiLLMClient {
    async fn generate(&self, prompt: String) -> Result<String, CoreError> {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: self.sampling.temperature,
                top_p: self.sampling.top_p,
                top_k: self.sampling.top_k,
                max_output_tokens: self.sampling.max_output_tokens,
            },
        };

        tracing::debug!(model = %self.model_name, "calling Gemini generateContent");
        self.call_gemini_api(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::DEFAULT_GEMINI_BASE_URL;

    fn config(key: &str) -> LLMConfig {
        LLMConfig {
            gemini_api_key: key.to_string(),
            gemini_model: "gemini-2.5-flash".to_string(),
            base_url: format!("{}/", DEFAULT_GEMINI_BASE_URL),
            request_timeout_secs: Some(5),
            sampling: SamplingConfig::default(),
        }
    }

    #[test]
    fn test_missing_or_placeholder_key_fails_fast() {
        for key in ["", "   ", "YOUR_API_KEY_HERE"] {
            let err = GeminiLLMClient::new(config(key)).expect_err("must reject key");
            assert_eq!(err.code(), "initialization_error");
        }
    }

    #[test]
    fn test_valid_key_builds_client() {
        let client = GeminiLLMClient::new(config("test-key")).expect("client");
        assert_eq!(client.model_name(), "gemini-2.5-flash");
        assert_eq!(client.base_url, DEFAULT_GEMINI_BASE_URL);
    }

    #[test]
    fn test_request_serializes_sampling_config() {
        let request = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "hi".to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.5,
                top_p: 0.9,
                top_k: 32,
                max_output_tokens: 1024,
            },
        };

        let value = serde_json::to_value(&request).expect("serializable");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(value["generation_config"]["top_k"], 32);
        assert_eq!(value["generation_config"]["max_output_tokens"], 1024);
    }

    #[test]
    fn test_response_without_candidates_deserializes() {
        let response: GeminiResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#)
                .expect("tolerant response");
        assert!(response.candidates.is_empty());
    }
}
