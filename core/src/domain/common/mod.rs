use std::path::PathBuf;

pub mod entities;
pub mod services;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

#[derive(Clone, Debug)]
pub struct AyurPulseConfig {
    pub llm: LLMConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub base_url: String,
    /// Transport timeout for a single generation round-trip. `None` leaves it unbounded.
    pub request_timeout_secs: Option<u64>,
    pub sampling: SamplingConfig,
}

/// Fixed sampling knobs sent with every generation request.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8192,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ClassifierConfig {
    pub model_path: PathBuf,
}
