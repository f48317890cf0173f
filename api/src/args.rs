use std::path::PathBuf;

use ayurpulse_core::domain::common::{
    AyurPulseConfig, ClassifierConfig, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, LLMConfig,
    SamplingConfig,
};
use clap::{Args as ClapArgs, Parser};

#[derive(Debug, Clone, Parser)]
#[command(name = "ayurpulse", version, about = "AyurPulse diet chart and dosha API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LlmArgs,

    #[command(flatten)]
    pub classifier: ClassifierArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = 5000)]
    pub port: u16,

    /// Prefix prepended to every route, e.g. `/api`.
    #[arg(long, env = "ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long, env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    #[arg(long, env = "LLM_TEMPERATURE", default_value_t = 0.7)]
    pub llm_temperature: f32,

    #[arg(long, env = "LLM_TOP_P", default_value_t = 0.95)]
    pub llm_top_p: f32,

    #[arg(long, env = "LLM_TOP_K", default_value_t = 40)]
    pub llm_top_k: u32,

    #[arg(long, env = "LLM_MAX_OUTPUT_TOKENS", default_value_t = 8192)]
    pub llm_max_output_tokens: u32,

    /// Transport timeout for one generation call, in seconds. 0 disables it.
    #[arg(long, env = "LLM_TIMEOUT_SECS", default_value_t = 120)]
    pub llm_timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ClassifierArgs {
    #[arg(long, env = "DOSHA_MODEL_PATH", default_value = "dosha_model.json")]
    pub model_path: PathBuf,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Used when `RUST_LOG` is not set.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for AyurPulseConfig {
    fn from(args: Args) -> Self {
        let llm = args.llm;
        AyurPulseConfig {
            llm: LLMConfig {
                gemini_api_key: llm.gemini_api_key,
                gemini_model: llm.gemini_model,
                base_url: llm.gemini_base_url,
                request_timeout_secs: (llm.llm_timeout_secs > 0).then_some(llm.llm_timeout_secs),
                sampling: SamplingConfig {
                    temperature: llm.llm_temperature,
                    top_p: llm.llm_top_p,
                    top_k: llm.llm_top_k,
                    max_output_tokens: llm.llm_max_output_tokens,
                },
            },
            classifier: ClassifierConfig {
                model_path: args.classifier.model_path,
            },
        }
    }
}
