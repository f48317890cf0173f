use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Invalid day number {0}: must be between 1 and 7")]
    InvalidDay(i64),

    #[error("Invalid value {value:?} for feature {feature}")]
    InvalidFeature { feature: String, value: String },

    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    #[error("Failed to parse model response at char {offset}: {message}")]
    ParseFailure {
        message: String,
        offset: usize,
        excerpt: String,
    },

    #[error("Invalid diet chart structure: {0}")]
    StructureError(String),

    #[error("ML model not loaded on server")]
    ModelNotLoaded,

    #[error("Classifier error: {0}")]
    ClassifierError(String),

    #[error("Initialization error: {0}")]
    Initialization(String),
}

impl CoreError {
    /// Stable machine-readable classification of the error.
    pub fn code(&self) -> &'static str {
        match self {
            CoreError::MissingFields(_) => "missing_fields",
            CoreError::InvalidDay(_) => "invalid_day",
            CoreError::InvalidFeature { .. } => "invalid_feature",
            CoreError::GenerationFailure(_) => "generation_failure",
            CoreError::ParseFailure { .. } => "parse_failure",
            CoreError::StructureError(_) => "structure_error",
            CoreError::ModelNotLoaded => "model_not_loaded",
            CoreError::ClassifierError(_) => "classifier_error",
            CoreError::Initialization(_) => "initialization_error",
        }
    }

    /// True for errors the caller can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::MissingFields(_)
                | CoreError::InvalidDay(_)
                | CoreError::InvalidFeature { .. }
        )
    }
}
