use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ayurpulse_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

pub const INVALID_REQUEST: &str = "invalid_request";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { code: &'static str, message: String },

    #[error("{message}")]
    BadGateway { code: &'static str, message: String },

    #[error("{message}")]
    ServiceUnavailable { code: &'static str, message: String },

    #[error("{message}")]
    InternalServerError { code: &'static str, message: String },
}

/// Body of every failed request.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_type: String,
}

impl ApiError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            code: INVALID_REQUEST,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { code, .. }
            | ApiError::BadGateway { code, .. }
            | ApiError::ServiceUnavailable { code, .. }
            | ApiError::InternalServerError { code, .. } => *code,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        let code = error.code();
        let message = error.to_string();

        match error {
            CoreError::MissingFields(_)
            | CoreError::InvalidDay(_)
            | CoreError::InvalidFeature { .. } => ApiError::BadRequest { code, message },
            CoreError::GenerationFailure(_)
            | CoreError::ParseFailure { .. }
            | CoreError::StructureError(_) => ApiError::BadGateway { code, message },
            CoreError::ModelNotLoaded => ApiError::ServiceUnavailable { code, message },
            CoreError::ClassifierError(_) | CoreError::Initialization(_) => {
                tracing::error!("internal error: {}", message);
                ApiError::InternalServerError { code, message }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorResponse {
            success: false,
            error: self.to_string(),
            error_type: self.code().to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

/// JSON extractor that also runs the payload's `validator` rules.
#[derive(Debug, Clone)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::invalid_request(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::invalid_request(validation_message(&errors)))?;

        Ok(ValidateJson(value))
    }
}

fn validation_message(errors: &ValidationErrors) -> String {
    let messages: Vec<String> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .collect();

    if messages.is_empty() {
        errors.to_string()
    } else {
        messages.join(", ")
    }
}

/// Shared rule for endpoints that accept a free-form JSON object.
pub fn require_non_empty(body: &Map<String, Value>) -> Result<(), ValidationErrors> {
    if body.is_empty() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "body",
            ValidationError::new("empty").with_message("No data provided".into()),
        );
        return Err(errors);
    }
    Ok(())
}
