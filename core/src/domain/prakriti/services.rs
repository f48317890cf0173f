use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    diet_chart::ports::LLMClient,
    prakriti::{
        entities::{DoshaPrediction, FeatureEncoders, FeatureSchema},
        ports::{DoshaModel, PrakritiService},
        value_objects::{DEFAULT_LABEL_COLUMN, PredictDoshaInput},
    },
};

/// A fitted model bundled with the schema and encoders it was trained with.
#[derive(Debug, Clone)]
pub struct PrakritiClassifier<M> {
    model: M,
    schema: FeatureSchema,
    encoders: FeatureEncoders,
    label_column: String,
}

impl<M: DoshaModel> PrakritiClassifier<M> {
    pub fn new(
        model: M,
        schema: FeatureSchema,
        encoders: FeatureEncoders,
        label_column: Option<String>,
    ) -> Result<Self, CoreError> {
        if schema.is_empty() {
            return Err(CoreError::ClassifierError(
                "feature schema is empty".to_string(),
            ));
        }

        Ok(Self {
            model,
            schema,
            encoders,
            label_column: label_column.unwrap_or_else(|| DEFAULT_LABEL_COLUMN.to_string()),
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Encode `features` in schema order. Returns the vector and the features that fell back.
    pub fn encode_features(
        &self,
        features: &Map<String, Value>,
    ) -> Result<(Vec<f64>, Vec<String>), CoreError> {
        let mut vector = Vec::with_capacity(self.schema.len());
        let mut fallbacks = Vec::new();

        for name in self.schema.names() {
            let value = features.get(name).filter(|v| !v.is_null());

            let encoded = match self.encoders.get(name) {
                Some(encoder) => {
                    let text = value.map(value_text).unwrap_or_default();
                    let encoded = encoder.encode(&text);
                    if encoded.fallback {
                        warn!(
                            feature = %name,
                            value = %text,
                            fallback = %encoder.classes().first().map(String::as_str).unwrap_or(""),
                            "unseen categorical value, using first known class"
                        );
                        fallbacks.push(name.clone());
                    }
                    encoded.id as f64
                }
                None => numeric_value(name, value)?,
            };

            vector.push(encoded);
        }

        Ok((vector, fallbacks))
    }

    pub fn classify(&self, features: &Map<String, Value>) -> Result<DoshaPrediction, CoreError> {
        let (vector, fallback_features) = self.encode_features(features)?;
        let raw_label = self.model.predict(&vector)?;
        let dosha = self.decode_label(&raw_label);

        info!(
            dosha = %dosha,
            fallbacks = fallback_features.len(),
            "dosha predicted"
        );

        Ok(DoshaPrediction {
            dosha,
            fallback_features,
        })
    }

    /// Map an encoded label id back to its name when the label column has an encoder.
    fn decode_label(&self, raw: &str) -> String {
        self.encoders
            .get(&self.label_column)
            .zip(raw.trim().parse::<i64>().ok())
            .and_then(|(encoder, id)| encoder.decode(id))
            .unwrap_or(raw)
            .to_string()
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

/// Plain numeric feature; a missing value counts as 0.
fn numeric_value(feature: &str, value: Option<&Value>) -> Result<f64, CoreError> {
    let invalid = |v: &Value| CoreError::InvalidFeature {
        feature: feature.to_string(),
        value: value_text(v),
    };

    match value {
        None => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or_else(|| invalid(&Value::Number(n.clone()))),
        Some(Value::Bool(b)) => Ok(if *b { 1.0 } else { 0.0 }),
        Some(v @ Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(0.0)
            } else {
                trimmed.parse::<f64>().map_err(|_| invalid(v))
            }
        }
        Some(other) => Err(invalid(other)),
    }
}

impl<LLM, M> PrakritiService for Service<LLM, M>
where
    LLM: LLMClient,
    M: DoshaModel,
{
    fn predict_dosha(&self, input: PredictDoshaInput) -> Result<DoshaPrediction, CoreError> {
        let classifier = self.classifier.as_ref().ok_or(CoreError::ModelNotLoaded)?;
        classifier.classify(&input.features)
    }
}
