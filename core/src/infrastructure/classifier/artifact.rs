use std::{fs, io::ErrorKind, path::Path};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        prakriti::{
            entities::{FeatureEncoders, FeatureSchema},
            services::PrakritiClassifier,
        },
    },
    infrastructure::classifier::random_forest::RandomForest,
};

/// On-disk layout of the exported classifier.
#[derive(Debug, Deserialize)]
pub struct ClassifierArtifact {
    pub feature_names: FeatureSchema,
    #[serde(default)]
    pub encoders: FeatureEncoders,
    #[serde(default)]
    pub label_column: Option<String>,
    pub model: RandomForest,
}

impl ClassifierArtifact {
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw).map_err(|e| {
            CoreError::Initialization(format!("Invalid classifier artifact: {}", e))
        })
    }

    pub fn into_classifier(self) -> Result<PrakritiClassifier<RandomForest>, CoreError> {
        self.model
            .validate()
            .and_then(|_| {
                PrakritiClassifier::new(
                    self.model,
                    self.feature_names,
                    self.encoders,
                    self.label_column,
                )
            })
            .map_err(|e| CoreError::Initialization(format!("Invalid classifier artifact: {}", e)))
    }
}

/// Load the classifier from `path`. A missing file yields `Ok(None)` so the
/// server can still start and serve chart generation.
pub fn load_prakriti_classifier(
    path: &Path,
) -> Result<Option<PrakritiClassifier<RandomForest>>, CoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "classifier artifact not found, /predict disabled");
            return Ok(None);
        }
        Err(e) => {
            return Err(CoreError::Initialization(format!(
                "Failed to read classifier artifact {}: {}",
                path.display(),
                e
            )));
        }
    };

    let classifier = ClassifierArtifact::from_json(&raw)?.into_classifier()?;
    info!(
        path = %path.display(),
        features = classifier.schema().len(),
        "classifier artifact loaded"
    );

    Ok(Some(classifier))
}
