use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A fitted categorical encoder: each known class maps to its position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Encoded {
    pub id: usize,
    /// The value was unseen at fit time and was mapped to the first known class.
    pub fallback: bool,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn encode(&self, value: &str) -> Encoded {
        match self.classes.iter().position(|class| class == value) {
            Some(id) => Encoded {
                id,
                fallback: false,
            },
            None => Encoded {
                id: 0,
                fallback: true,
            },
        }
    }

    pub fn decode(&self, id: i64) -> Option<&str> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.classes.get(idx))
            .map(String::as_str)
    }
}

/// Ordered feature names the model was fitted on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema {
    names: Vec<String>,
}

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Immutable lookup from feature name to its fitted encoder, built once at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureEncoders(HashMap<String, LabelEncoder>);

impl FeatureEncoders {
    pub fn new(encoders: HashMap<String, LabelEncoder>) -> Self {
        Self(encoders)
    }

    pub fn get(&self, feature: &str) -> Option<&LabelEncoder> {
        self.0.get(feature)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DoshaPrediction {
    pub dosha: String,
    /// Features whose value was unseen and encoded as the first known class.
    pub fallback_features: Vec<String>,
}
