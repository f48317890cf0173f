use serde_json::{Map, Value};

pub const DEFAULT_LABEL_COLUMN: &str = "label";

#[derive(Debug, Clone)]
pub struct PredictDoshaInput {
    /// Questionnaire answers keyed by feature name. Order does not matter here;
    /// the classifier's feature schema fixes it.
    pub features: Map<String, Value>,
}
