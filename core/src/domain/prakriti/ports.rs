use crate::domain::{
    common::entities::app_errors::CoreError,
    prakriti::{entities::DoshaPrediction, value_objects::PredictDoshaInput},
};

/// A fitted classifier over an encoded, fixed-order feature vector.
#[cfg_attr(test, mockall::automock)]
pub trait DoshaModel: Send + Sync {
    /// Returns the raw class label, which may itself be an encoded id.
    fn predict(&self, features: &[f64]) -> Result<String, CoreError>;
}

pub trait PrakritiService: Send + Sync {
    fn predict_dosha(&self, input: PredictDoshaInput) -> Result<DoshaPrediction, CoreError>;
}
