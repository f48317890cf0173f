pub mod artifact;
pub mod random_forest;

pub use artifact::load_prakriti_classifier;
pub use random_forest::RandomForest;
