pub mod classifier;
pub mod llm;
