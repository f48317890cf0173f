use std::sync::Arc;

use crate::domain::prakriti::services::PrakritiClassifier;

/// Shared service handle. Cloning only bumps reference counts; both the provider
/// client and the classifier are read-only after startup.
pub struct Service<LLM, M> {
    pub(crate) llm_client: Arc<LLM>,
    pub(crate) classifier: Option<Arc<PrakritiClassifier<M>>>,
}

impl<LLM, M> Service<LLM, M> {
    pub fn new(llm_client: LLM, classifier: Option<PrakritiClassifier<M>>) -> Self {
        Self {
            llm_client: Arc::new(llm_client),
            classifier: classifier.map(Arc::new),
        }
    }
}

impl<LLM, M> Clone for Service<LLM, M> {
    fn clone(&self) -> Self {
        Self {
            llm_client: Arc::clone(&self.llm_client),
            classifier: self.classifier.clone(),
        }
    }
}
