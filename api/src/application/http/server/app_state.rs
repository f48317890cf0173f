use std::sync::Arc;

use ayurpulse_core::application::AyurPulseService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: AyurPulseService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: AyurPulseService) -> Self {
        Self { args, service }
    }
}
