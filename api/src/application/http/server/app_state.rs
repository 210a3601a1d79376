use std::sync::Arc;

use pantryvision_core::application::PantryVisionService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: PantryVisionService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: PantryVisionService) -> Self {
        Self { args, service }
    }
}
