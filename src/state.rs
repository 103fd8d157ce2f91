// Shared state handed to every request handler
use std::sync::Arc;

use crate::config::DISPLAY_THRESHOLD;
use crate::models::TopicPredictor;

#[derive(Clone)]
pub struct AppState {
    pub classifier: Arc<dyn TopicPredictor>,
    pub display_threshold: f32,
}

impl AppState {
    pub fn new(classifier: Arc<dyn TopicPredictor>) -> Self {
        Self {
            classifier,
            display_threshold: DISPLAY_THRESHOLD,
        }
    }

    pub fn with_display_threshold(mut self, display_threshold: f32) -> Self {
        self.display_threshold = display_threshold;
        self
    }
}
