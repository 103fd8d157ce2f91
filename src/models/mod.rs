pub mod bert;
pub mod tokenizer;

use crate::error::Result;
use crate::ranking::{CategoryScore, NUM_CATEGORIES};

/// Anything that turns a title/summary text into ranked topic scores.
pub trait TopicPredictor: Send + Sync {
    /// All categories, highest probability first.
    fn predict(&self, text: &str) -> Result<[CategoryScore; NUM_CATEGORIES]>;
}
