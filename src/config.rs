// Fixed runtime settings: model locations and server binding
use std::path::PathBuf;

/// Number of tokens every encoded input is padded or truncated to.
pub const MAX_LEN: usize = 256;

/// Cumulative probability (in percent) after which no more topics are shown.
pub const DISPLAY_THRESHOLD: f32 = 95.0;

/// Where the pretrained pieces live, relative to the working directory.
#[derive(Debug, Clone)]
pub struct ModelPaths {
    pub tokenizer_dir: PathBuf,
    pub bert_dir: PathBuf,
    pub weights_file: PathBuf,
}

impl Default for ModelPaths {
    fn default() -> Self {
        Self {
            tokenizer_dir: PathBuf::from("./token"),
            bert_dir: PathBuf::from("./bert"),
            weights_file: PathBuf::from("model_state_dict.pt"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub models: ModelPaths,
    pub host: String,
    pub port: u16,
    // one form submit = one blocking inference, a single worker is enough
    pub workers: usize,
    pub max_len: usize,
    pub display_threshold: f32,
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            models: ModelPaths::default(),
            host: "127.0.0.1".to_string(),
            port: 8501,
            workers: 1,
            max_len: MAX_LEN,
            display_threshold: DISPLAY_THRESHOLD,
            static_dir: PathBuf::from("./static"),
        }
    }
}
