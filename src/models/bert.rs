// BERT topic classifier
use std::path::Path;

use candle::{DType, Device, IndexOp, Tensor, D};
use candle_nn::{Dropout, Linear, Module, VarBuilder};
use candle_transformers::models::bert::{BertModel, Config, DTYPE};

use crate::config::ModelPaths;
use crate::error::{AppError, Result};
use crate::models::tokenizer::{EncodedInput, TextEncoder};
use crate::models::TopicPredictor;
use crate::ranking::{rank, CategoryScore, NUM_CATEGORIES};

// tensor prefixes of the saved module
const ENCODER_PREFIX: &str = "bert_model";
const HEAD_PREFIX: &str = "linear";
const DROPOUT_PROB: f32 = 0.3;

pub struct TopicClassifier {
    encoder: TextEncoder,
    model: BertModel,
    pooler: Linear,
    dropout: Dropout,
    head: Linear,
    device: Device,
}

impl TopicClassifier {
    pub fn load(paths: &ModelPaths, max_len: usize, device: Device) -> Result<Self> {
        let config_filename = paths.bert_dir.join("config.json");
        for required in [&config_filename, &paths.weights_file] {
            if !required.exists() {
                return Err(AppError::MissingFile(required.clone()));
            }
        }
        if !paths.tokenizer_dir.is_dir() {
            return Err(AppError::MissingFile(paths.tokenizer_dir.clone()));
        }

        // load the model config
        let config = std::fs::read_to_string(&config_filename)?;
        let config: Config = serde_json::from_str(&config)?;

        let encoder = TextEncoder::load(&paths.tokenizer_dir, max_len)?;

        let variable_builder = weights(&paths.weights_file, &device)?;
        let classifier = Self::from_parts(encoder, variable_builder, &config, device)?;
        log::info!(
            "loaded topic classifier from {} ({} labels, max_len {})",
            paths.weights_file.display(),
            NUM_CATEGORIES,
            classifier.encoder.max_len()
        );
        Ok(classifier)
    }

    /// Builds the encoder, pooler and linear head from `vb`, whose root holds
    /// the `bert_model.*` and `linear.*` tensors.
    pub fn from_parts(
        encoder: TextEncoder,
        vb: VarBuilder,
        config: &Config,
        device: Device,
    ) -> Result<Self> {
        let bert_vb = vb.pp(ENCODER_PREFIX);
        let model = BertModel::load(bert_vb.clone(), config)?;
        let hidden_size = config.hidden_size;
        let pooler = candle_nn::linear(hidden_size, hidden_size, bert_vb.pp("pooler").pp("dense"))?;
        let head = candle_nn::linear(hidden_size, NUM_CATEGORIES, vb.pp(HEAD_PREFIX))?;
        Ok(Self {
            encoder,
            model,
            pooler,
            dropout: Dropout::new(DROPOUT_PROB),
            head,
            device,
        })
    }

    pub fn encoder(&self) -> &TextEncoder {
        &self.encoder
    }

    /// Raw scores of shape `[1, NUM_CATEGORIES]`.
    pub fn logits(&self, input: &EncodedInput) -> Result<Tensor> {
        let input_ids = Tensor::new(input.token_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let token_type_ids = Tensor::new(input.segment_ids.as_slice(), &self.device)?.unsqueeze(0)?;
        let attention_mask =
            Tensor::new(input.attention_mask.as_slice(), &self.device)?.unsqueeze(0)?;

        let hidden_states = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;

        // pooled output: dense + tanh over the [CLS] position
        let pooled = self.pooler.forward(&hidden_states.i((.., 0))?)?.tanh()?;
        let pooled = self.dropout.forward(&pooled, false)?;
        Ok(self.head.forward(&pooled)?)
    }

    /// Softmax of the logits in percent, in head output order.
    pub fn probabilities(&self, text: &str) -> Result<[f32; NUM_CATEGORIES]> {
        let input = self.encoder.encode(text)?;
        let logits = self.logits(&input)?;
        percentages(&logits)
    }
}

impl TopicPredictor for TopicClassifier {
    fn predict(&self, text: &str) -> Result<[CategoryScore; NUM_CATEGORIES]> {
        let probabilities = self.probabilities(text)?;
        log::debug!("probabilities: {:?}", probabilities);
        Ok(rank(probabilities))
    }
}

/// `[1, N]` logits to `N` percentages rounded to two decimals.
pub fn percentages(logits: &Tensor) -> Result<[f32; NUM_CATEGORIES]> {
    let probabilities = candle_nn::ops::softmax(&logits.to_dtype(DType::F32)?, D::Minus1)?;
    let probabilities: Vec<f32> = probabilities.squeeze(0)?.to_vec1()?;
    let actual = probabilities.len();
    let percentages: Vec<f32> = probabilities
        .into_iter()
        .map(|p| (p * 10_000.0).round() / 100.0)
        .collect();
    <[f32; NUM_CATEGORIES]>::try_from(percentages).map_err(|_| AppError::ScoreCount {
        expected: NUM_CATEGORIES,
        actual,
    })
}

fn weights(path: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let is_safetensors = path
        .extension()
        .map_or(false, |extension| extension == "safetensors");
    let variable_builder = if is_safetensors {
        unsafe { VarBuilder::from_mmaped_safetensors(&[path], DTYPE, device)? }
    } else {
        VarBuilder::from_pth(path, DTYPE, device)?
    };
    Ok(variable_builder)
}
