// Pretrained BERT tokenizer with fixed-length padding
use std::path::Path;

use tokenizers::decoders::wordpiece::WordPiece as WordPieceDecoder;
use tokenizers::models::wordpiece::WordPiece;
use tokenizers::normalizers::BertNormalizer;
use tokenizers::pre_tokenizers::bert::BertPreTokenizer;
use tokenizers::processors::bert::BertProcessing;
use tokenizers::{AddedToken, PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

use crate::error::{AppError, Result};

const PAD_TOKEN: &str = "[PAD]";
const UNK_TOKEN: &str = "[UNK]";
const CLS_TOKEN: &str = "[CLS]";
const SEP_TOKEN: &str = "[SEP]";
const MASK_TOKEN: &str = "[MASK]";

/// Model inputs for one text, each exactly `max_len` long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedInput {
    pub token_ids: Vec<u32>,
    pub attention_mask: Vec<u32>,
    pub segment_ids: Vec<u32>,
}

pub struct TextEncoder {
    tokenizer: Tokenizer,
    max_len: usize,
}

impl TextEncoder {
    /// Loads `tokenizer.json` from `dir`, or builds a WordPiece tokenizer
    /// from `vocab.txt` when only the vocabulary was saved.
    pub fn load<P: AsRef<Path>>(dir: P, max_len: usize) -> Result<Self> {
        let dir = dir.as_ref();
        let tokenizer_json = dir.join("tokenizer.json");
        let vocab_txt = dir.join("vocab.txt");

        let tokenizer = if tokenizer_json.exists() {
            log::info!("loading tokenizer from {}", tokenizer_json.display());
            Tokenizer::from_file(&tokenizer_json).map_err(AppError::tokenizer)?
        } else if vocab_txt.exists() {
            log::info!("building WordPiece tokenizer from {}", vocab_txt.display());
            wordpiece_from_vocab(&vocab_txt)?
        } else {
            return Err(AppError::MissingFile(vocab_txt));
        };

        Self::from_tokenizer(tokenizer, max_len)
    }

    pub fn from_tokenizer(mut tokenizer: Tokenizer, max_len: usize) -> Result<Self> {
        let pad_id = tokenizer.token_to_id(PAD_TOKEN).unwrap_or(0);
        tokenizer
            .with_padding(Some(PaddingParams {
                strategy: PaddingStrategy::Fixed(max_len),
                pad_id,
                pad_token: PAD_TOKEN.to_string(),
                ..Default::default()
            }))
            .with_truncation(Some(TruncationParams {
                max_length: max_len,
                ..Default::default()
            }))
            .map_err(AppError::tokenizer)?;
        Ok(Self { tokenizer, max_len })
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn encode(&self, text: &str) -> Result<EncodedInput> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(AppError::tokenizer)?;
        Ok(EncodedInput {
            token_ids: encoding.get_ids().to_vec(),
            attention_mask: encoding.get_attention_mask().to_vec(),
            segment_ids: encoding.get_type_ids().to_vec(),
        })
    }

    /// Text for `ids` with special and padding tokens dropped.
    pub fn decode(&self, ids: &[u32]) -> Result<String> {
        self.tokenizer.decode(ids, true).map_err(AppError::tokenizer)
    }

    pub fn token_to_id(&self, token: &str) -> Option<u32> {
        self.tokenizer.token_to_id(token)
    }
}

fn wordpiece_from_vocab(vocab: &Path) -> Result<Tokenizer> {
    let wordpiece = WordPiece::from_file(&vocab.to_string_lossy())
        .unk_token(UNK_TOKEN.to_string())
        .build()
        .map_err(AppError::tokenizer)?;
    let mut tokenizer = Tokenizer::new(wordpiece);

    let special_id = |tokenizer: &Tokenizer, token: &str| {
        tokenizer
            .token_to_id(token)
            .ok_or_else(|| AppError::Tokenizer(format!("{} missing from vocabulary", token)))
    };
    let cls = (CLS_TOKEN.to_string(), special_id(&tokenizer, CLS_TOKEN)?);
    let sep = (SEP_TOKEN.to_string(), special_id(&tokenizer, SEP_TOKEN)?);

    tokenizer
        .with_normalizer(Some(BertNormalizer::default()))
        .with_pre_tokenizer(Some(BertPreTokenizer))
        .with_post_processor(Some(BertProcessing::new(sep, cls)))
        .with_decoder(Some(WordPieceDecoder::default()));

    // register the vocabulary's own special tokens so decoding can skip them
    let specials: Vec<AddedToken> = [PAD_TOKEN, UNK_TOKEN, CLS_TOKEN, SEP_TOKEN, MASK_TOKEN]
        .into_iter()
        .filter(|token| tokenizer.token_to_id(token).is_some())
        .map(|token| AddedToken::from(token, true))
        .collect();
    tokenizer.add_special_tokens(&specials);
    Ok(tokenizer)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;

    pub(crate) const VOCAB: &[&str] = &[
        "[PAD]", "[UNK]", "[CLS]", "[SEP]", "[MASK]", ".", ",", "general", "relativity", "black",
        "hole", "##s", "quantum", "field", "theory", "we", "study", "the", "of", "gravity",
        "waves", "in", "space",
    ];

    fn write_vocab(dir: &Path) {
        let mut file = std::fs::File::create(dir.join("vocab.txt")).unwrap();
        for token in VOCAB {
            writeln!(file, "{}", token).unwrap();
        }
    }

    pub(crate) fn encoder(max_len: usize) -> (tempfile::TempDir, TextEncoder) {
        let dir = tempfile::tempdir().unwrap();
        write_vocab(dir.path());
        let encoder = TextEncoder::load(dir.path(), max_len).unwrap();
        (dir, encoder)
    }

    #[test]
    fn short_input_is_padded_to_max_len() {
        let (_dir, encoder) = encoder(256);
        let encoded = encoder.encode("general relativity").unwrap();

        assert_eq!(encoded.token_ids.len(), 256);
        assert_eq!(encoded.attention_mask.len(), 256);
        assert_eq!(encoded.segment_ids.len(), 256);

        let cls = encoder.token_to_id("[CLS]").unwrap();
        let sep = encoder.token_to_id("[SEP]").unwrap();
        let pad = encoder.token_to_id("[PAD]").unwrap();
        assert_eq!(&encoded.token_ids[..4], &[cls, 7, 8, sep]);
        assert!(encoded.token_ids[4..].iter().all(|&id| id == pad));
        assert_eq!(&encoded.attention_mask[..5], &[1, 1, 1, 1, 0]);
        assert!(encoded.segment_ids.iter().all(|&id| id == 0));
    }

    #[test]
    fn long_input_is_truncated_with_boundary_tokens() {
        let (_dir, encoder) = encoder(256);
        let text = vec!["quantum field theory"; 200].join(" ");
        let encoded = encoder.encode(&text).unwrap();

        assert_eq!(encoded.token_ids.len(), 256);
        assert_eq!(encoded.token_ids[0], encoder.token_to_id("[CLS]").unwrap());
        assert_eq!(encoded.token_ids[255], encoder.token_to_id("[SEP]").unwrap());
        assert!(encoded.attention_mask.iter().all(|&m| m == 1));
    }

    #[test]
    fn decode_reconstructs_lowercase_text() {
        let (_dir, encoder) = encoder(256);
        let text = "general relativity. we study black holes";
        let encoded = encoder.encode(text).unwrap();
        assert_eq!(encoder.decode(&encoded.token_ids).unwrap(), text);

        let upper = encoder.encode("General Relativity").unwrap();
        assert_eq!(encoder.decode(&upper.token_ids).unwrap(), "general relativity");
    }

    #[test]
    fn encoding_is_deterministic() {
        let (_dir, encoder) = encoder(32);
        let first = encoder.encode("gravity waves in space").unwrap();
        let second = encoder.encode("gravity waves in space").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_vocabulary_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        match TextEncoder::load(dir.path(), 256) {
            Err(AppError::MissingFile(path)) => assert!(path.ends_with("vocab.txt")),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("loaded a tokenizer from an empty directory"),
        }
    }
}
