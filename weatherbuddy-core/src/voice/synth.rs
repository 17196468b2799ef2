use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;
use tracing::debug;

use crate::error::AudioError;

pub const DEFAULT_TTS_URL: &str = "https://translate.google.com/translate_tts";

/// The TTS endpoint refuses longer inputs.
const MAX_CHUNK_CHARS: usize = 100;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Synthesize `text` spoken in `language_code`; returns an MP3 clip.
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>, AudioError>;
}

#[derive(Debug, Clone)]
pub struct GoogleTts {
    url: String,
    http: Client,
}

impl GoogleTts {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language_code: &str,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, AudioError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language_code),
                ("q", chunk),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AudioError::Synthesis(format!("failed to reach TTS service: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            return Err(AudioError::Synthesis(format!("TTS service returned status {status}")));
        }

        let bytes = res
            .bytes()
            .await
            .map_err(|e| AudioError::Synthesis(format!("failed to read TTS audio: {e}")))?;

        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>, AudioError> {
        let chunks = split_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(AudioError::Synthesis("nothing to speak".to_string()));
        }

        debug!(language_code, chunks = chunks.len(), "synthesizing speech");

        // MP3 frames can be concatenated as-is.
        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let clip = self.fetch_chunk(chunk, language_code, idx, chunks.len()).await?;
            audio.extend_from_slice(&clip);
        }

        Ok(audio)
    }
}

/// Split on whitespace into chunks of at most `max` characters. Words longer
/// than `max` are cut.
pub(crate) fn split_text(text: &str, max: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current.chars().count();

        if current_len > 0 && current_len + 1 + word_len <= max {
            current.push(' ');
            current.push_str(word);
            continue;
        }

        if current_len > 0 {
            chunks.push(std::mem::take(&mut current));
        }

        if word_len <= max {
            current.push_str(word);
        } else {
            let chars: Vec<char> = word.chars().collect();
            for piece in chars.chunks(max) {
                chunks.push(piece.iter().collect());
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
