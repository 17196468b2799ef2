use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::fmt::Debug;
use tracing::debug;

use crate::error::TranslationError;

pub const DEFAULT_TRANSLATE_URL: &str = "https://translate.googleapis.com/translate_a/single";

#[async_trait]
pub trait Translator: Send + Sync + Debug {
    /// Translate `text` into the language identified by `target` (e.g. "zh-cn").
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError>;
}

/// Client for the public Google Translate endpoint used by browser widgets.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    url: String,
    http: Client,
}

impl GoogleTranslator {
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError> {
        debug!(target, "translating text");

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(TranslationError(format!("translation service returned status {status}")));
        }

        parse_translation(&body)
    }
}

/// The response is a nested array; the first element lists
/// `[translated, original, ...]` segments which are joined in order.
fn parse_translation(body: &str) -> Result<String, TranslationError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| TranslationError(format!("invalid translation response: {e}")))?;

    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError("translation response has no segments".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.trim().is_empty() {
        return Err(TranslationError("translation response was empty".to_string()));
    }

    Ok(translated)
}
