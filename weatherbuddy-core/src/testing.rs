//! In-memory stand-ins for the external services, shared by unit tests.

use async_trait::async_trait;
use std::{
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    app::Presenter,
    error::{AudioError, QueryError, RecognitionError, TranslationError},
    model::{DisplayResult, WeatherQueryResult},
    provider::WeatherProvider,
    translate::Translator,
    voice::{AudioPlayer, SpeechRecognizer, SpeechSynthesizer},
};

pub type Log<T> = Arc<Mutex<Vec<T>>>;

pub fn clear_sky() -> WeatherQueryResult {
    WeatherQueryResult {
        city: "Testville".into(),
        temperature_k: 300.0,
        condition_id: 800,
        condition_description: "clear sky".into(),
        observed_at: None,
    }
}

#[derive(Debug, Default)]
pub struct FixedTranslator {
    reply: Option<String>,
    calls: Log<(String, String)>,
}

impl FixedTranslator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Log::default(),
        }
    }

    /// Returns its input unchanged.
    pub fn echo() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Log<(String, String)> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Translator for FixedTranslator {
    async fn translate(&self, text: &str, target: &str) -> Result<String, TranslationError> {
        self.calls.lock().unwrap().push((text.to_string(), target.to_string()));
        Ok(self.reply.clone().unwrap_or_else(|| text.to_string()))
    }
}

#[derive(Debug)]
pub struct FailingTranslator;

#[async_trait]
impl Translator for FailingTranslator {
    async fn translate(&self, _text: &str, _target: &str) -> Result<String, TranslationError> {
        Err(TranslationError("service unreachable".into()))
    }
}

#[derive(Debug, Default)]
pub struct RecordingSynth {
    fail: bool,
    spoken: Log<(String, String)>,
}

impl RecordingSynth {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn spoken(&self) -> Log<(String, String)> {
        Arc::clone(&self.spoken)
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSynth {
    async fn synthesize(&self, text: &str, language_code: &str) -> Result<Vec<u8>, AudioError> {
        if self.fail {
            return Err(AudioError::Synthesis("quota exceeded".into()));
        }
        self.spoken.lock().unwrap().push((text.to_string(), language_code.to_string()));
        Ok(b"ID3fake".to_vec())
    }
}

/// Records each played path and whether the file existed during playback.
#[derive(Debug, Default)]
pub struct FakePlayer {
    fail: bool,
    seen: Log<(PathBuf, bool)>,
}

impl FakePlayer {
    pub fn failing() -> Self {
        Self { fail: true, ..Self::default() }
    }

    pub fn seen(&self) -> Log<(PathBuf, bool)> {
        Arc::clone(&self.seen)
    }
}

#[async_trait]
impl AudioPlayer for FakePlayer {
    async fn play(&self, path: &Path) -> Result<(), AudioError> {
        self.seen.lock().unwrap().push((path.to_path_buf(), path.exists()));
        if self.fail {
            return Err(AudioError::Playback("device busy".into()));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct FakeProvider {
    response: Result<WeatherQueryResult, QueryError>,
    delay: Option<Duration>,
    pub calls: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
}

impl FakeProvider {
    pub fn new(response: Result<WeatherQueryResult, QueryError>) -> Self {
        Self {
            response,
            delay: None,
            calls: Arc::default(),
            in_flight: Arc::default(),
            max_in_flight: Arc::default(),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl WeatherProvider for FakeProvider {
    async fn fetch_weather(&self, city: &str) -> Result<WeatherQueryResult, QueryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.response.clone().map(|mut r| {
            r.city = city.to_string();
            r
        })
    }
}

#[derive(Debug)]
pub struct FakeRecognizer(pub Result<String, RecognitionError>);

#[async_trait]
impl SpeechRecognizer for FakeRecognizer {
    async fn recognize(&self, _language_code: &str) -> Result<String, RecognitionError> {
        self.0.clone()
    }
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub weather: Mutex<Vec<DisplayResult>>,
    pub heard: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl Presenter for RecordingPresenter {
    fn show_weather(&self, _result: &WeatherQueryResult, display: &DisplayResult) {
        self.weather.lock().unwrap().push(display.clone());
    }

    fn show_heard(&self, city: &str) {
        self.heard.lock().unwrap().push(city.to_string());
    }

    fn show_warning(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
