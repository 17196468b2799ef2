use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    error::{BuddyError, RecognitionError},
    language::Language,
    model::{DisplayResult, WeatherQueryResult},
    narration::{MIC_PROMPT, Narrator, SpeechOutcome, WELCOME},
    provider::{MISSING_API_KEY, WeatherProvider, provider_from_config},
    voice::{CommandRecognizer, SpeechRecognizer},
};

/// User actions the front end can trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    GetWeather { city: String, language: Language },
    RepeatInstructions { language: Language },
    UseMic { language: Language },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Weather {
        result: WeatherQueryResult,
        display: DisplayResult,
        speech: SpeechOutcome,
    },
    Instructions {
        speech: SpeechOutcome,
    },
    Heard {
        city: String,
        speech: SpeechOutcome,
    },
}

/// Rendering side of the application. Blocking errors are returned from
/// [`WeatherBuddy::handle`] instead of passing through here.
pub trait Presenter: Send + Sync {
    /// Called before the result is narrated.
    fn show_weather(&self, result: &WeatherQueryResult, display: &DisplayResult);

    fn show_heard(&self, city: &str);

    /// Non-blocking notice, e.g. audio could not be played.
    fn show_warning(&self, message: &str);
}

#[derive(Debug)]
pub struct WeatherBuddy {
    /// `None` until an API key is configured; only weather queries need it.
    provider: Option<Box<dyn WeatherProvider>>,
    narrator: Narrator,
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    busy: Mutex<()>,
}

impl WeatherBuddy {
    pub fn new(
        provider: Option<Box<dyn WeatherProvider>>,
        narrator: Narrator,
        recognizer: Option<Box<dyn SpeechRecognizer>>,
    ) -> Self {
        Self {
            provider,
            narrator,
            recognizer,
            busy: Mutex::new(()),
        }
    }

    /// Fails only on an unusable recognizer command. A missing API key is
    /// reported when a weather query is handled.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let provider = match provider_from_config(config) {
            Ok(provider) => Some(provider),
            Err(err) => {
                debug!(%err, "weather provider not configured");
                None
            }
        };
        let narrator = Narrator::from_config(config);
        let recognizer = match &config.voice.recognizer {
            Some(argv) => {
                Some(Box::new(CommandRecognizer::from_argv(argv)?) as Box<dyn SpeechRecognizer>)
            }
            None => None,
        };

        Ok(Self::new(provider, narrator, recognizer))
    }

    pub fn narrator(&self) -> &Narrator {
        &self.narrator
    }

    /// True while an event, including its narration, is being handled.
    pub fn is_busy(&self) -> bool {
        self.busy.try_lock().is_err()
    }

    /// Handle one event. Events are serialized: one arriving while another
    /// is still narrating waits for it to finish.
    pub async fn handle(
        &self,
        event: Event,
        presenter: &dyn Presenter,
    ) -> Result<Outcome, BuddyError> {
        let _busy = self.busy.lock().await;

        match event {
            Event::GetWeather { city, language } => {
                self.get_weather(&city, language, presenter).await
            }
            Event::RepeatInstructions { language } => {
                Ok(self.repeat_instructions(language, presenter).await)
            }
            Event::UseMic { language } => self.use_mic(language, presenter).await,
        }
    }

    async fn get_weather(
        &self,
        city: &str,
        language: Language,
        presenter: &dyn Presenter,
    ) -> Result<Outcome, BuddyError> {
        let provider = self
            .provider
            .as_deref()
            .ok_or_else(|| BuddyError::NotConfigured(MISSING_API_KEY.to_string()))?;

        let result = provider.fetch_weather(city).await.inspect_err(|err| {
            warn!(%err, city, "weather query failed");
        })?;

        let display = result.display(self.narrator.unit());
        presenter.show_weather(&result, &display);

        let speech = self.narrator.narrate(&result, language).await;
        report(&speech, presenter);

        let icon = display.icon;
        info!(city, ?icon, "weather shown");
        Ok(Outcome::Weather {
            result,
            display,
            speech,
        })
    }

    async fn repeat_instructions(&self, language: Language, presenter: &dyn Presenter) -> Outcome {
        let speech = self.narrator.speak(WELCOME, language).await;
        report(&speech, presenter);
        Outcome::Instructions { speech }
    }

    async fn use_mic(
        &self,
        language: Language,
        presenter: &dyn Presenter,
    ) -> Result<Outcome, BuddyError> {
        let recognizer = self.recognizer.as_deref().ok_or_else(|| {
            RecognitionError::ServiceUnavailable("no speech recognizer configured".to_string())
        })?;

        let prompt = self.narrator.speak(MIC_PROMPT, language).await;
        report(&prompt, presenter);

        let city = recognizer.recognize(language.code()).await.inspect_err(|err| {
            warn!(%err, "speech recognition failed");
        })?;
        presenter.show_heard(&city);

        let speech = self.narrator.speak(&format!("You said: {city}"), language).await;
        report(&speech, presenter);

        Ok(Outcome::Heard { city, speech })
    }
}

fn report(speech: &SpeechOutcome, presenter: &dyn Presenter) {
    if let SpeechOutcome::Degraded(message) = speech {
        presenter.show_warning(message);
    }
}
