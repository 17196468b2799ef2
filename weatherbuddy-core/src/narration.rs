use tracing::warn;

use crate::{
    config::Config,
    error::AudioError,
    language::Language,
    model::WeatherQueryResult,
    translate::{DEFAULT_TRANSLATE_URL, GoogleTranslator, Translator},
    units::TemperatureUnit,
    voice::{AudioPlayer, AudioSession, CommandPlayer, GoogleTts, SpeechSynthesizer, synth},
};

pub const WELCOME: &str =
    "Welcome to the Weather buddy! Please enter a city name and select your language.";

pub const MIC_PROMPT: &str = "Please say the city name.";

/// How a request to speak ended. Audio problems never fail the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechOutcome {
    Spoken,
    /// Narration is switched off in config.
    Muted,
    /// Nothing was played; carries the warning to show.
    Degraded(String),
}

#[derive(Debug)]
enum Output {
    Player(Box<dyn AudioPlayer>),
    Unavailable(AudioError),
    Muted,
}

impl Output {
    fn acquired(player: Result<Box<dyn AudioPlayer>, AudioError>) -> Self {
        match player {
            Ok(player) => Output::Player(player),
            Err(err) => {
                warn!(%err, "audio output unavailable, narration disabled");
                Output::Unavailable(err)
            }
        }
    }
}

/// Builds the spoken sentence for a result and plays it.
#[derive(Debug)]
pub struct Narrator {
    translator: Box<dyn Translator>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    output: Output,
    unit: TemperatureUnit,
}

impl Narrator {
    /// `player` is the outcome of acquiring audio output at startup; an error
    /// leaves the narrator able to compose text but not to play it.
    pub fn new(
        translator: Box<dyn Translator>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        player: Result<Box<dyn AudioPlayer>, AudioError>,
    ) -> Self {
        Self {
            translator,
            synthesizer,
            output: Output::acquired(player),
            unit: TemperatureUnit::default(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let translator = GoogleTranslator::with_url(
            config.voice.translate_url.as_deref().unwrap_or(DEFAULT_TRANSLATE_URL),
        );
        let synthesizer = GoogleTts::with_url(
            config.voice.tts_url.as_deref().unwrap_or(synth::DEFAULT_TTS_URL),
        );

        let output = if config.narration.enabled {
            let player = CommandPlayer::from_config(&config.voice)
                .map(|p| Box::new(p) as Box<dyn AudioPlayer>);
            Output::acquired(player)
        } else {
            Output::Muted
        };

        Self {
            translator: Box::new(translator),
            synthesizer: Box::new(synthesizer),
            output,
            unit: config.narration.unit,
        }
    }

    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    pub fn muted(mut self) -> Self {
        self.output = Output::Muted;
        self
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    /// The narration sentence, with the condition translated into `language`.
    /// A failed translation falls back to the provider's description.
    pub async fn compose_speech(&self, result: &WeatherQueryResult, language: Language) -> String {
        let description = match self
            .translator
            .translate(&result.condition_description, language.code())
            .await
        {
            Ok(translated) => translated,
            Err(err) => {
                warn!(%err, language = language.code(), "translation failed, using original text");
                result.condition_description.clone()
            }
        };

        format!(
            "The temperature in {} is {} {} with {}.",
            result.city,
            self.unit.rounded(result.temperature_k),
            self.unit.spoken(),
            description
        )
    }

    /// Compose and speak the sentence for `result`.
    pub async fn narrate(&self, result: &WeatherQueryResult, language: Language) -> SpeechOutcome {
        if matches!(self.output, Output::Muted) {
            return SpeechOutcome::Muted;
        }

        let text = self.compose_speech(result, language).await;
        self.speak(&text, language).await
    }

    /// Synthesize `text` in `language` and wait until playback has finished.
    pub async fn speak(&self, text: &str, language: Language) -> SpeechOutcome {
        let player = match &self.output {
            Output::Player(player) => player.as_ref(),
            Output::Muted => return SpeechOutcome::Muted,
            Output::Unavailable(err) => return SpeechOutcome::Degraded(err.to_string()),
        };

        match self.play(player, text, language.code()).await {
            Ok(()) => SpeechOutcome::Spoken,
            Err(err) => {
                warn!(%err, "speech playback failed");
                SpeechOutcome::Degraded(err.to_string())
            }
        }
    }

    async fn play(
        &self,
        player: &dyn AudioPlayer,
        text: &str,
        language_code: &str,
    ) -> Result<(), AudioError> {
        let audio = self.synthesizer.synthesize(text, language_code).await?;

        let session = AudioSession::create(&audio)?;
        let played = player.play(session.path()).await;

        if let Err(err) = session.close() {
            warn!(%err, "could not remove temporary audio file");
        }

        played
    }
}
