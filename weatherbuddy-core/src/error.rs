use thiserror::Error;

/// Failures of a weather query. Both are shown to the user.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Network/HTTP failure or a body that lacks the expected fields.
    #[error("An error occurred: {0}")]
    Transport(String),

    /// The provider answered with a non-success `cod` and this message.
    #[error("Error: {0}")]
    ProviderRejected(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("Sorry, I could not understand the audio.")]
    NotUnderstood,

    #[error("Sorry, there was an issue with the speech recognition service.")]
    ServiceUnavailable(String),
}

/// Non-fatal: narration falls back to the untranslated text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Translation error: {0}")]
pub struct TranslationError(pub String);

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        TranslationError(err.to_string())
    }
}

/// Non-fatal: narration is skipped and a warning is shown instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("Audio playback is not available. Please check your audio settings. ({0})")]
    Unavailable(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Audio playback failed: {0}")]
    Playback(String),
}

impl From<std::io::Error> for AudioError {
    fn from(err: std::io::Error) -> Self {
        AudioError::Playback(err.to_string())
    }
}

/// Errors that abort an event and are surfaced as a blocking notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuddyError {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Recognition(#[from] RecognitionError),

    /// The event needs configuration that is missing, e.g. the API key.
    #[error("{0}")]
    NotConfigured(String),
}
