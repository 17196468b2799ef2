//! Core library for `weatherbuddy`, a talking weather lookup.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather query and its normalized result
//! - Temperature conversion and condition icon classification
//! - Narration: translation, speech synthesis and playback
//! - The event dispatcher driven by a front end
//!
//! It is used by `weatherbuddy-cli`, but can also be reused by other front ends.

pub mod app;
pub mod condition;
pub mod config;
pub mod error;
pub mod language;
pub mod model;
pub mod narration;
pub mod provider;
pub mod translate;
pub mod units;
pub mod voice;

#[cfg(test)]
mod testing;

pub use app::{Event, Outcome, Presenter, WeatherBuddy};
pub use condition::WeatherIcon;
pub use config::Config;
pub use error::{AudioError, BuddyError, QueryError, RecognitionError, TranslationError};
pub use language::{Language, code_for};
pub use model::{DisplayResult, WeatherQueryResult};
pub use narration::{Narrator, SpeechOutcome};
pub use provider::WeatherProvider;
pub use units::{TemperatureUnit, to_fahrenheit};
