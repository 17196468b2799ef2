//! Speech in and out: synthesis, playback of the synthesized clip, and
//! recognition of a spoken city name.

pub mod player;
pub mod recognizer;
pub mod session;
pub mod synth;

pub use player::{AudioPlayer, CommandPlayer};
pub use recognizer::{CommandRecognizer, SpeechRecognizer};
pub use session::AudioSession;
pub use synth::{GoogleTts, SpeechSynthesizer};
