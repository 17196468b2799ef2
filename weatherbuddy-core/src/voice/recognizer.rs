use async_trait::async_trait;
use std::{fmt::Debug, process::Stdio};
use tokio::process::Command;
use tracing::debug;

use crate::error::RecognitionError;

#[async_trait]
pub trait SpeechRecognizer: Send + Sync + Debug {
    /// Listen on the microphone and return what was said.
    async fn recognize(&self, language_code: &str) -> Result<String, RecognitionError>;
}

/// Runs an external capture-and-transcribe command and reads the recognized
/// text from its stdout. `{lang}` in any argument is replaced by the language
/// code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn from_argv(argv: &[String]) -> Result<Self, RecognitionError> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            RecognitionError::ServiceUnavailable("recognizer command is empty".to_string())
        })?;

        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[async_trait]
impl SpeechRecognizer for CommandRecognizer {
    async fn recognize(&self, language_code: &str) -> Result<String, RecognitionError> {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|a| a.replace("{lang}", language_code))
            .collect();
        debug!(program = %self.program, "listening for speech");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| RecognitionError::ServiceUnavailable(format!("{}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::ServiceUnavailable(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(RecognitionError::NotUnderstood);
        }

        Ok(text)
    }
}
