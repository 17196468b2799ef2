use std::{io::Write, path::Path};

use tempfile::TempPath;

use crate::error::AudioError;

/// The single temporary audio file backing one playback.
///
/// Created right before playback; the file is removed when the session is
/// closed or dropped, whichever path the playback took.
#[derive(Debug)]
pub struct AudioSession {
    path: TempPath,
}

impl AudioSession {
    pub fn create(audio: &[u8]) -> Result<Self, AudioError> {
        Self::create_in(&std::env::temp_dir(), audio)
    }

    pub fn create_in(dir: &Path, audio: &[u8]) -> Result<Self, AudioError> {
        let mut file = tempfile::Builder::new()
            .prefix("weatherbuddy-")
            .suffix(".mp3")
            .tempfile_in(dir)
            .map_err(|e| AudioError::Playback(format!("failed to create audio file: {e}")))?;

        file.write_all(audio)?;
        file.flush()?;

        Ok(Self { path: file.into_temp_path() })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now, reporting a failure instead of ignoring it.
    pub fn close(self) -> Result<(), AudioError> {
        self.path
            .close()
            .map_err(|e| AudioError::Playback(format!("failed to remove audio file: {e}")))
    }
}
