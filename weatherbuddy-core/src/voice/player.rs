use async_trait::async_trait;
use std::{
    ffi::OsStr,
    fmt::Debug,
    io::ErrorKind,
    path::{Path, PathBuf},
    process::Stdio,
};
use tokio::process::Command;
use tracing::debug;

use crate::{config::VoiceConfig, error::AudioError};

/// Players tried in order when none is configured, with the flags that make
/// them play a single file without a window and exit.
const KNOWN_PLAYERS: &[(&str, &[&str])] = &[
    ("mpv", &["--really-quiet", "--no-video"]),
    ("ffplay", &["-nodisp", "-autoexit", "-loglevel", "quiet"]),
    ("mpg123", &["-q"]),
    ("afplay", &[]),
];

#[async_trait]
pub trait AudioPlayer: Send + Sync + Debug {
    /// Play the file and return once playback has finished.
    async fn play(&self, path: &Path) -> Result<(), AudioError>;
}

/// Plays audio by running an external player and awaiting its exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandPlayer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandPlayer {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_argv(argv: &[String]) -> Result<Self, AudioError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| AudioError::Unavailable("player command is empty".to_string()))?;
        Ok(Self::new(program, args.to_vec()))
    }

    /// Use the configured player, or look for a known one on `PATH`.
    pub fn from_config(voice: &VoiceConfig) -> Result<Self, AudioError> {
        match &voice.player {
            Some(argv) => Self::from_argv(argv),
            None => Self::detect(),
        }
    }

    pub fn detect() -> Result<Self, AudioError> {
        let path_var = std::env::var_os("PATH").unwrap_or_default();
        Self::detect_in(&path_var)
    }

    fn detect_in(path_var: &OsStr) -> Result<Self, AudioError> {
        for (name, args) in KNOWN_PLAYERS {
            if let Some(program) = find_in_path(name, path_var) {
                debug!(player = %program.display(), "using audio player");
                return Ok(Self::new(program, args.iter().map(|a| a.to_string()).collect()));
            }
        }

        let tried: Vec<&str> = KNOWN_PLAYERS.iter().map(|(name, _)| *name).collect();
        Err(AudioError::Unavailable(format!(
            "no audio player found (tried {})",
            tried.join(", ")
        )))
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl AudioPlayer for CommandPlayer {
    async fn play(&self, path: &Path) -> Result<(), AudioError> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => {
                    AudioError::Unavailable(format!("cannot run {}: {e}", self.program.display()))
                }
                _ => AudioError::Playback(e.to_string()),
            })?;

        if !status.success() {
            return Err(AudioError::Playback(format!(
                "{} exited with {status}",
                self.program.display()
            )));
        }

        Ok(())
    }
}

fn find_in_path(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    let file_name = format!("{name}{}", std::env::consts::EXE_SUFFIX);
    std::env::split_paths(path_var)
        .map(|dir| dir.join(&file_name))
        .find(|candidate| candidate.is_file())
}
