use std::io;
use std::process::{Command, Stdio};

/// Playback boundary. The session engine hands over a resolved URL and does
/// not track what happens to it.
pub trait MediaPlayer: Send + Sync {
    fn play(&self, url: &str) -> io::Result<()>;
}

/// Spawns an external player process (mpv, ffplay, ...) without waiting on
/// it.
#[derive(Debug, Clone)]
pub struct CommandPlayer {
    command: String,
}

impl CommandPlayer {
    pub fn new<S: Into<String>>(command: S) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl MediaPlayer for CommandPlayer {
    fn play(&self, url: &str) -> io::Result<()> {
        Command::new(&self.command)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(drop)
    }
}

/// Stand-in when no player command is configured; logs the URL instead of
/// playing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlayer;

impl MediaPlayer for NullPlayer {
    fn play(&self, url: &str) -> io::Result<()> {
        tracing::info!(%url, "no player configured, skipping playback");
        Ok(())
    }
}
