use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/chordlink/config.toml` or `~/.config/chordlink/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `CHORDLINK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub audio: AudioSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Folder scanned for songs. Created on first scan when missing.
    ///
    /// `None` means `$HOME/Music/Songs`.
    pub folder: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to include hidden files (dotfiles).
    pub include_hidden: bool,
    /// Whether symlinked files count as songs.
    pub follow_links: bool,
    /// Probe each file's tags for its duration while scanning.
    pub read_durations: bool,
    /// Joiner placed between the artist and title parts of a display name.
    pub display_separator: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            folder: None,
            extensions: vec!["mp3".into()],
            include_hidden: true,
            follow_links: true,
            read_durations: true,
            display_separator: " - ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 300,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Title printed in the main menu banner.
    pub header_text: String,
    /// How long a prompt waits for a key before the control loop gets a turn
    /// to check for finished tracks (milliseconds).
    pub idle_poll_ms: u64,
    /// What happens to playback when leaving the controls menu.
    pub on_back: BackAction,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: "CHORDLINK MUSIC PLAYER".to_string(),
            idle_poll_ms: 200,
            on_back: BackAction::Pause,
        }
    }
}

#[derive(Debug, Copy, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum BackAction {
    #[default]
    Pause,
    Stop,
    /// Leave the song playing in the background.
    Keep,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, used when `RUST_LOG` is unset.
    pub level: String,
    /// Log file path. `None` means `$XDG_STATE_HOME/chordlink/chordlink.log`.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
