use std::{env, path::PathBuf};

use super::schema::Settings;

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `CHORDLINK__`), then an
/// optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("CHORDLINK")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self
            .library
            .extensions
            .iter()
            .all(|e| e.trim().trim_start_matches('.').is_empty())
        {
            return Err("library.extensions must name at least one extension".to_string());
        }
        if self.ui.idle_poll_ms == 0 {
            return Err("ui.idle_poll_ms must be >= 1".to_string());
        }
        Ok(())
    }

    /// Folder to scan: the configured one, or `$HOME/Music/Songs`.
    pub fn music_folder(&self) -> PathBuf {
        self.library
            .folder
            .clone()
            .unwrap_or_else(default_music_folder)
    }

    /// Log file location: the configured one, or the XDG state default.
    pub fn log_file(&self) -> Option<PathBuf> {
        self.logging.file.clone().or_else(default_log_path)
    }
}

/// Resolve the config path from `CHORDLINK_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("CHORDLINK_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/chordlink/config.toml`
/// or `~/.config/chordlink/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"))
    };

    config_home.map(|d| d.join("chordlink").join("config.toml"))
}

/// `$HOME/Music/Songs`, or `Songs` in the working directory without `HOME`.
pub fn default_music_folder() -> PathBuf {
    match env::var_os("HOME") {
        Some(home) => PathBuf::from(home).join("Music").join("Songs"),
        None => PathBuf::from("Songs"),
    }
}

/// `$XDG_STATE_HOME/chordlink/chordlink.log` or `~/.local/state/chordlink/chordlink.log`.
pub fn default_log_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else {
        env::var_os("HOME").map(|home| PathBuf::from(home).join(".local").join("state"))
    };

    state_home.map(|d| d.join("chordlink").join("chordlink.log"))
}
