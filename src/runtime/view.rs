//! Menu text.

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::audio::AudioEngine;
use crate::library::{Track, format_duration};
use crate::player::{Outcome, PlaybackState, Player};

/// `styled` adds terminal escapes, so it should only be set for a real terminal.
pub fn main_menu(out: &mut impl Write, header: &str, styled: bool) -> io::Result<()> {
    let rule = "=".repeat(50);
    let header = format!("{header:^50}");
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    if styled {
        writeln!(out, "{}", header.bold())?;
    } else {
        writeln!(out, "{header}")?;
    }
    writeln!(out, "{rule}")?;
    writeln!(out, "1. Play Music")?;
    writeln!(out, "2. Exit")?;
    writeln!(out, "{rule}")
}

pub fn controls_menu<E: AudioEngine>(out: &mut impl Write, player: &Player<E>) -> io::Result<()> {
    let rule = "-".repeat(50);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "PLAYER CONTROLS")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "1. Play/Pause")?;
    writeln!(out, "2. Next Song")?;
    writeln!(out, "3. Previous Song")?;
    writeln!(out, "4. Show Playlist & Change Song")?;
    writeln!(out, "5. Rescan Folder")?;
    writeln!(out, "6. Back to Main Menu")?;

    if let Some(line) = status_line(player.state(), player.playlist()) {
        writeln!(out)?;
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{rule}")
}

fn status_line(state: PlaybackState, tracks: &[Track]) -> Option<String> {
    let (label, index) = match state {
        PlaybackState::Playing(i) => ("▶ Playing", i),
        PlaybackState::Paused(i) => ("⏸ Paused", i),
        PlaybackState::Stopped(Some(i)) => ("■ Stopped", i),
        PlaybackState::Stopped(None) | PlaybackState::Empty => return None,
    };
    let track = tracks.get(index)?;
    Some(format!("{label}: {}", track.display))
}

/// Numbered listing with a marker on the selected track.
pub fn playlist<E: AudioEngine>(out: &mut impl Write, player: &Player<E>) -> io::Result<()> {
    let tracks = player.playlist();
    if tracks.is_empty() {
        return writeln!(out, "The playlist is empty.");
    }

    let current = player.state().current_index();
    writeln!(out)?;
    writeln!(out, "Playlist: ({} songs):", tracks.len())?;
    for (i, track) in tracks.iter().enumerate() {
        let marker = if Some(i) == current { " >>> " } else { "     " };
        match track.duration {
            Some(d) => writeln!(
                out,
                "{marker}{}. {} ({})",
                i + 1,
                track.display,
                format_duration(d)
            )?,
            None => writeln!(out, "{marker}{}. {}", i + 1, track.display)?,
        }
    }
    Ok(())
}

/// Describe the result of a controller call for the user.
pub fn outcome_text(outcome: Outcome, tracks: &[Track]) -> String {
    let name = |i: usize| {
        tracks
            .get(i)
            .map(|t| t.display.as_str())
            .unwrap_or("unknown track")
    };

    match outcome {
        Outcome::Started(i) => format!("▶ Playing: {}", name(i)),
        Outcome::Paused(_) => "⏸ Music paused".to_string(),
        Outcome::Resumed(_) => "▶ Music resumed".to_string(),
        Outcome::Stopped(_) => "■ Music stopped".to_string(),
        Outcome::Unchanged(reason) => reason.to_string(),
    }
}
