use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::audio::AudioEngine;
use crate::config::{BackAction, Settings};
use crate::library;
use crate::player::{Outcome, PlayerError, Player};

use super::prompt::{Input, Prompt};
use super::view;

/// What a prompt produced once idle waits are filtered out.
enum Reply {
    Line(String),
    Interrupted,
    Closed,
}

/// Whether a sub-menu hands control back to its parent or ends the program.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Turn a 1-based track number typed by the user into a playlist index.
pub fn parse_track_number(input: &str, len: usize) -> Result<usize, String> {
    let number: i64 = input
        .trim()
        .parse()
        .map_err(|_| "Please enter a valid number!".to_string())?;

    match usize::try_from(number) {
        Ok(n) if (1..=len).contains(&n) => Ok(n - 1),
        _ => Err(format!("Please enter a number between 1 and {len}")),
    }
}

/// The menu-driven front end. Owns the prompt and output for its lifetime and
/// borrows the player it drives.
pub struct Menu<'a, E: AudioEngine, P: Prompt, W: Write> {
    player: &'a mut Player<E>,
    prompt: P,
    out: W,
    settings: &'a Settings,
    folder: PathBuf,
    /// A prompt line is on screen without its newline yet.
    mid_prompt: bool,
    styled: bool,
}

impl<'a, E: AudioEngine, P: Prompt, W: Write> Menu<'a, E, P, W> {
    pub fn new(
        player: &'a mut Player<E>,
        prompt: P,
        out: W,
        settings: &'a Settings,
        folder: PathBuf,
    ) -> Self {
        Self {
            player,
            prompt,
            out,
            settings,
            folder,
            mid_prompt: false,
            styled: false,
        }
    }

    /// Emit terminal styling (bold header). Off by default.
    pub fn styled(mut self, styled: bool) -> Self {
        self.styled = styled;
        self
    }

    /// Main menu loop. Returns when the user exits, interrupts, or closes input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            view::main_menu(&mut self.out, &self.settings.ui.header_text, self.styled)?;

            match self.ask("Enter your choice (1-2): ")? {
                Reply::Line(choice) => match choice.trim() {
                    "1" => {
                        if self.music_mode()? == Flow::Exit {
                            return Ok(());
                        }
                    }
                    "2" => {
                        writeln!(self.out, "Thank you for using ChordLink! Goodbye!")?;
                        return Ok(());
                    }
                    _ => writeln!(self.out, "Invalid choice! Please enter 1 or 2.")?,
                },
                Reply::Interrupted => {
                    writeln!(self.out, "Interrupted by user. Shutting down...")?;
                    return Ok(());
                }
                Reply::Closed => return Ok(()),
            }
        }
    }

    /// Wait for a reply, checking playback once per iteration.
    fn ask(&mut self, prompt: &str) -> io::Result<Reply> {
        loop {
            self.poll_playback()?;

            let input = self.prompt.read_line(prompt)?;
            self.mid_prompt = input == Input::Idle;
            match input {
                Input::Idle => continue,
                Input::Line(line) => return Ok(Reply::Line(line)),
                Input::Interrupted => return Ok(Reply::Interrupted),
                Input::Closed => return Ok(Reply::Closed),
            }
        }
    }

    fn poll_playback(&mut self) -> io::Result<()> {
        let message = match self.player.poll_track_end() {
            Ok(None) => return Ok(()),
            Ok(Some(outcome)) => format!(
                "Song finished, playing next... {}",
                view::outcome_text(outcome, self.player.playlist())
            ),
            Err(e) => {
                error!(error = %e, "auto-advance failed");
                format!("Song finished, but the next one could not start: {e}")
            }
        };

        if self.mid_prompt {
            writeln!(self.out)?;
            self.mid_prompt = false;
        }
        writeln!(self.out, "{message}")
    }

    fn report(&mut self, result: Result<Outcome, PlayerError>) -> io::Result<()> {
        let line = match result {
            Ok(outcome) => view::outcome_text(outcome, self.player.playlist()),
            Err(e) => {
                warn!(error = %e, "player command failed");
                format!("Error: {e}")
            }
        };
        writeln!(self.out, "{line}")
    }

    /// Rescan the folder into the player. Returns whether any songs were found.
    fn load_music(&mut self) -> io::Result<bool> {
        match library::scan(&self.folder, &self.settings.library) {
            Ok(tracks) => {
                let count = tracks.len();
                self.player.load(tracks);
                if count == 0 {
                    let kinds = self.settings.library.extensions.join("/").to_uppercase();
                    writeln!(
                        self.out,
                        "No {kinds} files found in {}",
                        self.folder.display()
                    )?;
                } else {
                    writeln!(self.out, "Loaded {count} songs")?;
                }
                Ok(count > 0)
            }
            Err(e) => {
                error!(error = %e, "scan failed");
                writeln!(self.out, "Error: {e}")?;
                Ok(false)
            }
        }
    }

    /// Scan, pick a first song, then hand over to the controls menu.
    fn music_mode(&mut self) -> io::Result<Flow> {
        info!(folder = %self.folder.display(), "entering music mode");
        if !self.load_music()? {
            return Ok(Flow::Continue);
        }
        view::playlist(&mut self.out, self.player)?;
        // Prompts are redrawn in place on every idle wait, so they stay on one line.
        writeln!(self.out)?;

        loop {
            let len = self.player.playlist().len();
            let prompt = format!("Enter song number to play (1-{len}), or Enter for the first: ");
            let choice = match self.ask(&prompt)? {
                Reply::Line(choice) => choice,
                Reply::Interrupted => {
                    writeln!(self.out, "Returning to main menu...")?;
                    return Ok(Flow::Continue);
                }
                Reply::Closed => return Ok(Flow::Exit),
            };

            let index = if choice.trim().is_empty() {
                0
            } else {
                match parse_track_number(&choice, len) {
                    Ok(index) => index,
                    Err(msg) => {
                        writeln!(self.out, "{msg}")?;
                        continue;
                    }
                }
            };

            let result = self.player.play_at(index);
            let started = result.is_ok();
            self.report(result)?;
            if started {
                break;
            }
        }

        self.controls()
    }

    fn controls(&mut self) -> io::Result<Flow> {
        loop {
            view::controls_menu(&mut self.out, self.player)?;

            let choice = match self.ask("Enter your choice (1-6): ")? {
                Reply::Line(choice) => choice,
                Reply::Interrupted => {
                    writeln!(self.out, "Returning to main menu...")?;
                    return Ok(Flow::Continue);
                }
                Reply::Closed => return Ok(Flow::Exit),
            };

            match choice.trim() {
                "1" => {
                    let result = self.player.toggle_play_pause();
                    self.report(result)?;
                }
                "2" => {
                    writeln!(self.out, "⏭ Next song...")?;
                    let result = self.player.next();
                    self.report(result)?;
                }
                "3" => {
                    writeln!(self.out, "⏮ Previous song...")?;
                    let result = self.player.previous();
                    self.report(result)?;
                }
                "4" => {
                    if self.choose_song()? == Flow::Exit {
                        return Ok(Flow::Exit);
                    }
                }
                "5" => {
                    self.load_music()?;
                }
                "6" => {
                    writeln!(self.out, "Returning to main menu...")?;
                    match self.settings.ui.on_back {
                        BackAction::Pause => {
                            self.player.pause();
                        }
                        BackAction::Stop => {
                            self.player.stop();
                        }
                        BackAction::Keep => {}
                    }
                    return Ok(Flow::Continue);
                }
                _ => writeln!(
                    self.out,
                    "Invalid choice! Please enter a number between 1-6."
                )?,
            }
        }
    }

    fn choose_song(&mut self) -> io::Result<Flow> {
        view::playlist(&mut self.out, self.player)?;
        let len = self.player.playlist().len();
        if len == 0 {
            return Ok(Flow::Continue);
        }

        let prompt = format!("Enter song number to play (1-{len}) or press Enter to continue: ");
        match self.ask(&prompt)? {
            Reply::Line(choice) if choice.trim().is_empty() => {}
            Reply::Line(choice) => match parse_track_number(&choice, len) {
                Ok(index) => {
                    let result = self.player.play_at(index);
                    self.report(result)?;
                }
                Err(msg) => writeln!(self.out, "{msg}")?,
            },
            Reply::Interrupted => {}
            Reply::Closed => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }
}
