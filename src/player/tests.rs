use super::*;
use super::model::NoOp;
use crate::audio::fake::{Call, FakeEngine};
use crate::library::Track;
use std::path::PathBuf;
use std::time::Duration;

fn t(name: &str) -> Track {
    Track {
        path: PathBuf::from(format!("/music/{name}.mp3")),
        display: name.into(),
        duration: None,
    }
}

fn player_with(names: &[&str]) -> Player<FakeEngine> {
    let mut player = Player::new(FakeEngine::default());
    player.load(names.iter().map(|n| t(n)).collect());
    player
}

#[test]
fn new_player_is_empty() {
    let player = Player::new(FakeEngine::default());
    assert_eq!(player.state(), PlaybackState::Empty);
    assert!(player.current_track().is_none());
}

#[test]
fn load_moves_to_stopped_without_selection() {
    let player = player_with(&["A", "B"]);
    assert_eq!(player.state(), PlaybackState::Stopped(None));
    assert_eq!(player.playlist().len(), 2);
    assert!(player.engine().calls.is_empty());
}

#[test]
fn play_at_starts_track_and_tells_engine() {
    let mut player = player_with(&["A", "B", "C"]);
    assert_eq!(player.play_at(1).unwrap(), Outcome::Started(1));
    assert_eq!(player.state(), PlaybackState::Playing(1));
    assert_eq!(player.current_track().unwrap().display, "B");
    assert_eq!(
        player.engine().loads(),
        vec![PathBuf::from("/music/B.mp3")]
    );
}

#[test]
fn play_at_out_of_range_is_invalid_index_and_changes_nothing() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(0).unwrap();

    let err = player.play_at(2).unwrap_err();
    assert!(matches!(err, PlayerError::InvalidIndex { index: 2, len: 2 }));
    assert_eq!(player.state(), PlaybackState::Playing(0));

    assert!(matches!(
        player.play_at(usize::MAX),
        Err(PlayerError::InvalidIndex { .. })
    ));
    assert_eq!(player.engine().loads().len(), 1);
}

#[test]
fn play_at_on_empty_playlist_fails() {
    let mut player = Player::new(FakeEngine::default());
    assert!(matches!(player.play_at(0), Err(PlayerError::EmptyPlaylist)));
    assert_eq!(player.state(), PlaybackState::Empty);
}

#[test]
fn play_at_engine_failure_leaves_state_unchanged() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(0).unwrap();
    player.engine_mut().fail_on("/music/B.mp3");

    let err = player.play_at(1).unwrap_err();
    assert!(matches!(err, PlayerError::Engine(_)));
    assert_eq!(player.state(), PlaybackState::Playing(0));
}

#[test]
fn next_len_times_returns_to_start() {
    let names = ["A", "B", "C", "D", "E"];
    for start in 0..names.len() {
        let mut player = player_with(&names);
        player.play_at(start).unwrap();
        for _ in 0..names.len() {
            player.next().unwrap();
        }
        assert_eq!(player.state(), PlaybackState::Playing(start));
    }
}

#[test]
fn next_wraps_from_last_to_first() {
    let mut player = player_with(&["A", "B", "C"]);
    player.play_at(2).unwrap();
    assert_eq!(player.next().unwrap(), Outcome::Started(0));
}

#[test]
fn previous_from_first_wraps_to_last() {
    let mut player = player_with(&["A", "B", "C"]);
    player.play_at(0).unwrap();
    assert_eq!(player.previous().unwrap(), Outcome::Started(2));
    assert_eq!(player.previous().unwrap(), Outcome::Started(1));
}

#[test]
fn next_and_previous_without_selection_pick_the_ends() {
    let mut player = player_with(&["A", "B", "C"]);
    assert_eq!(player.next().unwrap(), Outcome::Started(0));

    let mut player = player_with(&["A", "B", "C"]);
    assert_eq!(player.previous().unwrap(), Outcome::Started(2));
}

#[test]
fn next_from_paused_plays_following_track() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(0).unwrap();
    player.pause();
    assert_eq!(player.next().unwrap(), Outcome::Started(1));
    assert_eq!(player.state(), PlaybackState::Playing(1));
}

#[test]
fn single_track_playlist_wraps_onto_itself() {
    let mut player = player_with(&["Only"]);
    player.play_at(0).unwrap();
    assert_eq!(player.next().unwrap(), Outcome::Started(0));
    assert_eq!(player.previous().unwrap(), Outcome::Started(0));
}

#[test]
fn empty_playlist_operations_are_no_ops() {
    let mut player = Player::new(FakeEngine::default());
    let empty = Outcome::Unchanged(NoOp::EmptyPlaylist);
    assert_eq!(player.next().unwrap(), empty);
    assert_eq!(player.previous().unwrap(), empty);
    assert_eq!(player.toggle_play_pause().unwrap(), empty);
    assert_eq!(player.state(), PlaybackState::Empty);
    assert!(player.engine().calls.is_empty());

    // Loading an empty scan behaves the same way.
    player.load(Vec::new());
    assert_eq!(player.next().unwrap(), empty);
}

#[test]
fn pause_then_resume_restores_playing_state() {
    let mut player = player_with(&["A", "B", "C"]);
    player.play_at(2).unwrap();
    let before = player.state();

    assert_eq!(player.pause(), Outcome::Paused(2));
    assert_eq!(player.state(), PlaybackState::Paused(2));
    assert_eq!(player.resume(), Outcome::Resumed(2));
    assert_eq!(player.state(), before);

    let calls = &player.engine().calls;
    assert_eq!(calls[calls.len() - 2..], [Call::Pause, Call::Resume]);
}

#[test]
fn pause_and_resume_in_wrong_state_report_no_op() {
    let mut player = player_with(&["A"]);
    assert_eq!(player.pause(), Outcome::Unchanged(NoOp::NotPlaying));
    assert_eq!(player.resume(), Outcome::Unchanged(NoOp::NotPaused));

    player.play_at(0).unwrap();
    assert_eq!(player.resume(), Outcome::Unchanged(NoOp::NotPaused));
    player.pause();
    assert_eq!(player.pause(), Outcome::Unchanged(NoOp::AlreadyPaused));
    assert_eq!(player.state(), PlaybackState::Paused(0));
}

#[test]
fn toggle_cycles_through_states() {
    let mut player = player_with(&["A", "B"]);

    // Stopped with nothing selected starts the first track.
    assert_eq!(player.toggle_play_pause().unwrap(), Outcome::Started(0));
    assert_eq!(player.toggle_play_pause().unwrap(), Outcome::Paused(0));
    assert_eq!(player.toggle_play_pause().unwrap(), Outcome::Resumed(0));

    // Stopped with a selection restarts that selection.
    player.next().unwrap();
    assert_eq!(player.stop(), Outcome::Stopped(1));
    assert_eq!(player.state(), PlaybackState::Stopped(Some(1)));
    assert_eq!(player.toggle_play_pause().unwrap(), Outcome::Started(1));
}

#[test]
fn stop_only_applies_while_sounding() {
    let mut player = player_with(&["A"]);
    assert_eq!(player.stop(), Outcome::Unchanged(NoOp::NotPlaying));
    player.play_at(0).unwrap();
    player.pause();
    assert_eq!(player.stop(), Outcome::Stopped(0));
    assert_eq!(player.engine().calls.last(), Some(&Call::Stop));
}

#[test]
fn poll_without_events_does_nothing() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(0).unwrap();
    assert_eq!(player.poll_track_end().unwrap(), None);
    assert_eq!(player.state(), PlaybackState::Playing(0));
}

#[test]
fn poll_advances_once_per_call() {
    let mut player = player_with(&["A", "B", "C"]);
    player.play_at(0).unwrap();

    player.engine_mut().finish_track();
    player.engine_mut().finish_track();
    assert_eq!(player.poll_track_end().unwrap(), Some(Outcome::Started(1)));
    assert_eq!(player.state(), PlaybackState::Playing(1));

    // Both queued events were consumed by the single advance.
    assert_eq!(player.poll_track_end().unwrap(), None);
    assert_eq!(player.state(), PlaybackState::Playing(1));
}

#[test]
fn poll_wraps_at_end_of_playlist() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(1).unwrap();
    player.engine_mut().finish_track();
    assert_eq!(player.poll_track_end().unwrap(), Some(Outcome::Started(0)));
}

#[test]
fn poll_ignores_track_end_while_paused() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(0).unwrap();
    player.pause();
    player.engine_mut().finish_track();
    assert_eq!(player.poll_track_end().unwrap(), None);
    assert_eq!(player.state(), PlaybackState::Paused(0));
}

#[test]
fn poll_failure_stops_on_finished_track() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(0).unwrap();
    player.engine_mut().fail_on("/music/B.mp3");
    player.engine_mut().finish_track();

    assert!(matches!(
        player.poll_track_end(),
        Err(PlayerError::Engine(_))
    ));
    assert_eq!(player.state(), PlaybackState::Stopped(Some(0)));
    assert_eq!(player.engine().calls.last(), Some(&Call::Stop));
}

#[test]
fn reload_keeps_selection_when_track_survives() {
    let mut player = player_with(&["A", "B", "C"]);
    player.play_at(1).unwrap();

    player.load(vec![t("C"), t("B"), t("Z")]);
    assert_eq!(player.state(), PlaybackState::Playing(1));

    player.load(vec![t("B"), t("Z")]);
    assert_eq!(player.state(), PlaybackState::Playing(0));
    assert_eq!(player.current_track().unwrap().display, "B");
    assert!(!player.engine().calls.contains(&Call::Stop));
}

#[test]
fn reload_keeps_paused_selection() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(1).unwrap();
    player.pause();

    player.load(vec![t("X"), t("A"), t("B")]);
    assert_eq!(player.state(), PlaybackState::Paused(2));
}

#[test]
fn reload_without_current_track_resets_to_stopped() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(1).unwrap();

    player.load(vec![t("A"), t("C")]);
    assert_eq!(player.state(), PlaybackState::Stopped(None));
    assert_eq!(player.engine().calls.last(), Some(&Call::Stop));
}

#[test]
fn reload_to_empty_playlist_empties_player() {
    let mut player = player_with(&["A"]);
    player.play_at(0).unwrap();

    player.load(Vec::new());
    assert_eq!(player.state(), PlaybackState::Empty);
    assert_eq!(player.engine().calls.last(), Some(&Call::Stop));
}

#[test]
fn shutdown_releases_engine_and_keeps_selection() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(1).unwrap();
    player.shutdown(Duration::ZERO);
    assert_eq!(player.state(), PlaybackState::Stopped(Some(1)));
    assert_eq!(player.engine().calls.last(), Some(&Call::Shutdown));
}

#[test]
fn toggle_restarts_a_track_that_went_silent() {
    let mut player = player_with(&["A", "B"]);
    player.play_at(1).unwrap();
    // The engine drained the track before the end was polled.
    player.engine_mut().loaded = None;

    assert_eq!(player.toggle_play_pause().unwrap(), Outcome::Started(1));
    assert_eq!(player.engine().loads().len(), 2);
}
