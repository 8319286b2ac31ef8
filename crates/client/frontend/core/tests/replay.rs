mod common;

use std::io::Write;
use std::time::Duration;

use client_frontend_core::{EventConsumer, Navigation, PlaybackStatus, ReplaySource};
use common::*;
use game_core::{
    ClientIntent, Color, MessagePayload, MoveLog, MoveRecord, PlaybackAck, ReplayLoaded,
    ReplayPosition, ServerMessage,
};

const TOTAL: u32 = 5;

fn move_log(moves: usize) -> MoveLog {
    MoveLog::new(
        (0..moves)
            .map(|i| MoveRecord {
                player: if i % 2 == 0 { Color::Red } else { Color::Blue },
                piece_index: 0,
                position: [i % 8, i % 6],
                rotation: 0,
            })
            .collect(),
    )
}

/// Snapshot shown at replay move `n`; the turn count identifies it.
fn at_move(n: u32) -> game_core::GameSnapshot {
    let current = if n % 2 == 0 { Color::Red } else { Color::Blue };
    snapshot(current, n)
}

fn position(n: u32) -> ReplayPosition {
    ReplayPosition {
        move_number: n,
        snapshot: at_move(n),
        total_moves: Some(TOTAL),
    }
}

fn loaded() -> TestSession {
    let mut session = session();
    session.load_replay(ReplaySource::Log(move_log(TOTAL as usize)));
    session.on_message(ServerMessage::ReplayLoaded(ReplayLoaded {
        total_moves: TOTAL,
        snapshot: at_move(0),
        message: None,
    }));
    session
}

fn count(session: &TestSession, predicate: impl Fn(&ClientIntent) -> bool) -> usize {
    sent(session).iter().filter(|intent| predicate(intent)).count()
}

#[test]
fn load_sends_log_and_starts_paused_at_zero() {
    let session = loaded();

    assert!(matches!(
        sent(&session).first(),
        Some(ClientIntent::LoadReplayData { game_data }) if game_data.len() == TOTAL as usize
    ));
    assert_eq!(session.replay().status(), PlaybackStatus::Paused);
    assert_eq!(session.replay().current_move(), Some(0));
    assert_eq!(session.replay().total_moves(), Some(TOTAL));
    assert_eq!(session.presenter().last_present(), Some(&at_move(0)));
    assert_eq!(
        session.message_log().last().map(|entry| entry.text.as_str()),
        Some("Replay loaded: 5 moves")
    );
}

#[test]
fn malformed_document_never_reaches_the_remote() {
    let mut session = session();

    session.load_replay(ReplaySource::Document("{ not json".into()));
    session.load_replay(ReplaySource::Document(r#"{"move_history": []}"#.into()));
    session.load_replay(ReplaySource::Log(MoveLog::new(Vec::new())));

    assert!(sent(&session).is_empty());
    assert_eq!(session.replay().status(), PlaybackStatus::Unloaded);
    assert_eq!(session.message_log().len(), 3);
}

#[test]
fn file_sources_are_validated_locally() {
    let dir = tempfile::tempdir().expect("temp dir");

    let wrong = dir.path().join("game.txt");
    std::fs::write(&wrong, r#"{"move_history": [{"player": "R", "piece_index": 0, "position": [0, 0]}]}"#)
        .expect("write");
    let good = dir.path().join("game.json");
    let mut file = std::fs::File::create(&good).expect("create");
    write!(
        file,
        r#"{{"move_history": [{{"player": "R", "piece_index": 1, "position": [3, 1], "rotation": 2}}], "winner": "R"}}"#
    )
    .expect("write");

    let mut session = session();
    session.load_replay(ReplaySource::File(wrong));
    assert!(sent(&session).is_empty());

    session.load_replay(ReplaySource::File(good));
    match sent(&session) {
        [ClientIntent::LoadReplayData { game_data }] => {
            assert_eq!(game_data.len(), 1);
            assert!(game_data.extra.contains_key("winner"));
        }
        other => panic!("unexpected intents {other:?}"),
    }
    assert!(session.replay().is_loading());
}

#[test]
fn recorded_source_names_the_remote_recording() {
    let mut session = session();
    session.load_replay(ReplaySource::Recorded("game_0001.json".into()));
    assert_eq!(
        sent(&session),
        [ClientIntent::LoadReplay {
            filename: "game_0001.json".into()
        }]
    );
}

#[test]
fn autoplay_at_double_speed_runs_to_the_end_and_pauses() {
    let mut session = loaded();
    session.set_speed(2.0);
    assert_eq!(count(&session, |i| *i == ClientIntent::ReplayPlay), 0);

    session.play();
    let (timer, period) = session.scheduler().started[0];
    assert_eq!(period, Duration::from_millis(500));
    assert_eq!(session.replay().status(), PlaybackStatus::Playing);

    for n in 1..=TOTAL {
        session.playback_tick(timer);
        assert_eq!(sent(&session).last(), Some(&ClientIntent::ReplayStepForward));
        session.on_message(ServerMessage::ReplayStep(position(n)));
    }

    assert_eq!(session.replay().current_move(), Some(TOTAL));
    assert_eq!(session.replay().status(), PlaybackStatus::Paused);
    assert_eq!(sent(&session).last(), Some(&ClientIntent::ReplayPause));
    assert!(session.scheduler().active().is_empty());
    assert_eq!(count(&session, |i| *i == ClientIntent::ReplayStepForward), 5);
}

#[test]
fn play_is_idempotent() {
    let mut session = loaded();
    session.play();
    session.play();

    assert_eq!(count(&session, |i| *i == ClientIntent::ReplayPlay), 1);
    assert_eq!(session.scheduler().started.len(), 1);

    session.pause();
    session.pause();
    assert_eq!(count(&session, |i| *i == ClientIntent::ReplayPause), 1);
    assert!(session.scheduler().active().is_empty());
}

#[test]
fn step_forward_at_end_is_refused_locally() {
    let mut session = loaded();
    session.goto_move(i64::from(TOTAL));
    session.on_message(ServerMessage::ReplayGoto(position(TOTAL)));
    let sent_before = sent(&session).len();

    session.step_forward();

    assert_eq!(sent(&session).len(), sent_before);
    assert_eq!(session.replay().current_move(), Some(TOTAL));
}

#[test]
fn step_back_at_start_is_refused_locally() {
    let mut session = loaded();
    let sent_before = sent(&session).len();
    session.step_back();
    assert_eq!(sent(&session).len(), sent_before);
}

#[test]
fn goto_every_move_renders_its_snapshot() {
    let mut session = loaded();

    for k in 0..TOTAL {
        session.goto_move(i64::from(k));
        assert_eq!(
            sent(&session).last(),
            Some(&ClientIntent::ReplayGoto { move_number: k })
        );
        session.on_message(ServerMessage::ReplayGoto(position(k)));

        assert_eq!(session.replay().current_move(), Some(k));
        assert_eq!(session.presenter().last_present(), Some(&at_move(k)));
        assert_eq!(session.replay().snapshot(), Some(&at_move(k)));
    }
}

#[test]
fn goto_rejects_obviously_invalid_targets() {
    let mut session = loaded();
    let sent_before = sent(&session).len();

    session.goto_move(-1);
    session.goto_move(i64::from(TOTAL) + 1);

    assert_eq!(sent(&session).len(), sent_before);
    assert!(
        session
            .message_log()
            .last()
            .is_some_and(|entry| entry.text.contains("out of range"))
    );
}

#[test]
fn one_navigation_in_flight_at_a_time() {
    let mut session = loaded();
    session.step_forward();
    session.step_forward();
    session.goto_move(3);

    assert_eq!(count(&session, |i| *i == ClientIntent::ReplayStepForward), 1);
    assert_eq!(
        count(&session, |i| matches!(i, ClientIntent::ReplayGoto { .. })),
        0
    );
    assert_eq!(session.replay().in_flight(), Some(Navigation::StepForward));

    session.on_message(ServerMessage::ReplayStep(position(1)));
    assert_eq!(session.replay().in_flight(), None);
    session.goto_move(3);
    assert_eq!(sent(&session).last(), Some(&ClientIntent::ReplayGoto { move_number: 3 }));
}

#[test]
fn tick_skips_while_a_step_is_outstanding() {
    let mut session = loaded();
    session.play();
    let timer = session.scheduler().started[0].0;

    session.playback_tick(timer);
    session.playback_tick(timer);

    assert_eq!(count(&session, |i| *i == ClientIntent::ReplayStepForward), 1);
}

#[test]
fn stale_tick_is_ignored() {
    let mut session = loaded();
    session.play();
    let timer = session.scheduler().started[0].0;
    session.pause();

    let sent_before = sent(&session).len();
    session.playback_tick(timer);
    assert_eq!(sent(&session).len(), sent_before);
}

#[test]
fn result_after_pause_is_applied_without_resuming() {
    let mut session = loaded();
    session.play();
    let timer = session.scheduler().started[0].0;
    session.playback_tick(timer);
    session.pause();

    session.on_message(ServerMessage::ReplayStep(position(1)));

    assert_eq!(session.replay().current_move(), Some(1));
    assert_eq!(session.replay().status(), PlaybackStatus::Paused);
    assert_eq!(session.scheduler().started.len(), 1);
}

#[test]
fn speed_change_while_playing_replaces_the_timer() {
    let mut session = loaded();
    session.play();
    session.set_speed(4.0);

    let active = session.scheduler().active();
    assert_eq!(active.len(), 1);
    let (_, period) = *session
        .scheduler()
        .started
        .last()
        .expect("restarted timer");
    assert_eq!(period, Duration::from_millis(250));
    assert_eq!(session.replay().status(), PlaybackStatus::Playing);
}

#[test]
fn invalid_speed_is_rejected() {
    let mut session = loaded();
    session.set_speed(0.0);
    session.set_speed(f64::NAN);
    session.set_speed(-2.0);
    assert_eq!(session.replay().speed(), 1.0);
}

#[test]
fn end_of_range_error_pauses_autoplay() {
    let mut session = loaded();
    session.play();
    let timer = session.scheduler().started[0].0;
    session.playback_tick(timer);

    session.on_message(ServerMessage::ReplayError(MessagePayload::new(
        "Already at end of replay",
    )));

    assert_eq!(session.replay().status(), PlaybackStatus::Paused);
    assert_eq!(session.replay().in_flight(), None);
    assert!(session.scheduler().active().is_empty());
}

#[test]
fn start_boundary_error_keeps_playing_state() {
    let mut session = loaded();
    session.play();
    session.on_message(ServerMessage::ReplayError(MessagePayload::new(
        "Already at start of replay",
    )));
    assert_eq!(session.replay().status(), PlaybackStatus::Playing);
}

#[test]
fn failed_load_returns_to_unloaded() {
    let mut session = session();
    session.load_replay(ReplaySource::Log(move_log(2)));
    session.on_message(ServerMessage::ReplayError(MessagePayload::new(
        "Failed to load replay",
    )));

    assert_eq!(session.replay().status(), PlaybackStatus::Unloaded);
    assert!(!session.replay().is_loading());
    assert!(session.message_log().last().is_some_and(|entry| entry.blocking));
}

#[test]
fn loading_again_discards_the_session() {
    let mut session = loaded();
    session.play();

    session.load_replay(ReplaySource::Log(move_log(3)));
    assert!(session.replay().is_loading());
    assert!(session.scheduler().active().is_empty());
    assert_eq!(count(&session, |i| *i == ClientIntent::ReplayPause), 1);

    session.on_message(ServerMessage::ReplayLoaded(ReplayLoaded {
        total_moves: 3,
        snapshot: at_move(0),
        message: None,
    }));
    assert_eq!(session.replay().total_moves(), Some(3));
    assert_eq!(session.replay().current_move(), Some(0));
}

#[test]
fn playback_acks_do_not_redraw() {
    let mut session = loaded();
    let impact = session.on_message(ServerMessage::ReplayPlaying(PlaybackAck::default()));
    assert!(!impact.requires_redraw);
}

#[test]
fn vanishing_speed_is_rejected_and_play_still_works() {
    let mut session = loaded();
    session.set_speed(1e-20);
    assert_eq!(session.replay().speed(), 1.0);

    session.play();
    assert_eq!(session.scheduler().started[0].1, Duration::from_millis(1000));
}

#[test]
fn slowest_speed_yields_a_bounded_period() {
    let mut session = loaded();
    session.set_speed(0.01);
    session.play();

    let period = session.scheduler().started[0].1;
    assert!(period <= client_frontend_core::ReplayConfig::MAX_PERIOD);
    assert_eq!(session.replay().status(), PlaybackStatus::Playing);
}

#[test]
fn offline_load_keeps_the_current_replay() {
    let mut session = loaded();
    session.step_forward();
    session.on_message(ServerMessage::ReplayStep(position(1)));
    session.remote_mut().offline = true;

    session.load_replay(ReplaySource::Log(move_log(3)));

    assert!(!session.replay().is_loading());
    assert_eq!(session.replay().total_moves(), Some(TOTAL));
    assert_eq!(session.replay().current_move(), Some(1));
    assert!(session.replay().snapshot().is_some());
}

#[test]
fn unrelated_errors_mentioning_end_are_faults() {
    for message in ["Move failed: defender pending", "Unexpected end of data"] {
        let mut session = loaded();
        session.play();
        session.on_message(ServerMessage::ReplayError(MessagePayload::new(message)));

        assert_eq!(session.replay().status(), PlaybackStatus::Paused);
        let entry = session.message_log().last().expect("notified");
        assert!(entry.text.starts_with("Replay error:"), "{}", entry.text);
    }
}

#[test]
fn invalid_move_number_is_recoverable() {
    let mut session = loaded();
    session.play();
    session.on_message(ServerMessage::ReplayError(MessagePayload::new(
        "Invalid move number",
    )));
    assert_eq!(session.replay().status(), PlaybackStatus::Playing);
    let entry = session.message_log().last().expect("notified");
    assert!(entry.text.starts_with("Replay:"));
}
