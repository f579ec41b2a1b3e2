use std::time::Duration;

use glam::Vec2;
use playstep_core::{Command, Event, GameMode, KeyCode, SimulationSnapshot};
use playstep_session::{apply, query, Config, Session};

const FRAME: Duration = Duration::from_millis(16);

fn session() -> Session {
    Session::new(Config::default()).expect("default config is valid")
}

fn run(session: &mut Session, commands: impl IntoIterator<Item = Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        apply(session, command, &mut events);
    }
    events
}

fn player_position(session: &Session) -> Vec2 {
    match query::simulation_snapshot(session) {
        SimulationSnapshot::Movement(movement) => movement.position,
        SimulationSnapshot::Snake(_) => panic!("expected the movement sandbox"),
    }
}

#[test]
fn new_session_starts_on_the_first_movement_step() {
    let session = session();
    let view = query::current_step_view(&session);

    assert_eq!(view.mode, GameMode::Movement);
    assert_eq!(view.index, 0);
    assert_eq!(view.total, 20);
    assert!(!view.is_last);
    assert!(!view.completed);
    assert_eq!(view.simulation.mode(), GameMode::Movement);
    assert_eq!(query::scheduler_interval(&session), Some(FRAME));
}

#[test]
fn advancing_resets_the_simulation_and_rearms_the_timer() {
    let mut session = session();
    let events = run(&mut session, [Command::Advance]);

    assert_eq!(
        events,
        vec![
            Event::StepChanged { index: 1 },
            Event::SimulationReset {
                mode: GameMode::Movement
            },
            Event::SchedulerArmed { interval: FRAME },
        ]
    );
    assert_eq!(query::step_index(&session), 1);
}

#[test]
fn navigation_past_either_end_is_silent() {
    let mut session = session();
    assert!(run(&mut session, [Command::Retreat]).is_empty());
    assert_eq!(query::step_index(&session), 0);

    let _ = run(&mut session, std::iter::repeat(Command::Advance).take(40));
    assert_eq!(query::step_index(&session), 19);
    assert!(query::is_last_step(&session));
    assert!(run(&mut session, [Command::Advance]).is_empty());
}

#[test]
fn progress_is_discarded_when_navigating() {
    let mut session = session();
    let _ = run(&mut session, std::iter::repeat(Command::Advance).take(5));
    let _ = run(
        &mut session,
        [Command::SetKey {
            key: KeyCode::ArrowRight,
            pressed: true,
        }],
    );
    let _ = run(&mut session, std::iter::repeat(Command::Tick { dt: FRAME }).take(10));
    assert_eq!(player_position(&session), Vec2::new(80.0, 175.0));

    let _ = run(&mut session, [Command::Advance]);
    assert_eq!(player_position(&session), Vec2::new(50.0, 175.0));
    assert!(query::is_pressed(&session, KeyCode::ArrowRight));
}

#[test]
fn held_keys_do_nothing_before_movement_is_taught() {
    let mut session = session();
    let _ = run(
        &mut session,
        [
            Command::SetKey {
                key: KeyCode::ArrowRight,
                pressed: true,
            },
            Command::Tick {
                dt: Duration::from_millis(100),
            },
        ],
    );
    assert_eq!(player_position(&session), Vec2::new(50.0, 175.0));
}

#[test]
fn tick_bursts_are_capped() {
    let mut session = session();
    let _ = run(&mut session, std::iter::repeat(Command::Advance).take(5));
    let _ = run(
        &mut session,
        [
            Command::SetKey {
                key: KeyCode::KeyD,
                pressed: true,
            },
            Command::Tick {
                dt: Duration::from_secs(5),
            },
        ],
    );
    assert_eq!(player_position(&session), Vec2::new(74.0, 175.0));
}

#[test]
fn restart_rebuilds_the_active_simulation() {
    let mut session = session();
    let events = run(&mut session, [Command::Restart]);
    assert_eq!(
        events,
        vec![
            Event::SimulationReset {
                mode: GameMode::Movement
            },
            Event::SchedulerArmed { interval: FRAME },
        ]
    );
    assert_eq!(query::step_index(&session), 0);
}

#[test]
fn switching_modes_replaces_the_track() {
    let mut session = session();
    let _ = run(&mut session, [Command::Advance, Command::Advance]);

    let events = run(
        &mut session,
        [Command::SwitchMode {
            mode: GameMode::Snake,
        }],
    );
    assert_eq!(
        events,
        vec![
            Event::ModeChanged {
                mode: GameMode::Snake
            },
            Event::StepChanged { index: 0 },
            Event::SimulationReset {
                mode: GameMode::Snake
            },
            Event::SchedulerArmed {
                interval: Duration::from_millis(150)
            },
        ]
    );
    assert_eq!(query::mode(&session), GameMode::Snake);
    assert_eq!(query::step_count(&session), 31);
    assert_eq!(query::step_index(&session), 0);

    assert!(run(
        &mut session,
        [Command::SwitchMode {
            mode: GameMode::Snake
        }]
    )
    .is_empty());
}

#[test]
fn switching_modes_releases_held_keys() {
    let mut session = session();
    let _ = run(
        &mut session,
        [
            Command::SetKey {
                key: KeyCode::ArrowRight,
                pressed: true,
            },
            Command::SetKey {
                key: KeyCode::KeyR,
                pressed: true,
            },
        ],
    );
    assert!(query::is_pressed(&session, KeyCode::ArrowRight));

    let _ = run(
        &mut session,
        [Command::SwitchMode {
            mode: GameMode::Snake,
        }],
    );
    assert!(!query::is_pressed(&session, KeyCode::ArrowRight));
    assert!(!query::is_pressed(&session, KeyCode::KeyR));
}

#[test]
fn completion_is_only_accepted_on_the_last_step() {
    let mut session = session();
    assert!(run(&mut session, [Command::Complete]).is_empty());
    assert!(!query::is_completed(&session));

    let _ = run(&mut session, std::iter::repeat(Command::Advance).take(19));
    let events = run(&mut session, [Command::Complete, Command::Complete]);
    assert_eq!(
        events,
        vec![Event::TutorialCompleted {
            mode: GameMode::Movement
        }]
    );
    assert!(query::current_step_view(&session).completed);

    let _ = run(
        &mut session,
        [Command::SwitchMode {
            mode: GameMode::Snake,
        }],
    );
    assert!(!query::is_completed(&session));
}

#[test]
fn step_view_reports_cumulative_features() {
    let mut session = session();
    let _ = run(&mut session, std::iter::repeat(Command::Advance).take(8));
    let view = query::current_step_view(&session);

    assert_eq!(view.features, query::cumulative_features(&session));
    assert_eq!(
        view.features.names(),
        vec![
            "PLAY_FIELD",
            "PLAYER",
            "BASIC_MOVEMENT",
            "LEFT_MOVEMENT",
            "FULL_MOVEMENT"
        ]
    );
}
