use std::time::Duration;

use playstep_core::{Command, Direction, Event, GameMode, GridCell, KeyCode, SnakeSnapshot};
use playstep_session::{apply, query, Config, Session};

const SNAKE_TICK: Duration = Duration::from_millis(150);

fn snake_session(config: Config, step: usize) -> Session {
    let mut session = Session::with_mode(config, GameMode::Snake).expect("valid config");
    let mut events = Vec::new();
    for _ in 0..step {
        apply(&mut session, Command::Advance, &mut events);
    }
    session
}

fn snake(session: &Session) -> SnakeSnapshot {
    match query::simulation_snapshot(session) {
        playstep_core::SimulationSnapshot::Snake(snake) => snake,
        playstep_core::SimulationSnapshot::Movement(_) => panic!("expected the snake game"),
    }
}

fn key(session: &mut Session, key: KeyCode, pressed: bool) -> Vec<Event> {
    let mut events = Vec::new();
    apply(session, Command::SetKey { key, pressed }, &mut events);
    events
}

fn ticks(session: &mut Session, count: usize) -> Vec<Event> {
    let mut events = Vec::new();
    for _ in 0..count {
        apply(session, Command::Tick { dt: SNAKE_TICK }, &mut events);
    }
    events
}

#[test]
fn snake_stays_still_until_movement_is_taught() {
    let mut session = snake_session(Config::default(), 4);
    let _ = ticks(&mut session, 5);
    assert_eq!(snake(&session).head(), Some(GridCell::new(200, 200)));

    let mut session = snake_session(Config::default(), 5);
    let _ = ticks(&mut session, 2);
    assert_eq!(snake(&session).head(), Some(GridCell::new(240, 200)));
}

#[test]
fn arrow_edges_turn_the_snake_once_per_press() {
    let mut session = snake_session(Config::default(), 30);

    assert_eq!(
        key(&mut session, KeyCode::ArrowUp, true),
        vec![Event::DirectionChanged {
            direction: Direction::Up
        }]
    );
    // Auto-repeat reports the held key again without a release.
    assert!(key(&mut session, KeyCode::ArrowUp, true).is_empty());

    let _ = ticks(&mut session, 1);
    assert_eq!(snake(&session).head(), Some(GridCell::new(200, 180)));

    let _ = key(&mut session, KeyCode::ArrowUp, false);
    assert!(key(&mut session, KeyCode::ArrowDown, true).is_empty());
    assert_eq!(snake(&session).direction, Direction::Up);

    assert_eq!(
        key(&mut session, KeyCode::KeyA, true),
        vec![Event::DirectionChanged {
            direction: Direction::Left
        }]
    );
}

#[test]
fn arrows_are_ignored_before_direction_control() {
    let mut session = snake_session(Config::default(), 5);
    assert!(key(&mut session, KeyCode::ArrowUp, true).is_empty());
    assert_eq!(snake(&session).direction, Direction::Right);
}

#[test]
fn restart_key_only_revives_a_finished_game() {
    let mut session = snake_session(Config::default(), 30);
    assert!(key(&mut session, KeyCode::Space, true).is_empty());
    let _ = key(&mut session, KeyCode::Space, false);

    let events = ticks(&mut session, 40);
    assert!(snake(&session).game_over);
    assert!(events.iter().any(|event| matches!(event, Event::GameOver { .. })));

    let events = key(&mut session, KeyCode::KeyR, true);
    assert!(events.contains(&Event::SimulationReset {
        mode: GameMode::Snake
    }));
    let fresh = snake(&session);
    assert!(!fresh.game_over);
    assert_eq!(fresh.score, 0);
    assert_eq!(fresh.body.len(), 3);
    assert_eq!(query::scheduler_interval(&session), Some(SNAKE_TICK));
}

#[test]
fn restart_key_is_locked_until_taught() {
    let mut session = snake_session(Config::default(), 21);
    let _ = ticks(&mut session, 40);
    assert!(snake(&session).game_over);

    assert!(key(&mut session, KeyCode::Space, true).is_empty());
    assert!(snake(&session).game_over);
}

#[test]
fn speed_changes_rearm_the_scheduler() {
    let mut config = Config::default();
    config.snake.speed_up_every = 10;
    let mut session = snake_session(config, 30);

    let events = ticks(&mut session, 5);
    let speed_changed = Event::SpeedChanged {
        interval: Duration::from_millis(140),
    };
    let position = events
        .iter()
        .position(|event| *event == speed_changed)
        .expect("first meal speeds the snake up");
    assert_eq!(
        events.get(position + 1),
        Some(&Event::SchedulerArmed {
            interval: Duration::from_millis(140)
        })
    );
    assert_eq!(
        query::scheduler_interval(&session),
        Some(Duration::from_millis(140))
    );
    assert_eq!(snake(&session).score, 10);
}

#[test]
fn restarted_games_reach_the_first_meal_again() {
    let mut session = snake_session(Config::default(), 30);
    let mut first = ticks(&mut session, 5);
    first.retain(|event| matches!(event, Event::FoodPlaced { .. }));

    let mut events = Vec::new();
    apply(&mut session, Command::Restart, &mut events);
    let mut second = ticks(&mut session, 5);
    second.retain(|event| matches!(event, Event::FoodPlaced { .. }));

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 1);
}
